//! Sanbridge Core - attach context, event codes, and status surface
//!
//! This crate provides the foundational types for the bridge:
//! - Event codes understood by the notify device's dispatch protocol
//! - The attach context and device registry shared by every callback
//! - Status endpoint names, publication state, and text rendering
//! - The per-attach outcome report and the error taxonomy

pub mod device;
pub mod error;
pub mod event;
pub mod registry;
pub mod report;
pub mod status;

pub use device::{
    DeviceRole, DiscoveredDevice, ObjectHandle, CONTROLLER_DEVICE_ID, NOTIFY_DEVICE_ID,
};
pub use error::SanError;
pub use event::EventCode;
pub use registry::{SanContext, SanRegistry};
pub use report::{AttachReport, BringupStep, StepOutcome};
pub use status::{Endpoint, EndpointSet, DRIVER_VERSION};
