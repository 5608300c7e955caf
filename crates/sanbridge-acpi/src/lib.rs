//! Sanbridge ACPI - firmware namespace boundary and notify protocol
//!
//! The firmware evaluation subsystem is opaque to the rest of the bridge;
//! everything goes through the `AcpiBus` trait. This crate provides:
//! - The value/object model and firmware failure codes
//! - The dispatch protocol spoken against the notify device
//! - A scripted in-memory namespace used for development and tests

pub mod bus;
pub mod protocol;
pub mod sim;
pub mod value;

pub use bus::{evaluate_integer, method, AcpiBus, AcpiError, Notification};
pub use protocol::{
    NotifyProtocol, RequestObjects, REG_AVAILABLE, REG_INIT, SAN_EVENT_GUID,
    SAN_GEN_REVISION, SAN_RQST_PATH, SAN_RQSX_PATH,
};
pub use sim::{Behavior, RecordedCall, SimBus};
pub use value::{AcpiValue, MethodInfo};
