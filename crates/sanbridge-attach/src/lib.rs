//! Sanbridge Attach - platform enumeration and attach sequencing
//!
//! Drives the lifecycle of the two platform sub-devices: find them in the
//! namespace, run the role-specific attach sequence, forward firmware
//! notifications, and tear everything down on removal.

pub mod enumerate;
pub mod observer;
pub mod sequencer;

pub use enumerate::{enumerate_devices, CONTROLLER_DEVICE_PATH, NOTIFY_DEVICE_PATH};
pub use observer::{run_notify_loop, LogObserver, NotifyObserver};
pub use sequencer::AttachSequencer;
