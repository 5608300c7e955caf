//! Device identity and discovery types

use chrono::{DateTime, Utc};
use std::fmt;

/// Hardware id of the notify sub-device (the one exposing `_DSM`).
pub const NOTIFY_DEVICE_ID: &str = "MSHW0091";

/// Hardware id of the embedded-controller sub-device.
pub const CONTROLLER_DEVICE_ID: &str = "MSHW0084";

/// Opaque reference to a resolved firmware namespace object.
///
/// The object itself is owned by the firmware subsystem and is never freed
/// here. An unresolved reference is represented as `None` in an
/// `Option<ObjectHandle>`, not as a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectHandle(String);

impl ObjectHandle {
    /// Wrap an absolute namespace path that the bus has resolved.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role a sub-device plays, decided once at attach time by probing for the
/// dispatch method and pattern-matched afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRole {
    /// Exposes `_DSM`; the host's signalling channel to firmware-managed
    /// battery and power features.
    Notify,
    /// Lacks `_DSM`; only needs basic initialization.
    Controller,
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceRole::Notify => "notify",
            DeviceRole::Controller => "controller",
        })
    }
}

/// A sub-device found during platform enumeration.
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    /// Hardware id, matched by exact string.
    pub hardware_id: String,
    /// Namespace object backing the device.
    pub handle: ObjectHandle,
    /// When enumeration saw the device.
    pub discovered_at: DateTime<Utc>,
}

impl DiscoveredDevice {
    pub fn new(hardware_id: impl Into<String>, handle: ObjectHandle) -> Self {
        Self {
            hardware_id: hardware_id.into(),
            handle,
            discovered_at: Utc::now(),
        }
    }
}
