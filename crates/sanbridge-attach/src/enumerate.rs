//! Platform device enumeration

use sanbridge_acpi::AcpiBus;
use sanbridge_core::{DiscoveredDevice, CONTROLLER_DEVICE_ID, NOTIFY_DEVICE_ID};
use tracing::{debug, info};

/// Namespace path of the notify device.
pub const NOTIFY_DEVICE_PATH: &str = "\\_SB._SAN";

/// Namespace path of the embedded-controller device.
pub const CONTROLLER_DEVICE_PATH: &str = "\\_SB._SSH";

/// The recognized platform devices and where they live in the namespace.
const DEVICE_TABLE: [(&str, &str); 2] = [
    (NOTIFY_DEVICE_ID, NOTIFY_DEVICE_PATH),
    (CONTROLLER_DEVICE_ID, CONTROLLER_DEVICE_PATH),
];

/// Find the recognized platform devices.
///
/// Hardware ids are matched by exact string. Absent devices are skipped;
/// table order is preserved so the notify device always attaches first.
pub fn enumerate_devices(bus: &dyn AcpiBus) -> Vec<DiscoveredDevice> {
    let mut found = Vec::new();
    for (hardware_id, path) in DEVICE_TABLE {
        match bus.resolve_path(path) {
            Ok(handle) => {
                info!(device = hardware_id, path, "Platform device present");
                found.push(DiscoveredDevice::new(hardware_id, handle));
            }
            Err(err) => {
                debug!(device = hardware_id, path, error = %err, "Platform device absent");
            }
        }
    }
    found
}
