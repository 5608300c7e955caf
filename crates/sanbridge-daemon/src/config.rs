//! Configuration loading and the simulated firmware scenario

use anyhow::Result;
use sanbridge_acpi::{method, AcpiError, AcpiValue, Behavior, SimBus, SAN_RQST_PATH, SAN_RQSX_PATH};
use sanbridge_attach::{CONTROLLER_DEVICE_PATH, NOTIFY_DEVICE_PATH};
use sanbridge_core::EventCode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub daemon: DaemonConfig,
    #[serde(default)]
    pub firmware: FirmwareConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Bind address for the status server
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8383".to_string()
}

/// Scenario played by the simulated firmware namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmwareConfig {
    /// Whether the notify device exists in the namespace
    #[serde(default = "default_true")]
    pub notify_present: bool,
    /// Whether the embedded-controller device exists
    #[serde(default = "default_true")]
    pub controller_present: bool,
    /// Whether the request objects exist under the notify device
    #[serde(default = "default_true")]
    pub request_objects_present: bool,
    /// Raw event codes whose dispatch fails (unknown codes are ignored)
    #[serde(default)]
    pub fail_events: Vec<u8>,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            notify_present: true,
            controller_present: true,
            request_objects_present: true,
            fail_events: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl FirmwareConfig {
    /// Event codes scripted to fail, with unknown codes dropped.
    pub fn failing_events(&self) -> Vec<EventCode> {
        self.fail_events
            .iter()
            .filter_map(|&raw| {
                let code = EventCode::from_raw(u32::from(raw));
                if code.is_none() {
                    warn!(code = raw, "Unknown event code in fail_events, ignoring");
                }
                code
            })
            .collect()
    }

    /// Build the simulated namespace this scenario describes.
    pub fn build_bus(&self) -> SimBus {
        let bus = SimBus::new();

        if self.notify_present {
            bus.script_method(
                NOTIFY_DEVICE_PATH,
                method::STA,
                Behavior::Succeed(AcpiValue::Integer(0x0F)),
            );
            bus.script_method(
                NOTIFY_DEVICE_PATH,
                method::REG,
                Behavior::Succeed(AcpiValue::Integer(0)),
            );

            let failing: Vec<u64> = self
                .failing_events()
                .into_iter()
                .map(|code| u64::from(code.as_u8()))
                .collect();
            // The dispatch method insists on the four-argument frame shape
            bus.script_method(
                NOTIFY_DEVICE_PATH,
                method::DSM,
                Behavior::With(Arc::new(move |args| {
                    let event = match args {
                        [AcpiValue::Buffer(guid), AcpiValue::Integer(_), AcpiValue::Integer(event), AcpiValue::Package(_)]
                            if guid.len() == 16 =>
                        {
                            *event
                        }
                        _ => return Err(AcpiError::BadParameter),
                    };
                    if failing.contains(&event) {
                        Err(AcpiError::Failed)
                    } else {
                        Ok(AcpiValue::Integer(0))
                    }
                })),
            );

            if self.request_objects_present {
                bus.add_object(SAN_RQST_PATH);
                bus.add_object(SAN_RQSX_PATH);
            }
        }

        if self.controller_present {
            bus.script_method(
                CONTROLLER_DEVICE_PATH,
                method::STA,
                Behavior::Succeed(AcpiValue::Integer(0x0F)),
            );
            bus.script_method(
                CONTROLLER_DEVICE_PATH,
                method::INI,
                Behavior::Succeed(AcpiValue::Integer(0)),
            );
        }

        bus
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}
