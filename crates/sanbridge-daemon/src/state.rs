//! Application state management

use sanbridge_acpi::SimBus;
use sanbridge_attach::{enumerate_devices, AttachSequencer};
use sanbridge_core::{AttachReport, SanContext};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;

/// Shared application state
pub struct AppState {
    /// Firmware namespace backend
    pub bus: Arc<SimBus>,
    /// Attach and removal sequencer
    pub sequencer: AttachSequencer,
    /// Attach context; written at attach and removal, read by handlers
    pub context: Arc<RwLock<SanContext>>,
    /// Configuration
    pub config: Config,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Arc<Self> {
        let bus = Arc::new(config.firmware.build_bus());
        let sequencer = AttachSequencer::new(bus.clone());
        Arc::new(Self {
            bus,
            sequencer,
            context: Arc::new(RwLock::new(SanContext::new())),
            config,
        })
    }

    /// Enumerate the platform and attach every device found, in table
    /// order, returning one report per device.
    pub async fn attach_all(&self) -> Vec<AttachReport> {
        let devices = enumerate_devices(self.bus.as_ref());
        let mut ctx = self.context.write().await;
        devices
            .iter()
            .map(|device| self.sequencer.attach(&mut ctx, device))
            .collect()
    }

    /// Tear down the published endpoints.
    pub async fn detach(&self) {
        let mut ctx = self.context.write().await;
        self.sequencer.remove(&mut ctx);
    }
}
