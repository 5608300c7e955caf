//! Firmware notification forwarding

use sanbridge_acpi::Notification;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Receives notifications the firmware raises against the notify device.
///
/// Implementations must not block and never get access to the attach
/// context; reacting to an event stays decoupled from attach state.
pub trait NotifyObserver: Send + Sync {
    fn firmware_event(&self, source: &str, code: u32);
}

/// Default observer. Logs the event code and takes no further action.
#[derive(Debug, Default)]
pub struct LogObserver;

impl NotifyObserver for LogObserver {
    fn firmware_event(&self, source: &str, code: u32) {
        info!(source, code = %format_args!("{code:#04x}"), "Event received");
    }
}

/// Forward notifications to the observer until the channel closes.
///
/// A lagged receiver skips ahead instead of stalling the sender.
pub async fn run_notify_loop(
    mut rx: broadcast::Receiver<Notification>,
    observer: Arc<dyn NotifyObserver>,
) {
    loop {
        match rx.recv().await {
            Ok(note) => observer.firmware_event(&note.source, note.code),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "Notification stream lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
