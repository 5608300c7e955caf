//! Attach sequencing for discovered platform devices

use sanbridge_acpi::{evaluate_integer, method, AcpiBus, NotifyProtocol};
use sanbridge_core::{
    AttachReport, DeviceRole, DiscoveredDevice, EventCode, SanContext, SanError, StepOutcome,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Bring-up events in the order the firmware expects them.
const BRINGUP_SEQUENCE: [EventCode; 5] = [
    EventCode::SetDriverVersion,
    EventCode::SensorTripPoint,
    EventCode::Bat1InfoChange,
    EventCode::Bat2InfoChange,
    EventCode::PsuInfoChange,
];

/// Runs the attach and removal sequences against the firmware.
pub struct AttachSequencer {
    bus: Arc<dyn AcpiBus>,
}

impl AttachSequencer {
    pub fn new(bus: Arc<dyn AcpiBus>) -> Self {
        Self { bus }
    }

    /// Attach one discovered device.
    ///
    /// The role is decided once, by probing for the dispatch method, and
    /// never revisited. Every later step is recorded in the report; a
    /// failed step does not abort the rest of the sequence.
    pub fn attach(&self, ctx: &mut SanContext, device: &DiscoveredDevice) -> AttachReport {
        let role = if self.bus.has_method(&device.handle, method::DSM) {
            DeviceRole::Notify
        } else {
            DeviceRole::Controller
        };
        info!(device = %device.hardware_id, role = %role, "Attaching platform device");

        self.log_methods(device);

        let mut report = AttachReport::new(role);
        report.status_check = self.check_status(device);

        match role {
            DeviceRole::Notify => self.attach_notify(ctx, device, &mut report),
            DeviceRole::Controller => self.attach_controller(ctx, device, &mut report),
        }

        report
    }

    /// Tear down what attach published. Safe to call repeatedly and
    /// before any attach. Registry contents stay until the context itself
    /// is dropped at shutdown.
    pub fn remove(&self, ctx: &mut SanContext) {
        ctx.endpoints_mut().remove_all();
        info!("Status endpoints removed");
    }

    fn attach_notify(
        &self,
        ctx: &mut SanContext,
        device: &DiscoveredDevice,
        report: &mut AttachReport,
    ) {
        ctx.registry_mut().notify_handle = Some(device.handle.clone());

        let protocol = NotifyProtocol::new(self.bus.as_ref(), &device.handle);

        // Request objects are stored for later use; absent ones stay None
        let objects = protocol.lookup_request_objects();
        {
            let registry = ctx.registry_mut();
            registry.rqst_handle = objects.rqst;
            registry.rqsx_handle = objects.rqsx;
        }

        let registration = protocol.register_availability();
        if let Err(err) = &registration {
            warn!(error = %err, "Availability registration failed, continuing bring-up");
        }
        report.registration = Some(registration);

        // Fixed bring-up order, each step independent of the others
        for event in BRINGUP_SEQUENCE {
            let outcome = protocol.send_event(event);
            match &outcome {
                Ok(()) => debug!(event = %event, "Bring-up event accepted"),
                Err(err) => warn!(event = %event, error = %err, "Bring-up event failed"),
            }
            report.push_bringup(event, outcome);
        }

        // Flags only move from unset to set; nothing clears them before
        // the context itself is dropped at teardown
        {
            let registry = ctx.registry_mut();
            if report.bringup_ok(EventCode::Bat1InfoChange) {
                registry.bat1_attached = true;
            }
            if report.bringup_ok(EventCode::Bat2InfoChange) {
                registry.bat2_attached = true;
            }
            if report.bringup_ok(EventCode::PsuInfoChange) {
                registry.psu_registered = true;
            }
        }

        ctx.endpoints_mut().publish_all();
        info!(
            bat1 = report.bringup_ok(EventCode::Bat1InfoChange),
            bat2 = report.bringup_ok(EventCode::Bat2InfoChange),
            psu = report.bringup_ok(EventCode::PsuInfoChange),
            "Notify device attached, status endpoints published"
        );
    }

    fn attach_controller(
        &self,
        ctx: &mut SanContext,
        device: &DiscoveredDevice,
        report: &mut AttachReport,
    ) {
        ctx.registry_mut().controller_handle = Some(device.handle.clone());

        report.init = Some(if self.bus.has_method(&device.handle, method::INI) {
            match self.bus.evaluate(&device.handle, method::INI, &[]) {
                Ok(_) => Ok(()),
                Err(err) => {
                    warn!(device = %device.hardware_id, error = %err, "Controller initialization failed");
                    Err(SanError::from(err))
                }
            }
        } else {
            debug!(device = %device.hardware_id, "Controller has no _INI");
            Err(SanError::MethodNotSupported {
                method: method::INI,
            })
        });

        info!(device = %device.hardware_id, "Controller device attached");
    }

    /// Evaluate `_STA` when present. The value is logged, not interpreted;
    /// the sequence continues whatever happens here.
    fn check_status(&self, device: &DiscoveredDevice) -> StepOutcome {
        if !self.bus.has_method(&device.handle, method::STA) {
            debug!(device = %device.hardware_id, "No _STA, assuming device present");
            return Err(SanError::MethodNotSupported {
                method: method::STA,
            });
        }
        match evaluate_integer(self.bus.as_ref(), &device.handle, method::STA) {
            Ok(status) => {
                debug!(device = %device.hardware_id, status = %format_args!("{status:#x}"), "Device status");
                Ok(())
            }
            Err(err) => {
                warn!(device = %device.hardware_id, error = %err, "Status check failed");
                Err(SanError::from(err))
            }
        }
    }

    fn log_methods(&self, device: &DiscoveredDevice) {
        self.bus.walk_methods(&device.handle, &mut |info| {
            debug!(
                device = %device.hardware_id,
                method = %info.name,
                params = info.param_count,
                "Namespace method"
            );
        });
    }
}
