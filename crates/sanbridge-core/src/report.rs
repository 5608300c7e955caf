//! Per-attach outcome records

use crate::device::DeviceRole;
use crate::error::SanError;
use crate::event::EventCode;

/// Outcome of one step of the attach sequence.
pub type StepOutcome = Result<(), SanError>;

/// One bring-up event sent to the firmware and its outcome.
#[derive(Debug, Clone)]
pub struct BringupStep {
    pub event: EventCode,
    pub outcome: StepOutcome,
}

/// Everything that happened while attaching one device.
///
/// A failed step is recorded here rather than aborting the sequence, so a
/// report always covers the full sequence for its role.
#[derive(Debug, Clone)]
pub struct AttachReport {
    /// Role the device was attached as.
    pub role: DeviceRole,
    /// Outcome of the presence check.
    pub status_check: StepOutcome,
    /// Outcome of availability registration; `None` for the controller role.
    pub registration: Option<StepOutcome>,
    /// Outcome of controller initialization; `None` for the notify role.
    pub init: Option<StepOutcome>,
    /// Bring-up events in the order they were sent.
    pub bringup: Vec<BringupStep>,
}

impl AttachReport {
    pub fn new(role: DeviceRole) -> Self {
        Self {
            role,
            status_check: Ok(()),
            registration: None,
            init: None,
            bringup: Vec::new(),
        }
    }

    pub fn push_bringup(&mut self, event: EventCode, outcome: StepOutcome) {
        self.bringup.push(BringupStep { event, outcome });
    }

    /// Whether the bring-up step for `event` ran and succeeded.
    pub fn bringup_ok(&self, event: EventCode) -> bool {
        self.bringup
            .iter()
            .any(|step| step.event == event && step.outcome.is_ok())
    }

    /// Human-readable multi-line summary, one line per step.
    pub fn summary(&self) -> String {
        fn line(out: &mut String, label: &str, outcome: &StepOutcome) {
            match outcome {
                Ok(()) => out.push_str(&format!("{label}: ok\n")),
                // A missing method is an expected condition, not a failure
                Err(SanError::MethodNotSupported { method }) => {
                    out.push_str(&format!("{label}: not supported ({method} absent)\n"))
                }
                Err(err) => out.push_str(&format!("{label}: failed ({err})\n")),
            }
        }

        let mut out = format!("role: {}\n", self.role);
        line(&mut out, "status check", &self.status_check);
        if let Some(registration) = &self.registration {
            line(&mut out, "registration", registration);
        }
        if let Some(init) = &self.init {
            line(&mut out, "initialization", init);
        }
        for step in &self.bringup {
            line(&mut out, &step.event.to_string(), &step.outcome);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bringup_ok_tracks_outcomes() {
        let mut report = AttachReport::new(DeviceRole::Notify);
        report.push_bringup(EventCode::Bat1InfoChange, Ok(()));
        report.push_bringup(
            EventCode::Bat2InfoChange,
            Err(SanError::ResourceExhausted),
        );

        assert!(report.bringup_ok(EventCode::Bat1InfoChange));
        assert!(!report.bringup_ok(EventCode::Bat2InfoChange));
        assert!(!report.bringup_ok(EventCode::PsuInfoChange));
    }

    #[test]
    fn test_summary_lists_every_step() {
        let mut report = AttachReport::new(DeviceRole::Notify);
        report.status_check = Err(SanError::MethodNotSupported { method: "_STA" });
        report.registration = Some(Ok(()));
        report.push_bringup(EventCode::SetDriverVersion, Ok(()));
        report.push_bringup(
            EventCode::SensorTripPoint,
            Err(SanError::EvaluationFailed {
                description: "AE_ERROR: unspecified failure".into(),
            }),
        );

        let summary = report.summary();
        assert!(summary.contains("role: notify"));
        assert!(summary.contains("registration: ok"));
        assert!(summary.contains("set_driver_version: ok"));
        assert!(summary.contains("sensor_trip_point: failed (firmware evaluation failed"));
        assert!(!summary.contains("initialization"));

        // An absent method reads as a capability note, not a failure
        assert!(summary.contains("status check: not supported (_STA absent)"));
        assert!(!summary.contains("status check: failed"));
    }
}
