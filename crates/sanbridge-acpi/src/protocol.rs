//! Notify device dispatch protocol

use crate::bus::{method, AcpiBus};
use crate::value::AcpiValue;
use sanbridge_core::{EventCode, ObjectHandle, SanError};
use tracing::error;
use uuid::{uuid, Uuid};

/// GUID selecting the notify device's private dispatch interface.
pub const SAN_EVENT_GUID: Uuid = uuid!("93b666c5-70c6-469f-a215-3d487c91ab3c");

/// Interface revision spoken by this bridge.
pub const SAN_GEN_REVISION: u64 = 0x08;

/// First `_REG` argument, the operation-region space being announced.
pub const REG_INIT: u64 = 0x09;

/// Second `_REG` argument, marking that space available.
pub const REG_AVAILABLE: u64 = 0x01;

/// Namespace path of the firmware's request object.
pub const SAN_RQST_PATH: &str = "\\_SB._SAN.RQST";

/// Namespace path of the firmware's extended request object.
pub const SAN_RQSX_PATH: &str = "\\_SB._SAN.RQSX";

/// Handles to the firmware's request objects, where present.
#[derive(Debug, Clone, Default)]
pub struct RequestObjects {
    pub rqst: Option<ObjectHandle>,
    pub rqsx: Option<ObjectHandle>,
}

/// Speaks the dispatch protocol against one notify object.
///
/// Every call probes for the target method before invoking it, so a device
/// that lacks the method yields `MethodNotSupported` without the firmware
/// interpreter ever running.
pub struct NotifyProtocol<'a> {
    bus: &'a dyn AcpiBus,
    notify: &'a ObjectHandle,
}

impl<'a> NotifyProtocol<'a> {
    pub fn new(bus: &'a dyn AcpiBus, notify: &'a ObjectHandle) -> Self {
        Self { bus, notify }
    }

    /// Send one event through the dispatch method.
    ///
    /// The request is always the same four-argument shape: the interface
    /// GUID as a 16-byte little-endian buffer, the revision, the event
    /// code, and an empty package. The result payload is ignored; only
    /// evaluation success matters.
    pub fn send_event(&self, event: EventCode) -> Result<(), SanError> {
        if !self.bus.has_method(self.notify, method::DSM) {
            return Err(SanError::MethodNotSupported {
                method: method::DSM,
            });
        }
        let args = [
            AcpiValue::Buffer(SAN_EVENT_GUID.to_bytes_le().to_vec()),
            AcpiValue::Integer(SAN_GEN_REVISION),
            AcpiValue::Integer(u64::from(event.as_u8())),
            AcpiValue::Package(Vec::new()),
        ];
        match self.bus.evaluate(self.notify, method::DSM, &args) {
            Ok(_) => Ok(()),
            Err(err) => {
                error!(event = %event, error = %err, "Event dispatch failed");
                Err(err.into())
            }
        }
    }

    /// Tell the firmware its operation region is available.
    ///
    /// Called exactly once per notify attach, before the first
    /// `send_event`.
    pub fn register_availability(&self) -> Result<(), SanError> {
        if !self.bus.has_method(self.notify, method::REG) {
            return Err(SanError::MethodNotSupported {
                method: method::REG,
            });
        }
        let args = [
            AcpiValue::Integer(REG_INIT),
            AcpiValue::Integer(REG_AVAILABLE),
        ];
        match self.bus.evaluate(self.notify, method::REG, &args) {
            Ok(_) => Ok(()),
            Err(err) => {
                error!(error = %err, "Availability registration failed");
                Err(err.into())
            }
        }
    }

    /// Resolve the fixed request object paths.
    ///
    /// A missing object is logged and left as `None`; the attach sequence
    /// carries on either way.
    pub fn lookup_request_objects(&self) -> RequestObjects {
        RequestObjects {
            rqst: self.resolve_logged(SAN_RQST_PATH),
            rqsx: self.resolve_logged(SAN_RQSX_PATH),
        }
    }

    fn resolve_logged(&self, path: &str) -> Option<ObjectHandle> {
        match self.bus.resolve_path(path) {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!(path, error = %err, "Request object lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::AcpiError;
    use crate::sim::{Behavior, SimBus};

    const SAN_PATH: &str = "\\_SB._SAN";

    fn notify_bus() -> SimBus {
        let bus = SimBus::new();
        bus.script_method(
            SAN_PATH,
            method::DSM,
            Behavior::Succeed(AcpiValue::Integer(0)),
        );
        bus.script_method(
            SAN_PATH,
            method::REG,
            Behavior::Succeed(AcpiValue::Integer(0)),
        );
        bus
    }

    #[test]
    fn test_guid_little_endian_bytes() {
        assert_eq!(
            SAN_EVENT_GUID.to_bytes_le(),
            [
                0xc5, 0x66, 0xb6, 0x93, 0xc6, 0x70, 0x9f, 0x46, 0xa2, 0x15, 0x3d, 0x48,
                0x7c, 0x91, 0xab, 0x3c,
            ]
        );
    }

    #[test]
    fn test_event_frame_layout() {
        let bus = notify_bus();
        let handle = bus.resolve_path(SAN_PATH).unwrap();
        let protocol = NotifyProtocol::new(&bus, &handle);

        protocol.send_event(EventCode::Bat1InfoChange).unwrap();

        let calls = bus.calls_to(SAN_PATH, method::DSM);
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].args,
            vec![
                AcpiValue::Buffer(SAN_EVENT_GUID.to_bytes_le().to_vec()),
                AcpiValue::Integer(0x08),
                AcpiValue::Integer(0x04),
                AcpiValue::Package(Vec::new()),
            ]
        );
    }

    #[test]
    fn test_missing_dispatch_method_is_never_invoked() {
        let bus = SimBus::new();
        bus.add_object(SAN_PATH);
        let handle = bus.resolve_path(SAN_PATH).unwrap();
        let protocol = NotifyProtocol::new(&bus, &handle);

        for event in EventCode::ALL {
            assert_eq!(
                protocol.send_event(event),
                Err(SanError::MethodNotSupported { method: "_DSM" })
            );
        }
        assert!(bus.calls().is_empty());
    }

    #[test]
    fn test_register_availability_arguments() {
        let bus = notify_bus();
        let handle = bus.resolve_path(SAN_PATH).unwrap();
        let protocol = NotifyProtocol::new(&bus, &handle);

        protocol.register_availability().unwrap();

        let calls = bus.calls_to(SAN_PATH, method::REG);
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].args,
            vec![AcpiValue::Integer(0x09), AcpiValue::Integer(0x01)]
        );
    }

    #[test]
    fn test_failure_codes_map_to_bridge_errors() {
        let bus = SimBus::new();
        bus.script_method(SAN_PATH, method::DSM, Behavior::Fail(AcpiError::NoMemory));
        let handle = bus.resolve_path(SAN_PATH).unwrap();
        let protocol = NotifyProtocol::new(&bus, &handle);

        assert_eq!(
            protocol.send_event(EventCode::QueryDevice),
            Err(SanError::ResourceExhausted)
        );

        bus.script_method(SAN_PATH, method::DSM, Behavior::Fail(AcpiError::Failed));
        assert_eq!(
            protocol.send_event(EventCode::QueryDevice),
            Err(SanError::EvaluationFailed {
                description: "AE_ERROR: unspecified failure".into()
            })
        );
    }

    #[test]
    fn test_request_object_lookup_is_non_fatal() {
        let bus = notify_bus();
        bus.add_object(SAN_RQST_PATH);
        let handle = bus.resolve_path(SAN_PATH).unwrap();
        let protocol = NotifyProtocol::new(&bus, &handle);

        let objects = protocol.lookup_request_objects();
        assert_eq!(
            objects.rqst.as_ref().map(ObjectHandle::path),
            Some(SAN_RQST_PATH)
        );
        assert!(objects.rqsx.is_none());
    }
}
