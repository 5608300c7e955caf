//! Scripted in-memory firmware namespace
//!
//! Stands in for the platform firmware during development and in tests.
//! Objects and method behaviors are scripted up front; every evaluation is
//! recorded so callers can assert ordering, arguments, or that a method was
//! never invoked at all.

use crate::bus::{method, AcpiBus, AcpiError, Notification};
use crate::value::{AcpiValue, MethodInfo};
use sanbridge_core::ObjectHandle;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;

/// Scripted response for one method.
#[derive(Clone)]
pub enum Behavior {
    /// Return this value.
    Succeed(AcpiValue),
    /// Fail with this code.
    Fail(AcpiError),
    /// Compute the response from the arguments.
    With(Arc<dyn Fn(&[AcpiValue]) -> Result<AcpiValue, AcpiError> + Send + Sync>),
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Succeed(value) => f.debug_tuple("Succeed").field(value).finish(),
            Behavior::Fail(err) => f.debug_tuple("Fail").field(err).finish(),
            Behavior::With(_) => f.write_str("With(..)"),
        }
    }
}

/// One recorded method invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub path: String,
    pub method: String,
    pub args: Vec<AcpiValue>,
}

#[derive(Debug, Default)]
struct SimState {
    /// path -> method name -> behavior
    objects: BTreeMap<String, BTreeMap<String, Behavior>>,
    calls: Vec<RecordedCall>,
}

/// In-memory namespace with scripted method behaviors.
pub struct SimBus {
    state: Mutex<SimState>,
    notify_tx: broadcast::Sender<Notification>,
}

impl SimBus {
    pub fn new() -> Self {
        let (notify_tx, _) = broadcast::channel(64);
        Self {
            state: Mutex::new(SimState::default()),
            notify_tx,
        }
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().expect("sim state lock poisoned")
    }

    /// Add an empty object at `path`.
    pub fn add_object(&self, path: &str) {
        self.state().objects.entry(path.to_string()).or_default();
    }

    /// Script how `name` on the object at `path` responds. Creates the
    /// object if it does not exist yet.
    pub fn script_method(&self, path: &str, name: &str, behavior: Behavior) {
        self.state()
            .objects
            .entry(path.to_string())
            .or_default()
            .insert(name.to_string(), behavior);
    }

    /// Every evaluation performed so far, in call order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    /// Evaluations of one method on one object, in call order.
    pub fn calls_to(&self, path: &str, name: &str) -> Vec<RecordedCall> {
        self.state()
            .calls
            .iter()
            .filter(|call| call.path == path && call.method == name)
            .cloned()
            .collect()
    }

    /// Subscribe to injected notifications.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notify_tx.subscribe()
    }

    /// Raise a notification as if the firmware signalled `source`.
    pub fn inject_notification(&self, source: &str, code: u32) {
        let _ = self.notify_tx.send(Notification {
            source: source.to_string(),
            code,
        });
    }

    /// Argument count the standard methods declare.
    fn declared_params(name: &str) -> u8 {
        match name {
            method::DSM => 4,
            method::REG => 2,
            _ => 0,
        }
    }
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

impl AcpiBus for SimBus {
    fn has_method(&self, handle: &ObjectHandle, name: &str) -> bool {
        self.state()
            .objects
            .get(handle.path())
            .is_some_and(|methods| methods.contains_key(name))
    }

    fn evaluate(
        &self,
        handle: &ObjectHandle,
        name: &str,
        args: &[AcpiValue],
    ) -> Result<AcpiValue, AcpiError> {
        let mut state = self.state();
        state.calls.push(RecordedCall {
            path: handle.path().to_string(),
            method: name.to_string(),
            args: args.to_vec(),
        });
        let behavior = state
            .objects
            .get(handle.path())
            .and_then(|methods| methods.get(name))
            .ok_or(AcpiError::NotFound)?
            .clone();
        drop(state);
        match behavior {
            Behavior::Succeed(value) => Ok(value),
            Behavior::Fail(err) => Err(err),
            Behavior::With(compute) => compute(args),
        }
    }

    fn resolve_path(&self, path: &str) -> Result<ObjectHandle, AcpiError> {
        if self.state().objects.contains_key(path) {
            Ok(ObjectHandle::new(path))
        } else {
            Err(AcpiError::NotFound)
        }
    }

    fn walk_methods(&self, handle: &ObjectHandle, visit: &mut dyn FnMut(&MethodInfo)) {
        let state = self.state();
        let Some(methods) = state.objects.get(handle.path()) else {
            return;
        };
        for name in methods.keys() {
            visit(&MethodInfo {
                name: name.clone(),
                param_count: Self::declared_params(name),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_method_evaluation() {
        let bus = SimBus::new();
        bus.script_method(
            "\\_SB._SAN",
            method::STA,
            Behavior::Succeed(AcpiValue::Integer(0x0F)),
        );

        let handle = bus.resolve_path("\\_SB._SAN").unwrap();
        assert!(bus.has_method(&handle, method::STA));
        assert_eq!(
            bus.evaluate(&handle, method::STA, &[]),
            Ok(AcpiValue::Integer(0x0F))
        );
    }

    #[test]
    fn test_missing_object_and_method() {
        let bus = SimBus::new();
        bus.add_object("\\_SB._SAN");

        assert_eq!(bus.resolve_path("\\_SB._SSH"), Err(AcpiError::NotFound));

        let handle = bus.resolve_path("\\_SB._SAN").unwrap();
        assert!(!bus.has_method(&handle, method::DSM));
        assert_eq!(
            bus.evaluate(&handle, method::DSM, &[]),
            Err(AcpiError::NotFound)
        );
    }

    #[test]
    fn test_call_log_preserves_order_and_args() {
        let bus = SimBus::new();
        bus.script_method(
            "\\_SB._SAN",
            method::REG,
            Behavior::Succeed(AcpiValue::Integer(0)),
        );
        bus.script_method(
            "\\_SB._SAN",
            method::DSM,
            Behavior::Fail(AcpiError::Failed),
        );

        let handle = bus.resolve_path("\\_SB._SAN").unwrap();
        let reg_args = [AcpiValue::Integer(9), AcpiValue::Integer(1)];
        bus.evaluate(&handle, method::REG, &reg_args).unwrap();
        let _ = bus.evaluate(&handle, method::DSM, &[]);

        let calls = bus.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, method::REG);
        assert_eq!(calls[0].args, reg_args.to_vec());
        assert_eq!(calls[1].method, method::DSM);

        assert_eq!(bus.calls_to("\\_SB._SAN", method::REG).len(), 1);
        assert!(bus.calls_to("\\_SB._SAN", method::STA).is_empty());
    }

    #[test]
    fn test_computed_behavior_sees_arguments() {
        let bus = SimBus::new();
        bus.script_method(
            "\\_SB._SAN",
            method::DSM,
            Behavior::With(Arc::new(|args| match args.first() {
                Some(AcpiValue::Integer(n)) => Ok(AcpiValue::Integer(n + 1)),
                _ => Err(AcpiError::BadParameter),
            })),
        );

        let handle = bus.resolve_path("\\_SB._SAN").unwrap();
        assert_eq!(
            bus.evaluate(&handle, method::DSM, &[AcpiValue::Integer(7)]),
            Ok(AcpiValue::Integer(8))
        );
        assert_eq!(
            bus.evaluate(&handle, method::DSM, &[]),
            Err(AcpiError::BadParameter)
        );
    }

    #[test]
    fn test_walk_lists_methods_in_order() {
        let bus = SimBus::new();
        bus.script_method(
            "\\_SB._SAN",
            method::STA,
            Behavior::Succeed(AcpiValue::Integer(0x0F)),
        );
        bus.script_method(
            "\\_SB._SAN",
            method::DSM,
            Behavior::Succeed(AcpiValue::Integer(0)),
        );

        let handle = bus.resolve_path("\\_SB._SAN").unwrap();
        let mut seen = Vec::new();
        bus.walk_methods(&handle, &mut |info| {
            seen.push((info.name.clone(), info.param_count))
        });
        assert_eq!(
            seen,
            vec![("_DSM".to_string(), 4), ("_STA".to_string(), 0)]
        );
    }

    #[tokio::test]
    async fn test_notification_injection() {
        let bus = SimBus::new();
        let mut rx = bus.notifications();

        bus.inject_notification("\\_SB._SAN", 0x20);
        let note = rx.recv().await.unwrap();
        assert_eq!(note.source, "\\_SB._SAN");
        assert_eq!(note.code, 0x20);
    }
}
