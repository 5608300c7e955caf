//! Firmware namespace access trait and failure codes

use crate::value::{AcpiValue, MethodInfo};
use sanbridge_core::{ObjectHandle, SanError};
use thiserror::Error;

/// Standard method names evaluated by the bridge.
pub mod method {
    /// Device-specific dispatch method.
    pub const DSM: &str = "_DSM";
    /// Operation-region availability notice.
    pub const REG: &str = "_REG";
    /// Device presence query.
    pub const STA: &str = "_STA";
    /// One-time device initialization.
    pub const INI: &str = "_INI";
}

/// Failure codes reported by the firmware interpreter.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AcpiError {
    #[error("AE_ERROR: unspecified failure")]
    Failed,
    #[error("AE_NOT_FOUND: the requested object does not exist")]
    NotFound,
    #[error("AE_NO_MEMORY: insufficient dynamic memory")]
    NoMemory,
    #[error("AE_BAD_PARAMETER: a parameter is out of range or invalid")]
    BadParameter,
    #[error("AE_TYPE: the object is of the wrong type")]
    TypeMismatch,
}

impl From<AcpiError> for SanError {
    fn from(err: AcpiError) -> Self {
        match err {
            AcpiError::NoMemory => SanError::ResourceExhausted,
            other => SanError::EvaluationFailed {
                description: other.to_string(),
            },
        }
    }
}

/// An asynchronous notification raised by a namespace object.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Path of the object that raised it.
    pub source: String,
    /// Device-specific notification code.
    pub code: u32,
}

/// Synchronous access to the firmware namespace.
///
/// Calls block until the interpreter returns. The bridge never overlaps
/// calls against the same object, so implementations may serialize freely.
pub trait AcpiBus: Send + Sync {
    /// Whether `name` is a callable method on `handle`. Pure probe, never
    /// evaluates anything.
    fn has_method(&self, handle: &ObjectHandle, name: &str) -> bool;

    /// Evaluate `name` on `handle` with `args` and return its result.
    fn evaluate(
        &self,
        handle: &ObjectHandle,
        name: &str,
        args: &[AcpiValue],
    ) -> Result<AcpiValue, AcpiError>;

    /// Resolve an absolute namespace path to an object handle.
    fn resolve_path(&self, path: &str) -> Result<ObjectHandle, AcpiError>;

    /// Visit every method present on `handle`.
    fn walk_methods(&self, handle: &ObjectHandle, visit: &mut dyn FnMut(&MethodInfo));
}

/// Evaluate a no-argument method that must yield an integer.
pub fn evaluate_integer(
    bus: &dyn AcpiBus,
    handle: &ObjectHandle,
    name: &str,
) -> Result<u64, AcpiError> {
    match bus.evaluate(handle, name, &[])? {
        AcpiValue::Integer(value) => Ok(value),
        _ => Err(AcpiError::TypeMismatch),
    }
}
