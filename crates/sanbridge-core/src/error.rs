//! Bridge-level error taxonomy

use thiserror::Error;

/// Errors surfaced to callers of the bridge.
///
/// Firmware-level status codes are folded into these three cases at the
/// protocol boundary so that callers never see raw firmware constants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanError {
    /// The device does not expose the named method. Detected by probing
    /// before invocation, never by invoking and failing.
    #[error("method {method} not present on the device")]
    MethodNotSupported { method: &'static str },

    /// The firmware evaluated the method and reported failure.
    #[error("firmware evaluation failed: {description}")]
    EvaluationFailed { description: String },

    /// The firmware ran out of dynamic memory while servicing the call.
    #[error("firmware resources exhausted")]
    ResourceExhausted,
}
