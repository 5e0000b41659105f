//! Engine-level errors.
//!
//! Step and hook failures are *data*: they are captured as `StepResult`s and
//! never abort the run. The variants here cover the only failure modes that
//! may escalate to the caller.

use thiserror::Error;

/// Raised by a step or hook callable to classify its own failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    /// The implementation is explicitly not done yet.
    #[error("pending: {0}")]
    Pending(String),
    /// Assertion or verification failure.
    #[error("{0}")]
    Failed(String),
}

/// Errors surfaced by `ExecutionEngine` itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A subscribed listener failed while the bus runs under the
    /// `Propagate` policy. Delivery to the remaining listeners still
    /// happened before this was raised.
    #[error("listener {listener_index} failed on event seq {seq}: {message}")]
    Listener { listener_index: usize, seq: u64, message: String },
    #[error("internal: {0}")]
    Internal(String),
}
