use serde::{Deserialize, Serialize};

use super::Status;

/// Timing and error payload attached to one step, hook, or scenario outcome.
///
/// Invariant: `error` is `Some` iff `status` is `Failed` or `Pending`. The
/// constructors below are the only way the engine builds results, so the
/// invariant holds everywhere downstream formatters look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub status: Status,
    pub duration_nanos: u64,
    pub error: Option<String>,
}

impl StepResult {
    pub fn passed(duration_nanos: u64) -> Self {
        Self { status: Status::Passed, duration_nanos, error: None }
    }

    pub fn skipped() -> Self {
        Self { status: Status::Skipped, duration_nanos: 0, error: None }
    }

    pub fn undefined() -> Self {
        Self { status: Status::Undefined, duration_nanos: 0, error: None }
    }

    pub fn ambiguous() -> Self {
        Self { status: Status::Ambiguous, duration_nanos: 0, error: None }
    }

    pub fn failed(duration_nanos: u64, error: impl Into<String>) -> Self {
        Self { status: Status::Failed, duration_nanos, error: Some(error.into()) }
    }

    pub fn pending(duration_nanos: u64, message: impl Into<String>) -> Self {
        Self { status: Status::Pending, duration_nanos, error: Some(message.into()) }
    }

    /// Folds a sequence of captured hook and step results into one
    /// scenario-level result.
    ///
    /// The aggregate status is the most severe status seen, its error is
    /// taken from the first result carrying that status, and the duration is
    /// the sum of all durations. An empty slice aggregates to `passed`.
    pub fn aggregate(results: &[StepResult]) -> StepResult {
        let mut status = Status::Passed;
        let mut duration_nanos: u64 = 0;
        for r in results {
            status = status.combine(r.status);
            duration_nanos = duration_nanos.saturating_add(r.duration_nanos);
        }
        let error = results.iter()
                           .find(|r| r.status == status)
                           .and_then(|r| r.error.clone());
        StepResult { status, duration_nanos, error }
    }
}
