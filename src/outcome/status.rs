use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome classification of one step, hook, or scenario.
///
/// Variants are declared in ascending severity, so the derived `Ord` is the
/// aggregation precedence: `Failed > Ambiguous > Pending > Undefined >
/// Skipped > Passed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Executed and returned normally.
    Passed,
    /// Never attempted because a prior step or hook already failed.
    Skipped,
    /// No registered definition matched the step text.
    Undefined,
    /// Explicitly marked not-yet-implemented by user code.
    Pending,
    /// More than one registered definition matched the step text.
    Ambiguous,
    /// Assertion failure or unexpected panic during execution.
    Failed,
}

impl Status {
    /// Returns the more severe of the two statuses.
    pub fn combine(self, incoming: Status) -> Status {
        self.max(incoming)
    }

    pub fn is_ok(self) -> bool {
        self == Status::Passed
    }

    /// Whether a step with this status halts execution of the remaining
    /// steps in the scenario.
    pub fn halts_scenario(self) -> bool {
        self != Status::Passed
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Passed => "passed",
            Status::Skipped => "skipped",
            Status::Undefined => "undefined",
            Status::Pending => "pending",
            Status::Ambiguous => "ambiguous",
            Status::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_picks_the_more_severe_status() {
        assert_eq!(Status::Passed.combine(Status::Failed), Status::Failed);
        assert_eq!(Status::Failed.combine(Status::Passed), Status::Failed);
        assert_eq!(Status::Pending.combine(Status::Undefined), Status::Pending);
        assert_eq!(Status::Ambiguous.combine(Status::Pending), Status::Ambiguous);
        assert_eq!(Status::Skipped.combine(Status::Passed), Status::Skipped);
        assert_eq!(Status::Passed.combine(Status::Passed), Status::Passed);
    }

    #[test]
    fn precedence_is_total_and_matches_the_documented_order() {
        let ascending = [Status::Passed,
                         Status::Skipped,
                         Status::Undefined,
                         Status::Pending,
                         Status::Ambiguous,
                         Status::Failed];
        for pair in ascending.windows(2) {
            assert!(pair[0] < pair[1], "{} should rank below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn failed_outranks_ambiguous_and_pending() {
        assert_eq!(Status::Ambiguous.combine(Status::Failed), Status::Failed);
        assert_eq!(Status::Pending.combine(Status::Failed), Status::Failed);
    }
}
