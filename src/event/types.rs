//! Lifecycle event records published by the engine.
//!
//! Events are produced in the exact temporal order operations occur; that
//! order is an observable contract formatters rely on, not an
//! implementation detail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::glue::HookPhase;
use crate::outcome::{Status, StepResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEventKind {
    RunStarted,
    ScenarioStarted {
        name: String,
        location: String,
    },
    /// Emitted immediately before a hook executes.
    HookStarted { phase: HookPhase, hook_index: usize },
    HookFinished {
        phase: HookPhase,
        hook_index: usize,
        result: StepResult,
    },
    /// Emitted immediately before a resolved step executes. Steps that are
    /// skipped or fail resolution never start, so they only finish.
    StepStarted { step_index: usize, text: String },
    StepFinished {
        step_index: usize,
        text: String,
        result: StepResult,
        /// Conflicting definition locations when the result is ambiguous,
        /// empty otherwise.
        ambiguous_locations: Vec<String>,
    },
    ScenarioFinished {
        name: String,
        location: String,
        result: StepResult,
    },
    RunFinished { status: Status },
}

impl RunEventKind {
    /// Stable human-readable event name, for logs and compact assertions.
    pub fn name(&self) -> &'static str {
        match self {
            RunEventKind::RunStarted => "run-started",
            RunEventKind::ScenarioStarted { .. } => "scenario-started",
            RunEventKind::HookStarted { .. } => "hook-started",
            RunEventKind::HookFinished { .. } => "hook-finished",
            RunEventKind::StepStarted { .. } => "step-started",
            RunEventKind::StepFinished { .. } => "step-finished",
            RunEventKind::ScenarioFinished { .. } => "scenario-finished",
            RunEventKind::RunFinished { .. } => "run-finished",
        }
    }
}

/// An immutable timestamped lifecycle record. `seq` is assigned by the bus
/// in publish order; `ts` is metadata and takes no part in ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64,
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_for_downstream_formatters() {
        let kind = RunEventKind::StepFinished { step_index: 2,
                                               text: "a step".into(),
                                               result: StepResult::failed(30, "boom"),
                                               ambiguous_locations: vec![] };
        let json = serde_json::to_value(&kind).expect("serializable");
        assert_eq!(json["StepFinished"]["result"]["status"], "failed");
        assert_eq!(json["StepFinished"]["result"]["error"], "boom");
    }

    #[test]
    fn event_names_match_the_lifecycle_vocabulary() {
        assert_eq!(RunEventKind::RunStarted.name(), "run-started");
        assert_eq!(RunEventKind::RunFinished { status: Status::Passed }.name(), "run-finished");
    }
}
