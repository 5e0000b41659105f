use serde::Serialize;
use uuid::Uuid;

use crate::outcome::{Status, StepResult};

/// Aggregated result of one scenario within a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub location: String,
    pub result: StepResult,
}

/// Outcome of a whole run: per-scenario results plus the combined status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub status: Status,
    pub scenarios: Vec<ScenarioOutcome>,
}

impl RunSummary {
    /// A run succeeds only if every scenario's aggregated status is passed.
    pub fn passed(&self) -> bool {
        self.status == Status::Passed
    }
}
