//! Execution engine: orchestrates one scenario at a time through the
//! `NotStarted -> HooksBefore -> Steps -> HooksAfter -> Finished` phase
//! machine and publishes lifecycle events in strict chronological order.

pub mod core;
pub mod phase;
pub mod summary;

pub use core::ExecutionEngine;
pub use phase::ScenarioPhase;
pub use summary::{RunSummary, ScenarioOutcome};
