//! bdd-core: execution engine of a behavior-driven test runner.
//!
//! Given a parsed scenario, the engine resolves each step to exactly one
//! registered definition, runs before/after hooks around the scenario,
//! computes deterministic per-step and per-scenario statuses, and publishes
//! an ordered stream of lifecycle events. Parsing, pattern compilation,
//! report rendering, and CLI concerns live in external collaborators.

pub mod config;
pub mod engine;
pub mod errors;
pub mod event;
pub mod glue;
pub mod model;
pub mod outcome;
pub mod resolver;
pub mod timer;

pub use config::{EngineConfig, ListenerPolicy};
pub use engine::{ExecutionEngine, RunSummary, ScenarioOutcome, ScenarioPhase};
pub use errors::{EngineError, ExecError};
pub use event::{EventBus, EventListener, EventLog, ListenerError, RunEvent, RunEventKind};
pub use glue::{ExactMatch, FakeGlue, Glue, HookDefinition, HookPhase, HookProvider, HookRegistry,
               StepDefinition, StepPattern, StepProvider, StepRegistry, TagPredicate};
pub use model::{Scenario, ScenarioContext, SourceLocation, Step, Tag};
pub use outcome::{Status, StepResult};
pub use resolver::{resolve, ResolutionFailure, StepMatch};
pub use timer::{FixedTimer, MonotonicTimer, Timer};

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(name: &str, steps: &[&str]) -> Scenario {
        let mut s = Scenario::new(name, SourceLocation::new("smoke.feature", 1));
        for (i, text) in steps.iter().enumerate() {
            s = s.with_step(Step::new(*text, SourceLocation::new("smoke.feature", 2 + i as u32)));
        }
        s
    }

    #[test]
    fn smoke_run_mixes_statuses_and_reports_the_worst() {
        let glue = FakeGlue::new()
            .step("a passing step", Status::Passed)
            .step("a pending step", Status::Pending)
            .hook(HookPhase::Before, Status::Passed)
            .hook(HookPhase::After, Status::Passed);

        let scenarios = [scenario("all green", &["a passing step"]),
                         scenario("half done", &["a pending step", "a passing step"])];

        let mut engine = ExecutionEngine::with_timer(EngineConfig::default(), FixedTimer(7));
        let log = EventLog::new();
        engine.subscribe(Box::new(log.clone()));

        let summary = engine.run(&glue, &scenarios).unwrap();

        assert_eq!(summary.status, Status::Pending);
        assert!(!summary.passed());
        assert_eq!(summary.scenarios[0].result.status, Status::Passed);
        assert_eq!(summary.scenarios[1].result.status, Status::Pending);

        // The pending step halts the second scenario; its trailing step is
        // recorded skipped without being executed.
        let step_statuses: Vec<Status> = log.kinds()
                                            .into_iter()
                                            .filter_map(|k| match k {
                                                RunEventKind::StepFinished { result, .. } => Some(result.status),
                                                _ => None,
                                            })
                                            .collect();
        assert_eq!(step_statuses, vec![Status::Passed, Status::Pending, Status::Skipped]);

        let kinds = log.kind_names();
        assert_eq!(kinds.first(), Some(&"run-started"));
        assert_eq!(kinds.last(), Some(&"run-finished"));
        assert_eq!(glue.hook_calls(HookPhase::Before, 0), 2);
        assert_eq!(glue.hook_calls(HookPhase::After, 0), 2);
    }
}
