//! Core scenario execution: hook phase, step phase, status aggregation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use uuid::Uuid;

use crate::config::EngineConfig;
use crate::errors::{EngineError, ExecError};
use crate::event::{EventBus, EventListener, RunEventKind};
use crate::glue::{Glue, HookPhase};
use crate::model::{Scenario, ScenarioContext};
use crate::outcome::{Status, StepResult};
use crate::resolver::{resolve, ResolutionFailure};
use crate::timer::{MonotonicTimer, Timer};

use super::phase::ScenarioPhase;
use super::summary::{RunSummary, ScenarioOutcome};

/// Orchestrates scenarios through the phase machine and publishes their
/// lifecycle events.
///
/// One engine owns one explicitly constructed `EventBus` and a `Timer`; it
/// keeps no mutable state across runs, so replaying the same scenarios
/// yields the same ordered event log. Scenarios execute fully sequentially:
/// one completes all phases before the next begins.
pub struct ExecutionEngine<T: Timer = MonotonicTimer> {
    bus: EventBus,
    timer: T,
    config: EngineConfig,
}

impl ExecutionEngine<MonotonicTimer> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_timer(config, MonotonicTimer)
    }
}

impl Default for ExecutionEngine<MonotonicTimer> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<T: Timer> ExecutionEngine<T> {
    pub fn with_timer(config: EngineConfig, timer: T) -> Self {
        Self { bus: EventBus::new(config.listener_policy), timer, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Subscribes a formatter or other listener to this engine's bus.
    pub fn subscribe(&mut self, listener: Box<dyn EventListener>) {
        self.bus.subscribe(listener);
    }

    /// Runs every scenario to completion under one run id, bracketed by
    /// run-started and run-finished events.
    pub fn run<G: Glue>(&mut self, glue: &G, scenarios: &[Scenario]) -> Result<RunSummary, EngineError> {
        let run_id = Uuid::new_v4();
        self.bus.publish(run_id, RunEventKind::RunStarted)?;

        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let result = self.run_one(run_id, glue, scenario)?;
            outcomes.push(ScenarioOutcome { name: scenario.name.clone(),
                                            location: scenario.location.to_string(),
                                            result });
        }

        let status = outcomes.iter()
                             .fold(Status::Passed, |acc, o| acc.combine(o.result.status));
        self.bus.publish(run_id, RunEventKind::RunFinished { status })?;

        Ok(RunSummary { run_id, status, scenarios: outcomes })
    }

    /// Runs a single scenario under a fresh run id, without run-level
    /// bracketing events.
    pub fn run_scenario<G: Glue>(&mut self, glue: &G, scenario: &Scenario) -> Result<StepResult, EngineError> {
        self.run_one(Uuid::new_v4(), glue, scenario)
    }

    fn run_one<G: Glue>(&mut self,
                        run_id: Uuid,
                        glue: &G,
                        scenario: &Scenario)
                        -> Result<StepResult, EngineError> {
        let span = tracing::debug_span!("scenario", name = %scenario.name, location = %scenario.location);
        let _guard = span.enter();

        let mut phase = ScenarioPhase::NotStarted;
        let mut captured: Vec<StepResult> = Vec::new();
        let mut status_so_far = Status::Passed;

        self.bus.publish(run_id,
                         RunEventKind::ScenarioStarted { name: scenario.name.clone(),
                                                         location: scenario.location.to_string() })?;

        phase = phase.next();
        debug_assert_eq!(phase, ScenarioPhase::HooksBefore);
        self.run_hooks(run_id, glue, scenario, HookPhase::Before, &mut captured, &mut status_so_far)?;

        phase = phase.next();
        debug_assert_eq!(phase, ScenarioPhase::Steps);
        // A before-hook result worse than passed skips every step.
        let mut skip_remaining = status_so_far.halts_scenario();
        for (step_index, step) in scenario.steps.iter().enumerate() {
            if skip_remaining {
                let result = StepResult::skipped();
                // Skipped steps never start; they only finish.
                self.bus.publish(run_id,
                                 RunEventKind::StepFinished { step_index,
                                                              text: step.text.clone(),
                                                              result: result.clone(),
                                                              ambiguous_locations: Vec::new() })?;
                self.capture(result, &mut captured, &mut status_so_far);
                continue;
            }

            let (result, ambiguous_locations) = match resolve(glue, &step.text) {
                Ok(matched) => {
                    self.bus.publish(run_id,
                                     RunEventKind::StepStarted { step_index, text: step.text.clone() })?;
                    let ctx = ScenarioContext { name: &scenario.name,
                                                tags: &scenario.tags,
                                                status_so_far };
                    let result = self.execute_timed(|| matched.execute(&ctx));
                    tracing::debug!(step = %step.text,
                                    definition = matched.location(),
                                    status = %result.status,
                                    "step executed");
                    (result, Vec::new())
                }
                Err(ResolutionFailure::Undefined) => (StepResult::undefined(), Vec::new()),
                Err(ResolutionFailure::Ambiguous { locations }) => (StepResult::ambiguous(), locations),
            };

            if result.status.halts_scenario() {
                skip_remaining = true;
            }
            self.bus.publish(run_id,
                             RunEventKind::StepFinished { step_index,
                                                          text: step.text.clone(),
                                                          result: result.clone(),
                                                          ambiguous_locations })?;
            self.capture(result, &mut captured, &mut status_so_far);
        }

        phase = phase.next();
        debug_assert_eq!(phase, ScenarioPhase::HooksAfter);
        // After-hooks run unconditionally, whatever happened above.
        self.run_hooks(run_id, glue, scenario, HookPhase::After, &mut captured, &mut status_so_far)?;

        phase = phase.next();
        debug_assert!(phase.is_terminal());
        let aggregate = StepResult::aggregate(&captured);
        self.bus.publish(run_id,
                         RunEventKind::ScenarioFinished { name: scenario.name.clone(),
                                                          location: scenario.location.to_string(),
                                                          result: aggregate.clone() })?;
        Ok(aggregate)
    }

    /// Runs every applicable hook of `hook_phase` in registration order,
    /// capturing each outcome independently. A hook failure never aborts
    /// the remaining hooks of the same phase.
    fn run_hooks<G: Glue>(&mut self,
                          run_id: Uuid,
                          glue: &G,
                          scenario: &Scenario,
                          hook_phase: HookPhase,
                          captured: &mut Vec<StepResult>,
                          status_so_far: &mut Status)
                          -> Result<(), EngineError> {
        let hooks = glue.applicable_hooks(hook_phase, &scenario.tags);
        for (hook_index, hook) in hooks.into_iter().enumerate() {
            self.bus.publish(run_id,
                             RunEventKind::HookStarted { phase: hook_phase, hook_index })?;
            let ctx = ScenarioContext { name: &scenario.name,
                                        tags: &scenario.tags,
                                        status_so_far: *status_so_far };
            let result = self.execute_timed(|| hook.execute(&ctx));
            tracing::debug!(hook = %hook_phase,
                            index = hook_index,
                            definition = hook.location.as_str(),
                            status = %result.status,
                            "hook executed");
            self.bus.publish(run_id,
                             RunEventKind::HookFinished { phase: hook_phase,
                                                          hook_index,
                                                          result: result.clone() })?;
            self.capture(result, captured, status_so_far);
        }
        Ok(())
    }

    fn capture(&self, result: StepResult, captured: &mut Vec<StepResult>, status_so_far: &mut Status) {
        *status_so_far = status_so_far.combine(result.status);
        captured.push(result);
    }

    /// Executes one callable under timing and panic capture: a pending
    /// marker yields `pending`, an assertion failure or panic yields
    /// `failed`, a normal return yields `passed`.
    fn execute_timed(&self, f: impl FnOnce() -> Result<(), ExecError>) -> StepResult {
        let handle = self.timer.start();
        let outcome = panic::catch_unwind(AssertUnwindSafe(f));
        let duration_nanos = self.timer.stop(handle);
        match outcome {
            Ok(Ok(())) => StepResult::passed(duration_nanos),
            Ok(Err(ExecError::Pending(message))) => StepResult::pending(duration_nanos, message),
            Ok(Err(ExecError::Failed(message))) => StepResult::failed(duration_nanos, message),
            Err(payload) => StepResult::failed(duration_nanos, panic_message(payload)),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "step panicked".to_string()
    }
}
