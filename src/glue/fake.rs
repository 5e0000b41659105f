//! In-memory fake glue for tests and demos.
//!
//! Configured from plain data (step text → desired outcome, hook phase →
//! desired outcome) instead of mock-object stubbing. Hook invocations are
//! counted so tests can assert that after-hooks ran exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ExecError;
use crate::model::Tag;
use crate::outcome::Status;

use super::definition::{ExactMatch, HookDefinition, HookPhase, StepDefinition, StepFn, TagPredicate};
use super::registry::{HookRegistry, StepRegistry};
use super::{HookProvider, StepProvider};

#[derive(Debug, Default)]
pub struct FakeGlue {
    steps: StepRegistry,
    hooks: HookRegistry,
    before_calls: Vec<Arc<AtomicUsize>>,
    after_calls: Vec<Arc<AtomicUsize>>,
}

impl FakeGlue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a step whose execution yields the given status.
    ///
    /// `Undefined` registers nothing (the text stays unmatched) and
    /// `Ambiguous` registers two conflicting definitions, so every status in
    /// the taxonomy can be staged from one call.
    pub fn step(self, text: &str, status: Status) -> Self {
        let location = format!("fake_glue.rs:{}", self.steps.len() + 1);
        self.step_at(text, &location, status)
    }

    /// Same as [`FakeGlue::step`] but with an explicit definition location.
    pub fn step_at(mut self, text: &str, location: &str, status: Status) -> Self {
        match status {
            Status::Undefined => {}
            Status::Ambiguous => {
                self.steps.register(StepDefinition::new(ExactMatch::new(text),
                                                        format!("{location}#1"),
                                                        body_for(status, text)));
                self.steps.register(StepDefinition::new(ExactMatch::new(text),
                                                        format!("{location}#2"),
                                                        body_for(status, text)));
            }
            _ => {
                self.steps.register(StepDefinition::new(ExactMatch::new(text),
                                                        location,
                                                        body_for(status, text)));
            }
        }
        self
    }

    /// Registers a hook with the default always-match predicate.
    pub fn hook(self, phase: HookPhase, status: Status) -> Self {
        self.hook_with_predicate(phase, TagPredicate::always(), status)
    }

    pub fn hook_with_predicate(mut self, phase: HookPhase, predicate: TagPredicate, status: Status) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let label = format!("{phase} hook");
        let inner = body_for(status, &label);
        let body: StepFn = Box::new(move |ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            inner(ctx)
        });
        let location = format!("fake_hooks.rs:{}", self.calls_for(phase).len() + 1);
        self.hooks.register(phase, HookDefinition::new(predicate, location, body));
        self.calls_mut(phase).push(calls);
        self
    }

    /// How many times the `index`-th registered hook of `phase` has run.
    pub fn hook_calls(&self, phase: HookPhase, index: usize) -> usize {
        self.calls_for(phase)
            .get(index)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    fn calls_for(&self, phase: HookPhase) -> &Vec<Arc<AtomicUsize>> {
        match phase {
            HookPhase::Before => &self.before_calls,
            HookPhase::After => &self.after_calls,
        }
    }

    fn calls_mut(&mut self, phase: HookPhase) -> &mut Vec<Arc<AtomicUsize>> {
        match phase {
            HookPhase::Before => &mut self.before_calls,
            HookPhase::After => &mut self.after_calls,
        }
    }
}

fn body_for(status: Status, label: &str) -> StepFn {
    let label = label.to_string();
    match status {
        Status::Failed => Box::new(move |_| Err(ExecError::Failed(format!("{label} failed")))),
        Status::Pending => Box::new(move |_| Err(ExecError::Pending(format!("{label} is not implemented yet")))),
        // Passed, Skipped, Undefined, Ambiguous: the body either returns
        // normally or is never reached (resolution fails first).
        _ => Box::new(|_| Ok(())),
    }
}

impl StepProvider for FakeGlue {
    fn candidates(&self, text: &str) -> Vec<&StepDefinition> {
        self.steps.candidates(text)
    }
}

impl HookProvider for FakeGlue {
    fn applicable_hooks(&self, phase: HookPhase, tags: &[Tag]) -> Vec<&HookDefinition> {
        self.hooks.applicable_hooks(phase, tags)
    }
}
