//! Glue layer: step definitions, hooks, tag predicates, and the provider
//! traits the engine consumes.
//!
//! Pattern compilation and user-code discovery are external collaborators;
//! this module defines:
//! - `StepDefinition` / `HookDefinition`: callable units with a source
//!   location for diagnostics.
//! - `StepProvider` / `HookProvider`: the capability set the engine needs
//!   (`candidates`, `applicable_hooks`).
//! - `StepRegistry` / `HookRegistry`: registration-order in-memory stores.
//! - `FakeGlue`: a plain-data fake for tests.

pub mod definition;
pub mod fake;
pub mod registry;

pub use definition::{ExactMatch, HookDefinition, HookFn, HookPhase, StepDefinition, StepFn, StepPattern,
                     TagPredicate};
pub use fake::FakeGlue;
pub use registry::{HookRegistry, StepRegistry};

use crate::model::Tag;

/// Supplies the candidate step definitions matching a step's text.
pub trait StepProvider {
    fn candidates(&self, text: &str) -> Vec<&StepDefinition>;
}

/// Supplies the hooks whose predicate accepts a scenario's tag set, in
/// registration order.
pub trait HookProvider {
    fn applicable_hooks(&self, phase: HookPhase, tags: &[Tag]) -> Vec<&HookDefinition>;
}

/// Full capability set the engine requires from user-code bindings.
pub trait Glue: StepProvider + HookProvider {}

impl<T: StepProvider + HookProvider> Glue for T {}
