//! Step resolution: maps a step's text to exactly one registered definition.
//!
//! Resolution is pure: it never executes the step and holds no state, so
//! scenarios cannot leak matching behavior into each other.

use crate::errors::ExecError;
use crate::glue::{StepDefinition, StepProvider};
use crate::model::ScenarioContext;

/// The binding of a step to the single definition that matched it. Borrowed
/// from the provider for the duration of one step execution.
#[derive(Debug, Clone, Copy)]
pub struct StepMatch<'a> {
    pub definition: &'a StepDefinition,
}

impl<'a> StepMatch<'a> {
    pub fn location(&self) -> &str {
        &self.definition.location
    }

    pub fn execute(&self, ctx: &ScenarioContext<'_>) -> Result<(), ExecError> {
        self.definition.execute(ctx)
    }
}

/// Why a step could not be bound to a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// No registered definition matched.
    Undefined,
    /// More than one definition matched; carries every conflicting
    /// definition location for diagnostics.
    Ambiguous { locations: Vec<String> },
}

/// Resolves `text` against the provider's registered definitions.
pub fn resolve<'a, P>(provider: &'a P, text: &str) -> Result<StepMatch<'a>, ResolutionFailure>
    where P: StepProvider + ?Sized
{
    let candidates = provider.candidates(text);
    match candidates.as_slice() {
        [] => Err(ResolutionFailure::Undefined),
        [single] => Ok(StepMatch { definition: *single }),
        many => Err(ResolutionFailure::Ambiguous { locations: many.iter()
                                                                  .map(|d| d.location.clone())
                                                                  .collect() }),
    }
}
