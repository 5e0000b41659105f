use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ExecError;
use crate::model::{ScenarioContext, Tag};

/// Compiled step-text pattern. Compilation itself (regex, cucumber
/// expressions) lives in an external collaborator; the core only asks
/// whether a pattern matches a step's text.
pub trait StepPattern: Send + Sync {
    fn is_match(&self, text: &str) -> bool;
}

/// Whole-string literal pattern, enough for fakes and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactMatch(pub String);

impl ExactMatch {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl StepPattern for ExactMatch {
    fn is_match(&self, text: &str) -> bool {
        self.0 == text
    }
}

pub type StepFn = Box<dyn Fn(&ScenarioContext<'_>) -> Result<(), ExecError> + Send + Sync>;
pub type HookFn = Box<dyn Fn(&ScenarioContext<'_>) -> Result<(), ExecError> + Send + Sync>;

/// A registered step definition: a pattern, a source location for
/// diagnostics, and the callable body.
pub struct StepDefinition {
    pattern: Box<dyn StepPattern>,
    pub location: String,
    body: StepFn,
}

impl StepDefinition {
    pub fn new(pattern: impl StepPattern + 'static, location: impl Into<String>, body: StepFn) -> Self {
        Self { pattern: Box::new(pattern), location: location.into(), body }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn execute(&self, ctx: &ScenarioContext<'_>) -> Result<(), ExecError> {
        (self.body)(ctx)
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition").field("location", &self.location).finish_non_exhaustive()
    }
}

/// Boolean predicate over a scenario's tag set.
///
/// The expression grammar (AND/OR/NOT over tags) belongs to the
/// tag-expression collaborator; here a predicate is an opaque function.
pub struct TagPredicate(Box<dyn Fn(&[Tag]) -> bool + Send + Sync>);

impl TagPredicate {
    /// Default predicate: matches every scenario.
    pub fn always() -> Self {
        Self(Box::new(|_| true))
    }

    /// Matches scenarios carrying the given tag.
    pub fn tag(name: impl Into<String>) -> Self {
        let name = name.into();
        Self(Box::new(move |tags| tags.iter().any(|t| t.name() == name)))
    }

    /// Negation of another predicate.
    pub fn not(inner: TagPredicate) -> Self {
        Self(Box::new(move |tags| !inner.matches(tags)))
    }

    pub fn from_fn(f: impl Fn(&[Tag]) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn matches(&self, tags: &[Tag]) -> bool {
        (self.0)(tags)
    }
}

impl fmt::Debug for TagPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TagPredicate(..)")
    }
}

/// Phase a hook is bound to, relative to the scenario's steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPhase {
    Before,
    After,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookPhase::Before => "before",
            HookPhase::After => "after",
        })
    }
}

/// User code run automatically around scenarios whose tag set satisfies the
/// predicate. Stateless between invocations except for user-visible side
/// effects.
pub struct HookDefinition {
    pub predicate: TagPredicate,
    pub location: String,
    body: HookFn,
}

impl HookDefinition {
    pub fn new(predicate: TagPredicate, location: impl Into<String>, body: HookFn) -> Self {
        Self { predicate, location: location.into(), body }
    }

    /// Hook with the default always-match predicate.
    pub fn unconditional(location: impl Into<String>, body: HookFn) -> Self {
        Self::new(TagPredicate::always(), location, body)
    }

    pub fn execute(&self, ctx: &ScenarioContext<'_>) -> Result<(), ExecError> {
        (self.body)(ctx)
    }
}

impl fmt::Debug for HookDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookDefinition").field("location", &self.location).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<Tag> {
        names.iter().map(|n| Tag::new(*n)).collect()
    }

    #[test]
    fn exact_match_requires_the_whole_text() {
        let p = ExactMatch::new("I have 3 cukes");
        assert!(p.is_match("I have 3 cukes"));
        assert!(!p.is_match("I have 3 cukes left"));
        assert!(!p.is_match("I have 3"));
    }

    #[test]
    fn tag_predicate_combinators() {
        let skip = TagPredicate::tag("@skip");
        assert!(skip.matches(&tags(&["@skip", "@smoke"])));
        assert!(!skip.matches(&tags(&["@smoke"])));

        let not_skip = TagPredicate::not(TagPredicate::tag("@skip"));
        assert!(!not_skip.matches(&tags(&["@skip"])));
        assert!(not_skip.matches(&tags(&[])));

        assert!(TagPredicate::always().matches(&tags(&[])));
    }
}
