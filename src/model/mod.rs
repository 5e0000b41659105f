//! Scenario data model: immutable structures handed to the engine by the
//! parsing collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::outcome::Status;

/// Position of a scenario or step in its source document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub uri: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(uri: impl Into<String>, line: u32) -> Self {
        Self { uri: uri.into(), line }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uri, self.line)
    }
}

/// A scenario tag, stored exactly as written (`@smoke`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// One action or assertion line within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub text: String,
    pub arguments: Vec<String>,
    pub location: SourceLocation,
}

impl Step {
    pub fn new(text: impl Into<String>, location: SourceLocation) -> Self {
        Self { text: text.into(), arguments: Vec::new(), location }
    }

    pub fn with_arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }
}

/// A fully-resolved, example-expanded scenario: an ordered sequence of steps
/// plus a tag set, identified by its source location. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub tags: Vec<Tag>,
    pub steps: Vec<Step>,
    pub location: SourceLocation,
}

impl Scenario {
    pub fn new(name: impl Into<String>, location: SourceLocation) -> Self {
        Self { name: name.into(), tags: Vec::new(), steps: Vec::new(), location }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(Tag::new(tag));
        self
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }
}

/// Read-only view of the running scenario handed to hook and step callables.
///
/// `status_so_far` is the combination of every result captured up to the
/// point of the call, so after-hooks can inspect how the scenario went.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioContext<'a> {
    pub name: &'a str,
    pub tags: &'a [Tag],
    pub status_so_far: Status,
}
