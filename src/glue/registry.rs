use crate::model::Tag;

use super::definition::{HookDefinition, HookPhase, StepDefinition};
use super::{HookProvider, StepProvider};

/// Registration-order store of step definitions.
///
/// The production counterpart of `FakeGlue`: definitions arrive from the
/// user-code discovery collaborator already carrying compiled patterns.
#[derive(Debug, Default)]
pub struct StepRegistry {
    definitions: Vec<StepDefinition>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: StepDefinition) {
        self.definitions.push(definition);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl StepProvider for StepRegistry {
    fn candidates(&self, text: &str) -> Vec<&StepDefinition> {
        self.definitions.iter().filter(|d| d.matches(text)).collect()
    }
}

/// Stores before/after hooks and answers which apply to a scenario.
///
/// Execution order equals registration order for both phases; there is no
/// implicit sorting or priority (a priority field stays a configuration
/// extension point).
#[derive(Debug, Default)]
pub struct HookRegistry {
    before: Vec<HookDefinition>,
    after: Vec<HookDefinition>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, phase: HookPhase, hook: HookDefinition) {
        match phase {
            HookPhase::Before => self.before.push(hook),
            HookPhase::After => self.after.push(hook),
        }
    }

    fn phase_hooks(&self, phase: HookPhase) -> &[HookDefinition] {
        match phase {
            HookPhase::Before => &self.before,
            HookPhase::After => &self.after,
        }
    }
}

impl HookProvider for HookRegistry {
    fn applicable_hooks(&self, phase: HookPhase, tags: &[Tag]) -> Vec<&HookDefinition> {
        self.phase_hooks(phase)
            .iter()
            .filter(|h| h.predicate.matches(tags))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glue::definition::{ExactMatch, TagPredicate};

    fn noop_step(location: &str, pattern: &str) -> StepDefinition {
        StepDefinition::new(ExactMatch::new(pattern), location, Box::new(|_| Ok(())))
    }

    fn noop_hook(location: &str, predicate: TagPredicate) -> HookDefinition {
        HookDefinition::new(predicate, location, Box::new(|_| Ok(())))
    }

    #[test]
    fn step_registry_returns_every_matching_candidate() {
        let mut registry = StepRegistry::new();
        registry.register(noop_step("steps.rs:1", "a step"));
        registry.register(noop_step("steps.rs:2", "a step"));
        registry.register(noop_step("steps.rs:3", "another step"));

        let found = registry.candidates("a step");
        let locations: Vec<&str> = found.iter().map(|d| d.location.as_str()).collect();
        assert_eq!(locations, vec!["steps.rs:1", "steps.rs:2"]);
        assert!(registry.candidates("missing step").is_empty());
    }

    #[test]
    fn hook_order_equals_registration_order() {
        let mut registry = HookRegistry::new();
        registry.register(HookPhase::Before, noop_hook("hooks.rs:1", TagPredicate::always()));
        registry.register(HookPhase::Before, noop_hook("hooks.rs:2", TagPredicate::always()));
        registry.register(HookPhase::After, noop_hook("hooks.rs:3", TagPredicate::always()));

        let before = registry.applicable_hooks(HookPhase::Before, &[]);
        let locations: Vec<&str> = before.iter().map(|h| h.location.as_str()).collect();
        assert_eq!(locations, vec!["hooks.rs:1", "hooks.rs:2"]);

        let after = registry.applicable_hooks(HookPhase::After, &[]);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].location, "hooks.rs:3");
    }

    #[test]
    fn predicate_filters_hooks_by_scenario_tags() {
        let mut registry = HookRegistry::new();
        registry.register(HookPhase::Before, noop_hook("hooks.rs:1", TagPredicate::tag("@db")));
        registry.register(HookPhase::Before,
                          noop_hook("hooks.rs:2", TagPredicate::not(TagPredicate::tag("@db"))));

        let db = [Tag::new("@db")];
        let with_db = registry.applicable_hooks(HookPhase::Before, &db);
        assert_eq!(with_db.len(), 1);
        assert_eq!(with_db[0].location, "hooks.rs:1");

        let without_db = registry.applicable_hooks(HookPhase::Before, &[]);
        assert_eq!(without_db.len(), 1);
        assert_eq!(without_db[0].location, "hooks.rs:2");
    }
}
