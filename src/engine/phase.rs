/// Per-scenario execution phases.
///
/// Valid transitions are strictly forward:
/// `NotStarted -> HooksBefore -> Steps -> HooksAfter -> Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScenarioPhase {
    NotStarted,
    HooksBefore,
    Steps,
    HooksAfter,
    Finished,
}

impl ScenarioPhase {
    /// The following phase; `Finished` is terminal.
    pub fn next(self) -> ScenarioPhase {
        match self {
            ScenarioPhase::NotStarted => ScenarioPhase::HooksBefore,
            ScenarioPhase::HooksBefore => ScenarioPhase::Steps,
            ScenarioPhase::Steps => ScenarioPhase::HooksAfter,
            ScenarioPhase::HooksAfter => ScenarioPhase::Finished,
            ScenarioPhase::Finished => ScenarioPhase::Finished,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ScenarioPhase::Finished
    }
}
