//! Engine configuration.

/// What the event bus does when a subscribed listener fails.
///
/// Either way, delivery to the remaining listeners is never skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerPolicy {
    /// Log the failure and keep going. Recommended default.
    #[default]
    LogAndContinue,
    /// Finish delivering the event, then surface the first failure to the
    /// engine's caller.
    Propagate,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    pub listener_policy: ListenerPolicy,
}

impl EngineConfig {
    pub fn propagating_listener_errors() -> Self {
        Self { listener_policy: ListenerPolicy::Propagate }
    }
}
