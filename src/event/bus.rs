use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::ListenerPolicy;
use crate::errors::EngineError;

use super::types::{RunEvent, RunEventKind};

/// Failure reported by a listener; carried as a message because the bus
/// cannot know listener-specific error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A formatter or other consumer of the ordered event stream. Consumption
/// is synchronous; listeners must not block indefinitely.
pub trait EventListener {
    fn on_event(&mut self, event: &RunEvent) -> Result<(), ListenerError>;
}

/// Delivers events to all subscribed listeners, synchronously and in order.
///
/// `publish` invokes every listener in subscription order before returning,
/// and event order equals publish-call order. One bus instance is
/// constructed per engine and passed by reference, never a process-wide
/// singleton. Callers sharing a bus across worker threads must serialize
/// `publish` so each scenario's events stay contiguous.
pub struct EventBus {
    listeners: Vec<Box<dyn EventListener>>,
    next_seq: u64,
    policy: ListenerPolicy,
}

impl EventBus {
    pub fn new(policy: ListenerPolicy) -> Self {
        Self { listeners: Vec::new(), next_seq: 0, policy }
    }

    pub fn subscribe(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    /// Builds the event (assigning `seq` and timestamp) and delivers it to
    /// every listener before returning.
    ///
    /// A listener failure never skips the remaining listeners. Under
    /// `LogAndContinue` it is logged and swallowed; under `Propagate` the
    /// first failure is returned once delivery is complete.
    pub fn publish(&mut self, run_id: Uuid, kind: RunEventKind) -> Result<RunEvent, EngineError> {
        let event = RunEvent { seq: self.next_seq, run_id, kind, ts: Utc::now() };
        self.next_seq += 1;

        let mut first_failure: Option<EngineError> = None;
        for (index, listener) in self.listeners.iter_mut().enumerate() {
            if let Err(err) = listener.on_event(&event) {
                match self.policy {
                    ListenerPolicy::LogAndContinue => {
                        tracing::warn!(listener = index,
                                       seq = event.seq,
                                       event = event.kind.name(),
                                       error = %err,
                                       "event listener failed; continuing delivery");
                    }
                    ListenerPolicy::Propagate => {
                        if first_failure.is_none() {
                            first_failure = Some(EngineError::Listener { listener_index: index,
                                                                         seq: event.seq,
                                                                         message: err.0 });
                        }
                    }
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(event),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(ListenerPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Appends a label to a shared trace on every event.
    struct TracingListener {
        label: &'static str,
        trace: Arc<Mutex<Vec<(&'static str, u64)>>>,
        fail: bool,
    }

    impl EventListener for TracingListener {
        fn on_event(&mut self, event: &RunEvent) -> Result<(), ListenerError> {
            self.trace.lock().unwrap().push((self.label, event.seq));
            if self.fail {
                Err(ListenerError::new("listener exploded"))
            } else {
                Ok(())
            }
        }
    }

    fn bus_with(policy: ListenerPolicy,
                specs: &[(&'static str, bool)])
                -> (EventBus, Arc<Mutex<Vec<(&'static str, u64)>>>) {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new(policy);
        for &(label, fail) in specs {
            bus.subscribe(Box::new(TracingListener { label,
                                                     trace: Arc::clone(&trace),
                                                     fail }));
        }
        (bus, trace)
    }

    #[test]
    fn delivery_follows_subscription_order_and_seq_follows_publish_order() {
        let (mut bus, trace) = bus_with(ListenerPolicy::LogAndContinue,
                                        &[("first", false), ("second", false)]);
        let run_id = Uuid::new_v4();
        bus.publish(run_id, RunEventKind::RunStarted).unwrap();
        bus.publish(run_id, RunEventKind::RunFinished { status: crate::outcome::Status::Passed })
           .unwrap();

        let seen = trace.lock().unwrap().clone();
        assert_eq!(seen,
                   vec![("first", 0), ("second", 0), ("first", 1), ("second", 1)]);
    }

    #[test]
    fn failing_listener_never_skips_the_remaining_listeners() {
        let (mut bus, trace) = bus_with(ListenerPolicy::LogAndContinue,
                                        &[("faulty", true), ("healthy", false)]);
        bus.publish(Uuid::new_v4(), RunEventKind::RunStarted).unwrap();

        let seen = trace.lock().unwrap().clone();
        assert_eq!(seen, vec![("faulty", 0), ("healthy", 0)]);
    }

    #[test]
    fn propagate_policy_surfaces_the_first_failure_after_full_delivery() {
        let (mut bus, trace) = bus_with(ListenerPolicy::Propagate,
                                        &[("faulty", true), ("healthy", false)]);
        let err = bus.publish(Uuid::new_v4(), RunEventKind::RunStarted).unwrap_err();

        assert!(matches!(err, EngineError::Listener { listener_index: 0, seq: 0, .. }));
        let seen = trace.lock().unwrap().clone();
        assert_eq!(seen, vec![("faulty", 0), ("healthy", 0)], "delivery must still complete");
    }
}
