use std::sync::{Arc, Mutex};

use super::bus::{EventListener, ListenerError};
use super::types::{RunEvent, RunEventKind};

/// Listener capturing every event into shared memory.
///
/// Clones share the same underlying log, so a test can keep one handle and
/// subscribe the other.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    inner: Arc<Mutex<Vec<RunEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured events, in delivery order.
    pub fn events(&self) -> Vec<RunEvent> {
        self.inner.lock().expect("event log poisoned").clone()
    }

    /// Compact view of the captured event kinds, for order assertions.
    pub fn kind_names(&self) -> Vec<&'static str> {
        self.inner.lock()
            .expect("event log poisoned")
            .iter()
            .map(|e| e.kind.name())
            .collect()
    }

    pub fn kinds(&self) -> Vec<RunEventKind> {
        self.inner.lock()
            .expect("event log poisoned")
            .iter()
            .map(|e| e.kind.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("event log poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventListener for EventLog {
    fn on_event(&mut self, event: &RunEvent) -> Result<(), ListenerError> {
        self.inner.lock().expect("event log poisoned").push(event.clone());
        Ok(())
    }
}
