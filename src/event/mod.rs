//! Event definitions, the synchronous ordered bus, and a capturing log.

mod bus;
mod log;
mod types;

pub use bus::{EventBus, EventListener, ListenerError};
pub use log::EventLog;
pub use types::{RunEvent, RunEventKind};
