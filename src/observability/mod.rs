//! Observability: tracing setup and the crossing-event log.

pub mod events;
pub mod logging;

pub use events::{EventFormat, EventKind, EventLog, EventRecord};
pub use logging::{LogFormat, init_logging};
