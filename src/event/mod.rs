//! Vocabulary shared by the router and the sinks.
//!
//! - [`Severity`]: what the caller asks for
//! - [`EventSeverity`] / [`TraceSeverity`]: what each sink understands
//! - [`Category`] / [`CategoryRegistry`]: registered subsystem areas
//! - [`EventId`]: stable message template identifiers
//! - [`EventRecord`]: the JSON form written to the system log

mod category;
mod event_id;
mod record;
mod severity;

pub use category::{
    Category, CategoryRegistry, CategoryRegistryBuilder, DEMO, GENERAL, LOGGING, UNKNOWN,
};
pub use event_id::{EventId, EventRange, ParseEventIdError};
pub use record::EventRecord;
pub use severity::{EventSeverity, ParseSeverityError, Severity, TraceSeverity};
