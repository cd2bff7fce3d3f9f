//! Structured logging for KrishiMitra.
//!
//! Console and rolling NDJSON file output, redaction of sensitive strings, and
//! structured service events for predictions and chat.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, ServiceEvent};
pub use logger::{init_logger, LogOptions};
pub use redact::redact_sensitive_data;
