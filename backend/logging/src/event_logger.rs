//! Service Event Logger
//!
//! One structured record per prediction, chat answer or rejected request,
//! emitted under the `service_events` target so it can be filtered or routed
//! separately from diagnostic logs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceEvent {
    Prediction {
        disease: String,
        confidence: f32,
        urgency: String,
        image: String,
    },
    Chat {
        question: String,
        topic: Option<String>,
    },
    UploadRejected {
        reason: String,
    },
    Error {
        error_msg: String,
    },
}

impl ServiceEvent {
    /// Scrub free-text fields.
    fn redacted(self) -> Self {
        match self {
            ServiceEvent::Chat { question, topic } => ServiceEvent::Chat {
                question: redact_sensitive_data(&question),
                topic,
            },
            ServiceEvent::UploadRejected { reason } => ServiceEvent::UploadRejected {
                reason: redact_sensitive_data(&reason),
            },
            ServiceEvent::Error { error_msg } => ServiceEvent::Error {
                error_msg: redact_sensitive_data(&error_msg),
            },
            prediction @ ServiceEvent::Prediction { .. } => prediction,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: ServiceEvent,
}

impl EventLogEntry {
    pub fn new(request_id: &str, event: ServiceEvent) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event: event.redacted(),
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Redact and emit a service event.
    pub fn log_event(request_id: &str, event: ServiceEvent) {
        let entry = EventLogEntry::new(request_id, event);
        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "service_events", event = %json, "Service event"),
            Err(_) => info!(target: "service_events", event = ?entry, "Service event"),
        }
    }
}
