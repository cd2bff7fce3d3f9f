//! KrishiMitra configuration schema.
//!
//! Every section and field is optional so a partial YAML file (or none at all)
//! is valid. Accessors on [`KrishiConfig`] fall back to the defaults in
//! [`crate::defaults`].

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_BIND, DEFAULT_CLASSIFIER_ENDPOINT, DEFAULT_CLASSIFIER_KIND,
    DEFAULT_CLASSIFIER_TIMEOUT_SECS, DEFAULT_LOG_LEVEL, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT,
    DEFAULT_STATIC_DIR, DEFAULT_UPLOAD_DIR,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KrishiConfig {
    /// HTTP server settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Where uploaded photos are stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploads: Option<UploadsConfig>,

    /// Leaf classifier backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<ClassifierConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Largest accepted request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
    /// Directory holding `index.html` for the landing page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// "remote" | "static"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Model server predict URL (remote only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Bearer token for the model server (remote only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Fixed answer (static only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON logs; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

// ---------------------------------------------------------------------------
// Effective values
// ---------------------------------------------------------------------------

impl KrishiConfig {
    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server
            .as_ref()
            .and_then(|s| s.max_upload_bytes)
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn static_dir(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.static_dir.as_deref())
            .unwrap_or(DEFAULT_STATIC_DIR)
    }

    pub fn upload_dir(&self) -> &str {
        self.uploads
            .as_ref()
            .and_then(|u| u.dir.as_deref())
            .unwrap_or(DEFAULT_UPLOAD_DIR)
    }

    pub fn classifier_kind(&self) -> &str {
        self.classifier
            .as_ref()
            .and_then(|c| c.kind.as_deref())
            .unwrap_or(DEFAULT_CLASSIFIER_KIND)
    }

    pub fn classifier_endpoint(&self) -> &str {
        self.classifier
            .as_ref()
            .and_then(|c| c.endpoint.as_deref())
            .unwrap_or(DEFAULT_CLASSIFIER_ENDPOINT)
    }

    pub fn classifier_timeout_secs(&self) -> u64 {
        self.classifier
            .as_ref()
            .and_then(|c| c.timeout_secs)
            .unwrap_or(DEFAULT_CLASSIFIER_TIMEOUT_SECS)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}
