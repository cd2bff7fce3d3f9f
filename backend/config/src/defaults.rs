//! Config defaults: the values used when a field is absent, and a pass that
//! writes them into a config so `config init` / `config show` print them.

use crate::schema::{ClassifierConfig, KrishiConfig, LoggingConfig, ServerConfig, UploadsConfig};

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// 16 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_UPLOAD_DIR: &str = "static/uploads/";

pub const DEFAULT_CLASSIFIER_KIND: &str = "remote";
pub const DEFAULT_CLASSIFIER_ENDPOINT: &str =
    "http://localhost:8501/v1/models/plant_disease:predict";
pub const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: KrishiConfig) -> KrishiConfig {
    let config = apply_server_defaults(config);
    let config = apply_upload_defaults(config);
    let config = apply_classifier_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: KrishiConfig) -> KrishiConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server.max_upload_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    server
        .static_dir
        .get_or_insert_with(|| DEFAULT_STATIC_DIR.to_string());
    config
}

fn apply_upload_defaults(mut config: KrishiConfig) -> KrishiConfig {
    let uploads = config.uploads.get_or_insert_with(UploadsConfig::default);
    uploads.dir.get_or_insert_with(|| DEFAULT_UPLOAD_DIR.to_string());
    config
}

/// Only the fields relevant to the selected kind are filled in.
fn apply_classifier_defaults(mut config: KrishiConfig) -> KrishiConfig {
    let classifier = config.classifier.get_or_insert_with(ClassifierConfig::default);
    let kind = classifier
        .kind
        .get_or_insert_with(|| DEFAULT_CLASSIFIER_KIND.to_string());
    if kind.as_str() == "remote" {
        classifier
            .endpoint
            .get_or_insert_with(|| DEFAULT_CLASSIFIER_ENDPOINT.to_string());
        classifier
            .timeout_secs
            .get_or_insert(DEFAULT_CLASSIFIER_TIMEOUT_SECS);
    }
    config
}

/// `dir` stays unset: file logging is opt-in.
fn apply_logging_defaults(mut config: KrishiConfig) -> KrishiConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let cfg = apply_all_defaults(KrishiConfig::default());
        let server = cfg.server.as_ref().unwrap();
        assert_eq!(server.port, Some(DEFAULT_PORT));
        assert_eq!(server.max_upload_bytes, Some(DEFAULT_MAX_UPLOAD_BYTES));
        assert_eq!(cfg.uploads.unwrap().dir.as_deref(), Some(DEFAULT_UPLOAD_DIR));
        let classifier = cfg.classifier.unwrap();
        assert_eq!(classifier.kind.as_deref(), Some("remote"));
        assert_eq!(classifier.endpoint.as_deref(), Some(DEFAULT_CLASSIFIER_ENDPOINT));
        assert_eq!(cfg.logging.unwrap().level.as_deref(), Some("info"));
    }

    #[test]
    fn file_logging_is_opt_in() {
        let cfg = apply_all_defaults(KrishiConfig::default());
        assert_eq!(cfg.log_dir(), None);
        assert!(!cfg.log_json());
    }

    #[test]
    fn does_not_override_user_values() {
        let mut cfg = KrishiConfig::default();
        cfg.server = Some(ServerConfig {
            port: Some(8080),
            ..Default::default()
        });
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.server.unwrap().port, Some(8080));
    }

    #[test]
    fn static_classifier_gets_no_endpoint() {
        let mut cfg = KrishiConfig::default();
        cfg.classifier = Some(ClassifierConfig {
            kind: Some("static".into()),
            ..Default::default()
        });
        let classifier = apply_all_defaults(cfg).classifier.unwrap();
        assert!(classifier.endpoint.is_none());
        assert!(classifier.timeout_secs.is_none());
    }
}
