//! Config validation: checks with user-friendly error messages.

use crate::schema::KrishiConfig;
use krishimitra_core::DiseaseLabel;
use std::net::IpAddr;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &KrishiConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_uploads(config, &mut report);
    validate_classifier(config, &mut report);
    report
}

fn validate_server(config: &KrishiConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if let Some(port) = server.port {
        if port == 0 {
            report.error("server.port", "Port must be between 1 and 65535");
        } else if port < 1024 && port != 80 && port != 443 {
            report.warn(
                "server.port",
                format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
            );
        }
    }
    if server.max_upload_bytes == Some(0) {
        report.error("server.maxUploadBytes", "maxUploadBytes must be > 0");
    }
    if let Some(bind) = server.bind.as_deref() {
        if bind.parse::<IpAddr>().is_err() {
            report.error(
                "server.bind",
                format!("Bind address must be an IP address, got '{bind}'"),
            );
        }
    }
}

fn validate_uploads(config: &KrishiConfig, report: &mut ValidationReport) {
    let Some(uploads) = &config.uploads else { return };
    if uploads.dir.as_deref().is_some_and(|d| d.trim().is_empty()) {
        report.error("uploads.dir", "Upload directory cannot be empty");
    }
}

fn validate_classifier(config: &KrishiConfig, report: &mut ValidationReport) {
    let Some(classifier) = &config.classifier else { return };
    match config.classifier_kind() {
        "remote" => {
            let endpoint = config.classifier_endpoint();
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                report.error(
                    "classifier.endpoint",
                    format!("Endpoint must be an http(s) URL, got '{endpoint}'"),
                );
            }
            if classifier.timeout_secs == Some(0) {
                report.error("classifier.timeoutSecs", "timeoutSecs must be >= 1");
            }
            if classifier.label.is_some() {
                report.warn("classifier.label", "label is ignored by the remote classifier");
            }
        }
        "static" => {
            match classifier.label.as_deref() {
                None => report.error("classifier.label", "Static classifier needs a label"),
                Some(label) if label.parse::<DiseaseLabel>().is_err() => report.error(
                    "classifier.label",
                    format!("Unknown disease label '{label}'"),
                ),
                Some(_) => {}
            }
            if let Some(confidence) = classifier.confidence {
                if !(0.0..=1.0).contains(&confidence) {
                    report.error("classifier.confidence", "confidence must be within [0, 1]");
                }
            }
        }
        other => report.error(
            "classifier.kind",
            format!("Unknown classifier kind '{other}'. Use 'remote' or 'static'"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ClassifierConfig, ServerConfig};

    fn with_classifier(classifier: ClassifierConfig) -> KrishiConfig {
        KrishiConfig {
            classifier: Some(classifier),
            ..Default::default()
        }
    }

    #[test]
    fn empty_config_is_valid() {
        let report = validate(&KrishiConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = crate::defaults::apply_all_defaults(KrishiConfig::default());
        let report = validate(&cfg);
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn port_zero_is_error_low_port_is_warning() {
        let mut cfg = KrishiConfig::default();
        cfg.server = Some(ServerConfig {
            port: Some(0),
            ..Default::default()
        });
        assert!(!validate(&cfg).is_valid());

        cfg.server = Some(ServerConfig {
            port: Some(81),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "server.port");
    }

    #[test]
    fn bind_must_be_an_ip() {
        let mut cfg = KrishiConfig::default();
        cfg.server = Some(ServerConfig {
            bind: Some("localhost".into()),
            ..Default::default()
        });
        assert_eq!(validate(&cfg).errors[0].path, "server.bind");

        cfg.server = Some(ServerConfig {
            bind: Some("::".into()),
            ..Default::default()
        });
        assert!(validate(&cfg).is_valid());
    }

    #[test]
    fn unknown_kind_is_error() {
        let report = validate(&with_classifier(ClassifierConfig {
            kind: Some("onnx".into()),
            ..Default::default()
        }));
        assert!(report.errors[0].message.contains("onnx"));
    }

    #[test]
    fn remote_needs_http_endpoint() {
        let report = validate(&with_classifier(ClassifierConfig {
            kind: Some("remote".into()),
            endpoint: Some("localhost:8501".into()),
            ..Default::default()
        }));
        assert_eq!(report.errors[0].path, "classifier.endpoint");
    }

    #[test]
    fn static_needs_known_label() {
        let report = validate(&with_classifier(ClassifierConfig {
            kind: Some("static".into()),
            label: Some("Corn Rust".into()),
            ..Default::default()
        }));
        assert!(!report.is_valid());

        let report = validate(&with_classifier(ClassifierConfig {
            kind: Some("static".into()),
            label: Some("Tomato Healthy".into()),
            confidence: Some(1.5),
            ..Default::default()
        }));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "classifier.confidence");
    }
}
