//! `krishimitra-config` - KrishiMitra runtime configuration.
//!
//! Provides:
//! - Typed config schema (server, uploads, classifier, logging)
//! - YAML read/write with an atomic replace and backup
//! - `${ENV_VAR}` substitution and `KRISHIMITRA_*` overrides
//! - Config redaction for safe display
//! - Default value application
//! - Validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{
    apply_env_overrides, apply_env_overrides_with, collect_referenced_vars, resolve_env_vars,
    resolve_env_vars_with, MissingEnvVarError,
};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use redact::{collect_redacted_paths, redact};
pub use schema::{ClassifierConfig, KrishiConfig, LoggingConfig, ServerConfig, UploadsConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load a config file and run it through env substitution, overrides,
/// defaults and validation.
///
/// This is the main entry point for loading a config at runtime. Validation
/// errors abort; warnings are logged.
pub async fn load_and_prepare(path: &Path) -> Result<KrishiConfig> {
    let raw_config = load_config(path).await?;
    prepare(raw_config)
}

/// The in-memory half of [`load_and_prepare`].
pub fn prepare(raw_config: KrishiConfig) -> Result<KrishiConfig> {
    finalize(resolve_config(raw_config)?)
}

/// Substitute `${VAR}` references and apply `KRISHIMITRA_*` overrides from
/// the process environment.
pub fn resolve_config(raw_config: KrishiConfig) -> Result<KrishiConfig> {
    resolve_config_with(raw_config, &std::env::vars().collect())
}

/// [`resolve_config`] against a provided environment.
pub fn resolve_config_with(
    raw_config: KrishiConfig,
    env: &HashMap<String, String>,
) -> Result<KrishiConfig> {
    let value: Value =
        serde_json::to_value(&raw_config).context("Failed to serialize config for processing")?;

    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;

    let config: KrishiConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    apply_env_overrides_with(config, env)
}

/// Apply defaults to a resolved config and validate it. Errors abort;
/// warnings are logged.
pub fn finalize(config: KrishiConfig) -> Result<KrishiConfig> {
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if let Some(first) = report.errors.first() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        bail!("{first} ({} error(s) total)", report.errors.len());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_prepares_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = load_and_prepare(&tmp.path().join("config.yaml")).await.unwrap();
        assert_eq!(cfg.classifier_kind(), "remote");
        assert_eq!(cfg.max_upload_bytes(), defaults::DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "classifier:\n  kind: static\n  label: Corn Rust\n").unwrap();
        let err = load_and_prepare(&path).await.unwrap_err().to_string();
        assert!(err.contains("classifier.label"), "{err}");
    }

    #[test]
    fn resolved_config_carries_substituted_log_dir() {
        let raw = KrishiConfig {
            logging: Some(LoggingConfig {
                dir: Some("${LOG_DIR}".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let env = HashMap::from([("LOG_DIR".to_string(), "/var/log/krishimitra".to_string())]);

        let resolved = resolve_config_with(raw, &env).unwrap();
        assert_eq!(resolved.log_dir(), Some("/var/log/krishimitra"));

        let config = finalize(resolved).unwrap();
        assert_eq!(config.log_dir(), Some("/var/log/krishimitra"));
    }

    #[tokio::test]
    async fn static_classifier_config_loads() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(
            &path,
            "classifier:\n  kind: static\n  label: Potato Early Blight\n  confidence: 0.9\n",
        )
        .unwrap();
        let cfg = load_and_prepare(&path).await.unwrap();
        let classifier = cfg.classifier.unwrap();
        assert_eq!(classifier.label.as_deref(), Some("Potato Early Blight"));
        assert!(classifier.endpoint.is_none());
    }
}
