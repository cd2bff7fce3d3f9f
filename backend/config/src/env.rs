//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references inside string values, resolved at load time.
//!   Only uppercase `[A-Z_][A-Z0-9_]*` names are matched; `$${VAR}` is a
//!   literal `${VAR}`.
//! - Fixed `KRISHIMITRA_*` override variables applied on top of the file.

use std::collections::HashMap;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::schema::{ClassifierConfig, KrishiConfig, LoggingConfig, ServerConfig, UploadsConfig};

pub const ENV_BIND: &str = "KRISHIMITRA_BIND";
pub const ENV_PORT: &str = "KRISHIMITRA_PORT";
pub const ENV_UPLOAD_DIR: &str = "KRISHIMITRA_UPLOAD_DIR";
pub const ENV_CLASSIFIER_URL: &str = "KRISHIMITRA_CLASSIFIER_URL";
pub const ENV_LOG_LEVEL: &str = "RUST_LOG";

/// `$${NAME}` (escaped) or `${NAME}`.
static ENV_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\$)?\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references throughout a config value tree using the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute env vars using a provided map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.insert(k.clone(), substitute_value(v, env, &child)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let out = ENV_REF.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if caps.get(1).is_some() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(out.into_owned())
}

/// Collect all env var names referenced in a config value tree (for diagnostics).
pub fn collect_referenced_vars(value: &Value) -> Vec<String> {
    fn walk(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::String(s) => out.extend(
                ENV_REF
                    .captures_iter(s)
                    .filter(|caps| caps.get(1).is_none())
                    .map(|caps| caps[2].to_string()),
            ),
            Value::Array(items) => items.iter().for_each(|v| walk(v, out)),
            Value::Object(map) => map.values().for_each(|v| walk(v, out)),
            _ => {}
        }
    }

    let mut vars = Vec::new();
    walk(value, &mut vars);
    vars.sort();
    vars.dedup();
    vars
}

/// Apply `KRISHIMITRA_*` overrides from the process environment.
pub fn apply_env_overrides(config: KrishiConfig) -> Result<KrishiConfig> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map. Unset or empty variables are ignored.
pub fn apply_env_overrides_with(
    mut config: KrishiConfig,
    env: &HashMap<String, String>,
) -> Result<KrishiConfig> {
    let get = |name: &str| env.get(name).filter(|v| !v.is_empty()).cloned();

    if let Some(bind) = get(ENV_BIND) {
        config.server.get_or_insert_with(ServerConfig::default).bind = Some(bind);
    }
    if let Some(port) = get(ENV_PORT) {
        let Ok(port) = port.parse::<u16>() else {
            bail!("{ENV_PORT} must be a port number, got {port:?}");
        };
        config.server.get_or_insert_with(ServerConfig::default).port = Some(port);
    }
    if let Some(dir) = get(ENV_UPLOAD_DIR) {
        config.uploads.get_or_insert_with(UploadsConfig::default).dir = Some(dir);
    }
    if let Some(url) = get(ENV_CLASSIFIER_URL) {
        config
            .classifier
            .get_or_insert_with(ClassifierConfig::default)
            .endpoint = Some(url);
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level);
    }
    Ok(config)
}
