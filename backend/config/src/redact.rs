//! Config redaction: mask secrets before a config is printed or logged.

use serde_json::Value;

/// Keys whose string values are secrets.
static SENSITIVE_KEYS: &[&str] = &["apiKey", "api_key", "token", "secret", "password"];

/// Redact a config JSON value, keeping a 4-character hint of each secret.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => {
            let hint: String = s.chars().take(4).collect();
            if s.chars().count() > 4 {
                Value::String(format!("{hint}***"))
            } else {
                Value::String("***".to_string())
            }
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Dotted paths of every redacted field.
pub fn collect_redacted_paths(value: &Value) -> Vec<String> {
    fn walk(value: &Value, path: &str, out: &mut Vec<String>) {
        if let Value::Object(map) = value {
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                if is_sensitive_key(k) && v.as_str().is_some_and(|s| !s.is_empty()) {
                    out.push(child);
                } else {
                    walk(v, &child, out);
                }
            }
        }
    }

    let mut paths = Vec::new();
    walk(value, "", &mut paths);
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_api_key_with_hint() {
        let v = json!({"classifier": {"apiKey": "tfs-secret-token", "endpoint": "http://x"}});
        let r = redact(&v);
        assert_eq!(r["classifier"]["apiKey"], "tfs-***");
        assert_eq!(r["classifier"]["endpoint"], "http://x");
    }

    #[test]
    fn short_secrets_are_fully_masked() {
        let r = redact(&json!({"password": "abc"}));
        assert_eq!(r["password"], "***");
    }

    #[test]
    fn reports_redacted_paths() {
        let v = json!({"classifier": {"apiKey": "k-123456"}, "server": {"port": 5000}});
        assert_eq!(collect_redacted_paths(&v), vec!["classifier.apiKey"]);
    }
}
