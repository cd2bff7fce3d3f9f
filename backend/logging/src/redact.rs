//! Log Redaction Layer
//!
//! Chat questions and error messages are free text from growers. Phone
//! numbers, e-mail addresses and bearer tokens are scrubbed before they are
//! logged.

use regex::Regex;
use std::sync::LazyLock;

// 10 to 15 digits, optionally separated by single spaces, dots or dashes.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d(?:[\s.-]?\d){9,14}").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(bearer\s+[a-z0-9\-._~+/]+=*)|(sk-[a-zA-Z0-9]{32,})").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = TOKEN_RE.replace_all(input, "[REDACTED_TOKEN]");
    let redacted = EMAIL_RE.replace_all(&redacted, "[REDACTED_EMAIL]");
    PHONE_RE
        .replace_all(&redacted, "[REDACTED_PHONE]")
        .into_owned()
}
