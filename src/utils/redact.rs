use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

const DEFAULT_REDACTION: &str = "[REDACTED]";

// Keys whose values never reach a log line: session material plus the
// secret-bearing host fields that `host.update` can carry.
static SENSITIVE_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "auth",
        "password",
        "apitoken",
        "api_token",
        "token",
        "sessionid",
        "ipmi_password",
        "tls_psk",
        "tls_psk_identity",
        "authorization",
    ]
    .into_iter()
    .collect()
});

static INLINE_REDACTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"\b(Bearer)\s+([A-Za-z0-9._~-]{10,})\b").expect("inline redaction regex"),
            "$1 ***REDACTED***",
        ),
        (
            Regex::new(r#"\b(password|auth|token|api[_-]?token|sessionid)\b\s*([:=])\s*([^\s"'`,}]+)"#)
                .expect("inline redaction regex"),
            "$1$2***REDACTED***",
        ),
        (
            Regex::new(r#""(password|auth|apiToken)"\s*:\s*"[^"]*""#)
                .expect("inline redaction regex"),
            "\"$1\":\"***REDACTED***\"",
        ),
    ]
});

pub fn is_sensitive_key(key: &str) -> bool {
    let normalized = key.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    SENSITIVE_KEYS.contains(normalized.as_str()) || normalized.ends_with("password")
}

fn truncate_string(value: &str, max_length: usize) -> String {
    if max_length == usize::MAX || value.len() <= max_length {
        return value.to_string();
    }
    let mut end = max_length;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &value[..end])
}

pub fn redact_text(value: &str, max_string: usize) -> String {
    let mut out = value.to_string();
    for (re, replacement) in INLINE_REDACTION_PATTERNS.iter() {
        if re.is_match(&out) {
            out = re.replace_all(&out, *replacement).to_string();
        }
    }
    truncate_string(&out, max_string)
}

/// Deep copy of `value` with secret-bearing keys masked. `auth: null` stays
/// null so a login envelope still reads as unauthenticated.
pub fn redact_object(value: &Value, max_string: usize) -> Value {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        Value::String(text) => Value::String(redact_text(text, max_string)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_object(item, max_string))
                .collect(),
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, entry) in map.iter() {
                if is_sensitive_key(key) && !entry.is_null() {
                    out.insert(key.clone(), Value::String(DEFAULT_REDACTION.to_string()));
                    continue;
                }
                out.insert(key.clone(), redact_object(entry, max_string));
            }
            Value::Object(out)
        }
    }
}
