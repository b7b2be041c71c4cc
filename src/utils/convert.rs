//! Shape coercions from form-style values to what the Zabbix API accepts.

use serde_json::{Map, Value};

/// Zabbix "flag" parameters: present enables, absent/null disables.
pub fn bool_to_flag(input: bool) -> Value {
    if input {
        Value::from(1)
    } else {
        Value::Null
    }
}

/// Zabbix integer booleans.
pub fn bool_to_number(input: bool) -> Value {
    Value::from(if input { 1 } else { 0 })
}

/// `[{id: "1"}, {id: "2"}]` -> `["1", "2"]`. Bare scalars are kept as they
/// are; wrapper objects without `key` are dropped.
pub fn unwrap_list(value: &Value, key: &str) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(map) => map.get(key).cloned(),
                    Value::Null => None,
                    other => Some(other.clone()),
                })
                .collect(),
        ),
        Value::Object(map) => match map.get(key) {
            Some(Value::Array(inner)) => Value::Array(inner.clone()),
            Some(inner) => Value::Array(vec![inner.clone()]),
            None => Value::Array(Vec::new()),
        },
        Value::Null => Value::Array(Vec::new()),
        other => other.clone(),
    }
}

/// `{tags: [...]}` -> `[...]`. Values not wrapped under `key` pass through.
pub fn unwrap_key(value: &Value, key: &str) -> Value {
    match value {
        Value::Object(map) if map.contains_key(key) => map.get(key).cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}

/// Entries of `[{key, values}]` folded into one object. `values` may be a
/// list of `{value}` wrappers, a `{value: ...}` object, or a scalar.
pub fn key_values_to_object(value: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    for entry in entries(value) {
        let Some(key) = entry.get("key").and_then(|v| v.as_str()).filter(|k| !k.is_empty())
        else {
            continue;
        };
        let resolved = match entry.get("values").or_else(|| entry.get("value")) {
            Some(Value::Array(items)) => unwrap_list(&Value::Array(items.clone()), "value"),
            Some(Value::Object(map)) => map.get("value").cloned().unwrap_or(Value::Null),
            Some(other) => other.clone(),
            None => Value::Null,
        };
        if is_blank(&resolved) {
            continue;
        }
        out.insert(key.to_string(), resolved);
    }
    out
}

/// `{header: [{key, value}]}` (or the bare list) -> `{key: value}`.
pub fn pairs_to_object(value: &Value, wrapper: &str) -> Map<String, Value> {
    let inner = unwrap_key(value, wrapper);
    let mut out = Map::new();
    for entry in entries(&inner) {
        let Some(key) = entry.get("key").and_then(|v| v.as_str()).filter(|k| !k.is_empty())
        else {
            continue;
        };
        out.insert(
            key.to_string(),
            entry.get("value").cloned().unwrap_or(Value::Null),
        );
    }
    out
}

/// Form booleans may arrive as strings; `None` means "not a boolean".
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn entries(value: &Value) -> Vec<&Map<String, Value>> {
    match value {
        Value::Array(items) => items.iter().filter_map(|v| v.as_object()).collect(),
        Value::Object(map) => vec![map],
        _ => Vec::new(),
    }
}
