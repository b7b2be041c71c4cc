use serde_json::{Map, Value};

use crate::schema::{FieldRule, OperationSchema};
use crate::utils::convert::{
    as_bool, bool_to_flag, bool_to_number, key_values_to_object, pairs_to_object, unwrap_key,
    unwrap_list,
};

/// Method parameters as resolved at the node-parameter boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSource {
    /// Raw JSON object, sent as-is.
    Json(Map<String, Value>),
    /// Form collection that still needs per-field coercion.
    Form(Map<String, Value>),
}

/// Turns a parameter source into the object the remote method expects.
/// `required` holds separately-supplied node parameters (e.g. `hostid`) and
/// only applies to form input.
pub fn normalize(
    schema: &OperationSchema,
    source: ParameterSource,
    required: Map<String, Value>,
) -> Map<String, Value> {
    match source {
        ParameterSource::Json(params) => params,
        ParameterSource::Form(form) => {
            let mut out = Map::new();
            for (field, value) in form {
                let normalized = match schema.rule_for(&field) {
                    Some(rule) => apply_rule(rule, value),
                    None => Some(value),
                };
                if let Some(normalized) = normalized {
                    out.insert(field, normalized);
                }
            }
            out.extend(required);
            out
        }
    }
}

/// `None` drops the field from the request.
pub fn apply_rule(rule: FieldRule, value: Value) -> Option<Value> {
    match rule {
        FieldRule::IdList => Some(unwrap_list(&value, "id")),
        FieldRule::SeverityList => Some(unwrap_list(&value, "severityNumber")),
        FieldRule::Unwrap(key) => Some(unwrap_key(&value, key)),
        FieldRule::Flag => Some(as_bool(&value).map(bool_to_flag).unwrap_or(value)),
        FieldRule::Number01 => Some(as_bool(&value).map(bool_to_number).unwrap_or(value)),
        FieldRule::HeaderPairs => Some(Value::Object(pairs_to_object(&value, "header"))),
        FieldRule::KeyValues(wrapper) => Some(Value::Object(key_values_to_object(&unwrap_key(
            &value, wrapper,
        )))),
        FieldRule::KeyValue(wrapper) => {
            Some(Value::Object(pairs_to_object(&value, wrapper)))
        }
        FieldRule::OptionalBool => match &value {
            Value::String(text) if text.trim().is_empty() => None,
            Value::Null => None,
            _ => Some(as_bool(&value).map(Value::Bool).unwrap_or(value)),
        },
    }
}
