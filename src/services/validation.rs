use crate::constants::messages::INVALID_JSON;
use crate::errors::NodeError;
use serde_json::Value;

#[derive(Clone)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_string(&self, value: &Value, label: &str, trim: bool) -> Result<String, NodeError> {
        let text = value.as_str().ok_or_else(|| {
            NodeError::validation(format!("{} must be a non-empty string", label))
        })?;
        let normalized = text.trim();
        if normalized.is_empty() {
            return Err(NodeError::validation(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(if trim {
            normalized.to_string()
        } else {
            text.to_string()
        })
    }

    /// Like `ensure_string` but also accepts numbers, which the form layer
    /// emits for numeric IDs.
    pub fn ensure_identifier(&self, value: Option<&Value>, label: &str) -> Result<String, NodeError> {
        match value {
            Some(Value::Number(num)) => Ok(num.to_string()),
            Some(val) => self.ensure_string(val, label, true),
            None => Err(NodeError::validation(format!("{} is required", label))),
        }
    }

    pub fn ensure_object(
        &self,
        value: &Value,
        label: &str,
    ) -> Result<serde_json::Map<String, Value>, NodeError> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| NodeError::validation(format!("{} must be an object", label)))
    }

    /// Parameters supplied in JSON mode: an object passes through, a string
    /// must parse to an object. An unset parameter means no parameters.
    pub fn ensure_json_parameters(
        &self,
        value: Option<&Value>,
    ) -> Result<serde_json::Map<String, Value>, NodeError> {
        match value {
            None | Some(Value::Null) => Ok(Default::default()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => Ok(map),
                Ok(_) => Err(NodeError::validation(INVALID_JSON)
                    .with_hint("The JSON parameters must be an object")),
                Err(err) => Err(NodeError::validation(INVALID_JSON).with_hint(err.to_string())),
            },
            Some(_) => Err(NodeError::validation(INVALID_JSON)),
        }
    }

    pub fn ensure_bool(&self, value: Option<&Value>, fallback: bool) -> bool {
        match value {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(text)) => match text.trim().to_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => fallback,
            },
            Some(Value::Number(num)) => num.as_i64().map(|n| n != 0).unwrap_or(fallback),
            _ => fallback,
        }
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_parameters_parse_strings() {
        let map = Validation::new()
            .ensure_json_parameters(Some(&Value::String(r#"{"itemids":["10001"]}"#.into())))
            .expect("valid json");
        assert_eq!(map["itemids"], serde_json::json!(["10001"]));
    }

    #[test]
    fn json_parameters_reject_malformed_strings() {
        let err = Validation::new()
            .ensure_json_parameters(Some(&Value::String("{itemids:".into())))
            .unwrap_err();
        assert_eq!(err.message, INVALID_JSON);
        assert_eq!(err.code, "VALIDATION");
    }

    #[test]
    fn json_parameters_reject_blank_strings() {
        let validation = Validation::new();
        for blank in ["", "   "] {
            let err = validation
                .ensure_json_parameters(Some(&Value::String(blank.into())))
                .unwrap_err();
            assert_eq!(err.message, INVALID_JSON);
        }
        assert!(validation.ensure_json_parameters(None).unwrap().is_empty());
    }

    #[test]
    fn json_parameters_reject_non_objects() {
        let err = Validation::new()
            .ensure_json_parameters(Some(&Value::String("[1,2]".into())))
            .unwrap_err();
        assert_eq!(err.message, INVALID_JSON);
    }

    #[test]
    fn identifiers_accept_numbers() {
        let id = Validation::new()
            .ensure_identifier(Some(&serde_json::json!(10084)), "hostid")
            .expect("id");
        assert_eq!(id, "10084");
    }
}
