use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::NodeError;

/// The `error` member of a JSON-RPC response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RemoteErrorBody {
    /// Accepts the structured object as well as a bare string error.
    pub fn from_value(value: &Value) -> Self {
        if let Some(text) = value.as_str() {
            return Self {
                code: None,
                message: Some(text.to_string()),
                data: None,
            };
        }
        serde_json::from_value(value.clone()).unwrap_or_else(|_| Self {
            code: None,
            message: Some(value.to_string()),
            data: None,
        })
    }

    pub fn into_node_error(self, raw: &Value) -> NodeError {
        NodeError::remote(self.to_string()).with_details(raw.clone())
    }
}

impl fmt::Display for RemoteErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self
            .message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("Remote API returned an error");
        match self.data.as_ref() {
            Some(Value::String(data)) if !data.trim().is_empty() => {
                write!(f, "{} {}", message, data)
            }
            Some(data) if !data.is_null() && !data.is_string() => {
                write!(f, "{} {}", message, data)
            }
            _ => write!(f, "{}", message),
        }
    }
}
