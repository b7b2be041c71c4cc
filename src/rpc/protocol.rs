use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::rpc::{JSONRPC_VERSION, REQUEST_ID};
use crate::errors::{NodeError, RemoteErrorBody};

/// Request body sent to `api_jsonrpc.php`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcEnvelope {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    pub id: u64,
    pub auth: Option<String>,
}

impl JsonRpcEnvelope {
    pub fn new(method: &str, params: Value, auth: Option<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
            id: REQUEST_ID,
            auth,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl JsonRpcResponse {
    pub fn from_value(raw: &Value) -> Result<Self, NodeError> {
        if !raw.is_object() {
            return Err(NodeError::remote(format!(
                "Expected a JSON-RPC response object, got {}",
                value_type_name(raw)
            ))
            .with_details(raw.clone()));
        }
        serde_json::from_value(raw.clone()).map_err(|err| {
            NodeError::remote(format!("Malformed JSON-RPC response: {}", err))
                .with_details(raw.clone())
        })
    }

    pub fn remote_error(&self) -> Option<RemoteErrorBody> {
        self.error
            .as_ref()
            .filter(|err| !err.is_null())
            .map(RemoteErrorBody::from_value)
    }
}

pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
