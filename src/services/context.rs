use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

use crate::errors::NodeError;

/// What the workflow host hands the node for one invocation.
#[async_trait]
pub trait ExecutionContext: Send + Sync {
    fn item_count(&self) -> usize;

    /// Named parameter as seen by input item `index`.
    fn node_parameter(&self, name: &str, index: usize) -> Option<Value>;

    /// Decrypted credential fields, `None` when nothing is stored under `name`.
    async fn credentials(&self, name: &str) -> Result<Option<Value>, NodeError>;

    fn continue_on_fail(&self) -> bool;
}

/// Context backed by an invocation document:
/// `{parameters, items: [{parameters}], credentials, continueOnFail}`.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticContext {
    parameters: Map<String, Value>,
    items: Vec<Map<String, Value>>,
    credentials: Map<String, Value>,
    continue_on_fail: bool,
}

impl StaticContext {
    /// One input item, no parameters, no credentials.
    pub fn new() -> Self {
        Self {
            parameters: Map::new(),
            items: vec![Map::new()],
            credentials: Map::new(),
            continue_on_fail: false,
        }
    }

    pub fn from_value(doc: &Value) -> Result<Self, NodeError> {
        let obj = doc
            .as_object()
            .ok_or_else(|| NodeError::validation("Invocation document must be a JSON object"))?;

        let parameters = object_member(obj, "parameters")?;
        let credentials = object_member(obj, "credentials")?;

        let items = match obj.get("items") {
            None | Some(Value::Null) => vec![Map::new()],
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| item_parameters(item, index))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(NodeError::validation("items must be an array")),
        };

        let continue_on_fail = match obj.get("continueOnFail") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => return Err(NodeError::validation("continueOnFail must be a boolean")),
        };

        Ok(Self {
            parameters,
            items,
            credentials,
            continue_on_fail,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, NodeError> {
        let doc: Value = serde_json::from_str(raw).map_err(|err| {
            NodeError::validation(format!("Invocation document is not valid JSON: {}", err))
        })?;
        Self::from_value(&doc)
    }

    /// Reads the document from a file, or from stdin when `input` is `-`.
    pub fn load(input: &str) -> Result<Self, NodeError> {
        let raw = if input == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(Path::new(input)).map_err(|err| {
                NodeError::validation(format!("Failed to read {}: {}", input, err))
            })?
        };
        Self::from_json_str(&raw)
    }

    pub fn with_parameter(mut self, name: &str, value: Value) -> Self {
        self.parameters.insert(name.to_string(), value);
        self
    }

    pub fn with_items(mut self, items: Vec<Map<String, Value>>) -> Self {
        self.items = items;
        self
    }

    pub fn with_credentials(mut self, name: &str, value: Value) -> Self {
        self.credentials.insert(name.to_string(), value);
        self
    }

    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }
}

impl Default for StaticContext {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutionContext for StaticContext {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn node_parameter(&self, name: &str, index: usize) -> Option<Value> {
        self.items
            .get(index)
            .and_then(|item| item.get(name))
            .or_else(|| self.parameters.get(name))
            .cloned()
    }

    async fn credentials(&self, name: &str) -> Result<Option<Value>, NodeError> {
        Ok(self.credentials.get(name).filter(|v| !v.is_null()).cloned())
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }
}

fn object_member(obj: &Map<String, Value>, key: &str) -> Result<Map<String, Value>, NodeError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(_) => Err(NodeError::validation(format!("{} must be an object", key))),
    }
}

fn item_parameters(item: &Value, index: usize) -> Result<Map<String, Value>, NodeError> {
    match item.get("parameters") {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(_) => Err(NodeError::validation(format!(
            "items[{}].parameters must be an object",
            index
        ))),
    }
}
