#![allow(dead_code)]

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use zabbix_bridge::errors::NodeError;
use zabbix_bridge::managers::zabbix::ZabbixManager;
use zabbix_bridge::rpc::RpcRequest;
use zabbix_bridge::services::context::StaticContext;
use zabbix_bridge::services::logger::Logger;
use zabbix_bridge::services::transport::Transport;
use zabbix_bridge::services::validation::Validation;

pub static ENV_LOCK: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

pub const SESSION_TOKEN: &str = "0424bd59b807674191e7d77572075f33";
pub const API_TOKEN: &str = "b72be8cf163438aacc5afa40a112155e307c3548ae63bd97b87ff4e98b1f7657";

/// Records every request and answers from per-method scripts. Unscripted
/// methods get a plausible default: a session id for `user.login`, `true`
/// for `user.logout`, an empty list otherwise.
#[derive(Default)]
pub struct MockTransport {
    scripts: Mutex<HashMap<String, VecDeque<Result<Value, NodeError>>>>,
    calls: Mutex<Vec<RpcRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: &str, body: Value) -> &Self {
        self.push(method, Ok(body))
    }

    pub fn fail(&self, method: &str, err: NodeError) -> &Self {
        self.push(method, Err(err))
    }

    fn push(&self, method: &str, outcome: Result<Value, NodeError>) -> &Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<RpcRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| call.body.method.clone())
            .collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.methods().iter().filter(|m| *m == method).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &RpcRequest) -> Result<Value, NodeError> {
        self.calls.lock().unwrap().push(request.clone());
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&request.body.method)
            .and_then(|queue| queue.pop_front());
        match scripted {
            Some(outcome) => outcome,
            None => Ok(match request.body.method.as_str() {
                "user.login" => rpc_result(Value::String(SESSION_TOKEN.to_string())),
                "user.logout" => rpc_result(Value::Bool(true)),
                _ => rpc_result(Value::Array(Vec::new())),
            }),
        }
    }
}

pub fn rpc_result(result: Value) -> Value {
    serde_json::json!({ "jsonrpc": "2.0", "result": result, "id": 1 })
}

pub fn rpc_error(message: &str, data: Option<&str>) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "error": { "code": -32602, "message": message, "data": data },
        "id": 1
    })
}

pub fn manager(transport: Arc<MockTransport>) -> ZabbixManager {
    ZabbixManager::new(Logger::new("test"), Validation::new(), transport)
}

pub fn session_context() -> StaticContext {
    StaticContext::new().with_credentials(
        "zabbixApi",
        serde_json::json!({
            "url": "https://zabbix.example.com/",
            "user": "Admin",
            "password": "zabbix"
        }),
    )
}

pub fn token_context() -> StaticContext {
    StaticContext::new()
        .with_parameter("authentication", Value::String("apiToken".to_string()))
        .with_credentials(
            "zabbixTokenApi",
            serde_json::json!({
                "url": "https://zabbix.example.com",
                "apiToken": API_TOKEN,
                "allowUnauthorizedCerts": true,
                "testingMode": false
            }),
        )
}

/// `count` items sharing the node-level parameters.
pub fn empty_items(count: usize) -> Vec<Map<String, Value>> {
    (0..count).map(|_| Map::new()).collect()
}

pub fn item(parameters: Value) -> Map<String, Value> {
    parameters.as_object().cloned().unwrap_or_default()
}
