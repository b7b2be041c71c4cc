use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::constants::network::{TIMEOUT_API_REQUEST_MS, TIMEOUT_ENV, USER_AGENT};
use crate::errors::NodeError;
use crate::rpc::{ResponseFormat, RpcRequest};
use crate::services::logger::Logger;
use crate::utils::redact::redact_text;

const MAX_BODY_PREVIEW: usize = 256;

/// The host's HTTP capability: one request in, the decoded JSON body out.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RpcRequest) -> Result<Value, NodeError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    logger: Logger,
    timeout_ms: u64,
    clients: Arc<Mutex<HashMap<bool, Client>>>,
}

impl HttpTransport {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: logger.child("http"),
            timeout_ms: resolve_timeout_ms(),
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms.max(1);
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    fn get_client(&self, insecure_ok: bool) -> Result<Client, NodeError> {
        let mut guard = self
            .clients
            .lock()
            .map_err(|_| NodeError::internal("Failed to access HTTP client cache"))?;
        if let Some(existing) = guard.get(&insecure_ok) {
            return Ok(existing.clone());
        }
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if insecure_ok {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|err| NodeError::internal(format!("Failed to build HTTP client: {}", err)))?;
        guard.insert(insecure_ok, client.clone());
        Ok(client)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RpcRequest) -> Result<Value, NodeError> {
        let client = self.get_client(request.allow_unauthorized_certs)?;
        let started = Instant::now();
        let response = client
            .request(request.http_method.clone(), request.url.as_str())
            .headers(request.headers.clone())
            .json(&request.body)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;
        self.logger.debug(
            "response received",
            Some(&serde_json::json!({
                "method": request.body.method,
                "status": status.as_u16(),
                "duration_ms": started.elapsed().as_millis() as u64,
            })),
        );

        let parsed = match request.response_format {
            ResponseFormat::Json => serde_json::from_str::<Value>(&text).ok(),
        };
        let is_rpc = parsed
            .as_ref()
            .and_then(|v| v.as_object())
            .map(|obj| obj.contains_key("result") || obj.contains_key("error"))
            .unwrap_or(false);

        match parsed {
            Some(body) if status.is_success() || is_rpc => Ok(body),
            _ => {
                let preview = redact_text(text.trim(), MAX_BODY_PREVIEW);
                let message = if status.is_success() {
                    format!("Response from {} is not valid JSON", request.url)
                } else {
                    format!(
                        "HTTP {} {} from {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or(""),
                        request.url
                    )
                };
                Err(NodeError::transport(message).with_details(serde_json::json!({
                    "status": status.as_u16(),
                    "body": preview,
                })))
            }
        }
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> NodeError {
    if err.is_timeout() {
        return NodeError::timeout("HTTP request timed out");
    }
    NodeError::transport(err.to_string())
}

fn resolve_timeout_ms() -> u64 {
    std::env::var(TIMEOUT_ENV)
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(TIMEOUT_API_REQUEST_MS)
}
