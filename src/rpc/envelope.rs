use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::constants::protocols::ALLOWED_HTTP;
use crate::constants::rpc::API_PATH;
use crate::errors::NodeError;
use crate::rpc::protocol::JsonRpcEnvelope;
use crate::services::credentials::Credentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
}

/// One fully-resolved HTTP exchange for the transport.
#[derive(Debug, Clone)]
pub struct RpcRequest {
    pub url: String,
    pub http_method: Method,
    pub headers: HeaderMap,
    pub body: JsonRpcEnvelope,
    pub response_format: ResponseFormat,
    pub allow_unauthorized_certs: bool,
}

pub fn build_request(
    method: &str,
    params: Value,
    credentials: &Credentials,
    token: Option<&str>,
    endpoint_override: Option<&str>,
) -> Result<RpcRequest, NodeError> {
    let url = resolve_endpoint(credentials.url(), endpoint_override)?;
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(RpcRequest {
        url,
        http_method: Method::POST,
        headers,
        body: JsonRpcEnvelope::new(method, params, token.map(|t| t.to_string())),
        response_format: ResponseFormat::Json,
        allow_unauthorized_certs: credentials.allow_unauthorized_certs(),
    })
}

pub fn resolve_endpoint(base_url: &str, endpoint_override: Option<&str>) -> Result<String, NodeError> {
    if let Some(raw) = endpoint_override.map(str::trim).filter(|s| !s.is_empty()) {
        parse_url(raw)?;
        return Ok(raw.to_string());
    }
    let base = base_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(NodeError::validation("Credential url must be a non-empty string"));
    }
    let url = format!("{}{}", base, API_PATH);
    parse_url(&url)?;
    Ok(url)
}

fn parse_url(raw: &str) -> Result<Url, NodeError> {
    let parsed = Url::parse(raw)
        .map_err(|_| NodeError::validation(format!("Invalid URL: {}", raw)))?;
    if !scheme_allowed(parsed.scheme()) {
        return Err(NodeError::validation("Only http/https URLs are supported"));
    }
    Ok(parsed)
}

fn scheme_allowed(scheme: &str) -> bool {
    let normalized = scheme.trim_end_matches(':');
    ALLOWED_HTTP
        .iter()
        .any(|allowed| allowed.trim_end_matches(':') == normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::credentials::Credentials;

    fn token_credentials(url: &str) -> Credentials {
        Credentials::Token {
            url: url.to_string(),
            api_token: "tok".to_string(),
            allow_unauthorized_certs: true,
            testing_mode: false,
        }
    }

    #[test]
    fn appends_api_path_to_credential_url() {
        let request = build_request(
            "item.get",
            serde_json::json!({"itemids": ["10001"]}),
            &token_credentials("https://zabbix.example/zabbix/"),
            Some("tok"),
            None,
        )
        .expect("request");
        assert_eq!(request.url, "https://zabbix.example/zabbix/api_jsonrpc.php");
        assert_eq!(request.http_method, Method::POST);
        assert_eq!(request.headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(request.body.id, 1);
        assert_eq!(request.body.auth.as_deref(), Some("tok"));
        assert_eq!(request.response_format, ResponseFormat::Json);
        assert!(request.allow_unauthorized_certs);
    }

    #[test]
    fn override_wins_over_credential_url() {
        let url = resolve_endpoint(
            "https://zabbix.example",
            Some("http://proxy.local:8080/rpc"),
        )
        .expect("url");
        assert_eq!(url, "http://proxy.local:8080/rpc");
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = resolve_endpoint("ftp://zabbix.example", None).unwrap_err();
        assert_eq!(err.code, "VALIDATION");
    }
}
