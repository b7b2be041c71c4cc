use serde_json::Value;
use std::sync::Arc;

use crate::constants::credentials::{SESSION, TOKEN};
use crate::constants::messages::{LOGIN_FAILED, LOGOUT_FAILED};
use crate::constants::rpc::{LOGIN_METHOD, LOGOUT_METHOD};
use crate::errors::NodeError;
use crate::rpc::{build_request, JsonRpcResponse, RpcRequest};
use crate::services::credentials::Credentials;
use crate::services::logger::Logger;
use crate::services::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// `user.login` / `user.logout` around the invocation.
    Credentials,
    /// Static API token from the credential store.
    ApiToken,
}

impl AuthMode {
    pub fn parse(raw: Option<&str>) -> Result<Self, NodeError> {
        match raw.map(|s| s.trim()).unwrap_or("") {
            "" | "credentials" => Ok(AuthMode::Credentials),
            "apiToken" | "token" => Ok(AuthMode::ApiToken),
            other => Err(NodeError::validation(format!(
                "Unknown authentication method: {}",
                other
            ))
            .with_hint("Use one of: credentials, apiToken.")),
        }
    }

    pub fn credential_name(self) -> &'static str {
        match self {
            AuthMode::Credentials => SESSION,
            AuthMode::ApiToken => TOKEN,
        }
    }

    pub fn parse_credentials(self, value: &Value) -> Result<Credentials, NodeError> {
        match self {
            AuthMode::Credentials => Credentials::session_from_value(value),
            AuthMode::ApiToken => Credentials::token_from_value(value),
        }
    }
}

/// Authenticated state for one `execute` invocation.
#[derive(Debug)]
pub struct Session {
    mode: AuthMode,
    credentials: Credentials,
    token: String,
    endpoint_override: Option<String>,
}

impl Session {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoint_override(&self) -> Option<&str> {
        self.endpoint_override.as_deref()
    }
}

#[derive(Clone)]
pub struct SessionManager {
    logger: Logger,
    transport: Arc<dyn Transport>,
}

impl SessionManager {
    pub fn new(logger: Logger, transport: Arc<dyn Transport>) -> Self {
        Self {
            logger: logger.child("session"),
            transport,
        }
    }

    pub async fn acquire(
        &self,
        mode: AuthMode,
        credentials: Credentials,
        endpoint_override: Option<String>,
    ) -> Result<Session, NodeError> {
        let token = match (mode, &credentials) {
            (AuthMode::ApiToken, Credentials::Token { api_token, .. }) => api_token.clone(),
            (AuthMode::Credentials, Credentials::Session { user, password, .. }) => {
                let params = serde_json::json!({ "user": user, "password": password });
                let request = build_request(
                    LOGIN_METHOD,
                    params,
                    &credentials,
                    None,
                    endpoint_override.as_deref(),
                )?;
                let raw = self.send(&request, credentials.testing_mode()).await.map_err(|err| {
                    NodeError::authentication(format!("{} {}", LOGIN_FAILED, err.message))
                        .with_details(serde_json::json!({ "cause": err }))
                })?;
                let token = login_token(&raw)?;
                self.logger.debug(
                    "session opened",
                    Some(&serde_json::json!({ "url": request.url })),
                );
                token
            }
            _ => {
                return Err(NodeError::authentication(format!(
                    "Credentials do not match the '{}' authentication method",
                    mode.credential_name()
                )))
            }
        };
        Ok(Session {
            mode,
            credentials,
            token,
            endpoint_override,
        })
    }

    /// Ends a login-based session. Token sessions need no teardown.
    pub async fn release(&self, session: Session) -> Result<(), NodeError> {
        if session.mode == AuthMode::ApiToken {
            return Ok(());
        }
        let request = build_request(
            LOGOUT_METHOD,
            Value::Object(Default::default()),
            &session.credentials,
            Some(&session.token),
            session.endpoint_override(),
        )?;
        let raw = self
            .send(&request, false)
            .await
            .map_err(|err| {
                NodeError::authentication(format!("{} {}", LOGOUT_FAILED, err.message))
                    .with_details(serde_json::json!({ "cause": err }))
            })?;
        check_logout(&raw)?;
        self.logger.debug("session closed", None);
        Ok(())
    }

    /// Sends `method` with the session token and returns the raw JSON-RPC
    /// response object.
    pub async fn authenticate(
        &self,
        session: &Session,
        method: &str,
        params: Value,
    ) -> Result<Value, NodeError> {
        let request = build_request(
            method,
            params,
            &session.credentials,
            Some(&session.token),
            session.endpoint_override(),
        )?;
        self.send(&request, session.credentials.testing_mode()).await
    }

    async fn send(&self, request: &RpcRequest, verbose: bool) -> Result<Value, NodeError> {
        let meta = serde_json::json!({ "url": request.url, "envelope": request.body });
        if verbose {
            self.logger.info("sending request", Some(&meta));
        } else {
            self.logger.debug("sending request", Some(&meta));
        }
        self.transport.send(request).await
    }
}

fn login_token(raw: &Value) -> Result<String, NodeError> {
    let response = JsonRpcResponse::from_value(raw)
        .map_err(|err| NodeError::authentication(format!("{} {}", LOGIN_FAILED, err.message)))?;
    if let Some(remote) = response.remote_error() {
        return Err(NodeError::authentication(format!("{} {}", LOGIN_FAILED, remote))
            .with_details(raw.clone()));
    }
    match response.result {
        Some(Value::String(token)) if !token.is_empty() => Ok(token),
        Some(_) => Err(NodeError::authentication(LOGIN_FAILED)
            .with_hint("user.login returned a non-string session id")),
        None => Err(NodeError::authentication(LOGIN_FAILED)),
    }
}

fn check_logout(raw: &Value) -> Result<(), NodeError> {
    let response = JsonRpcResponse::from_value(raw)
        .map_err(|err| NodeError::authentication(format!("{} {}", LOGOUT_FAILED, err.message)))?;
    if let Some(remote) = response.remote_error() {
        return Err(NodeError::authentication(remote.to_string()).with_details(raw.clone()));
    }
    match response.result {
        Some(Value::Bool(true)) => Ok(()),
        _ => Err(NodeError::authentication(LOGOUT_FAILED).with_details(raw.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_mode_defaults_to_credentials() {
        assert_eq!(AuthMode::parse(None).unwrap(), AuthMode::Credentials);
        assert_eq!(AuthMode::parse(Some("apiToken")).unwrap(), AuthMode::ApiToken);
        assert_eq!(AuthMode::parse(Some("token")).unwrap(), AuthMode::ApiToken);
        assert!(AuthMode::parse(Some("oauth")).is_err());
    }

    #[test]
    fn login_token_requires_string_result() {
        assert_eq!(
            login_token(&json!({"jsonrpc": "2.0", "result": "abc123", "id": 1})).unwrap(),
            "abc123"
        );
        let err = login_token(&json!({"jsonrpc": "2.0", "id": 1})).unwrap_err();
        assert_eq!(err.code, "AUTHENTICATION");
        assert_eq!(err.message, LOGIN_FAILED);
        assert!(login_token(&json!({"result": 5})).is_err());
    }

    #[test]
    fn login_error_carries_remote_message() {
        let err = login_token(&json!({
            "error": {"code": -32602, "message": "Invalid params.", "data": "Incorrect user name or password."}
        }))
        .unwrap_err();
        assert!(err.message.contains("Incorrect user name or password."));
    }

    #[test]
    fn logout_requires_exactly_true() {
        assert!(check_logout(&json!({"result": true})).is_ok());
        assert!(check_logout(&json!({"result": false})).is_err());
        assert!(check_logout(&json!({"result": "true"})).is_err());
        assert!(check_logout(&json!({"jsonrpc": "2.0"})).is_err());
    }
}
