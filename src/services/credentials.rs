use serde_json::Value;
use std::fmt;

use crate::constants::credentials::{SESSION, TOKEN};
use crate::constants::messages::NO_CREDENTIALS;
use crate::errors::NodeError;

/// Decrypted credential fields handed over by the host for one invocation.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Session {
        url: String,
        user: String,
        password: String,
    },
    Token {
        url: String,
        api_token: String,
        allow_unauthorized_certs: bool,
        testing_mode: bool,
    },
}

impl Credentials {
    pub fn session_from_value(value: &Value) -> Result<Self, NodeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| NodeError::authentication(NO_CREDENTIALS))?;
        let url = required_field(obj, &["url"], SESSION)?;
        let user = required_field(obj, &["user", "username"], SESSION)?;
        // Not trimmed: surrounding whitespace is part of the password.
        let password = obj
            .get("password")
            .and_then(|v| v.as_str())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .ok_or_else(|| missing_field(SESSION, "password"))?;
        Ok(Credentials::Session {
            url,
            user,
            password,
        })
    }

    pub fn token_from_value(value: &Value) -> Result<Self, NodeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| NodeError::authentication(NO_CREDENTIALS))?;
        let url = required_field(obj, &["url"], TOKEN)?;
        let api_token = required_field(obj, &["apiToken", "api_token"], TOKEN)?;
        Ok(Credentials::Token {
            url,
            api_token,
            allow_unauthorized_certs: read_bool(obj.get("allowUnauthorizedCerts")),
            testing_mode: read_bool(obj.get("testingMode")),
        })
    }

    pub fn url(&self) -> &str {
        match self {
            Credentials::Session { url, .. } | Credentials::Token { url, .. } => url,
        }
    }

    pub fn allow_unauthorized_certs(&self) -> bool {
        match self {
            Credentials::Token {
                allow_unauthorized_certs,
                ..
            } => *allow_unauthorized_certs,
            Credentials::Session { .. } => false,
        }
    }

    pub fn testing_mode(&self) -> bool {
        match self {
            Credentials::Token { testing_mode, .. } => *testing_mode,
            Credentials::Session { .. } => false,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Session { url, user, .. } => f
                .debug_struct("Session")
                .field("url", url)
                .field("user", user)
                .field("password", &"[REDACTED]")
                .finish(),
            Credentials::Token {
                url,
                allow_unauthorized_certs,
                testing_mode,
                ..
            } => f
                .debug_struct("Token")
                .field("url", url)
                .field("api_token", &"[REDACTED]")
                .field("allow_unauthorized_certs", allow_unauthorized_certs)
                .field("testing_mode", testing_mode)
                .finish(),
        }
    }
}

fn required_field(
    obj: &serde_json::Map<String, Value>,
    keys: &[&str],
    credential: &str,
) -> Result<String, NodeError> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(|v| v.to_string())
        .ok_or_else(|| missing_field(credential, keys[0]))
}

fn missing_field(credential: &str, field: &str) -> NodeError {
    NodeError::authentication(format!(
        "Credential '{}' is missing field '{}'",
        credential, field
    ))
}

fn read_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => {
            let text = text.trim();
            text == "1" || text.eq_ignore_ascii_case("true")
        }
        Some(Value::Number(num)) => num.as_i64() == Some(1),
        _ => false,
    }
}
