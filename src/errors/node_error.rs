use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeErrorKind {
    Authentication,
    Validation,
    Remote,
    Transport,
    Internal,
}

impl NodeErrorKind {
    /// Item-scoped errors may be recorded as output under continue-on-fail.
    pub fn is_item_scoped(self) -> bool {
        matches!(
            self,
            NodeErrorKind::Validation | NodeErrorKind::Remote | NodeErrorKind::Transport
        )
    }
}

#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct NodeError {
    pub kind: NodeErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl NodeError {
    pub fn new(kind: NodeErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::Authentication, "AUTHENTICATION", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::Validation, "VALIDATION", message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::Remote, "REMOTE", message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::Transport, "TRANSPORT", message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::Transport, "TIMEOUT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(NodeErrorKind::Internal, "INTERNAL", message)
    }

    /// The record appended to the output when continue-on-fail is enabled.
    pub fn to_record(&self) -> Value {
        serde_json::json!({ "error": self.message })
    }
}

impl From<std::io::Error> for NodeError {
    fn from(err: std::io::Error) -> Self {
        NodeError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        NodeError::validation(format!("Invalid JSON: {}", err))
    }
}
