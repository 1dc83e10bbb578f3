use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration missing: {message}")]
    Configuration { message: &'static str },
    #[error("invalid input: {message}")]
    Validation {
        code: &'static str,
        message: &'static str,
    },
    #[error("unknown tool: {name}")]
    UnknownTool { name: String },
    #[error("relay request failed: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },
    #[error("relay rejected request: {}", message.as_deref().unwrap_or("no message provided"))]
    SemanticRejection { message: Option<String> },
}

impl AppError {
    pub fn configuration(message: &'static str) -> Self {
        Self::Configuration { message }
    }

    pub fn validation(code: &'static str, message: &'static str) -> Self {
        Self::Validation { code, message }
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn semantic_rejection(message: Option<String>) -> Self {
        Self::SemanticRejection { message }
    }

    /// Stable machine-readable code reported in protocol error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration_missing",
            Self::Validation { code, .. } => code,
            Self::UnknownTool { .. } => "tool_not_found",
            Self::Transport { .. } => "relay_transport_error",
            Self::SemanticRejection { .. } => "relay_rejected",
        }
    }
}
