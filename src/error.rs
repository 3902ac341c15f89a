use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a third-party vision or text provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("content blocked by the provider's safety filter: {0}")]
    SafetyBlocked(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned an empty response")]
    EmptyResponse,
}

impl ProviderError {
    pub fn is_safety_block(&self) -> bool {
        matches!(self, Self::SafetyBlocked(_))
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid image data: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Invalid scenario: {0}")]
    UnknownScenario(String),

    #[error("{message}")]
    Upstream { service: String, message: String },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Which upstream service failed, for upstream errors.
    pub fn upstream_service(&self) -> Option<&str> {
        match self {
            Self::Upstream { service, .. } => Some(service),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Decode(_) | Self::UnknownScenario(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to API callers. Server-side failures are
    /// reduced to a fixed string; the detail only goes to the logs.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() && !matches!(self, Self::Upstream { .. }) {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}
