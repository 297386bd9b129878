use rulewrap_types::{ShapeError, ValidationError};
use thiserror::Error;

pub type RuleResult<T> = Result<T, RuleError>;

/// Everything a rule call can fail with. Nothing is retried or suppressed.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("malformed rule output: {0}")]
    Decode(#[source] serde_json::Error),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RuleError {
    /// True when the call was rejected before anything reached the server.
    pub fn is_validation(&self) -> bool {
        matches!(self, RuleError::Validation(_))
    }
}

/// Failures reported by the session layer, passed through unmodified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("authentication rejected: {0}")]
    Authentication(String),
    #[error("rule failed remotely (status {status}): {message}")]
    Remote { status: u16, message: String },
    #[error("reply carries no output slot '{slot}'")]
    MissingOutput { slot: String },
    #[error("session is closed")]
    Closed,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not set")]
    Missing { var: &'static str },
    #[error("invalid base url '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("invalid {var} '{value}': expected a whole number of seconds")]
    InvalidSeconds { var: &'static str, value: String },
    #[error("cannot build http client: {0}")]
    HttpClient(String),
}
