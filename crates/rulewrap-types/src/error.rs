use thiserror::Error;

/// Rejected caller input, raised before anything is sent to the server.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid {kind} '{value}': expected {expected}")]
    InvalidIdentifier {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("invalid {field} '{value}': expected one of {expected}")]
    OutOfEnum {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn argument(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

/// Decoded rule output that does not match the shape a composer expects.
#[derive(Debug, Error)]
#[error("cannot compose {shape}: {source}")]
pub struct ShapeError {
    pub shape: &'static str,
    #[source]
    pub source: serde_json::Error,
}

impl ShapeError {
    pub fn new(shape: &'static str, source: serde_json::Error) -> Self {
        Self { shape, source }
    }

    /// True when the failure is a required key absent from the record.
    pub fn is_missing_key(&self) -> bool {
        self.source.to_string().starts_with("missing field")
    }
}
