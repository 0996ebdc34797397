use rmcp::model::ErrorData;
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors produced by the sequential thinking server
#[derive(Error, Debug)]
pub enum ThinkingError {
    #[error("{reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ThinkingError {
    /// Name of the offending parameter, when the error is an argument error
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ThinkingError::InvalidArgument { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Convert ValidationError to ThinkingError
impl From<ValidationError> for ThinkingError {
    fn from(err: ValidationError) -> Self {
        ThinkingError::InvalidArgument {
            field: err.field(),
            reason: err.to_string(),
        }
    }
}

/// Convert ThinkingError to MCP-compatible ErrorData
impl From<ThinkingError> for ErrorData {
    fn from(err: ThinkingError) -> Self {
        let message = format!("Sequential thinking failed: {}", err);
        match &err {
            ThinkingError::InvalidArgument { field, reason } => ErrorData::invalid_params(
                message,
                Some(json!({
                    "error": reason,
                    "field": field,
                    "status": "failed",
                })),
            ),
            _ => ErrorData::internal_error(
                message,
                Some(json!({
                    "error": err.to_string(),
                    "status": "failed",
                })),
            ),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ThinkingError>;
