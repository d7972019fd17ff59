//! Application layer errors.
//!
//! These errors represent malformed requests, not template problems.
//! Template problems are findings returned by `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while accepting a request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Request is missing a required field or the field is blank.
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl ApplicationError {
    pub fn missing_content() -> Self {
        Self::InvalidRequest {
            reason: "content must be a non-empty string".into(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidRequest { reason } => vec![
                format!("Request rejected: {}", reason),
                r#"Expected: {"operation": "analyze", "content": "ROLE: ..."}"#.into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequest { .. } => ErrorCategory::Validation,
        }
    }
}
