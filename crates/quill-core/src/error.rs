//! Unified error handling for Quill Core.
//!
//! Wraps domain and application errors behind one type with user-actionable
//! suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Quill Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuillError {
    /// Errors from the domain layer.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (malformed requests).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl QuillError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}

/// Convenient result type alias.
pub type QuillResult<T> = Result<T, QuillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_operation_is_a_validation_error() {
        let err = QuillError::from(DomainError::UnknownOperation("x".into()));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.to_string(), "Unknown operation 'x'");
        assert!(err.suggestions().iter().any(|s| s.contains("analyze")));
    }

    #[test]
    fn failed_pass_is_internal() {
        let err = QuillError::from(DomainError::EnhancementFailed {
            pass: "structure",
            reason: "emptied the document".into(),
        });
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.suggestions()[0].contains("structure"));
    }
}
