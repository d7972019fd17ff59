// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Detection outcomes (violations, issues, pattern matches) are data and
/// never appear here. These errors cover requests the domain cannot
/// interpret and rewrites that broke their own postconditions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Request Errors
    // ========================================================================
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("Unknown section label '{0}'")]
    UnknownSection(String),

    // ========================================================================
    // Rewrite Failures (recovered inside the enhancer)
    // ========================================================================
    #[error("{pass} pass produced an invalid document: {reason}")]
    EnhancementFailed { pass: &'static str, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownOperation(name) => vec![
                format!("'{}' is not a supported operation", name),
                "Supported operations: analyze, validate, enhance".into(),
            ],
            Self::UnknownSection(label) => vec![
                format!("'{}' is not a recognized section label", label),
                "Recognized labels: ROLE, CONTEXT, TASK, FORMAT, OUTPUT".into(),
            ],
            Self::EnhancementFailed { pass, .. } => vec![
                format!("The {} pass was skipped", pass),
                "Please report this template so the rewrite can be fixed".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownOperation(_) | Self::UnknownSection(_) => ErrorCategory::Validation,
            Self::EnhancementFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
