//! Quill Core - prompt template analysis, validation and enhancement.
//!
//! Templates are plain text organized into labelled sections
//! (`ROLE:`, `CONTEXT:`, `TASK:`, `FORMAT:`/`OUTPUT:`) with placeholder
//! variables written as `{{name}}`.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            quill-cli (CLI)              │
//! │   (files, stdin, JSON request/reply)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Service            │
//! │   (TemplateService::dispatch)           │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  analyze · validate · enhance           │
//! │  sections · variables · quality ·       │
//! │  patterns                               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use quill_core::prelude::*;
//!
//! let service = TemplateService::new();
//! let report = service.validate("TASK: Summarize {{document}}.\n");
//! assert!(!report.is_valid);
//!
//! let enhanced = service.enhance("Please summarize this document.");
//! assert!(enhanced.enhanced_content.starts_with("ROLE:"));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{Request, Response, TemplateService};
    pub use crate::domain::{
        AnalysisResult, EnhancementResult, Operation, SectionKind, Severity, TemplateMetadata,
        ValidationResult, Violation, analyze, enhance, validate,
    };
    pub use crate::error::{QuillError, QuillResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
