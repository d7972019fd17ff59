// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Quill.
//!
//! This module contains the detection, scoring and rewriting logic. It is
//! pure: every public function takes the template text by reference and
//! returns a fresh value.
//!
//! ## Rules of the layer
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or environment access
//! - **No shared mutable state**: compiled patterns are immutable statics
//! - **Findings are data**: violations and issues are returned, never raised
//!
//! Leaf-first: `sections` and `variables` feed `quality`, `rules`,
//! `analysis` and `enhance`; `patterns` runs on its own.

// Public API - what the world sees
pub mod analysis;
pub mod enhance;
pub mod entities;
pub mod error;
pub mod patterns;
pub mod quality;
pub mod rules;
pub mod sections;
pub mod value_objects;
pub mod variables;

// Re-exports for convenience
pub use analysis::{AnalysisDetails, AnalysisResult, TemplateMetadata, analyze};
pub use enhance::{EnhancementResult, enhance};
pub use entities::Document;
pub use error::{DomainError, ErrorCategory};
pub use patterns::{PatternMatch, PatternReport, PatternRule};
pub use quality::QualityScores;
pub use rules::{ValidationResult, Violation, validate};
pub use sections::SectionMap;
pub use value_objects::{Operation, SectionKind, Severity, VariableSyntax};
pub use variables::VariableReport;
