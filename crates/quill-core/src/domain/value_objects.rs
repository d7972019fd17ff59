//! Domain value objects: Severity, SectionKind, VariableSyntax, Operation.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Detection logic lives in the sibling modules (`sections`, `variables`,
//! `patterns`). This file only defines the types, their string
//! representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Severity ─────────────────────────────────────────────────────────────────

/// How serious a finding is.
///
/// Ordered from least to most severe so `max()` over a list of findings
/// yields the worst one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Points deducted from the pattern score for one occurrence.
    pub const fn penalty(self) -> u32 {
        match self {
            Self::Error => 15,
            Self::Warning => 5,
            Self::Info => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SectionKind ──────────────────────────────────────────────────────────────

/// A labeled section of a prompt template.
///
/// `Format` and `Output` are two spellings of the same logical
/// "response format" section; they share a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SectionKind {
    Role,
    Context,
    Task,
    Format,
    Output,
}

impl SectionKind {
    /// Every recognized label, in canonical order.
    pub const ALL: [SectionKind; 5] = [
        Self::Role,
        Self::Context,
        Self::Task,
        Self::Format,
        Self::Output,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Role => "ROLE",
            Self::Context => "CONTEXT",
            Self::Task => "TASK",
            Self::Format => "FORMAT",
            Self::Output => "OUTPUT",
        }
    }

    /// Position in the canonical ROLE < CONTEXT < TASK < FORMAT/OUTPUT order.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Role => 0,
            Self::Context => 1,
            Self::Task => 2,
            Self::Format | Self::Output => 3,
        }
    }

    /// Collapse the FORMAT/OUTPUT alias onto one logical section.
    pub const fn logical(self) -> Self {
        match self {
            Self::Output => Self::Format,
            other => other,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ROLE" => Ok(Self::Role),
            "CONTEXT" => Ok(Self::Context),
            "TASK" => Ok(Self::Task),
            "FORMAT" => Ok(Self::Format),
            "OUTPUT" => Ok(Self::Output),
            other => Err(DomainError::UnknownSection(other.to_string())),
        }
    }
}

// ── VariableSyntax ───────────────────────────────────────────────────────────

/// The competing placeholder syntaxes a template may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariableSyntax {
    /// `{{name}}`, the canonical form.
    DoubleBrace,
    /// `[name]`
    Bracket,
    /// `${name}`
    DollarBrace,
}

impl VariableSyntax {
    pub const ALL: [VariableSyntax; 3] = [Self::DoubleBrace, Self::Bracket, Self::DollarBrace];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DoubleBrace => "{{name}}",
            Self::Bracket => "[name]",
            Self::DollarBrace => "${name}",
        }
    }
}

impl fmt::Display for VariableSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Operation ────────────────────────────────────────────────────────────────

/// The operations the core exposes to a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Analyze,
    Validate,
    Enhance,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Validate => "validate",
            Self::Enhance => "enhance",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analyze" | "analyse" => Ok(Self::Analyze),
            "validate" => Ok(Self::Validate),
            "enhance" => Ok(Self::Enhance),
            other => Err(DomainError::UnknownOperation(other.to_string())),
        }
    }
}
