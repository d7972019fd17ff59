//! Rule validator.
//!
//! Composes the structure, content, variable and format checks into a
//! single verdict. Every check runs on every call; nothing short-circuits.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::quality::{bullet_glyphs, nested_paren_count, sentences};
use crate::domain::sections::SectionMap;
use crate::domain::value_objects::{SectionKind, Severity};
use crate::domain::variables::VariableReport;

const MAX_SENTENCE_CHARS: usize = 150;
const PARAMETERIZE_ABOVE_CHARS: usize = 500;

/// Hedging terms that make instructions ambiguous.
pub const AMBIGUOUS_TERMS: [&str; 7] = [
    "maybe", "probably", "possibly", "might", "could", "should", "would",
];

fn ambiguous_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        let alternation = AMBIGUOUS_TERMS.join("|");
        Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("Invalid regex")
    })
}

fn blank_run_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?:\A|\n)(?:[ \t\r]*\n){3,}").expect("Invalid regex"))
}

fn trailing_whitespace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?m)[ \t]+\r?$").expect("Invalid regex"))
}

/// A failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: String,
    pub message: String,
    pub severity: Severity,
}

impl Violation {
    fn error(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    fn warning(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Verdict plus every violation found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
    }
}

fn check_content_present(text: &str, out: &mut Vec<Violation>) {
    if text.trim().is_empty() {
        out.push(Violation::error(
            "empty-content",
            "Template content is empty",
        ));
    }
}

fn check_structure(sections: &SectionMap, out: &mut Vec<Violation>) {
    for kind in sections.missing() {
        if kind == SectionKind::Format {
            out.push(Violation::warning(
                "missing-format",
                "Missing FORMAT or OUTPUT section",
            ));
        } else {
            out.push(Violation::error(
                "missing-section",
                format!("Missing required {} section", kind),
            ));
        }
    }
    for v in sections.order_violations() {
        out.push(Violation::warning(
            "section-order",
            format!(
                "{} section (line {}) should come before {}",
                v.section, v.line, v.after
            ),
        ));
    }
}

fn check_content(text: &str, out: &mut Vec<Violation>) {
    let long = sentences(text)
        .filter(|s| s.chars().count() > MAX_SENTENCE_CHARS)
        .count();
    if long > 0 {
        out.push(Violation::warning(
            "sentence-length",
            format!(
                "{} sentence(s) exceed {} characters; consider splitting them",
                long, MAX_SENTENCE_CHARS
            ),
        ));
    }

    let nested = nested_paren_count(text);
    if nested > 0 {
        out.push(Violation::warning(
            "nested-parentheses",
            format!("{} nested parenthetical group(s) reduce clarity", nested),
        ));
    }

    let mut seen = BTreeSet::new();
    for m in ambiguous_regex().find_iter(text) {
        let term = m.as_str().to_lowercase();
        if seen.insert(term.clone()) {
            out.push(Violation::warning(
                "ambiguous-language",
                format!("Ambiguous term '{}' found; state the requirement directly", term),
            ));
        }
    }
}

fn check_variables(text: &str, variables: &VariableReport, out: &mut Vec<Violation>) {
    if variables.is_mixed() {
        let used: Vec<String> = variables.syntaxes().iter().map(|s| s.to_string()).collect();
        out.push(Violation::error(
            "variable-format",
            format!(
                "Mixed variable syntaxes ({}); use {{{{name}}}} throughout",
                used.join(", ")
            ),
        ));
    }
    for token in &variables.malformed {
        out.push(Violation::error(
            "variable-name",
            format!(
                "Invalid variable name in {}; use letters, digits, '_' or '-'",
                token
            ),
        ));
    }
    if variables.total() == 0 && text.chars().count() > PARAMETERIZE_ABOVE_CHARS {
        out.push(Violation::warning(
            "missing-variables",
            "No template variables found; consider parameterizing with {{name}}",
        ));
    }
}

fn check_format(text: &str, sections: &SectionMap, out: &mut Vec<Violation>) {
    let glyphs = bullet_glyphs(text);
    if glyphs.len() > 1 {
        let used: Vec<String> = glyphs.iter().map(|g| format!("'{g}'")).collect();
        out.push(Violation::warning(
            "bullet-consistency",
            format!("Inconsistent bullet markers ({})", used.join(", ")),
        ));
    }

    let lowercase = sections.lowercase_labels();
    if !lowercase.is_empty() {
        out.push(Violation::warning(
            "header-capitalization",
            format!(
                "Section headers should be uppercase: {}",
                lowercase.join(", ")
            ),
        ));
    }

    if blank_run_regex().is_match(text) {
        out.push(Violation::warning(
            "blank-lines",
            "Three or more consecutive blank lines",
        ));
    }

    if trailing_whitespace_regex().is_match(text) {
        out.push(Violation::warning(
            "trailing-whitespace",
            "Lines with trailing whitespace",
        ));
    }
}

/// Validate a template against every rule.
#[instrument(skip_all, fields(len = text.len()))]
pub fn validate(text: &str) -> ValidationResult {
    let sections = SectionMap::locate(text);
    let variables = VariableReport::extract(text);

    let mut violations = Vec::new();
    check_content_present(text, &mut violations);
    check_structure(&sections, &mut violations);
    check_content(text, &mut violations);
    check_variables(text, &variables, &mut violations);
    check_format(text, &sections, &mut violations);

    debug!(violations = violations.len(), "validation finished");
    ValidationResult::from_violations(violations)
}
