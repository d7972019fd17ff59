//! Pattern matcher.
//!
//! Two fixed catalogues of [`PatternRule`]s (anti-patterns and formatting
//! deviations) are evaluated independently over the raw text. Every
//! occurrence becomes a [`PatternMatch`] with its position; issue and
//! suggestion lists carry each rule's message once.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::domain::value_objects::Severity;

/// How a rule finds its occurrences.
#[derive(Debug, Clone, Copy)]
pub enum Detector {
    /// A regular pattern; every non-overlapping match is an occurrence.
    Pattern(&'static str),
    /// Non-empty text that does not end with `\n`.
    MissingFinalNewline,
}

/// A static catalogue entry.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub id: &'static str,
    pub detector: Detector,
    pub severity: Severity,
    pub message: &'static str,
    pub suggestion: &'static str,
}

pub const ANTI_PATTERNS: &[PatternRule] = &[
    PatternRule {
        id: "mustache-variable",
        detector: Detector::Pattern(r"\{\{[^{}]*\}\}"),
        severity: Severity::Error,
        message: "Mustache-style {{...}} syntax found outside a templating context",
        suggestion: "Keep {{variable}} placeholders only in text rendered by a template engine",
    },
    PatternRule {
        id: "mustache-block",
        detector: Detector::Pattern(r"\{\{\s*[#/^>!][^{}]*\}\}"),
        severity: Severity::Error,
        message: "Mustache section, partial or comment tags are not supported in templates",
        suggestion: "Replace block tags with plain {{variable}} placeholders",
    },
    PatternRule {
        id: "raw-interpolation",
        detector: Detector::Pattern(r"\$\{[^{}\n]*\}"),
        severity: Severity::Warning,
        message: "Raw ${...} interpolation found",
        suggestion: "Use {{variable}} placeholders instead of ${...} interpolation",
    },
    PatternRule {
        id: "mutable-var",
        detector: Detector::Pattern(r"\bvar\s+[A-Za-z_$][A-Za-z0-9_$]*"),
        severity: Severity::Warning,
        message: "Mutable 'var' declaration found",
        suggestion: "Use const or let instead of var",
    },
    PatternRule {
        id: "any-type",
        detector: Detector::Pattern(r":\s*any\b"),
        severity: Severity::Error,
        message: "Untyped 'any' annotation found",
        suggestion: "Replace 'any' with a specific type",
    },
    PatternRule {
        id: "debug-print",
        detector: Detector::Pattern(r"\bconsole\.(?:log|debug)\s*\("),
        severity: Severity::Info,
        message: "Debug print statement found",
        suggestion: "Remove console.log statements before publishing the template",
    },
];

pub const FORMATTING_PATTERNS: &[PatternRule] = &[
    PatternRule {
        id: "excess-blank-lines",
        detector: Detector::Pattern(r"(?:\A|\n)(?:[ \t\r]*\n){3,}"),
        severity: Severity::Info,
        message: "Three or more consecutive blank lines",
        suggestion: "Separate sections with a single blank line",
    },
    PatternRule {
        id: "tab-character",
        detector: Detector::Pattern(r"\t"),
        severity: Severity::Info,
        message: "Tab character found",
        suggestion: "Use spaces instead of tabs",
    },
    PatternRule {
        id: "trailing-whitespace",
        detector: Detector::Pattern(r"(?m)[ \t]+\r?$"),
        severity: Severity::Info,
        message: "Trailing whitespace found",
        suggestion: "Remove trailing whitespace",
    },
    PatternRule {
        id: "missing-final-newline",
        detector: Detector::MissingFinalNewline,
        severity: Severity::Info,
        message: "File does not end with a newline",
        suggestion: "Add a newline at the end of the file",
    },
];

/// Compiled form of every `Detector::Pattern` in catalogue order.
fn compiled() -> &'static [(&'static PatternRule, Option<Regex>)] {
    static COMPILED: OnceLock<Vec<(&'static PatternRule, Option<Regex>)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        ANTI_PATTERNS
            .iter()
            .chain(FORMATTING_PATTERNS)
            .map(|rule| {
                let regex = match rule.detector {
                    Detector::Pattern(p) => Some(Regex::new(p).expect("Invalid regex")),
                    Detector::MissingFinalNewline => None,
                };
                (rule, regex)
            })
            .collect()
    })
}

/// One occurrence of a rule in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatch {
    pub rule: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters from the preceding newline.
    pub column: usize,
    pub text: String,
}

/// Result of running both catalogues over a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub score: u32,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub matches: Vec<PatternMatch>,
}

impl PatternReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.matches.iter().filter(|m| m.severity == severity).count()
    }
}

/// Line and column of byte `offset`.
pub(crate) fn position(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

fn occurrences(text: &str, rule: &'static PatternRule, regex: Option<&Regex>) -> Vec<PatternMatch> {
    let at = |offset: usize, found: &str| {
        let (line, column) = position(text, offset);
        PatternMatch {
            rule: rule.id,
            severity: rule.severity,
            message: rule.message,
            line,
            column,
            text: found.to_string(),
        }
    };
    match (rule.detector, regex) {
        (Detector::Pattern(_), Some(re)) => re
            .find_iter(text)
            .map(|m| at(m.start(), m.as_str()))
            .collect(),
        (Detector::MissingFinalNewline, _) if !text.is_empty() && !text.ends_with('\n') => {
            vec![at(text.len(), "")]
        }
        _ => Vec::new(),
    }
}

/// Run both catalogues over `text`.
pub fn scan(text: &str) -> PatternReport {
    let mut score: u32 = 100;
    let mut issues: Vec<String> = Vec::new();
    let mut suggestions: Vec<String> = Vec::new();
    let mut matches = Vec::new();

    for (rule, regex) in compiled() {
        let found = occurrences(text, rule, regex.as_ref());
        if found.is_empty() {
            continue;
        }
        debug!(rule = rule.id, occurrences = found.len(), "pattern rule fired");

        let penalty = rule.severity.penalty() * found.len() as u32;
        score = score.saturating_sub(penalty);
        if !issues.iter().any(|i| i == rule.message) {
            issues.push(rule.message.to_string());
        }
        if !suggestions.iter().any(|s| s == rule.suggestion) {
            suggestions.push(rule.suggestion.to_string());
        }
        matches.extend(found);
    }

    PatternReport {
        score,
        issues,
        suggestions,
        matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_ids(report: &PatternReport) -> Vec<&str> {
        let mut ids: Vec<&str> = report.matches.iter().map(|m| m.rule).collect();
        ids.dedup();
        ids
    }

    #[test]
    fn every_catalogue_pattern_compiles() {
        assert_eq!(compiled().len(), ANTI_PATTERNS.len() + FORMATTING_PATTERNS.len());
    }

    #[test]
    fn clean_text_scores_100() {
        let report = scan("ROLE: You review code.\n");
        assert_eq!(report.score, 100);
        assert!(report.matches.is_empty());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn mustache_variables_are_flagged() {
        let report = scan("Hello {{name}}\n");
        assert_eq!(rule_ids(&report), vec!["mustache-variable"]);
        assert_eq!(report.matches[0].severity, Severity::Error);
        assert_eq!((report.matches[0].line, report.matches[0].column), (1, 7));
        assert_eq!(report.score, 85);
    }

    #[test]
    fn mustache_block_tags_fire_both_rules() {
        let report = scan("{{#items}}{{name}}{{/items}}\n");
        assert_eq!(rule_ids(&report), vec!["mustache-variable", "mustache-block"]);
        assert_eq!(report.count(Severity::Error), 5);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.score, 25);
    }

    #[test]
    fn each_occurrence_is_penalized_but_messages_are_unique() {
        let report = scan("var a = 1;\nvar b = 2;\n");
        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.issues, vec!["Mutable 'var' declaration found"]);
        assert_eq!(report.suggestions.len(), 1);
        assert_eq!(report.score, 90);
    }

    #[test]
    fn records_line_and_column() {
        let report = scan("first line\n  let x: any = 1;\n");
        let m = &report.matches[0];
        assert_eq!(m.rule, "any-type");
        assert_eq!((m.line, m.column), (2, 8));
    }

    #[test]
    fn formatting_rules_fire() {
        let report = scan("a\t \n\n\n\nb");
        assert_eq!(
            rule_ids(&report),
            vec![
                "excess-blank-lines",
                "tab-character",
                "trailing-whitespace",
                "missing-final-newline"
            ]
        );
        assert_eq!(report.score, 100 - 4 * 2);
    }

    #[test]
    fn leading_blank_lines_are_excessive() {
        let report = scan("\n\n\nROLE: r\n");
        assert_eq!(rule_ids(&report), vec!["excess-blank-lines"]);
        assert_eq!((report.matches[0].line, report.matches[0].column), (1, 1));

        assert!(scan("\n\nROLE: r\n").matches.is_empty());
    }

    #[test]
    fn missing_final_newline_points_past_last_char() {
        let report = scan("ab\ncd");
        let m = report.matches.last().unwrap();
        assert_eq!(m.rule, "missing-final-newline");
        assert_eq!((m.line, m.column), (2, 3));
    }

    #[test]
    fn score_floors_at_zero() {
        let text = "x: any\n".repeat(10);
        assert_eq!(scan(&text).score, 0);
    }

    #[test]
    fn empty_text_has_no_findings() {
        assert_eq!(scan("").score, 100);
    }
}
