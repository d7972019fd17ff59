//! Variable extractor.
//!
//! Finds placeholder tokens in all three supported syntaxes and reports
//! whether a template sticks to one of them.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::value_objects::VariableSyntax;

fn double_brace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("Invalid regex"))
}

fn bracket_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\[([^\[\]\n]*[^\[\]\s][^\[\]\n]*)\]").expect("Invalid regex"))
}

fn dollar_brace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\$\{([^{}\n]*[^{}\s][^{}\n]*)\}").expect("Invalid regex"))
}

/// Bracket or dollar-brace token; group 1 is the dollar name, group 2 the bracket name.
pub(crate) fn non_canonical_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\$\{([^{}\n]*[^{}\s][^{}\n]*)\}|\[([^\[\]\n]*[^\[\]\s][^\[\]\n]*)\]")
            .expect("Invalid regex")
    })
}

fn identifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid regex"))
}

pub(crate) fn token_regex(syntax: VariableSyntax) -> &'static Regex {
    match syntax {
        VariableSyntax::DoubleBrace => double_brace_regex(),
        VariableSyntax::Bracket => bracket_regex(),
        VariableSyntax::DollarBrace => dollar_brace_regex(),
    }
}

/// Canonical name for a placeholder: trimmed, whitespace runs become `_`.
pub fn canonical_name(inner: &str) -> String {
    inner.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Occurrence counts and findings for every placeholder in a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableReport {
    pub double_brace: usize,
    pub bracket: usize,
    pub dollar_brace: usize,
    /// Distinct tokens, first spelling kept, compared case-insensitively.
    pub unique: Vec<String>,
    /// Every double-brace occurrence whose name is not `[A-Za-z0-9_-]+`.
    pub malformed: Vec<String>,
}

impl VariableReport {
    pub fn extract(text: &str) -> Self {
        let mut report = Self::default();
        let mut seen = HashSet::new();

        for syntax in VariableSyntax::ALL {
            for caps in token_regex(syntax).captures_iter(text) {
                let token = &caps[0];
                match syntax {
                    VariableSyntax::DoubleBrace => {
                        report.double_brace += 1;
                        if !identifier_regex().is_match(&caps[1]) {
                            report.malformed.push(token.to_string());
                        }
                    }
                    VariableSyntax::Bracket => report.bracket += 1,
                    VariableSyntax::DollarBrace => report.dollar_brace += 1,
                }
                if seen.insert(token.to_lowercase()) {
                    report.unique.push(token.to_string());
                }
            }
        }
        report
    }

    pub fn count(&self, syntax: VariableSyntax) -> usize {
        match syntax {
            VariableSyntax::DoubleBrace => self.double_brace,
            VariableSyntax::Bracket => self.bracket,
            VariableSyntax::DollarBrace => self.dollar_brace,
        }
    }

    pub fn total(&self) -> usize {
        self.double_brace + self.bracket + self.dollar_brace
    }

    /// Syntaxes with at least one occurrence.
    pub fn syntaxes(&self) -> Vec<VariableSyntax> {
        VariableSyntax::ALL
            .into_iter()
            .filter(|s| self.count(*s) > 0)
            .collect()
    }

    pub fn is_mixed(&self) -> bool {
        self.syntaxes().len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_syntax() {
        let report = VariableReport::extract("{{a}} {{b}} [c] ${d}");
        assert_eq!(report.double_brace, 2);
        assert_eq!(report.bracket, 1);
        assert_eq!(report.dollar_brace, 1);
        assert_eq!(report.total(), 4);
        assert!(report.is_mixed());
    }

    #[test]
    fn single_syntax_is_not_mixed() {
        let report = VariableReport::extract("Hello {{name}}, your {{order-id}} shipped.");
        assert!(!report.is_mixed());
        assert!(report.malformed.is_empty());
        assert_eq!(report.syntaxes(), vec![VariableSyntax::DoubleBrace]);
    }

    #[test]
    fn malformed_tokens_are_reported_per_occurrence() {
        let report = VariableReport::extract("{{user name}} and {{user name}} and {{ok}}");
        assert_eq!(report.malformed, vec!["{{user name}}", "{{user name}}"]);
        assert_eq!(report.unique.len(), 2);
    }

    #[test]
    fn unique_is_case_insensitive() {
        let report = VariableReport::extract("{{Name}} {{name}} {{NAME}}");
        assert_eq!(report.double_brace, 3);
        assert_eq!(report.unique, vec!["{{Name}}"]);
    }

    #[test]
    fn blank_brackets_are_not_variables() {
        let report = VariableReport::extract("- [ ] todo\n- [] also\n${ }");
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn canonical_name_collapses_whitespace() {
        assert_eq!(canonical_name("  user \t full name "), "user_full_name");
        assert_eq!(canonical_name("id"), "id");
    }
}
