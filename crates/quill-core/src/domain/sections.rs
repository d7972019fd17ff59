//! Section locator.
//!
//! A section is present when a line starts with its label followed by a
//! colon, compared case-insensitively. Nothing else about the line matters:
//! `Task: summarize` and `TASK:` both count, `  TASK:` and `## TASK:` do not.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::value_objects::SectionKind;

/// Matches a section label at the start of a line; group 1 is the label as written.
pub(crate) fn label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?im)^(role|context|task|format|output):").expect("Invalid regex")
    })
}

/// Label of a single line, if it starts one.
pub(crate) fn line_label(line: &str) -> Option<(SectionKind, &str)> {
    let caps = label_regex().captures(line)?;
    let written = caps.get(1)?.as_str();
    written.parse().ok().map(|kind| (kind, written))
}

/// One section label found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedSection {
    pub kind: SectionKind,
    /// The label exactly as it appears in the text.
    pub written: String,
    /// 1-based line number.
    pub line: usize,
}

/// A section that appears after one that should follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderViolation {
    pub section: SectionKind,
    /// The highest-ranked section seen before it.
    pub after: SectionKind,
    pub line: usize,
}

/// Which logical sections a template has, and where.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMap {
    pub has_role: bool,
    pub has_context: bool,
    pub has_task: bool,
    /// FORMAT or OUTPUT.
    pub has_format: bool,
    pub located: Vec<LocatedSection>,
}

impl SectionMap {
    pub fn locate(text: &str) -> Self {
        let mut map = Self::default();
        for (idx, line) in text.split('\n').enumerate() {
            let Some((kind, written)) = line_label(line) else {
                continue;
            };
            match kind.logical() {
                SectionKind::Role => map.has_role = true,
                SectionKind::Context => map.has_context = true,
                SectionKind::Task => map.has_task = true,
                _ => map.has_format = true,
            }
            map.located.push(LocatedSection {
                kind,
                written: written.to_string(),
                line: idx + 1,
            });
        }
        map
    }

    pub fn has(&self, kind: SectionKind) -> bool {
        match kind.logical() {
            SectionKind::Role => self.has_role,
            SectionKind::Context => self.has_context,
            SectionKind::Task => self.has_task,
            _ => self.has_format,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.located.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.has_role && self.has_context && self.has_task && self.has_format
    }

    /// Logical sections that are absent, in canonical order.
    pub fn missing(&self) -> Vec<SectionKind> {
        [
            SectionKind::Role,
            SectionKind::Context,
            SectionKind::Task,
            SectionKind::Format,
        ]
        .into_iter()
        .filter(|k| !self.has(*k))
        .collect()
    }

    /// Fraction of the four logical sections present.
    pub fn completeness(&self) -> f64 {
        let present = [self.has_role, self.has_context, self.has_task, self.has_format]
            .iter()
            .filter(|p| **p)
            .count();
        present as f64 / 4.0
    }

    /// Uppercased labels in the order they appear.
    pub fn order(&self) -> Vec<String> {
        self.located
            .iter()
            .map(|s| s.written.to_ascii_uppercase())
            .collect()
    }

    /// Sections ranked below something that came before them.
    pub fn order_violations(&self) -> Vec<OrderViolation> {
        let mut highest: Option<SectionKind> = None;
        let mut violations = Vec::new();
        for section in &self.located {
            match highest {
                Some(prev) if section.kind.rank() < prev.rank() => {
                    violations.push(OrderViolation {
                        section: section.kind,
                        after: prev,
                        line: section.line,
                    });
                }
                Some(prev) if section.kind.rank() == prev.rank() => {}
                _ => highest = Some(section.kind),
            }
        }
        violations
    }

    /// Labels not written fully uppercase, as written.
    pub fn lowercase_labels(&self) -> Vec<&str> {
        self.located
            .iter()
            .filter(|s| s.written != s.kind.as_str())
            .map(|s| s.written.as_str())
            .collect()
    }
}
