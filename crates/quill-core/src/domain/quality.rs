//! Quality scorer: clarity, conciseness and consistency.
//!
//! Each metric is an independent single pass over the raw text. Every one
//! starts at 1.0, applies its adjustments, and is clamped to `[0, 1]`.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

const LONG_SENTENCE: f64 = 100.0;
const VERY_LONG_SENTENCE: f64 = 150.0;
const REPEAT_LIMIT: usize = 3;
const LONG_TEMPLATE: usize = 500;
const VERY_LONG_TEMPLATE: usize = 1000;

fn nested_parens_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\([^()]*\([^()]*\)[^()]*\)").expect("Invalid regex"))
}

fn caps_label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?m)^[A-Z]+:").expect("Invalid regex"))
}

fn present_tense_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)\b(?:is|are|am)\b").expect("Invalid regex"))
}

fn past_tense_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)\b(?:was|were)\b").expect("Invalid regex"))
}

fn bullet_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?m)^[ \t]*([-*•])[ \t]").expect("Invalid regex"))
}

/// Sentences split on `.`, `!` and `?`, trimmed, blanks dropped.
pub(crate) fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub(crate) fn nested_paren_count(text: &str) -> usize {
    nested_parens_regex().find_iter(text).count()
}

/// Distinct bullet glyphs used at line starts.
pub(crate) fn bullet_glyphs(text: &str) -> BTreeSet<char> {
    bullet_regex()
        .captures_iter(text)
        .filter_map(|c| c[1].chars().next())
        .collect()
}

fn clamp(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

pub fn clarity(text: &str) -> f64 {
    let lengths: Vec<usize> = sentences(text).map(|s| s.chars().count()).collect();
    let mean = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    };

    let mut score = 1.0;
    if mean > LONG_SENTENCE {
        score -= 0.2;
    }
    if mean > VERY_LONG_SENTENCE {
        score -= 0.3;
    }
    score -= 0.1 * nested_paren_count(text) as f64;
    if caps_label_regex().is_match(text) {
        score += 0.2;
    }
    clamp(score)
}

pub fn conciseness(text: &str) -> f64 {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word.to_lowercase()).or_default() += 1;
    }
    let repeated = counts.values().filter(|n| **n > REPEAT_LIMIT).count();

    let mut score = 1.0 - 0.1 * repeated as f64;
    let length = text.chars().count();
    if length > LONG_TEMPLATE {
        score -= 0.2;
    }
    if length > VERY_LONG_TEMPLATE {
        score -= 0.3;
    }
    clamp(score)
}

pub fn consistency(text: &str) -> f64 {
    let mut score = 1.0;
    if present_tense_regex().is_match(text) && past_tense_regex().is_match(text) {
        score -= 0.2;
    }
    if bullet_glyphs(text).len() > 1 {
        score -= 0.2;
    }
    clamp(score)
}

/// The three quality metrics for one template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityScores {
    pub clarity: f64,
    pub conciseness: f64,
    pub consistency: f64,
}

impl QualityScores {
    pub fn score(text: &str) -> Self {
        Self {
            clarity: clarity(text),
            conciseness: conciseness(text),
            consistency: consistency(text),
        }
    }

    pub fn overall(&self) -> f64 {
        (self.clarity + self.conciseness + self.consistency) / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn clarity_rewards_labels() {
        // Short sentences with no penalties start at 1.0; the bonus is capped.
        assert!(approx(clarity("TASK: Write a haiku."), 1.0));
        assert!(approx(clarity("Write a haiku."), 1.0));
    }

    #[test]
    fn clarity_penalties_are_cumulative() {
        let long = "word ".repeat(32); // ~159 chars, one sentence
        assert!(approx(clarity(&format!("{long}.")), 0.5));
        let medium = "word ".repeat(24); // ~119 chars
        assert!(approx(clarity(&format!("{medium}.")), 0.8));
    }

    #[test]
    fn clarity_penalizes_nested_parentheses() {
        let text = "Use the tool (carefully (really)). Then stop (now (please)).";
        assert!(approx(clarity(text), 0.8));
    }

    #[test]
    fn conciseness_penalizes_repeated_words() {
        assert!(approx(conciseness("the the the the cat"), 0.9));
        assert!(approx(conciseness("The the THE the cat cat cat cat"), 0.8));
        assert!(approx(conciseness("the the the cat"), 1.0));
    }

    #[test]
    fn conciseness_penalizes_length() {
        let text: String = (0..130).map(|i| format!("w{i} ")).collect();
        assert!(text.chars().count() > 500 && text.chars().count() <= 1000);
        assert!(approx(conciseness(&text), 0.8));

        let text: String = (0..300).map(|i| format!("w{i} ")).collect();
        assert!(approx(conciseness(&text), 0.5));
    }

    #[test]
    fn consistency_flags_mixed_tense_and_bullets() {
        assert!(approx(consistency("It is done. It was done."), 0.8));
        assert!(approx(consistency("- one\n* two\n• three"), 0.8));
        assert!(approx(consistency("This island was here.\n- a\n- b"), 1.0));
        assert!(approx(consistency("It is. It was.\n- a\n* b"), 0.6));
    }

    #[test]
    fn scores_stay_in_range_for_empty_text() {
        let scores = QualityScores::score("");
        assert!(approx(scores.clarity, 1.0));
        assert!(approx(scores.conciseness, 1.0));
        assert!(approx(scores.consistency, 1.0));
    }
}
