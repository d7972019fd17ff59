//! Template enhancer.
//!
//! Four one-shot passes run in order, each consuming the previous pass's
//! output and appending to a shared change log:
//!
//! 1. **structure**: add missing sections
//! 2. **variables**: rewrite `[name]` / `${name}` to `{{name}}`
//! 3. **formatting**: header case, header spacing, bullets, trailing whitespace
//! 4. **deduplicate**: drop repeated lines
//!
//! A pass that breaks its postconditions is discarded: its input is carried
//! forward and it contributes nothing to the log. `enhance` itself never fails.

use std::collections::HashSet;

use regex::Captures;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::entities::document::{Document, is_blank};
use crate::domain::error::DomainError;
use crate::domain::sections::{SectionMap, line_label};
use crate::domain::value_objects::SectionKind;
use crate::domain::variables::{canonical_name, non_canonical_regex};

pub const BASIC_STRUCTURE_CHANGE: &str =
    "Added basic template structure (ROLE, CONTEXT, TASK, FORMAT sections)";

const DEFAULT_CONTEXT: &str = "Provide relevant background information for this task.";
const DEFAULT_TASK: &str = "Describe the specific task to be completed.";
const DEFAULT_FORMAT: &str = "Provide a clear, well-structured response.";

/// Keyword stems sniffed from the first line, and the specialty they imply.
const ROLE_KEYWORDS: &[(&[&str], &str)] = &[
    (&["review", "analy"], "reviewing and analyzing content"),
    (&["create", "generat"], "creating and generating content"),
    (&["improve", "enhance"], "improving and enhancing content"),
    (&["explain", "teach"], "explaining concepts and teaching"),
];
const DEFAULT_SPECIALTY: &str = "assisting with the specified task";

/// Rewritten template plus what was done to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementResult {
    pub enhanced_content: String,
    pub changes: Vec<String>,
    pub original_content: String,
}

impl EnhancementResult {
    pub fn is_unchanged(&self) -> bool {
        self.enhanced_content == self.original_content
    }
}

type PassOutput = Result<(String, Vec<String>), DomainError>;

struct Pass {
    name: &'static str,
    run: fn(&str) -> PassOutput,
}

const PASSES: [Pass; 4] = [
    Pass {
        name: "structure",
        run: structure_pass,
    },
    Pass {
        name: "variables",
        run: variable_pass,
    },
    Pass {
        name: "formatting",
        run: formatting_pass,
    },
    Pass {
        name: "deduplicate",
        run: dedup_pass,
    },
];

/// Rewrite `text` through every pass.
#[instrument(skip_all, fields(len = text.len()))]
pub fn enhance(text: &str) -> EnhancementResult {
    let mut current = text.to_string();
    let mut changes = Vec::new();

    for pass in &PASSES {
        match run_pass(pass, &current) {
            Ok((next, log)) => {
                debug!(pass = pass.name, changes = log.len(), "pass applied");
                current = next;
                changes.extend(log);
            }
            Err(e) => warn!(pass = pass.name, error = %e, "enhancement pass skipped"),
        }
    }

    EnhancementResult {
        enhanced_content: current,
        changes,
        original_content: text.to_string(),
    }
}

fn run_pass(pass: &Pass, input: &str) -> PassOutput {
    let (output, log) = (pass.run)(input)?;
    if !input.trim().is_empty() && output.trim().is_empty() {
        return Err(DomainError::EnhancementFailed {
            pass: pass.name,
            reason: "rewrite emptied the document".into(),
        });
    }
    Ok((output, log))
}

// ── structure ────────────────────────────────────────────────────────────────

/// Specialty phrase for the ROLE line, from keywords in `first_line`.
pub fn infer_specialty(first_line: &str) -> &'static str {
    let lower = first_line.to_lowercase();
    ROLE_KEYWORDS
        .iter()
        .find(|(stems, _)| stems.iter().any(|s| lower.contains(s)))
        .map_or(DEFAULT_SPECIALTY, |(_, specialty)| specialty)
}

fn role_line(first_line: &str) -> String {
    format!(
        "ROLE: You are an AI assistant specialized in {}.",
        infer_specialty(first_line)
    )
}

fn structure_pass(text: &str) -> PassOutput {
    let sections = SectionMap::locate(text);
    if sections.is_complete() {
        return Ok((text.to_string(), Vec::new()));
    }

    let doc = Document::parse(text);
    let (output, log) = if sections.is_empty() {
        (synthesize(&doc, text.ends_with('\n')), vec![BASIC_STRUCTURE_CHANGE.to_string()])
    } else {
        insert_missing(doc, &sections)
    };

    let after = SectionMap::locate(&output);
    if !after.is_complete() {
        let missing: Vec<&str> = after.missing().iter().map(|k| k.as_str()).collect();
        return Err(DomainError::EnhancementFailed {
            pass: "structure",
            reason: format!("still missing {}", missing.join(", ")),
        });
    }
    Ok((output, log))
}

/// Replace an unstructured document with all four sections.
fn synthesize(doc: &Document, final_newline: bool) -> String {
    // Indentation stays so an indented `task:` does not become a label.
    let lines: Vec<&str> = doc.body_lines().collect();
    let first = lines.first().map_or("", |l| l.trim_start());
    let block = |part: &[&str]| part.join("\n").trim_start().to_string();

    let context = if lines.is_empty() {
        DEFAULT_CONTEXT.to_string()
    } else {
        block(&lines[..lines.len().min(3)])
    };
    let task = if lines.len() > 3 {
        block(&lines[3..])
    } else {
        DEFAULT_TASK.to_string()
    };

    let mut out = format!(
        "{}\n\nCONTEXT: {}\n\nTASK: {}\n\nFORMAT: {}",
        role_line(first),
        context,
        task,
        DEFAULT_FORMAT
    );
    if final_newline {
        out.push('\n');
    }
    out
}

fn insert_missing(mut doc: Document, sections: &SectionMap) -> (String, Vec<String>) {
    let mut log = Vec::new();

    if !sections.has_role {
        let first = doc.content_lines().next().unwrap_or("").to_string();
        doc.prepend_block(&role_line(&first));
        log.push("Added ROLE section".to_string());
    }

    if !sections.has_context {
        let block = format!("CONTEXT: {DEFAULT_CONTEXT}");
        let role_at = doc
            .lines()
            .iter()
            .position(|l| matches!(line_label(l), Some((SectionKind::Role, _))));
        match role_at {
            Some(idx) => doc.insert_block_after(idx, &block),
            None => doc.prepend_block(&block),
        }
        log.push("Added CONTEXT section".to_string());
    }

    if !sections.has_task {
        doc.append_block(&format!("TASK: {DEFAULT_TASK}"));
        log.push("Added TASK section".to_string());
    }

    if !sections.has_format {
        doc.append_block(&format!("FORMAT: {DEFAULT_FORMAT}"));
        log.push("Added FORMAT section".to_string());
    }

    (doc.render(), log)
}

// ── variables ────────────────────────────────────────────────────────────────

fn variable_pass(text: &str) -> PassOutput {
    let mut mappings: Vec<(String, String)> = Vec::new();

    let output = non_canonical_regex().replace_all(text, |caps: &Captures<'_>| {
        let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        let old = caps[0].to_string();
        let new = format!("{{{{{}}}}}", canonical_name(inner));
        if !mappings.iter().any(|(o, _)| *o == old) {
            mappings.push((old, new.clone()));
        }
        new
    });

    let log = mappings
        .into_iter()
        .map(|(old, new)| format!("{old} → {new}"))
        .collect();
    Ok((output.into_owned(), log))
}

// ── formatting ───────────────────────────────────────────────────────────────

/// `* item` / `• item` rewritten to `- item`, keeping indentation.
fn normalize_bullet(line: &str) -> Option<String> {
    let body = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - body.len()];
    let mut chars = body.chars();
    let glyph = chars.next().filter(|c| matches!(c, '*' | '•'))?;
    if !chars.next().is_some_and(|c| c == ' ' || c == '\t') {
        return None;
    }
    Some(format!("{indent}-{}", &body[glyph.len_utf8()..]))
}

/// Line with spaces and tabs removed before its end (and before a final `\r`).
fn strip_trailing(line: &str) -> Option<String> {
    let (body, cr) = match line.strip_suffix('\r') {
        Some(b) => (b, "\r"),
        None => (line, ""),
    };
    let trimmed = body.trim_end_matches([' ', '\t']);
    (trimmed.len() != body.len()).then(|| format!("{trimmed}{cr}"))
}

fn formatting_pass(text: &str) -> PassOutput {
    let mut doc = Document::parse(text);
    let mut log = Vec::new();

    let mut uppercased = false;
    for line in doc.lines_mut().iter_mut() {
        let fix = line_label(line)
            .filter(|(kind, written)| *written != kind.as_str())
            .map(|(kind, written)| format!("{}{}", kind.as_str(), &line[written.len()..]));
        if let Some(fixed) = fix {
            *line = fixed;
            uppercased = true;
        }
    }
    if uppercased {
        log.push("Standardized section headers to uppercase".to_string());
    }

    let mut spaced = Vec::with_capacity(doc.lines().len());
    let mut added_spacing = false;
    for line in doc.lines_mut().drain(..) {
        let needs_gap = line_label(&line).is_some()
            && spaced.last().is_some_and(|prev: &String| !is_blank(prev));
        if needs_gap {
            spaced.push(String::new());
            added_spacing = true;
        }
        spaced.push(line);
    }
    *doc.lines_mut() = spaced;
    if added_spacing {
        log.push("Added blank lines before section headers".to_string());
    }

    let mut bullets = false;
    let mut trailing = false;
    for line in doc.lines_mut().iter_mut() {
        if let Some(fixed) = normalize_bullet(line) {
            *line = fixed;
            bullets = true;
        }
    }
    for line in doc.lines_mut().iter_mut() {
        if let Some(fixed) = strip_trailing(line) {
            *line = fixed;
            trailing = true;
        }
    }
    if bullets {
        log.push("Normalized bullet points to '-'".to_string());
    }
    if trailing {
        log.push("Removed trailing whitespace".to_string());
    }

    Ok((doc.render(), log))
}

// ── deduplicate ──────────────────────────────────────────────────────────────

fn dedup_pass(text: &str) -> PassOutput {
    let mut doc = Document::parse(text);
    let mut seen = HashSet::new();
    let mut removed = 0usize;

    doc.lines_mut().retain(|line| {
        if is_blank(line) || line_label(line).is_some() {
            return true;
        }
        if seen.insert(line.trim().to_lowercase()) {
            true
        } else {
            removed += 1;
            false
        }
    });

    let log = if removed > 0 {
        vec![format!("Removed {removed} duplicate line(s)")]
    } else {
        Vec::new()
    };
    Ok((doc.render(), log))
}
