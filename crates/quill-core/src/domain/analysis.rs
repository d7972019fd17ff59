//! Analyzer: one report combining structure, quality, variables and patterns.
//!
//! The headline `score` is the content score (`100 - 10` per issue, floored
//! at 0). The pattern matcher keeps its own score under `details.patterns`;
//! its suggestions are appended after the content suggestions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::domain::patterns::{self, PatternReport};
use crate::domain::quality::{QualityScores, sentences};
use crate::domain::sections::{OrderViolation, SectionMap};
use crate::domain::value_objects::SectionKind;
use crate::domain::variables::VariableReport;

const ISSUE_PENALTY: u32 = 10;
const QUALITY_THRESHOLD: f64 = 0.7;

/// Caller-supplied description of the template. Unknown keys are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureDetails {
    #[serde(flatten)]
    pub sections: SectionMap,
    pub completeness: f64,
    pub order: Vec<String>,
    pub order_violations: Vec<OrderViolation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
    pub sentences: usize,
}

impl TextStatistics {
    fn measure(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
            lines: if text.is_empty() { 0 } else { text.lines().count() },
            sentences: sentences(text).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    pub structure: StructureDetails,
    pub quality: QualityScores,
    pub variables: VariableReport,
    pub patterns: PatternReport,
    pub statistics: TextStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TemplateMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: u32,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub details: AnalysisDetails,
}

/// Collects issues and suggestions, each at most once, in insertion order.
#[derive(Default)]
struct Findings {
    issues: Vec<String>,
    suggestions: Vec<String>,
}

impl Findings {
    fn add(&mut self, issue: impl Into<String>, suggestion: impl Into<String>) {
        let issue = issue.into();
        if !self.issues.contains(&issue) {
            self.issues.push(issue);
        }
        self.suggest(suggestion);
    }

    fn suggest(&mut self, suggestion: impl Into<String>) {
        let suggestion = suggestion.into();
        if !self.suggestions.contains(&suggestion) {
            self.suggestions.push(suggestion);
        }
    }
}

fn missing_section_suggestion(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Role => "Add a ROLE: section describing who the model should act as",
        SectionKind::Context => "Add a CONTEXT: section with the background the model needs",
        SectionKind::Task => "Add a TASK: section stating exactly what to do",
        SectionKind::Format | SectionKind::Output => {
            "Add a FORMAT: or OUTPUT: section describing the expected response"
        }
    }
}

fn structure_findings(sections: &SectionMap, findings: &mut Findings) {
    for kind in sections.missing() {
        findings.add(
            format!("Missing {} section", kind),
            missing_section_suggestion(kind),
        );
    }
    if !sections.order_violations().is_empty() {
        findings.add(
            "Sections are out of order",
            "Order sections as ROLE, CONTEXT, TASK, FORMAT",
        );
    }
}

fn variable_findings(variables: &VariableReport, findings: &mut Findings) {
    if variables.is_mixed() {
        findings.add(
            "Mixed variable syntaxes",
            "Use {{name}} for every variable",
        );
    }
    if !variables.malformed.is_empty() {
        findings.add(
            format!("{} malformed variable(s)", variables.malformed.len()),
            "Variable names may only contain letters, digits, '_' and '-'",
        );
    }
}

fn quality_findings(quality: &QualityScores, findings: &mut Findings) {
    if quality.clarity < QUALITY_THRESHOLD {
        findings.add(
            "Low clarity",
            "Shorten sentences and avoid nested parentheses",
        );
    }
    if quality.conciseness < QUALITY_THRESHOLD {
        findings.add(
            "Template is verbose or repetitive",
            "Remove repeated words and trim the template",
        );
    }
    if quality.consistency < QUALITY_THRESHOLD {
        findings.add(
            "Inconsistent tense or bullet style",
            "Use one tense and one bullet marker throughout",
        );
    }
}

/// Analyze a template.
#[instrument(skip_all, fields(len = text.len()))]
pub fn analyze(text: &str, metadata: Option<TemplateMetadata>) -> AnalysisResult {
    let sections = SectionMap::locate(text);
    let variables = VariableReport::extract(text);
    let quality = QualityScores::score(text);
    let patterns = patterns::scan(text);

    let mut findings = Findings::default();
    if text.trim().is_empty() {
        findings.add("Template is empty", "Provide template content to analyze");
    }
    structure_findings(&sections, &mut findings);
    variable_findings(&variables, &mut findings);
    quality_findings(&quality, &mut findings);
    for suggestion in &patterns.suggestions {
        findings.suggest(suggestion.as_str());
    }

    let penalty = ISSUE_PENALTY.saturating_mul(findings.issues.len() as u32);
    let score = 100u32.saturating_sub(penalty);
    debug!(score, issues = findings.issues.len(), "analysis finished");

    AnalysisResult {
        score,
        issues: findings.issues,
        suggestions: findings.suggestions,
        details: AnalysisDetails {
            structure: StructureDetails {
                completeness: sections.completeness(),
                order: sections.order(),
                order_violations: sections.order_violations(),
                sections,
            },
            quality,
            variables,
            patterns,
            statistics: TextStatistics::measure(text),
            metadata,
        },
    }
}
