//! Implementation of the `quill analyze` command.

use tracing::{info, instrument};

use quill_core::{
    application::TemplateService,
    domain::{AnalysisResult, TemplateMetadata},
};

use crate::{
    cli::{AnalyzeArgs, OutputFormat},
    error::CliResult,
    output::OutputManager,
};

/// Execute the `quill analyze` command.
#[instrument(skip_all)]
pub fn execute(args: AnalyzeArgs, output: OutputManager) -> CliResult<()> {
    let content = super::read_input(&args.input)?;
    let metadata = metadata_from(&args);

    let result = TemplateService::new().analyze(&content, metadata);
    info!(score = result.score, issues = result.issues.len(), "template analyzed");

    match output.format() {
        OutputFormat::Json => output.json(&result)?,
        _ => render(&result, &output)?,
    }
    Ok(())
}

fn metadata_from(args: &AnalyzeArgs) -> Option<TemplateMetadata> {
    if args.kind.is_none() && args.template_version.is_none() {
        return None;
    }
    Some(TemplateMetadata {
        kind: args.kind.clone(),
        version: args.template_version.clone(),
        ..TemplateMetadata::default()
    })
}

fn render(result: &AnalysisResult, output: &OutputManager) -> std::io::Result<()> {
    let details = &result.details;

    output.header(&format!("Score: {}/100", result.score))?;
    output.print(&format!(
        "Sections: {} ({:.0}% complete)",
        if details.structure.order.is_empty() {
            "none".to_string()
        } else {
            details.structure.order.join(" → ")
        },
        details.structure.completeness * 100.0
    ))?;
    output.print(&format!(
        "Quality: {:.2} (clarity {:.2}, conciseness {:.2}, consistency {:.2})",
        details.quality.overall(),
        details.quality.clarity,
        details.quality.conciseness,
        details.quality.consistency
    ))?;
    output.print(&format!(
        "Variables: {} unique, {} malformed",
        details.variables.unique.len(),
        details.variables.malformed.len()
    ))?;
    output.print(&format!(
        "Patterns: {}/100 ({} match(es))",
        details.patterns.score,
        details.patterns.matches.len()
    ))?;

    if result.issues.is_empty() {
        output.success("No issues found")?;
    } else {
        output.print("")?;
        output.header("Issues")?;
        for issue in &result.issues {
            output.warning(issue)?;
        }
    }

    if !result.suggestions.is_empty() {
        output.print("")?;
        output.header("Suggestions")?;
        for suggestion in &result.suggestions {
            output.info(suggestion)?;
        }
    }
    Ok(())
}
