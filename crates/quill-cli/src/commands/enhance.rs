//! Implementation of the `quill enhance` command.

use std::fs;

use tracing::{info, instrument};

use quill_core::{application::TemplateService, domain::EnhancementResult};

use crate::{
    cli::{EnhanceArgs, OutputFormat},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `quill enhance` command.
#[instrument(skip_all)]
pub fn execute(args: EnhanceArgs, output: OutputManager) -> CliResult<()> {
    let content = super::read_input(&args.input)?;
    let result = TemplateService::new().enhance(&content);
    info!(changes = result.changes.len(), "template enhanced");

    if let Some(path) = &args.output {
        fs::write(path, &result.enhanced_content)
            .with_cli_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "enhanced template written");
    }

    match (output.format(), &args.output) {
        (OutputFormat::Json, _) => output.json(&result)?,
        (_, Some(path)) => {
            render_changes(&result, &output)?;
            output.success(&format!("Wrote {}", path.display()))?;
        }
        (OutputFormat::Human, None) => {
            render_changes(&result, &output)?;
            output.print("")?;
            output.result(&result.enhanced_content)?;
        }
        (_, None) => output.result(&result.enhanced_content)?,
    }
    Ok(())
}

fn render_changes(result: &EnhancementResult, output: &OutputManager) -> std::io::Result<()> {
    if result.is_unchanged() {
        return output.success("Template already follows the canonical layout");
    }
    output.header("Changes")?;
    for change in &result.changes {
        output.info(change)?;
    }
    Ok(())
}
