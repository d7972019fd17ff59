//! Implementation of the `quill validate` command.
//!
//! The exit status follows `validate.fail_on_invalid` and
//! `validate.fail_on_warnings` from the configuration.

use tracing::{info, instrument};

use quill_core::{
    application::TemplateService,
    domain::{Severity, ValidationResult},
};

use crate::{
    cli::{OutputFormat, ValidateArgs},
    config::ValidateConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `quill validate` command.
#[instrument(skip_all)]
pub fn execute(args: ValidateArgs, policy: &ValidateConfig, output: OutputManager) -> CliResult<()> {
    let content = super::read_input(&args.input)?;
    let result = TemplateService::new().validate(&content);

    let errors = result.errors().count();
    let warnings = result.warnings().count();
    info!(valid = result.is_valid, errors, warnings, "template validated");

    match output.format() {
        OutputFormat::Json => output.json(&result)?,
        _ => render(&result, errors, warnings, &output)?,
    }

    verdict(policy, errors, warnings)
}

/// Map violation counts onto an exit status.
fn verdict(policy: &ValidateConfig, errors: usize, warnings: usize) -> CliResult<()> {
    let failed =
        (policy.fail_on_invalid && errors > 0) || (policy.fail_on_warnings && warnings > 0);
    if failed {
        Err(CliError::InvalidTemplate { errors, warnings })
    } else {
        Ok(())
    }
}

fn render(
    result: &ValidationResult,
    errors: usize,
    warnings: usize,
    output: &OutputManager,
) -> std::io::Result<()> {
    if result.is_valid {
        return output.success("Template is valid");
    }

    for violation in &result.violations {
        let line = format!("[{}] {}", violation.rule, violation.message);
        match violation.severity {
            Severity::Error => output.error(&line)?,
            Severity::Warning => output.warning(&line)?,
            Severity::Info => output.info(&line)?,
        }
    }
    output.print("")?;
    output.print(&format!("{errors} error(s), {warnings} warning(s)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_fail_by_default() {
        let policy = ValidateConfig::default();
        assert!(verdict(&policy, 1, 0).is_err());
        assert!(verdict(&policy, 0, 5).is_ok());
        assert!(verdict(&policy, 0, 0).is_ok());
    }

    #[test]
    fn warnings_fail_when_configured() {
        let policy = ValidateConfig {
            fail_on_invalid: true,
            fail_on_warnings: true,
        };
        let err = verdict(&policy, 0, 2).unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidTemplate {
                errors: 0,
                warnings: 2
            }
        ));
    }

    #[test]
    fn errors_can_be_tolerated() {
        let policy = ValidateConfig {
            fail_on_invalid: false,
            fail_on_warnings: false,
        };
        assert!(verdict(&policy, 3, 3).is_ok());
    }
}
