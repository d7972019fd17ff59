//! Implementation of the `quill exec` command.
//!
//! Reads one JSON request from stdin and answers with one JSON envelope on
//! stdout. Request errors become a single `schema` entry in the envelope.

use serde::Serialize;
use tracing::{info, instrument, warn};

use quill_core::{
    application::{Request, Response, TemplateService},
    domain::{Severity, Violation},
};

use crate::{
    error::{CliError, CliResult},
    output::OutputManager,
};

const SCHEMA_RULE: &str = "schema";

/// The reply written to stdout.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Success { success: bool, result: Response },
    Failure { success: bool, errors: Vec<Violation> },
}

impl Envelope {
    fn success(result: Response) -> Self {
        Self::Success {
            success: true,
            result,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            success: false,
            errors: vec![Violation {
                rule: SCHEMA_RULE.to_string(),
                message: message.into(),
                severity: Severity::Error,
            }],
        }
    }

    fn first_error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { errors, .. } => errors.first().map(|e| e.message.as_str()),
        }
    }
}

/// Execute the `quill exec` command.
#[instrument(skip_all)]
pub fn execute(output: OutputManager) -> CliResult<()> {
    let raw = super::read_stdin()?;
    let envelope = answer(&raw);
    output.json(&envelope)?;

    match envelope.first_error() {
        Some(message) => Err(CliError::RequestRejected {
            message: message.to_string(),
        }),
        None => Ok(()),
    }
}

/// Parse and dispatch one raw request.
pub fn answer(raw: &str) -> Envelope {
    let request: Request = match serde_json::from_str(raw) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "malformed request");
            return Envelope::failure(format!("Malformed request: {e}"));
        }
    };

    match TemplateService::new().dispatch(request) {
        Ok(response) => {
            info!(operation = %response.operation(), "request answered");
            Envelope::success(response)
        }
        Err(e) => {
            warn!(error = %e, "request rejected");
            Envelope::failure(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn answer_json(raw: &str) -> Value {
        serde_json::to_value(answer(raw)).unwrap()
    }

    #[test]
    fn validate_request_succeeds() {
        let value = answer_json(r#"{"operation":"validate","content":"TASK: x"}"#);
        assert_eq!(value["success"], true);
        assert_eq!(value["result"]["isValid"], false);
    }

    #[test]
    fn unknown_operation_is_a_schema_error() {
        let value = answer_json(r#"{"operation":"translate","content":"TASK: x"}"#);
        assert_eq!(
            value,
            json!({
                "success": false,
                "errors": [{
                    "rule": "schema",
                    "message": "Unknown operation 'translate'",
                    "severity": "error"
                }]
            })
        );
    }

    #[test]
    fn missing_content_is_a_schema_error() {
        let value = answer_json(r#"{"operation":"analyze"}"#);
        assert_eq!(value["success"], false);
        assert_eq!(value["errors"][0]["rule"], "schema");
        assert!(value.get("result").is_none());
    }

    #[test]
    fn malformed_json_is_a_schema_error() {
        let envelope = answer("not json");
        assert!(envelope.first_error().unwrap().starts_with("Malformed request"));
    }
}
