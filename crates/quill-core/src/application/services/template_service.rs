//! Template Service - request handling for the three operations.
//!
//! The service is the single entry point transports use. It checks the
//! request shape, routes it to the analyzer, validator or enhancer, and
//! hands back a serializable response.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    application::ApplicationError,
    domain::{
        AnalysisResult, EnhancementResult, Operation, TemplateMetadata, ValidationResult, analysis,
        enhance, rules,
    },
    error::QuillResult,
};

/// An operation request as received from a transport.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Request {
    pub operation: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub metadata: Option<TemplateMetadata>,
}

impl Request {
    pub fn new(operation: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            content: Some(content.into()),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: TemplateMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Result of a dispatched request; serializes as the inner result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Analysis(AnalysisResult),
    Validation(ValidationResult),
    Enhancement(EnhancementResult),
}

impl Response {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Analysis(_) => Operation::Analyze,
            Self::Validation(_) => Operation::Validate,
            Self::Enhancement(_) => Operation::Enhance,
        }
    }
}

/// Service for template operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateService;

impl TemplateService {
    /// Create a new template service.
    pub fn new() -> Self {
        Self
    }

    /// Score a template and collect issues.
    pub fn analyze(&self, content: &str, metadata: Option<TemplateMetadata>) -> AnalysisResult {
        analysis::analyze(content, metadata)
    }

    /// Check a template against every rule.
    pub fn validate(&self, content: &str) -> ValidationResult {
        rules::validate(content)
    }

    /// Rewrite a template toward the canonical layout.
    pub fn enhance(&self, content: &str) -> EnhancementResult {
        enhance::enhance(content)
    }

    /// Route a request to its operation.
    ///
    /// The operation name is checked first, so an unknown operation is
    /// reported even when the content is also missing.
    #[instrument(skip_all, fields(operation = %request.operation))]
    pub fn dispatch(&self, request: Request) -> QuillResult<Response> {
        let operation: Operation = request.operation.parse()?;

        let content = match request.content {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Err(ApplicationError::missing_content().into()),
        };
        debug!(%operation, len = content.len(), "dispatching");

        Ok(match operation {
            Operation::Analyze => Response::Analysis(self.analyze(&content, request.metadata)),
            Operation::Validate => Response::Validation(self.validate(&content)),
            Operation::Enhance => Response::Enhancement(self.enhance(&content)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::error::QuillError;
    use serde_json::json;

    const TEMPLATE: &str = "ROLE: r\n\nCONTEXT: c\n\nTASK: t\n\nFORMAT: f\n";

    #[test]
    fn dispatch_routes_each_operation() {
        let service = TemplateService::new();
        for (name, expected) in [
            ("analyze", Operation::Analyze),
            ("validate", Operation::Validate),
            ("enhance", Operation::Enhance),
        ] {
            let response = service.dispatch(Request::new(name, TEMPLATE)).unwrap();
            assert_eq!(response.operation(), expected);
        }
    }

    #[test]
    fn unknown_operation_is_rejected_first() {
        let request = Request {
            operation: "summarize".into(),
            content: None,
            metadata: None,
        };
        let err = TemplateService::new().dispatch(request).unwrap_err();
        assert_eq!(
            err,
            QuillError::Domain(DomainError::UnknownOperation("summarize".into()))
        );
    }

    #[test]
    fn blank_content_is_rejected() {
        for content in [None, Some(String::new()), Some(" \n\t".to_string())] {
            let request = Request {
                operation: "validate".into(),
                content,
                metadata: None,
            };
            let err = TemplateService::new().dispatch(request).unwrap_err();
            assert!(matches!(
                err,
                QuillError::Application(ApplicationError::InvalidRequest { .. })
            ));
        }
    }

    #[test]
    fn request_deserializes_with_metadata() {
        let request: Request = serde_json::from_value(json!({
            "operation": "analyze",
            "content": TEMPLATE,
            "metadata": {"type": "review"}
        }))
        .unwrap();
        let response = TemplateService::new().dispatch(request).unwrap();

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["score"], 100);
        assert_eq!(value["details"]["metadata"]["type"], "review");
    }

    #[test]
    fn response_serializes_without_a_tag() {
        let response = TemplateService::new()
            .dispatch(Request::new("validate", TEMPLATE))
            .unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"isValid": true, "violations": []}));
    }
}
