//! Application services - orchestrate use cases.

pub mod template_service;

pub use template_service::{Request, Response, TemplateService};
