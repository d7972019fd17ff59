//! Application layer for Quill.
//!
//! This layer contains:
//! - **Services**: request routing (`TemplateService`)
//! - **Errors**: request-shape errors
//!
//! The application layer coordinates the domain layer but contains no
//! detection logic itself. All rules live in `crate::domain`.

pub mod error;
pub mod services;

pub use error::ApplicationError;
pub use services::{Request, Response, TemplateService};
