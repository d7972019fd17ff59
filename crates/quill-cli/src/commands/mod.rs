//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and render the results.
//! No template logic lives here.

pub mod analyze;
pub mod completions;
pub mod config;
pub mod enhance;
pub mod exec;
pub mod validate;

use std::fs;
use std::io::{self, Read};

use tracing::debug;

use crate::{
    cli::InputArgs,
    error::{CliError, CliResult, IntoCli},
};

/// Read the template named by `input`, or stdin when no file is given.
pub(crate) fn read_input(input: &InputArgs) -> CliResult<String> {
    match input.path() {
        Some(path) => {
            debug!(path = %path.display(), "reading template file");
            fs::read_to_string(path).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => CliError::InputNotFound {
                    path: path.to_path_buf(),
                },
                io::ErrorKind::InvalidData => CliError::InvalidInput {
                    message: format!("{} is not valid UTF-8", path.display()),
                    source: Some(Box::new(e)),
                },
                _ => CliError::IoError {
                    message: format!("reading {}", path.display()),
                    source: e,
                },
            })
        }
        None => {
            debug!("reading template from stdin");
            read_stdin()
        }
    }
}

pub(crate) fn read_stdin() -> CliResult<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .with_cli_context(|| "reading stdin")?;
    Ok(buf)
}
