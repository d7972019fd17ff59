//! Diagnostics on stderr.
//!
//! stdout carries results (text, reports, JSON envelopes), so every event
//! goes to stderr. `-v` raises the level one step per flag starting from
//! `warn`; `-q` drops to `error`. `RUST_LOG` replaces the computed filter.
//! From `-vv` on, event targets are shown so core pass and rule events can
//! be told apart from CLI events.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Install the stderr subscriber for this process.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(level >= LevelFilter::DEBUG)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// Filter for the `quill` binary and the `quill_core` engine at one level.
fn filter_directive(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    format!("quill={level},quill_core={level}")
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
