//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No template logic lives here.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "quill",
    bin_name = "quill",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{270e} Prompt template analysis, validation and enhancement",
    long_about = "Quill checks prompt templates for the ROLE / CONTEXT / TASK / FORMAT \
                  layout, scores their quality, and rewrites them toward it.",
    after_help = "EXAMPLES:\n\
        \x20 quill analyze prompt.txt\n\
        \x20 quill validate prompt.txt --output-format json\n\
        \x20 quill enhance prompt.txt --output prompt.enhanced.txt\n\
        \x20 echo '{\"operation\":\"validate\",\"content\":\"TASK: x\"}' | quill exec",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a template and report issues.
    #[command(
        visible_alias = "a",
        about = "Analyze a template",
        after_help = "EXAMPLES:\n\
            \x20 quill analyze prompt.txt\n\
            \x20 quill analyze prompt.txt --type review --template-version 2\n\
            \x20 cat prompt.txt | quill analyze"
    )]
    Analyze(AnalyzeArgs),

    /// Check a template against every rule.
    #[command(
        visible_alias = "v",
        about = "Validate a template",
        after_help = "EXAMPLES:\n\
            \x20 quill validate prompt.txt\n\
            \x20 quill validate - < prompt.txt"
    )]
    Validate(ValidateArgs),

    /// Rewrite a template toward the canonical layout.
    #[command(
        visible_alias = "e",
        about = "Enhance a template",
        after_help = "EXAMPLES:\n\
            \x20 quill enhance prompt.txt\n\
            \x20 quill enhance prompt.txt --output better.txt"
    )]
    Enhance(EnhanceArgs),

    /// Answer one JSON request read from stdin.
    #[command(
        about = "Run a JSON request from stdin",
        after_help = "REQUEST:\n\
            \x20 {\"operation\": \"analyze|validate|enhance\", \"content\": \"...\", \"metadata\": {...}}\n\n\
            RESPONSE:\n\
            \x20 {\"success\": true, \"result\": {...}}\n\
            \x20 {\"success\": false, \"errors\": [{\"rule\": \"schema\", \"message\": \"...\", \"severity\": \"error\"}]}"
    )]
    Exec,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 quill completions bash > ~/.local/share/bash-completion/completions/quill\n\
            \x20 quill completions zsh  > ~/.zfunc/_quill\n\
            \x20 quill completions fish > ~/.config/fish/completions/quill.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Quill configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 quill config get validate.fail_on_warnings\n\
            \x20 quill config list\n\
            \x20 quill config path"
    )]
    Config(ConfigCommands),
}

// ── shared input ──────────────────────────────────────────────────────────────

/// Where a template is read from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Template file; `-` or nothing reads stdin.
    #[arg(value_name = "FILE", help = "Template file (default: stdin)")]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    /// The file to read, or `None` for stdin.
    pub fn path(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|p| p.as_os_str() != "-")
    }
}

// ── analyze ───────────────────────────────────────────────────────────────────

/// Arguments for `quill analyze`.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Template type recorded in the report metadata.
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        help = "Template type (recorded in metadata)"
    )]
    pub kind: Option<String>,

    /// Template version recorded in the report metadata.
    #[arg(
        long = "template-version",
        value_name = "VERSION",
        help = "Template version (recorded in metadata)"
    )]
    pub template_version: Option<String>,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `quill validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

// ── enhance ───────────────────────────────────────────────────────────────────

/// Arguments for `quill enhance`.
#[derive(Debug, Args)]
pub struct EnhanceArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the enhanced template here instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the enhanced template to FILE"
    )]
    pub output: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `quill completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `quill config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_analyze_with_metadata() {
        let cli = Cli::parse_from([
            "quill",
            "analyze",
            "prompt.txt",
            "--type",
            "review",
            "--template-version",
            "2",
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected Analyze command");
        };
        assert_eq!(args.input.path(), Some(Path::new("prompt.txt")));
        assert_eq!(args.kind.as_deref(), Some("review"));
        assert_eq!(args.template_version.as_deref(), Some("2"));
    }

    #[test]
    fn dash_means_stdin() {
        let cli = Cli::parse_from(["quill", "validate", "-"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.input.path(), None);

        let cli = Cli::parse_from(["quill", "validate"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.input.path(), None);
    }

    #[test]
    fn enhance_output_flag() {
        let cli = Cli::parse_from(["quill", "e", "in.txt", "-o", "out.txt"]);
        let Commands::Enhance(args) = cli.command else {
            panic!("expected Enhance command");
        };
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["quill", "validate", "x.txt", "--output-format", "json", "-vv"]);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["quill", "--quiet", "--verbose", "exec"]);
        assert!(result.is_err());
    }
}
