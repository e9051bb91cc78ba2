//! CLI argument definitions.
//!
//! All Clap derive structs for `cellbook` command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Interactive teaching-notebook renderer and run simulator.
#[derive(Parser, Debug)]
#[command(name = "cellbook", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "CELLBOOK_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render notebook content to HTML.
    Render(RenderArgs),

    /// Validate notebook content or exercise definition files.
    Validate(ValidateArgs),

    /// Serve rendered notebook content over HTTP.
    Serve(ServeArgs),

    /// Simulate running every code cell of a document.
    Run(RunArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

/// Arguments for `render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Content path or URL.
    #[arg(short, long, env = "CELLBOOK_CONTENT")]
    pub content: String,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Emit a complete HTML page instead of the cell fragments.
    #[arg(long)]
    pub full_page: bool,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Files to validate (`.md` content, `.yaml`/`.yml` exercises).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Content path or URL, re-fetched on every page request.
    #[arg(short, long, env = "CELLBOOK_CONTENT")]
    pub content: String,

    /// Address to bind, e.g. `127.0.0.1:8787`.
    #[arg(long, default_value = "127.0.0.1:8787", env = "CELLBOOK_HTTP")]
    pub http: String,

    /// Expose Prometheus metrics on `127.0.0.1:<port>`.
    #[arg(long)]
    pub metrics_port: Option<u16>,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Content path or URL.
    #[arg(short, long, env = "CELLBOOK_CONTENT")]
    pub content: String,

    /// Lower bound of the simulated execution delay.
    #[arg(long, default_value = "1s", value_parser = humantime::parse_duration)]
    pub min_delay: Duration,

    /// Upper bound of the simulated execution delay.
    #[arg(long, default_value = "3s", value_parser = humantime::parse_duration)]
    pub max_delay: Duration,

    /// Delay between output reveal and reflection reveal.
    #[arg(long, default_value = "500ms", value_parser = humantime::parse_duration)]
    pub reflection_delay: Duration,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_content() {
        let cli = Cli::try_parse_from(["cellbook", "render", "--content", "lesson.md"]);
        assert!(cli.is_ok(), "Failed to parse: {cli:?}");
    }

    #[test]
    fn test_render_requires_content() {
        // No env fallback set in tests, so --content is required.
        let cli = Cli::try_parse_from(["cellbook", "render"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_validate_requires_files() {
        let result = Cli::try_parse_from(["cellbook", "validate"]);
        assert!(result.is_err(), "Expected error for missing files");
    }

    #[test]
    fn test_validate_strict_flag() {
        let cli =
            Cli::try_parse_from(["cellbook", "validate", "--strict", "a.md", "b.yaml"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert!(args.strict);
            assert_eq!(args.files.len(), 2);
        } else {
            panic!("Expected ValidateArgs");
        }
    }

    #[test]
    fn test_run_delay_parsing() {
        let cli = Cli::try_parse_from([
            "cellbook",
            "run",
            "--content",
            "x.md",
            "--min-delay",
            "250ms",
            "--max-delay",
            "2s",
        ])
        .unwrap();
        if let Commands::Run(args) = cli.command {
            assert_eq!(args.min_delay, Duration::from_millis(250));
            assert_eq!(args.max_delay, Duration::from_secs(2));
            assert_eq!(args.reflection_delay, Duration::from_millis(500));
        } else {
            panic!("Expected RunArgs");
        }
    }

    #[test]
    fn test_run_rejects_bad_duration() {
        let cli = Cli::try_parse_from([
            "cellbook",
            "run",
            "--content",
            "x.md",
            "--min-delay",
            "soon",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["cellbook", "serve", "--content", "x.md"]).unwrap();
        if let Commands::Serve(args) = cli.command {
            assert_eq!(args.http, "127.0.0.1:8787");
            assert!(args.metrics_port.is_none());
        } else {
            panic!("Expected ServeArgs");
        }
    }

    #[test]
    fn test_color_choices_parse() {
        for variant in ["auto", "always", "never"] {
            let cli = Cli::try_parse_from([
                "cellbook",
                "--color",
                variant,
                "render",
                "--content",
                "x.md",
            ]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
        }
    }

    #[test]
    fn test_verbose_count() {
        let cli =
            Cli::try_parse_from(["cellbook", "-vvv", "render", "--content", "x.md"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_quiet_flag() {
        let cli =
            Cli::try_parse_from(["cellbook", "--quiet", "render", "--content", "x.md"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_help_output() {
        let result = Cli::try_parse_from(["cellbook", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let result = Cli::try_parse_from(["cellbook", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
