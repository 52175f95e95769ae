//! CLI argument definitions for the assessment engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "exam",
    version,
    about = "Assessment composition and constraint validation engine",
    long_about = "Compose school assessment papers from blueprints.\n\n\
                  Validates blueprints against per-class policies, generates\n\
                  section content, and manages the publication lifecycle."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a blueprint against class policy without generating anything.
    Validate(ValidateArgs),

    /// Validate a blueprint, generate all sections, and store the artifact.
    Compose(ComposeArgs),

    /// Publish a generated artifact, optionally with an exam window.
    Publish(PublishArgs),

    /// Show stored artifacts for a tenant, grouped by class.
    History(HistoryArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the blueprint TOML file.
    #[arg(value_name = "BLUEPRINT")]
    pub blueprint: PathBuf,

    /// Path to the class policy CSV file.
    #[arg(long = "policies", value_name = "CSV")]
    pub policies: PathBuf,

    /// Write a machine-readable validation report to this path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ComposeArgs {
    /// Path to the blueprint TOML file.
    #[arg(value_name = "BLUEPRINT")]
    pub blueprint: PathBuf,

    /// Path to the class policy CSV file.
    #[arg(long = "policies", value_name = "CSV")]
    pub policies: PathBuf,

    /// Artifact store directory (created if missing).
    #[arg(long = "store", value_name = "DIR")]
    pub store: PathBuf,

    /// Recorded as the artifact author.
    #[arg(long = "created-by", value_name = "USER", default_value = "cli")]
    pub created_by: String,
}

#[derive(Parser)]
pub struct PublishArgs {
    /// Hex id of the artifact to publish.
    #[arg(value_name = "ARTIFACT_ID")]
    pub artifact_id: String,

    /// Artifact store directory.
    #[arg(long = "store", value_name = "DIR")]
    pub store: PathBuf,

    /// Scheduled exam start (RFC 3339, e.g. 2026-03-09T09:00:00Z).
    #[arg(long = "start", value_name = "TIMESTAMP")]
    pub start: Option<String>,

    /// Scheduled exam end (RFC 3339).
    #[arg(long = "end", value_name = "TIMESTAMP")]
    pub end: Option<String>,
}

#[derive(Parser)]
pub struct HistoryArgs {
    /// Artifact store directory.
    #[arg(long = "store", value_name = "DIR")]
    pub store: PathBuf,

    /// Tenant whose artifacts to list.
    #[arg(long = "tenant", value_name = "ID")]
    pub tenant: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
