//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formkit",
    version,
    about = "Diff entity snapshots and check forms for unsaved changes",
    long_about = "Diff entity snapshots and check forms for unsaved changes.\n\n\
                  Inputs are JSON files. Order diffs are grouped by order line\n\
                  for review; dirty checks compare form values against a\n\
                  normalized entity."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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

    /// Settings file (default: formkit.toml in the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show what changed between two snapshots, grouped by order line.
    Diff(DiffArgs),

    /// Check whether form values differ from an entity.
    Dirty(DirtyArgs),

    /// Print an entity rewritten into form-field shape.
    Normalize(NormalizeArgs),
}

#[derive(Parser)]
pub struct DiffArgs {
    /// Original snapshot (JSON).
    #[arg(value_name = "ORIGINAL")]
    pub original: PathBuf,

    /// Modified snapshot (JSON).
    #[arg(value_name = "MODIFIED")]
    pub modified: PathBuf,

    /// Key to ignore at every depth (repeatable, added to configured keys).
    #[arg(long = "exclude", value_name = "KEY")]
    pub exclude: Vec<String>,

    /// Path prefix treated as the order-line collection.
    #[arg(long = "line-collection", value_name = "KEY")]
    pub line_collection: Option<String>,

    /// Output format (overrides the config file).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Exit with status 1 when any difference is found.
    #[arg(long = "fail-on-changes")]
    pub fail_on_changes: bool,
}

#[derive(Parser)]
pub struct DirtyArgs {
    /// JSON object of field name to current value.
    #[arg(value_name = "FORM")]
    pub form: PathBuf,

    /// Last persisted entity (JSON). Omit for a creation form.
    #[arg(long = "entity", value_name = "PATH")]
    pub entity: Option<PathBuf>,

    /// Output format (overrides the config file).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Entity snapshot (JSON).
    #[arg(value_name = "ENTITY")]
    pub entity: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
