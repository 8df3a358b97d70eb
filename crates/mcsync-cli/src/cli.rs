//! CLI argument definitions for `mcsync`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use mcsync_cli::edit::EditRequest;

#[derive(Parser)]
#[command(
    name = "mcsync",
    version,
    about = "Edit answer options of a multiple-choice stage",
    long_about = "Edit answer options of a multiple-choice stage document.\n\n\
                  Every append, remove or move keeps the stage's extra feedbacks and\n\
                  transitions aligned with the new option order."
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
    /// Apply option edits to a stage document.
    Apply(ApplyArgs),

    /// Check that every dependent expression matches the option list.
    Check(StageArgs),

    /// Show the rule tag of every term of every dependent expression.
    Rules(StageArgs),
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Stage document (JSON).
    #[arg(value_name = "STAGE")]
    pub stage: PathBuf,

    /// Edit to apply: append:<text>, remove:<option-id> or move:<from>:<to>.
    ///
    /// Edits run in the given order. If one fails, nothing is written.
    #[arg(long = "edit", value_name = "EDIT", required = true)]
    pub edits: Vec<EditRequest>,

    /// Write the result here instead of overwriting STAGE.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the resulting document instead of the summary tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct StageArgs {
    /// Stage document (JSON).
    #[arg(value_name = "STAGE")]
    pub stage: PathBuf,
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
