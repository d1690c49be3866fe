//! CLI argument definitions for the `tableschema` tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tableschema",
    version,
    about = "Infer and validate Table Schema descriptors for CSV files",
    long_about = "Infer Table Schema descriptors from CSV data and validate CSV files\n\
                  against existing descriptors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
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
    /// Infer a schema descriptor from a CSV file.
    Infer(InferArgs),

    /// Cast every row of a CSV file against a schema descriptor.
    Validate(ValidateArgs),

    /// Parse and validate a schema descriptor, then list its fields.
    Check(CheckArgs),
}

/// Options shared by commands that read CSV input.
#[derive(Args, Clone)]
pub struct CsvArgs {
    /// Field delimiter.
    #[arg(long = "delimiter", default_value_t = ',')]
    pub delimiter: char,

    /// Trim whitespace around headers and cells.
    #[arg(long = "trim")]
    pub trim: bool,
}

#[derive(Args)]
pub struct InferArgs {
    /// CSV file with a header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Number of data rows to sample.
    #[arg(long = "sample-limit", value_name = "N", conflicts_with = "all")]
    pub sample_limit: Option<usize>,

    /// Sample every row of the file.
    #[arg(long = "all")]
    pub all: bool,

    /// Inference strategy.
    #[arg(long = "strategy", value_enum, default_value = "voting")]
    pub strategy: StrategyArg,

    /// Write the descriptor to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub csv_args: CsvArgs,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// CSV file with a header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Schema descriptor (JSON).
    #[arg(long = "schema", short = 's', value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Stop at the first failing row.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Write the rows that cast, re-encoded in canonical form, to this CSV file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub csv_args: CsvArgs,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Schema descriptor (JSON).
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Most voted type per column.
    Voting,
    /// Narrowest type, widened as needed.
    Implicit,
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
