//! CLI argument definitions for the LEED wide transpiler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use leed_transform::{ColumnNaming, ScoreFormat};

#[derive(Parser)]
#[command(
    name = "leedwide",
    version,
    about = "LEED Wide Transpiler - Pivot LEED scorecard exports into wide tables",
    long_about = "Pivot long-form LEED scorecard exports into one row per building.\n\n\
                  Writes a categories-only table, a full category/credit table, and one\n\
                  table per LEED version, each with the building's verification level."
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
    /// Clean, pivot and write the wide tables for a data folder.
    Run(RunArgs),

    /// Print the verification-level lookup in effect.
    Levels(LevelsArgs),

    /// Write the built-in verification-level lookup as a TOML file.
    InitConfig(InitConfigArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder containing original_data.csv and, optionally, buildings.csv.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output directory for the wide tables (default: <DATA_DIR>/final_wide_data).
    ///
    /// The directory is deleted and recreated on every run, so it must not
    /// contain DATA_DIR.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with a [verification_levels] table (default: built-in table).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Score column naming for the categories-only and per-version tables
    /// (default: category code).
    #[arg(long = "column-naming", value_enum, value_name = "NAMING")]
    pub column_naming: Option<ColumnNamingArg>,

    /// Cell format for every table (default: points earned).
    #[arg(long = "score-format", value_enum, value_name = "FORMAT")]
    pub score_format: Option<ScoreFormatArg>,

    /// Run every stage and print the summary without touching the output directory.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Abort on the first malformed source row instead of skipping it.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Parser)]
pub struct LevelsArgs {
    /// TOML file with a [verification_levels] table (default: built-in table).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InitConfigArgs {
    /// Destination file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Overwrite the file if it already exists.
    #[arg(long = "force")]
    pub force: bool,
}

/// Score column naming choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ColumnNamingArg {
    /// Category code, e.g. `EA`.
    Category,
    /// `EA - Optimize Energy Performance`.
    CategoryAndCredit,
    /// Category, available points and version, e.g. `EA(33)v4.0`.
    Versioned,
}

impl From<ColumnNamingArg> for ColumnNaming {
    fn from(value: ColumnNamingArg) -> Self {
        match value {
            ColumnNamingArg::Category => ColumnNaming::Category,
            ColumnNamingArg::CategoryAndCredit => ColumnNaming::CategoryAndCredit,
            ColumnNamingArg::Versioned => ColumnNaming::Versioned,
        }
    }
}

/// Cell format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ScoreFormatArg {
    /// Points earned.
    Earned,
    /// `earned/available`, with `0/0` written as `prerequisite`.
    Fraction,
    /// Earned divided by available.
    Ratio,
}

impl From<ScoreFormatArg> for ScoreFormat {
    fn from(value: ScoreFormatArg) -> Self {
        match value {
            ScoreFormatArg::Earned => ScoreFormat::Earned,
            ScoreFormatArg::Fraction => ScoreFormat::Fraction,
            ScoreFormatArg::Ratio => ScoreFormat::Ratio,
        }
    }
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
