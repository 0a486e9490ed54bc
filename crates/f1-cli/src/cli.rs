//! CLI argument definitions for the racing warehouse ETL.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use f1_cli::logging::{LogConfig, LogFormat};
use f1_model::{PitStopJoinPolicy, UnresolvedKeyPolicy};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "f1-etl",
    version,
    about = "Build a star-schema racing warehouse from CSV extracts",
    long_about = "Build a star-schema racing warehouse from CSV extracts.\n\n\
                  Cleans the raw tables, assigns surrogate keys, verifies\n\
                  referential integrity and loads SQLite and/or CSV outputs."
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

impl Cli {
    /// Logging setup from the flags. An explicit `--log-level` beats `-v`/`-q`,
    /// and either one disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let level_filter = match self.log_level {
            Some(level) => level.into(),
            None => self.verbosity.tracing_level_filter(),
        };
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter,
            use_env_filter: !(self.verbosity.is_present() || self.log_level.is_some()),
            with_ansi,
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the warehouse from a directory of extracts.
    Run(RunArgs),

    /// List the warehouse tables and their columns.
    Tables,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory holding drivers.csv, races.csv, results.csv and the rest.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Load into this SQLite database, replacing the warehouse tables.
    #[arg(long = "sqlite", value_name = "FILE")]
    pub sqlite: Option<PathBuf>,

    /// Write one CSV per table plus manifest.json into this directory.
    #[arg(long = "csv-dir", value_name = "DIR")]
    pub csv_dir: Option<PathBuf>,

    /// TOML file with pipeline options.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// What to do with fact rows whose dimension key does not resolve.
    #[arg(long = "unresolved-keys", value_enum)]
    pub unresolved_keys: Option<UnresolvedKeysArg>,

    /// How pit stops pick a constructor when results rows are ambiguous.
    #[arg(long = "pit-stop-join", value_enum)]
    pub pit_stop_join: Option<PitStopJoinArg>,

    /// Build and verify without loading anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the table manifest as JSON after the run.
    #[arg(long = "print-manifest")]
    pub print_manifest: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UnresolvedKeysArg {
    Drop,
    Sentinel,
}

impl From<UnresolvedKeysArg> for UnresolvedKeyPolicy {
    fn from(arg: UnresolvedKeysArg) -> Self {
        match arg {
            UnresolvedKeysArg::Drop => UnresolvedKeyPolicy::Drop,
            UnresolvedKeysArg::Sentinel => UnresolvedKeyPolicy::Sentinel,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PitStopJoinArg {
    Error,
    First,
    Expand,
}

impl From<PitStopJoinArg> for PitStopJoinPolicy {
    fn from(arg: PitStopJoinArg) -> Self {
        match arg {
            PitStopJoinArg::Error => PitStopJoinPolicy::Error,
            PitStopJoinArg::First => PitStopJoinPolicy::First,
            PitStopJoinArg::Expand => PitStopJoinPolicy::Expand,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
