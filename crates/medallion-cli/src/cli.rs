//! CLI argument definitions for the medallion warehouse.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "medallion",
    version,
    about = "Medallion warehouse - reload CRM/ERP extracts into bronze, silver and gold",
    long_about = "Reload CRM and ERP CSV extracts into a bronze/silver/gold warehouse.\n\n\
                  Every run fully replaces the bronze and silver tables, projects the\n\
                  gold star schema and can run the data quality suite."
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
    /// Load bronze from the extracts, rebuild silver and project gold.
    Reload(ReloadArgs),

    /// Reload, then run the data quality suite.
    Check(CheckArgs),

    /// List the registered tables and gold views.
    Tables(TablesArgs),
}

/// Options shared by every command that performs a reload.
#[derive(Args)]
pub struct SourceArgs {
    /// Directory holding the source_crm/ and source_erp/ extracts.
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Pipeline config file (TOML).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Restore the whole layer when any table fails to load.
    #[arg(long = "atomic")]
    pub atomic: bool,

    /// Keep surrogate keys stable across runs using a key registry file.
    #[arg(long = "stable-keys")]
    pub stable_keys: bool,

    /// Key registry file (default: <OUTPUT_DIR or SOURCE_DIR>/surrogate_keys.json).
    #[arg(long = "key-registry", value_name = "FILE")]
    pub key_registry: Option<PathBuf>,

    /// Reference date for future-date rules (default: today).
    #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,
}

#[derive(Parser)]
pub struct ReloadArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write silver and gold CSV files under this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Exit with status 1 when any assertion finds offending rows.
    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,

    /// Print the distinct values of listing checks.
    #[arg(long = "show-listings")]
    pub show_listings: bool,

    /// Print the quality report as JSON, or the load reports if the reload failed.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct TablesArgs {
    /// Also report whether each extract exists under this directory.
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: Option<PathBuf>,

    /// Pipeline config file (TOML).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
