//! Medallion warehouse CLI.

use clap::{ColorChoice, Parser};
use medallion_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{CheckArgs, Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_check, run_reload, run_tables};
use crate::summary::{print_check_summary, print_reload_summary};
use crate::types::CheckSummary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Reload(args) => match run_reload(args) {
            Ok(summary) => {
                print_reload_summary(&summary);
                if summary.has_errors() { 1 } else { 0 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Check(args) => match run_check(args) {
            Ok(summary) => report_check(&summary, args),
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Tables(args) => match run_tables(args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn report_check(summary: &CheckSummary, args: &CheckArgs) -> i32 {
    if args.json {
        match check_json(summary) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("error: failed to serialize check output: {error}");
                return 1;
            }
        }
    } else {
        print_check_summary(summary, args.show_listings);
    }
    if summary.has_errors() || (args.fail_on_issues && summary.failure_count() > 0) {
        1
    } else {
        0
    }
}

/// The quality report, or the load reports when the reload failed before
/// checks could run.
fn check_json(summary: &CheckSummary) -> serde_json::Result<String> {
    match &summary.report {
        Some(report) => serde_json::to_string_pretty(report),
        None => serde_json::to_string_pretty(&summary.reload.outcome),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    use medallion_cli::pipeline::{load_config, reload};
    use medallion_model::{CommitMode, KeyStrategy};
    use medallion_transform::LoadContext;

    use crate::types::ReloadSummary;

    #[test]
    fn failed_reload_check_output_is_json() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(None).unwrap();
        let reloaded = reload(dir.path(), &config, LoadContext::now()).unwrap();
        assert!(!reloaded.outcome.is_success());

        let summary = CheckSummary {
            reload: ReloadSummary {
                source_dir: dir.path().to_path_buf(),
                commit_mode: CommitMode::PerTable,
                key_strategy: KeyStrategy::Positional,
                outcome: reloaded.outcome,
                views: Vec::new(),
                exported: Vec::new(),
                key_registry: None,
            },
            report: None,
        };

        let json: serde_json::Value = serde_json::from_str(&check_json(&summary).unwrap()).unwrap();
        assert_eq!(json["bronze"]["layer"], "bronze");
        assert!(json["bronze"]["error"].is_object());
        assert!(json["silver"].is_null());
    }
}
