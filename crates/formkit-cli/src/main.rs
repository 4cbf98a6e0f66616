//! formkit CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use formkit_cli::commands::{run_diff, run_dirty, run_normalize};
use formkit_cli::config::{OutputFormat, Settings};
use formkit_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{
    Cli, Command, DiffArgs, DirtyArgs, LogFormatArg, LogLevelArg, NormalizeArgs, OutputFormatArg,
};
use crate::summary::{print_change_set, print_dirty_report};

/// Exit status when a command fails.
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_ERROR);
    }
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(EXIT_ERROR);
        }
    };
    let result = match cli.command {
        Command::Diff(args) => diff(args, settings),
        Command::Dirty(args) => dirty(&args, &settings),
        Command::Normalize(args) => normalize(&args, &settings),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            EXIT_ERROR
        }
    };
    std::process::exit(exit_code);
}

fn diff(args: DiffArgs, settings: Settings) -> Result<i32> {
    let mut options = settings.diff.exclude(args.exclude);
    if let Some(collection) = args.line_collection {
        options = options.with_line_collection(collection);
    }
    let change_set = run_diff(&args.original, &args.modified, &options)?;
    match output_format(args.format, &settings.output.format) {
        OutputFormat::Table => print_change_set(&change_set),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&change_set)?),
    }
    Ok(if args.fail_on_changes && !change_set.is_empty() {
        1
    } else {
        0
    })
}

fn dirty(args: &DirtyArgs, settings: &Settings) -> Result<i32> {
    let report = run_dirty(
        &args.form,
        args.entity.as_deref(),
        settings.normalize.normalizer(),
    )?;
    match output_format(args.format, &settings.output.format) {
        OutputFormat::Table => print_dirty_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(if report.dirty { 1 } else { 0 })
}

fn normalize(args: &NormalizeArgs, settings: &Settings) -> Result<i32> {
    let normalized = run_normalize(&args.entity, &settings.normalize.normalizer())?;
    println!("{}", serde_json::to_string_pretty(&normalized)?);
    Ok(0)
}

fn output_format(flag: Option<OutputFormatArg>, configured: &OutputFormat) -> OutputFormat {
    match flag {
        Some(OutputFormatArg::Table) => OutputFormat::Table,
        Some(OutputFormatArg::Json) => OutputFormat::Json,
        None => *configured,
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
