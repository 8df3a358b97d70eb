//! `mcsync` command line entry point.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use mcsync_cli::commands::{ApplyOptions, run_apply, run_check, run_rules};
use mcsync_cli::document::to_json;
use mcsync_cli::logging::{LogConfig, LogFormat, init_logging};
use mcsync_cli::summary::{print_apply_summary, print_check, print_rules};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{ApplyArgs, Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match cli.command {
        Command::Apply(args) => apply(args),
        Command::Check(args) => run_check(&args.stage).map(|result| {
            print_check(&result);
            if result.is_valid() { 0 } else { 1 }
        }),
        Command::Rules(args) => run_rules(&args.stage).map(|rules| {
            print_rules(&rules);
            0
        }),
    };
    let exit_code = outcome.unwrap_or_else(|error| {
        eprintln!("error: {error:#}");
        1
    });
    std::process::exit(exit_code);
}

fn apply(args: ApplyArgs) -> anyhow::Result<i32> {
    let options = ApplyOptions {
        stage: args.stage,
        edits: args.edits,
        output: args.output,
    };
    let result = run_apply(&options)?;
    if args.json {
        println!("{}", to_json(&result.stage)?);
    } else {
        print_apply_summary(&result);
    }
    Ok(0)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level_filter(cli.verbosity.tracing_level_filter());
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
