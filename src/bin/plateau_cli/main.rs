// ABOUTME: plateau-cli - command-line front end for weight plateau and breakthrough analytics
// ABOUTME: Reads JSON records, runs the analysis service, and prints JSON reports to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Full analysis of a records file
//! plateau-cli analyze --input records.json --pretty
//!
//! # Reuse earlier breakthroughs and insights, and save the updated history
//! plateau-cli analyze --input records.json --history history.json --history-out history.json
//!
//! # Evaluate as of a fixed day
//! plateau-cli analyze --input records.json --now 2025-06-01
//!
//! # Logging streak for one variable
//! plateau-cli streaks --input records.json --variable sleep_hours
//!
//! # Effective configuration after PLATEAU_* overrides
//! plateau-cli config
//! ```
//!
//! Logs go to stderr; set `LOG_FORMAT=json` for machine-readable logs.

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use plateau_breaker::config::RuntimeConfig;
use tracing::debug;

use commands::analyze::AnalyzeArgs;
use commands::streaks::StreaksArgs;

#[derive(Parser)]
#[command(
    name = "plateau-cli",
    about = "Weight plateau and breakthrough analytics",
    long_about = "Detects plateaus and breakthroughs in logged body weight, correlates lifestyle variables with weight change, and scores logging streaks."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run the full analysis over a records file
    Analyze(AnalyzeArgs),

    /// Logging streak and compliance for one tracked variable
    Streaks(StreaksArgs),

    /// Print the effective configuration as JSON
    Config {
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RuntimeConfig::from_env()?;
    let logging = if cli.verbose {
        config.logging.clone().with_level("debug")
    } else {
        config.logging.clone()
    };
    logging.init()?;
    debug!(service = %plateau_breaker::constants::service_names::PLATEAU_CLI, "Starting");

    match cli.command {
        Command::Analyze(args) => commands::analyze::run(&config, &args),
        Command::Streaks(args) => commands::streaks::run(&config, &args),
        Command::Config { pretty } => commands::config::run(&config, pretty),
    }
}
