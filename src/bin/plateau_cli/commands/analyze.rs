// ABOUTME: analyze subcommand running the full analysis over a records file
// ABOUTME: Optionally reads and writes the history carried between runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::output::{parse_instant, print_json, write_json};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use plateau_breaker::config::RuntimeConfig;
use plateau_breaker::input::{load_history, load_records, AnalysisHistory};
use plateau_breaker::services::{AnalysisRequest, AnalysisService};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Records file (JSON array or `{ "subject", "records" }` object)
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// History from earlier runs (breakthrough contexts, existing insights)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Write the updated history here after the run
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Subject override; defaults to the one named in the records file
    #[arg(long)]
    subject: Option<String>,

    /// Reference time (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

pub fn run(config: &RuntimeConfig, args: &AnalyzeArgs) -> Result<()> {
    let loaded = load_records(&args.input)?;
    let history = match &args.history {
        Some(path) => load_history(path)?,
        None => AnalysisHistory::default(),
    };

    let subject = args.subject.clone().unwrap_or(loaded.subject);
    let mut request = AnalysisRequest::new(subject, loaded.records).with_history(history);
    if let Some(now) = args.now {
        request = request.at(now);
    }

    let report = AnalysisService::new(config.analysis.clone()).analyze(&request);

    if let Some(path) = &args.history_out {
        write_json(path, &report.next_history(&request.history))?;
        info!(path = %path.display(), "History written");
    }

    print_json(&report, args.pretty)
}
