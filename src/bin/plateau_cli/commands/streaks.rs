// ABOUTME: streaks subcommand reporting the logging streak of one tracked variable
// ABOUTME: Includes badges, next milestone, and compliance of the critical variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::output::{parse_instant, print_json};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use plateau_breaker::config::RuntimeConfig;
use plateau_breaker::input::load_records;
use plateau_core::models::{StreakMetrics, TrackedVariable};
use plateau_intelligence::{ComplianceReport, StreakComplianceEngine};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct StreaksArgs {
    /// Records file (JSON array or `{ "subject", "records" }` object)
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Tracked variable: weight or any lifestyle variable (e.g. sleep_hours)
    #[arg(long, default_value = "weight")]
    variable: TrackedVariable,

    /// Reference time (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct StreakReport {
    subject: String,
    variable: String,
    streak: StreakMetrics,
    compliance: ComplianceReport,
}

pub fn run(config: &RuntimeConfig, args: &StreaksArgs) -> Result<()> {
    let loaded = load_records(&args.input)?;
    let today = args.now.unwrap_or_else(Utc::now).date_naive();

    let engine = StreakComplianceEngine::new(config.analysis.streaks.clone());
    let report = StreakReport {
        variable: args.variable.to_string(),
        streak: engine.variable_streak(&loaded.records, args.variable, today),
        compliance: engine.compliance(&loaded.records, today),
        subject: loaded.subject,
    };

    print_json(&report, args.pretty)
}
