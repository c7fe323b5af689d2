// ABOUTME: JSON output and timestamp parsing helpers for plateau-cli
// ABOUTME: Reports go to stdout or a file; logs stay on stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("failed to serialize output")
}

/// Print a value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = to_json(value, pretty)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write to stdout")
}

/// Write a value as pretty JSON to a file
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = to_json(value, true)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Parse `--now`: RFC 3339, or a plain date taken as the end of that day in UTC
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("expected RFC 3339 or YYYY-MM-DD, got '{raw}'"))
}
