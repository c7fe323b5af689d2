// ABOUTME: Loads daily records and prior analysis history from JSON files
// ABOUTME: Accepts a bare record array or an object naming the subject alongside its records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! JSON input files
//!
//! A records file is either a bare array of daily records or an object:
//!
//! ```json
//! { "subject": "user-42", "records": [{ "logged_at": "2025-03-03", "weight": 82.4 }] }
//! ```
//!
//! A history file carries what earlier runs produced: breakthrough contexts
//! (used to score new candidates) and insights already shown to the user.

use plateau_core::errors::{AppError, AppResult};
use plateau_core::models::{ContextSnapshot, DailyRecord, ExistingInsight};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Subject used when a records file does not name one
pub const DEFAULT_SUBJECT: &str = "local";

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    Named {
        #[serde(default)]
        subject: Option<String>,
        records: Vec<DailyRecord>,
    },
    Bare(Vec<DailyRecord>),
}

/// Records read from a file together with the subject they belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedRecords {
    /// Subject identifier, namespaces plateau and breakthrough ids
    pub subject: String,
    /// Records in file order
    pub records: Vec<DailyRecord>,
}

/// Output of earlier runs for the same subject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHistory {
    /// Contexts of past breakthroughs
    #[serde(default)]
    pub breakthrough_contexts: Vec<ContextSnapshot>,
    /// Insights already generated, dismissed ones included
    #[serde(default)]
    pub existing_insights: Vec<ExistingInsight>,
}

fn read_file(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|error| {
        AppError::storage(format!("failed to read {}", path.display()))
            .with_details(json!({ "path": path.display().to_string() }))
            .with_source(error)
    })
}

fn parse_error(path: &Path, error: serde_json::Error) -> AppError {
    AppError::serialization(format!("invalid JSON in {}: {error}", path.display()))
        .with_details(json!({
            "path": path.display().to_string(),
            "line": error.line(),
            "column": error.column(),
        }))
        .with_source(error)
}

impl From<RecordsFile> for LoadedRecords {
    fn from(file: RecordsFile) -> Self {
        match file {
            RecordsFile::Named { subject, records } => Self {
                subject: subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_owned()),
                records,
            },
            RecordsFile::Bare(records) => Self {
                subject: DEFAULT_SUBJECT.to_owned(),
                records,
            },
        }
    }
}

/// Parse records from a JSON string
///
/// # Errors
///
/// Returns a serialization error when the text is neither a record array nor
/// a `{ subject, records }` object
pub fn parse_records(text: &str) -> AppResult<LoadedRecords> {
    Ok(serde_json::from_str::<RecordsFile>(text)?.into())
}

/// Load records from a JSON file
///
/// # Errors
///
/// Returns a storage error when the file cannot be read and a serialization
/// error when it does not parse
pub fn load_records(path: impl AsRef<Path>) -> AppResult<LoadedRecords> {
    let path = path.as_ref();
    let text = read_file(path)?;
    let loaded: LoadedRecords = serde_json::from_str::<RecordsFile>(&text)
        .map_err(|error| parse_error(path, error))?
        .into();
    info!(
        path = %path.display(),
        subject = %loaded.subject,
        records = loaded.records.len(),
        "Loaded records"
    );
    Ok(loaded)
}

/// Load analysis history from a JSON file
///
/// Missing sections default to empty.
///
/// # Errors
///
/// Returns a storage error when the file cannot be read and a serialization
/// error when it does not parse
pub fn load_history(path: impl AsRef<Path>) -> AppResult<AnalysisHistory> {
    let path = path.as_ref();
    let text = read_file(path)?;
    let history: AnalysisHistory =
        serde_json::from_str(&text).map_err(|error| parse_error(path, error))?;
    debug!(
        path = %path.display(),
        contexts = history.breakthrough_contexts.len(),
        insights = history.existing_insights.len(),
        "Loaded analysis history"
    );
    Ok(history)
}
