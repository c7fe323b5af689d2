// ABOUTME: Generated insight and previously surfaced insight entities
// ABOUTME: Dedup signatures combine insight type, sorted variables, and a message prefix
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Same-day correlation between a variable and weight velocity
    Correlation,
    /// High/low group split on a configured cutoff pair
    Threshold,
    /// Correlation that appears after a delay of one or more days
    Lag,
}

impl InsightType {
    /// Stable snake-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Correlation => "correlation",
            Self::Threshold => "threshold",
            Self::Lag => "lag",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deduplication key for an insight
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsightSignature(String);

impl InsightSignature {
    /// Build a signature from the insight type, involved variables and message
    ///
    /// Variables are sorted and deduplicated; the message is lowercased,
    /// whitespace-collapsed and truncated to `prefix_chars` characters.
    #[must_use]
    pub fn compute<S: AsRef<str>>(
        insight_type: InsightType,
        variables: &[S],
        message: &str,
        prefix_chars: usize,
    ) -> Self {
        let mut names: Vec<String> = variables
            .iter()
            .map(|v| v.as_ref().trim().to_lowercase())
            .collect();
        names.sort();
        names.dedup();

        let normalized = message
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let prefix: String = normalized.chars().take(prefix_chars).collect();

        Self(format!("{insight_type}|{}|{prefix}", names.join(",")))
    }

    /// Signature as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InsightSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An insight already shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingInsight {
    /// Insight type
    pub insight_type: InsightType,
    /// Involved variable names
    pub variables: Vec<String>,
    /// Message as surfaced
    pub message: String,
    /// Whether the user dismissed it (dismissed insights may resurface)
    #[serde(default)]
    pub dismissed: bool,
}

impl ExistingInsight {
    /// Dedup signature of this insight
    #[must_use]
    pub fn signature(&self, prefix_chars: usize) -> InsightSignature {
        InsightSignature::compute(
            self.insight_type,
            &self.variables,
            &self.message,
            prefix_chars,
        )
    }
}

/// A newly generated, confidence-scored insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedInsight {
    /// Insight type
    pub insight_type: InsightType,
    /// Human-readable message
    pub message: String,
    /// Confidence (0 to 0.99)
    pub confidence: f64,
    /// Involved variable names
    pub variables: Vec<String>,
    /// Statistics backing the insight
    pub supporting_data: serde_json::Value,
    /// When the insight was generated (supplied by the caller)
    pub generated_at: DateTime<Utc>,
    /// Dedup signature
    pub signature: InsightSignature,
}

impl GeneratedInsight {
    /// Convert into the record a store would hand back on the next run
    #[must_use]
    pub fn to_existing(&self) -> ExistingInsight {
        ExistingInsight {
            insight_type: self.insight_type,
            variables: self.variables.clone(),
            message: self.message.clone(),
            dismissed: false,
        }
    }
}
