// ABOUTME: Correlation result entity with strength and direction banding
// ABOUTME: Computed per request from aligned lifestyle-variable and weight-velocity series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::record::LifestyleVariable;
use crate::constants::correlation::{MODERATE_CORRELATION, STRONG_CORRELATION};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Correlation coefficient family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationType {
    /// Linear (product-moment) correlation
    #[default]
    Pearson,
    /// Rank correlation
    Spearman,
}

/// Magnitude band of a coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    /// |r| >= 0.7
    Strong,
    /// |r| >= 0.4
    Moderate,
    /// |r| < 0.4
    Weak,
}

impl CorrelationStrength {
    /// Band a coefficient by its absolute value
    #[must_use]
    pub fn from_coefficient(coefficient: f64) -> Self {
        let magnitude = coefficient.abs();
        if magnitude >= STRONG_CORRELATION {
            Self::Strong
        } else if magnitude >= MODERATE_CORRELATION {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
        })
    }
}

/// Sign of a coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    /// Variable rises with weight velocity
    Positive,
    /// Variable rises as weight velocity falls
    Negative,
    /// Coefficient is exactly zero
    None,
}

impl CorrelationDirection {
    /// Direction from the sign of a coefficient
    #[must_use]
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient > 0.0 {
            Self::Positive
        } else if coefficient < 0.0 {
            Self::Negative
        } else {
            Self::None
        }
    }
}

/// Inclusive range of days an analysis covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day
    pub start: NaiveDate,
    /// Last day
    pub end: NaiveDate,
}

/// Correlation between one lifestyle variable and (lagged) weight velocity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Lifestyle variable
    pub variable: LifestyleVariable,
    /// Coefficient family
    pub correlation_type: CorrelationType,
    /// Correlation coefficient (-1 to 1)
    pub coefficient: f64,
    /// Two-tailed p-value
    pub p_value: f64,
    /// Number of aligned pairs
    pub sample_size: usize,
    /// Days between the variable and the velocity it is paired with
    pub lag_days: u32,
    /// Days covered by the variable side of the pairs
    pub date_range: DateRange,
    /// Magnitude band
    pub strength: CorrelationStrength,
    /// Sign
    pub direction: CorrelationDirection,
    /// Composite confidence (0 to 0.99)
    pub confidence: f64,
    /// Lag-aware label, e.g. "Moderate negative correlation (2-day lag)"
    pub label: String,
}

impl CorrelationResult {
    /// Whether the result clears a significance level
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}
