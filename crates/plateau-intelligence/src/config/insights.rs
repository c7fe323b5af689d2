// ABOUTME: Correlation and insight generation configuration
// ABOUTME: Lag range, significance, confidence floor, dedup prefix, and high/low cutoff rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Correlation and Insight Configuration

use plateau_core::constants::correlation::{
    MAX_INSIGHTS, MAX_LAG_DAYS, MIN_EFFECT_SIZE_KG, MIN_GROUP_SIZE, MIN_INSIGHT_CONFIDENCE,
    MIN_SAMPLES, SIGNATURE_PREFIX_CHARS, SIGNIFICANCE_LEVEL,
};
use plateau_core::models::{CorrelationType, LifestyleVariable};
use serde::{Deserialize, Serialize};

/// Correlation engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Coefficient family
    pub correlation_type: CorrelationType,
    /// Largest lag swept (days, at most 30)
    pub max_lag_days: u32,
    /// Minimum aligned pairs
    pub min_samples: usize,
    /// Significance level
    pub significance_level: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            correlation_type: CorrelationType::Pearson,
            max_lag_days: 7,
            min_samples: MIN_SAMPLES,
            significance_level: SIGNIFICANCE_LEVEL,
        }
    }
}

impl CorrelationConfig {
    /// Max lag clamped to the supported range
    #[must_use]
    pub fn effective_max_lag(&self) -> u32 {
        self.max_lag_days.min(MAX_LAG_DAYS)
    }
}

/// High/low cutoff pair splitting a variable's days into two groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    /// Variable to split on
    pub variable: LifestyleVariable,
    /// Days at or above this value form the "high" group
    pub high_cutoff: f64,
    /// Days at or below this value form the "low" group
    pub low_cutoff: f64,
}

impl ThresholdRule {
    /// Create a rule
    #[must_use]
    pub const fn new(variable: LifestyleVariable, high_cutoff: f64, low_cutoff: f64) -> Self {
        Self {
            variable,
            high_cutoff,
            low_cutoff,
        }
    }
}

/// Insight generator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    /// No insight below this confidence is emitted
    pub min_confidence: f64,
    /// Maximum insights per run
    pub max_insights: usize,
    /// Message characters kept in a dedup signature
    pub signature_prefix_chars: usize,
    /// Minimum samples in each threshold group
    pub min_group_size: usize,
    /// Minimum mean velocity difference worth testing (kg/day)
    pub min_effect_size_kg: f64,
    /// High/low cutoff rules
    pub threshold_rules: Vec<ThresholdRule>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            min_confidence: MIN_INSIGHT_CONFIDENCE,
            max_insights: MAX_INSIGHTS,
            signature_prefix_chars: SIGNATURE_PREFIX_CHARS,
            min_group_size: MIN_GROUP_SIZE,
            min_effect_size_kg: MIN_EFFECT_SIZE_KG,
            threshold_rules: vec![
                ThresholdRule::new(LifestyleVariable::SleepHours, 7.5, 6.0),
                ThresholdRule::new(LifestyleVariable::StressLevel, 7.0, 4.0),
                ThresholdRule::new(LifestyleVariable::WaterMl, 2500.0, 1500.0),
            ],
        }
    }
}
