// ABOUTME: Streak, compliance, and record quality configuration
// ABOUTME: Weekly freeze toggle, critical variables, and anomaly screening thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use plateau_core::constants::quality::{
    IQR_FENCE_MULTIPLIER, MAX_DAILY_CHANGE_RATIO, MIN_IQR_HISTORY,
};
use plateau_core::constants::streaks::COMPLIANCE_WINDOW_DAYS;
use plateau_core::models::{LifestyleVariable, TrackedVariable};
use serde::{Deserialize, Serialize};

/// Streak and compliance parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Bridge one missed day per ISO week when the following day was logged
    pub allow_weekly_freeze: bool,
    /// Days ending at the reference day considered for compliance
    pub compliance_window_days: i64,
    /// Variables that must all be logged for a day to count as compliant
    pub critical_variables: Vec<TrackedVariable>,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            allow_weekly_freeze: false,
            compliance_window_days: COMPLIANCE_WINDOW_DAYS,
            critical_variables: vec![
                TrackedVariable::Weight,
                TrackedVariable::Lifestyle(LifestyleVariable::Calories),
                TrackedVariable::Lifestyle(LifestyleVariable::SleepHours),
            ],
        }
    }
}

/// Weight anomaly screening parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Relative day-over-day change flagged as anomalous
    pub max_daily_change_ratio: f64,
    /// Prior days required before IQR screening applies
    pub min_iqr_history: usize,
    /// Tukey fence multiplier
    pub iqr_fence_multiplier: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            max_daily_change_ratio: MAX_DAILY_CHANGE_RATIO,
            min_iqr_history: MIN_IQR_HISTORY,
            iqr_fence_multiplier: IQR_FENCE_MULTIPLIER,
        }
    }
}
