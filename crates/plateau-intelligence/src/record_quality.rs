// ABOUTME: Screens a daily weight series for implausible day-over-day jumps and IQR outliers
// ABOUTME: Flags anomalies for the caller without removing them from the series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: history lengths are small
// Safe: quartile index is floor of a non-negative value below len
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::config::QualityConfig;
use crate::daily_series::DailySeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::warn;

/// Why a weight was flagged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnomalyReason {
    /// Relative change from the previous logged day exceeds the limit
    LargeDailyChange {
        /// Previous logged weight (kg)
        previous_kg: f64,
        /// `|change| / previous`
        change_ratio: f64,
    },
    /// Outside the Tukey fences of all earlier weights
    OutsideIqrFence {
        /// Lower fence (kg)
        lower_kg: f64,
        /// Upper fence (kg)
        upper_kg: f64,
    },
}

/// A flagged day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightAnomaly {
    /// Index in the screened series
    pub index: usize,
    /// Day of the weight
    pub date: NaiveDate,
    /// Weight (kg)
    pub weight_kg: f64,
    /// Every rule the weight broke
    pub reasons: Vec<AnomalyReason>,
}

/// Weight anomaly screener
pub struct RecordQualityScreener {
    config: QualityConfig,
}

impl Default for RecordQualityScreener {
    fn default() -> Self {
        Self::new(QualityConfig::default())
    }
}

impl RecordQualityScreener {
    /// Create a screener with the given configuration
    #[must_use]
    pub const fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Flag anomalous weights in chronological order
    #[must_use]
    pub fn screen(&self, series: &DailySeries) -> Vec<WeightAnomaly> {
        let points = series.points();
        let weights = series.weights();
        let mut anomalies = Vec::new();

        for index in 1..weights.len() {
            let weight = weights[index];
            let mut reasons = Vec::new();

            let previous = weights[index - 1];
            let change_ratio = (weight - previous).abs() / previous;
            if change_ratio > self.config.max_daily_change_ratio {
                reasons.push(AnomalyReason::LargeDailyChange {
                    previous_kg: previous,
                    change_ratio,
                });
            }

            if index >= self.config.min_iqr_history {
                if let Some((lower_kg, upper_kg)) = self.iqr_fences(&weights[..index]) {
                    if weight < lower_kg || weight > upper_kg {
                        reasons.push(AnomalyReason::OutsideIqrFence { lower_kg, upper_kg });
                    }
                }
            }

            if !reasons.is_empty() {
                warn!(
                    date = %points[index].date,
                    weight_kg = weight,
                    reasons = reasons.len(),
                    "Weight flagged as anomalous"
                );
                anomalies.push(WeightAnomaly {
                    index,
                    date: points[index].date,
                    weight_kg: weight,
                    reasons,
                });
            }
        }

        anomalies
    }

    /// Tukey fences `[Q1 - k*IQR, Q3 + k*IQR]` with floor-index quartiles
    #[must_use]
    pub fn iqr_fences(&self, values: &[f64]) -> Option<(f64, f64)> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let quartile = |fraction: f64| sorted[(sorted.len() as f64 * fraction).floor() as usize];
        let (q1, q3) = (quartile(0.25), quartile(0.75));
        let spread = (q3 - q1) * self.config.iqr_fence_multiplier;
        Some((q1 - spread, q3 + spread))
    }
}
