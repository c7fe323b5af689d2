// ABOUTME: Correlates lifestyle variables against (lagged) day-over-day weight velocity
// ABOUTME: Strength/direction banding, significance, composite confidence, and parallel lag sweeps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: sample sizes are bounded by the analysis window

use crate::config::CorrelationConfig;
use crate::daily_series::DailySeries;
use crate::statistics::StatisticsKernel;
use chrono::{Duration, NaiveDate};
use plateau_core::constants::correlation::{MAX_CORRELATION_CONFIDENCE, MAX_LAG_DAYS};
use plateau_core::errors::AnalysisError;
use plateau_core::models::{
    CorrelationDirection, CorrelationResult, CorrelationStrength, DateRange, LifestyleVariable,
};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Variable values paired with the weight velocity `lag` days later
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedPairs {
    /// Lifestyle values
    pub values: Vec<f64>,
    /// Weight velocities (kg/day)
    pub velocities: Vec<f64>,
    /// Days of the lifestyle values
    pub dates: Vec<NaiveDate>,
}

impl AlignedPairs {
    /// Number of pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no pairs were found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn date_range(&self) -> Option<DateRange> {
        Some(DateRange {
            start: *self.dates.first()?,
            end: *self.dates.last()?,
        })
    }
}

/// Correlation engine
pub struct CorrelationEngine {
    config: CorrelationConfig,
}

impl Default for CorrelationEngine {
    fn default() -> Self {
        Self::new(CorrelationConfig::default())
    }
}

impl CorrelationEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub const fn new(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// Correlation configuration
    #[must_use]
    pub const fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Pair each logged value with the weight velocity `lag_days` later
    #[must_use]
    pub fn align(series: &DailySeries, variable: LifestyleVariable, lag_days: u32) -> AlignedPairs {
        Self::align_with(series, &series.velocity_by_date(), variable, lag_days)
    }

    fn align_with(
        series: &DailySeries,
        velocity: &BTreeMap<NaiveDate, f64>,
        variable: LifestyleVariable,
        lag_days: u32,
    ) -> AlignedPairs {
        let shift = Duration::days(i64::from(lag_days.min(MAX_LAG_DAYS)));
        let mut pairs = AlignedPairs::default();
        for point in series.points() {
            let Some(value) = point.value(variable) else {
                continue;
            };
            if let Some(&rate) = velocity.get(&(point.date + shift)) {
                pairs.values.push(value);
                pairs.velocities.push(rate);
                pairs.dates.push(point.date);
            }
        }
        pairs
    }

    /// Correlate one variable at one lag
    ///
    /// Lags above 30 days are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InsufficientData`] when fewer than
    /// `min_samples` pairs align.
    pub fn correlate(
        &self,
        series: &DailySeries,
        variable: LifestyleVariable,
        lag_days: u32,
    ) -> Result<CorrelationResult, AnalysisError> {
        self.correlate_with(series, &series.velocity_by_date(), variable, lag_days)
    }

    fn correlate_with(
        &self,
        series: &DailySeries,
        velocity: &BTreeMap<NaiveDate, f64>,
        variable: LifestyleVariable,
        lag_days: u32,
    ) -> Result<CorrelationResult, AnalysisError> {
        let lag_days = lag_days.min(MAX_LAG_DAYS);
        let pairs = Self::align_with(series, velocity, variable, lag_days);

        let Some(date_range) = pairs
            .date_range()
            .filter(|_| pairs.len() >= self.config.min_samples)
        else {
            return Err(AnalysisError::insufficient(
                "correlation",
                self.config.min_samples,
                pairs.len(),
            ));
        };

        let coefficient = StatisticsKernel::correlation(
            &pairs.values,
            &pairs.velocities,
            self.config.correlation_type,
        );
        let sample_size = pairs.len();
        let p_value = StatisticsKernel::correlation_p_value(coefficient, sample_size);
        let strength = CorrelationStrength::from_coefficient(coefficient);
        let direction = CorrelationDirection::from_coefficient(coefficient);

        Ok(CorrelationResult {
            variable,
            correlation_type: self.config.correlation_type,
            coefficient,
            p_value,
            sample_size,
            lag_days,
            date_range,
            strength,
            direction,
            confidence: Self::confidence(coefficient, p_value, sample_size),
            label: Self::label(strength, direction, lag_days),
        })
    }

    /// Correlate every variable at every lag from 0 to the configured maximum
    ///
    /// Combinations without enough aligned pairs are skipped. Results are
    /// ordered by variable, then lag.
    #[must_use]
    pub fn sweep(
        &self,
        series: &DailySeries,
        variables: &[LifestyleVariable],
    ) -> Vec<CorrelationResult> {
        let velocity = series.velocity_by_date();
        let lags: Vec<u32> = (0..=self.config.effective_max_lag()).collect();

        let mut results: Vec<CorrelationResult> = variables
            .par_iter()
            .flat_map_iter(|&variable| {
                let velocity = &velocity;
                lags.iter().filter_map(move |&lag| {
                    self.correlate_with(series, velocity, variable, lag)
                        .map_err(|error| {
                            debug!(%variable, lag, %error, "Skipping correlation");
                        })
                        .ok()
                })
            })
            .collect();

        results.sort_by(|a, b| {
            a.variable
                .cmp(&b.variable)
                .then(a.lag_days.cmp(&b.lag_days))
        });

        info!(
            variables = variables.len(),
            max_lag = self.config.effective_max_lag(),
            computed = results.len(),
            "Correlation sweep complete"
        );
        results
    }

    /// Composite confidence `min(0.99, (1 - p) * |r| * log10(n + 1) / 2)`
    #[must_use]
    pub fn confidence(coefficient: f64, p_value: f64, sample_size: usize) -> f64 {
        let sample_weight = (sample_size as f64 + 1.0).log10() / 2.0;
        ((1.0 - p_value) * coefficient.abs() * sample_weight)
            .clamp(0.0, MAX_CORRELATION_CONFIDENCE)
    }

    /// Lag-aware label such as "Moderate negative correlation (2-day lag)"
    #[must_use]
    pub fn label(
        strength: CorrelationStrength,
        direction: CorrelationDirection,
        lag_days: u32,
    ) -> String {
        let sign = match direction {
            CorrelationDirection::Positive => " positive",
            CorrelationDirection::Negative => " negative",
            CorrelationDirection::None => "",
        };
        let timing = if lag_days == 0 {
            "same day".to_owned()
        } else {
            format!("{lag_days}-day lag")
        };
        format!("{strength}{sign} correlation ({timing})")
    }
}
