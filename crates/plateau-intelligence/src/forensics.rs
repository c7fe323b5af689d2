// ABOUTME: Differential analysis of lifestyle variables between plateau and breakthrough days
// ABOUTME: Per-variable Welch t-test and Cohen's d, reported side by side with effect magnitude
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Forensic Differential Analysis
//!
//! Contrasts the days of a plateau with the days leading into the breakthrough
//! that ended it. Significance is reported together with effect size so small
//! samples that happen to reach significance remain visible as such. This is a
//! descriptive comparison, not a causal one.

use crate::config::ForensicsConfig;
use crate::daily_series::{days_before, DailySeries, DayPoint};
use crate::statistics::{SampleSummary, StatisticsKernel};
use plateau_core::errors::AnalysisError;
use plateau_core::models::{BreakthroughEvent, LifestyleVariable, PlateauSegment};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};
use uuid::Uuid;

/// Conventional Cohen's d bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectMagnitude {
    /// |d| < 0.2
    Negligible,
    /// |d| < 0.5
    Small,
    /// |d| < 0.8
    Medium,
    /// |d| >= 0.8
    Large,
}

impl EffectMagnitude {
    /// Band an effect size by its absolute value
    #[must_use]
    pub fn from_cohens_d(d: f64) -> Self {
        let magnitude = d.abs();
        if magnitude < 0.2 {
            Self::Negligible
        } else if magnitude < 0.5 {
            Self::Small
        } else if magnitude < 0.8 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

/// How one variable differs between the two states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDifferential {
    /// Lifestyle variable
    pub variable: LifestyleVariable,
    /// Values on plateau days
    pub plateau: SampleSummary,
    /// Values on breakthrough-window days
    pub breakthrough: SampleSummary,
    /// Breakthrough mean minus plateau mean
    pub mean_difference: f64,
    /// Welch t statistic (breakthrough minus plateau)
    pub t_statistic: f64,
    /// Welch degrees of freedom
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value
    pub p_value: f64,
    /// Cohen's d (breakthrough minus plateau)
    pub cohens_d: f64,
    /// Effect size band
    pub magnitude: EffectMagnitude,
    /// Whether `p_value` clears the configured significance level
    pub significant: bool,
}

/// Differential report for one plateau/breakthrough pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicReport {
    /// Plateau compared
    pub plateau_id: Option<Uuid>,
    /// Breakthrough compared
    pub breakthrough_id: Option<Uuid>,
    /// Days on the plateau side
    pub plateau_days: usize,
    /// Days on the breakthrough side
    pub breakthrough_days: usize,
    /// Variables with at least two samples per side, largest |d| first
    pub differentials: Vec<VariableDifferential>,
    /// Variables lacking two samples on either side
    pub skipped: Vec<LifestyleVariable>,
}

impl ForensicReport {
    /// Differentials that reached significance
    pub fn significant(&self) -> impl Iterator<Item = &VariableDifferential> {
        self.differentials.iter().filter(|d| d.significant)
    }
}

/// Forensic differential analyzer
pub struct ForensicDifferentialAnalyzer {
    config: ForensicsConfig,
}

impl Default for ForensicDifferentialAnalyzer {
    fn default() -> Self {
        Self::new(ForensicsConfig::default())
    }
}

impl ForensicDifferentialAnalyzer {
    /// Create an analyzer with the given configuration
    #[must_use]
    pub const fn new(config: ForensicsConfig) -> Self {
        Self { config }
    }

    /// Split a series into plateau days and breakthrough-window days
    ///
    /// The breakthrough window is the `breakthrough_window_days` days ending on
    /// the breakthrough day; the plateau side is every plateau day before it.
    #[must_use]
    pub fn windows<'a>(
        &self,
        series: &'a DailySeries,
        plateau: &PlateauSegment,
        breakthrough: &BreakthroughEvent,
    ) -> (Vec<&'a DayPoint>, Vec<&'a DayPoint>) {
        let window_start =
            days_before(breakthrough.date, self.config.breakthrough_window_days.max(1) - 1);
        let plateau_end = plateau.end_date.unwrap_or(breakthrough.date);

        let plateau_side = series
            .points()
            .iter()
            .filter(|point| {
                point.date >= plateau.start_date
                    && point.date <= plateau_end
                    && point.date < window_start
            })
            .collect();
        let breakthrough_side = series
            .points()
            .iter()
            .filter(|point| point.date >= window_start && point.date <= breakthrough.date)
            .collect();

        (plateau_side, breakthrough_side)
    }

    /// Compare a plateau with the breakthrough that ended it
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InsufficientData`] when either side has no days.
    pub fn analyze(
        &self,
        series: &DailySeries,
        plateau: &PlateauSegment,
        breakthrough: &BreakthroughEvent,
    ) -> Result<ForensicReport, AnalysisError> {
        let (plateau_side, breakthrough_side) = self.windows(series, plateau, breakthrough);
        let smaller = plateau_side.len().min(breakthrough_side.len());
        if smaller == 0 {
            return Err(AnalysisError::insufficient("forensics", 1, smaller));
        }

        let mut report = self.compare(&plateau_side, &breakthrough_side);
        report.plateau_id = Some(plateau.id);
        report.breakthrough_id = Some(breakthrough.id);

        info!(
            breakthrough = %breakthrough.date,
            compared = report.differentials.len(),
            significant = report.significant().count(),
            "Forensic analysis complete"
        );
        Ok(report)
    }

    /// Compare every lifestyle variable across two sets of days
    #[must_use]
    pub fn compare(
        &self,
        plateau_days: &[&DayPoint],
        breakthrough_days: &[&DayPoint],
    ) -> ForensicReport {
        let values = |days: &[&DayPoint], variable: LifestyleVariable| -> Vec<f64> {
            days.iter().filter_map(|day| day.value(variable)).collect()
        };

        let mut differentials = Vec::new();
        let mut skipped = Vec::new();

        for variable in LifestyleVariable::ALL {
            let plateau = SampleSummary::from_values(&values(plateau_days, variable));
            let breakthrough = SampleSummary::from_values(&values(breakthrough_days, variable));
            if plateau.n < 2 || breakthrough.n < 2 {
                debug!(
                    %variable,
                    plateau = plateau.n,
                    breakthrough = breakthrough.n,
                    "Not enough samples to compare"
                );
                skipped.push(variable);
                continue;
            }

            let test = StatisticsKernel::welch_t_test_samples(&breakthrough, &plateau);
            let p_value = test.p_value();
            let cohens_d = StatisticsKernel::cohens_d(
                breakthrough.mean,
                plateau.mean,
                breakthrough.variance,
                plateau.variance,
                breakthrough.n,
                plateau.n,
            );

            differentials.push(VariableDifferential {
                variable,
                plateau,
                breakthrough,
                mean_difference: breakthrough.mean - plateau.mean,
                t_statistic: test.t_statistic,
                degrees_of_freedom: test.degrees_of_freedom,
                p_value,
                cohens_d,
                magnitude: EffectMagnitude::from_cohens_d(cohens_d),
                significant: p_value < self.config.significance_level,
            });
        }

        differentials.sort_by(|a, b| {
            b.cohens_d
                .abs()
                .partial_cmp(&a.cohens_d.abs())
                .unwrap_or(Ordering::Equal)
                .then(a.variable.cmp(&b.variable))
        });

        ForensicReport {
            plateau_id: None,
            breakthrough_id: None,
            plateau_days: plateau_days.len(),
            breakthrough_days: breakthrough_days.len(),
            differentials,
            skipped,
        }
    }
}
