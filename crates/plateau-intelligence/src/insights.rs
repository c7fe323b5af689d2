// ABOUTME: Insight generation from significant correlations and high/low threshold splits
// ABOUTME: Confidence filtering, signature-based deduplication, and deterministic ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Insight generation for lifestyle correlates of weight change
//!
//! Two signal sources feed the generator:
//!
//! - correlation results that clear the significance level, reduced to the
//!   most confident lag per variable
//! - threshold rules splitting a variable's days into "high" and "low" groups
//!   whose mean weight velocities are compared with Welch's t-test
//!
//! Each candidate carries a signature (type, sorted variables, message prefix).
//! Candidates whose signature matches a previously surfaced, non-dismissed
//! insight are dropped, as are duplicates within the same run. Messages lead
//! with their stable wording so the signature prefix survives changes in the
//! underlying numbers.

use crate::config::{InsightConfig, ThresholdRule};
use crate::daily_series::DailySeries;
use crate::statistics::{SampleSummary, StatisticsKernel};
use chrono::{DateTime, Utc};
use plateau_core::constants::correlation::{MAX_THRESHOLD_CONFIDENCE, SIGNIFICANCE_LEVEL};
use plateau_core::errors::AnalysisError;
use plateau_core::models::{
    CorrelationDirection, CorrelationResult, ExistingInsight, GeneratedInsight, InsightSignature,
    InsightType, LifestyleVariable,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// Name used for the dependent variable in insight records
const VELOCITY_VARIABLE: &str = "weight_velocity";

/// Outcome of splitting velocity samples on a threshold rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSplit {
    /// Rule that produced the split
    pub rule: ThresholdRule,
    /// Velocities on days at or above the high cutoff
    pub high: SampleSummary,
    /// Velocities on days at or below the low cutoff
    pub low: SampleSummary,
    /// High mean minus low mean (kg/day)
    pub mean_difference: f64,
    /// Welch t statistic
    pub t_statistic: f64,
    /// Welch degrees of freedom
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value
    pub p_value: f64,
    /// Cohen's d (high minus low)
    pub effect_size: f64,
}

/// Insight generator
pub struct InsightGenerator {
    config: InsightConfig,
    significance_level: f64,
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator {
    /// Create a new insight generator with default config
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(InsightConfig::default())
    }

    /// Create a new insight generator with custom config
    #[must_use]
    pub const fn with_config(config: InsightConfig) -> Self {
        Self {
            config,
            significance_level: SIGNIFICANCE_LEVEL,
        }
    }

    /// Override the significance level correlations must clear
    #[must_use]
    pub const fn with_significance_level(mut self, alpha: f64) -> Self {
        self.significance_level = alpha;
        self
    }

    /// Generate new insights
    ///
    /// `now` stamps every insight; passing it in keeps runs reproducible.
    #[must_use]
    pub fn generate(
        &self,
        correlations: &[CorrelationResult],
        series: &DailySeries,
        existing: &[ExistingInsight],
        now: DateTime<Utc>,
    ) -> Vec<GeneratedInsight> {
        let mut candidates = self.correlation_insights(correlations, now);
        candidates.extend(self.threshold_insights(series, now));

        let mut seen: HashSet<InsightSignature> = existing
            .iter()
            .filter(|insight| !insight.dismissed)
            .map(|insight| insight.signature(self.config.signature_prefix_chars))
            .collect();

        let candidate_count = candidates.len();
        let mut insights: Vec<GeneratedInsight> = candidates
            .into_iter()
            .filter(|insight| insight.confidence >= self.config.min_confidence)
            .filter(|insight| {
                let fresh = seen.insert(insight.signature.clone());
                if !fresh {
                    debug!(signature = %insight.signature, "Suppressing duplicate insight");
                }
                fresh
            })
            .collect();

        insights.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.signature.cmp(&b.signature))
        });
        insights.truncate(self.config.max_insights);

        info!(
            candidates = candidate_count,
            emitted = insights.len(),
            "Insight generation complete"
        );
        insights
    }

    /// Insights from significant correlations, one per variable
    #[must_use]
    pub fn correlation_insights(
        &self,
        correlations: &[CorrelationResult],
        now: DateTime<Utc>,
    ) -> Vec<GeneratedInsight> {
        let mut best: BTreeMap<LifestyleVariable, &CorrelationResult> = BTreeMap::new();
        for result in correlations.iter().filter(|result| {
            result.is_significant(self.significance_level)
                && result.confidence >= self.config.min_confidence
                && result.direction != CorrelationDirection::None
        }) {
            best.entry(result.variable)
                .and_modify(|current| {
                    let better = result.confidence > current.confidence
                        || (result.confidence == current.confidence
                            && result.lag_days < current.lag_days);
                    if better {
                        *current = result;
                    }
                })
                .or_insert(result);
        }

        best.into_values()
            .map(|result| self.correlation_insight(result, now))
            .collect()
    }

    fn correlation_insight(
        &self,
        result: &CorrelationResult,
        now: DateTime<Utc>,
    ) -> GeneratedInsight {
        let insight_type = if result.lag_days > 0 {
            InsightType::Lag
        } else {
            InsightType::Correlation
        };
        let label = result.variable.label();
        let timing = match result.lag_days {
            0 => "the same day".to_owned(),
            1 => "1 day later".to_owned(),
            days => format!("{days} days later"),
        };
        let tendency = match result.direction {
            CorrelationDirection::Negative => "faster weight loss",
            _ => "slower loss or gain",
        };
        let sign = if result.direction == CorrelationDirection::Negative {
            "negative"
        } else {
            "positive"
        };
        let message = format!(
            "{label} shows a {} {sign} correlation with weight change {timing}: \
             higher values go with {tendency} (r = {:.2}, p = {:.3}, n = {}).",
            result.strength.to_string().to_lowercase(),
            result.coefficient,
            result.p_value,
            result.sample_size,
        );
        let variables = vec![result.variable.name().to_owned(), VELOCITY_VARIABLE.to_owned()];

        GeneratedInsight {
            signature: InsightSignature::compute(
                insight_type,
                &variables,
                &message,
                self.config.signature_prefix_chars,
            ),
            insight_type,
            message,
            confidence: result.confidence,
            variables,
            supporting_data: json!({
                "coefficient": result.coefficient,
                "p_value": result.p_value,
                "sample_size": result.sample_size,
                "lag_days": result.lag_days,
                "correlation_type": result.correlation_type,
                "label": result.label,
                "date_range": result.date_range,
            }),
            generated_at: now,
        }
    }

    /// Insights from every configured threshold rule
    #[must_use]
    pub fn threshold_insights(
        &self,
        series: &DailySeries,
        now: DateTime<Utc>,
    ) -> Vec<GeneratedInsight> {
        self.config
            .threshold_rules
            .iter()
            .filter_map(|rule| match self.threshold_split(series, rule) {
                Ok(split) if split.mean_difference.abs() > self.config.min_effect_size_kg => {
                    Some(self.threshold_insight(&split, now))
                }
                Ok(split) => {
                    debug!(
                        variable = %rule.variable,
                        difference = split.mean_difference,
                        "Threshold split below minimum effect size"
                    );
                    None
                }
                Err(error) => {
                    debug!(variable = %rule.variable, %error, "Threshold split skipped");
                    None
                }
            })
            .collect()
    }

    /// Split same-day weight velocities on a rule's cutoffs and test the difference
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InsufficientData`] when either group has fewer
    /// than `min_group_size` samples.
    pub fn threshold_split(
        &self,
        series: &DailySeries,
        rule: &ThresholdRule,
    ) -> Result<ThresholdSplit, AnalysisError> {
        let velocity = series.velocity_by_date();
        let (mut high, mut low) = (Vec::new(), Vec::new());
        for point in series.points() {
            let (Some(value), Some(&rate)) = (point.value(rule.variable), velocity.get(&point.date))
            else {
                continue;
            };
            if value >= rule.high_cutoff {
                high.push(rate);
            } else if value <= rule.low_cutoff {
                low.push(rate);
            }
        }

        let smaller = high.len().min(low.len());
        if smaller < self.config.min_group_size {
            return Err(AnalysisError::insufficient(
                "threshold_insight",
                self.config.min_group_size,
                smaller,
            ));
        }

        let high = SampleSummary::from_values(&high);
        let low = SampleSummary::from_values(&low);
        let test = StatisticsKernel::welch_t_test_samples(&high, &low);

        Ok(ThresholdSplit {
            rule: rule.clone(),
            high,
            low,
            mean_difference: high.mean - low.mean,
            t_statistic: test.t_statistic,
            degrees_of_freedom: test.degrees_of_freedom,
            p_value: test.p_value(),
            effect_size: StatisticsKernel::cohens_d(
                high.mean,
                low.mean,
                high.variance,
                low.variance,
                high.n,
                low.n,
            ),
        })
    }

    fn threshold_insight(&self, split: &ThresholdSplit, now: DateTime<Utc>) -> GeneratedInsight {
        let rule = &split.rule;
        let message = format!(
            "{} high (>= {}) vs low (<= {}): weight change {:+.2} vs {:+.2} kg/day \
             (difference {:+.2}, p = {:.3}, d = {:.2}).",
            rule.variable.label(),
            rule.high_cutoff,
            rule.low_cutoff,
            split.high.mean,
            split.low.mean,
            split.mean_difference,
            split.p_value,
            split.effect_size,
        );
        let variables = vec![rule.variable.name().to_owned(), VELOCITY_VARIABLE.to_owned()];

        GeneratedInsight {
            signature: InsightSignature::compute(
                InsightType::Threshold,
                &variables,
                &message,
                self.config.signature_prefix_chars,
            ),
            insight_type: InsightType::Threshold,
            message,
            confidence: (1.0 - split.p_value).clamp(0.0, MAX_THRESHOLD_CONFIDENCE),
            variables,
            supporting_data: json!({
                "high_cutoff": rule.high_cutoff,
                "low_cutoff": rule.low_cutoff,
                "high": split.high,
                "low": split.low,
                "mean_difference": split.mean_difference,
                "t_statistic": split.t_statistic,
                "degrees_of_freedom": split.degrees_of_freedom,
                "p_value": split.p_value,
                "cohens_d": split.effect_size,
            }),
            generated_at: now,
        }
    }
}
