// ABOUTME: Single-pass plateau and breakthrough detection over a reduced daily weight series
// ABOUTME: Rolling-average drops with water-weight rebound suppression and context-based scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: window sizes and history counts are small

//! Plateau and Breakthrough Detection
//!
//! For each day `i` past the rolling window the detector compares the day's
//! weight with the mean of the `window` days before it. A drop of at least the
//! breakthrough threshold is a candidate; the candidate is discarded when any
//! of the next `rebound_window_days` days returns to within the water-weight
//! band of that baseline. After a confirmed breakthrough the next candidate is
//! only considered once a full rolling window has passed.
//!
//! Every confirmed breakthrough looks backward for the plateau it ended: the
//! longest run of raw weights whose min-max range stays within the plateau
//! variance threshold, never crossing the previous breakthrough. Runs shorter
//! than the minimum plateau duration are not attached.
//!
//! Independently, the trailing `active_plateau_window_days` points after the
//! last breakthrough are checked for an open plateau.

use crate::config::DetectionConfig;
use crate::daily_series::{days_before, DailySeries, DayPoint};
use crate::statistics::StatisticsKernel;
use chrono::NaiveDate;
use plateau_core::errors::AnalysisError;
use plateau_core::models::{BreakthroughEvent, ContextSnapshot, PlateauSegment, WeightSpike};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Everything the detector found in one analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// First day of the analysis window
    pub window_start: NaiveDate,
    /// Last day of the analysis window
    pub window_end: NaiveDate,
    /// Daily points analyzed (indices below refer to this window)
    pub days_analyzed: usize,
    /// Plateaus closed by a breakthrough, chronological
    pub plateaus: Vec<PlateauSegment>,
    /// Confirmed breakthroughs, chronological
    pub breakthroughs: Vec<BreakthroughEvent>,
    /// Plateau still in progress at the end of the window
    pub active_plateau: Option<PlateauSegment>,
    /// Upward jumps over the rolling average
    pub spikes: Vec<WeightSpike>,
    /// Candidates discarded as transient water-weight shifts
    pub suppressed_candidates: usize,
}

impl DetectionReport {
    /// Plateau closed by the given breakthrough
    #[must_use]
    pub fn plateau_for(&self, breakthrough: &BreakthroughEvent) -> Option<&PlateauSegment> {
        let plateau_id = breakthrough.preceding_plateau_id?;
        self.plateaus.iter().find(|plateau| plateau.id == plateau_id)
    }

    /// Breakthrough contexts, suitable as scoring history for later runs
    #[must_use]
    pub fn breakthrough_contexts(&self) -> Vec<ContextSnapshot> {
        self.breakthroughs
            .iter()
            .map(|event| event.context.clone())
            .collect()
    }
}

/// Min-max range of a slice
fn range_of(values: &[f64]) -> f64 {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if values.is_empty() {
        0.0
    } else {
        max - min
    }
}

/// Inclusive calendar days between two points
fn calendar_days(first: &DayPoint, last: &DayPoint) -> i64 {
    (last.date - first.date).num_days() + 1
}

/// Plateau and breakthrough detector
pub struct PlateauBreakthroughDetector {
    config: DetectionConfig,
}

impl Default for PlateauBreakthroughDetector {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

impl PlateauBreakthroughDetector {
    /// Create a detector with the given configuration
    #[must_use]
    pub const fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Detection configuration
    #[must_use]
    pub const fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Analyze one subject's daily series
    ///
    /// `subject` namespaces the deterministic segment identifiers; `history`
    /// holds contexts of the subject's earlier breakthroughs and may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InsufficientData`] when the lookback window
    /// holds fewer than `min_points` days.
    pub fn detect(
        &self,
        subject: &str,
        series: &DailySeries,
        history: &[ContextSnapshot],
    ) -> Result<DetectionReport, AnalysisError> {
        let window = series.lookback(self.config.lookback_days);
        let points = window.points();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(AnalysisError::insufficient(
                "plateau_detection",
                self.config.min_points,
                0,
            ));
        };
        if points.len() < self.config.min_points {
            return Err(AnalysisError::insufficient(
                "plateau_detection",
                self.config.min_points,
                points.len(),
            ));
        }

        let weights = window.weights();
        let rolling = self.config.effective_rolling_window();

        let mut report = DetectionReport {
            window_start: first.date,
            window_end: last.date,
            days_analyzed: points.len(),
            plateaus: Vec::new(),
            breakthroughs: Vec::new(),
            active_plateau: None,
            spikes: Vec::new(),
            suppressed_candidates: 0,
        };

        let mut next_eligible = rolling;
        let mut previous_breakthrough: Option<usize> = None;

        for index in rolling..points.len() {
            let baseline = StatisticsKernel::mean(&weights[index - rolling..index]);
            let delta = weights[index] - baseline;

            if delta >= self.config.spike_threshold_kg {
                report.spikes.push(WeightSpike {
                    index,
                    date: points[index].date,
                    weight_kg: weights[index],
                    baseline_kg: baseline,
                    magnitude_kg: delta,
                });
            }

            if index < next_eligible || delta > -self.config.breakthrough_threshold_kg {
                continue;
            }

            if self.rebounds(&weights, index, baseline) {
                debug!(
                    date = %points[index].date,
                    delta_kg = delta,
                    "Breakthrough candidate suppressed by water-weight rebound"
                );
                report.suppressed_candidates += 1;
                continue;
            }

            let date = points[index].date;
            let breakthrough_id = Self::segment_id("breakthrough", subject, date);
            let plateau = self
                .preceding_plateau(subject, &window, &weights, index, previous_breakthrough)
                .map(|mut plateau| {
                    plateau.is_broken = true;
                    plateau.breakthrough_id = Some(breakthrough_id);
                    plateau
                });

            let context = ContextSnapshot {
                event_date: Some(date),
                ..window.context_between(
                    days_before(date, self.config.context_window_days),
                    days_before(date, 1),
                )
            };
            let probability =
                self.score(&context, plateau.as_ref().map(|p| p.duration_days), history);

            report.breakthroughs.push(BreakthroughEvent {
                id: breakthrough_id,
                index,
                date,
                weight_kg: weights[index],
                baseline_kg: baseline,
                magnitude_kg: -delta,
                preceding_plateau_id: plateau.as_ref().map(|p| p.id),
                context,
                probability,
            });
            if let Some(plateau) = plateau {
                report.plateaus.push(plateau);
            }

            previous_breakthrough = Some(index);
            next_eligible = index + rolling;
        }

        report.active_plateau =
            self.active_plateau(subject, &window, &weights, previous_breakthrough);

        info!(
            subject,
            days = report.days_analyzed,
            breakthroughs = report.breakthroughs.len(),
            plateaus = report.plateaus.len(),
            active_plateau = report.active_plateau.is_some(),
            suppressed = report.suppressed_candidates,
            "Plateau detection complete"
        );

        Ok(report)
    }

    /// Whether a day within the rebound window returns near the baseline
    fn rebounds(&self, weights: &[f64], index: usize, baseline: f64) -> bool {
        weights
            .iter()
            .skip(index + 1)
            .take(self.config.rebound_window_days)
            .any(|weight| (weight - baseline).abs() <= self.config.water_weight_band_kg)
    }

    /// Longest tight run ending the day before a breakthrough
    fn preceding_plateau(
        &self,
        subject: &str,
        window: &DailySeries,
        weights: &[f64],
        breakthrough_index: usize,
        previous_breakthrough: Option<usize>,
    ) -> Option<PlateauSegment> {
        let end = breakthrough_index.checked_sub(1)?;
        let floor = previous_breakthrough.unwrap_or(0);

        let mut start = end;
        let (mut low, mut high) = (weights[end], weights[end]);
        while start > floor {
            let candidate = weights[start - 1];
            let (next_low, next_high) = (low.min(candidate), high.max(candidate));
            if next_high - next_low > self.config.plateau_variance_threshold_kg {
                break;
            }
            low = next_low;
            high = next_high;
            start -= 1;
        }

        let points = window.points();
        let duration_days = calendar_days(&points[start], &points[end]);
        if duration_days < self.config.min_plateau_days {
            debug!(
                breakthrough = %points[breakthrough_index].date,
                duration_days,
                "Preceding run too short to count as a plateau"
            );
            return None;
        }

        Some(self.segment(subject, points, weights, start, Some(end)))
    }

    /// Open plateau over the trailing window, extended backward while tight
    fn active_plateau(
        &self,
        subject: &str,
        window: &DailySeries,
        weights: &[f64],
        last_breakthrough: Option<usize>,
    ) -> Option<PlateauSegment> {
        let span = self.config.effective_active_window();
        let floor = last_breakthrough.unwrap_or(0);
        let tail_start = weights.len().checked_sub(span)?;
        if tail_start < floor {
            return None;
        }

        let threshold = self.config.active_plateau_variance_kg;
        if range_of(&weights[tail_start..]) > threshold {
            return None;
        }

        let mut start = tail_start;
        while start > floor && range_of(&weights[start - 1..]) <= threshold {
            start -= 1;
        }

        Some(self.segment(subject, window.points(), weights, start, None))
    }

    /// Build a segment over `[start, end]` (or to the last day when open)
    fn segment(
        &self,
        subject: &str,
        points: &[DayPoint],
        weights: &[f64],
        start: usize,
        end: Option<usize>,
    ) -> PlateauSegment {
        let last = end.unwrap_or(weights.len() - 1);
        let segment = &weights[start..=last];

        PlateauSegment {
            id: Self::segment_id("plateau", subject, points[start].date),
            start_index: start,
            start_date: points[start].date,
            end_index: end,
            end_date: end.map(|index| points[index].date),
            duration_days: calendar_days(&points[start], &points[last]),
            mean_weight_kg: StatisticsKernel::mean(segment),
            variance_kg: range_of(&self.smoothed(segment)),
            is_broken: false,
            breakthrough_id: None,
        }
    }

    /// Trailing rolling average restricted to the given slice
    fn smoothed(&self, weights: &[f64]) -> Vec<f64> {
        let rolling = self.config.effective_rolling_window();
        (0..weights.len())
            .map(|k| StatisticsKernel::mean(&weights[(k + 1).saturating_sub(rolling)..=k]))
            .collect()
    }

    /// Probability that a breakthrough in this context is repeatable
    ///
    /// `(similar + 1) / (total + 2)` over historical contexts, boosted after a
    /// long plateau and capped. Only history dated before the scored event
    /// counts, so a rerun never scores a breakthrough against itself. Empty
    /// history yields the default confidence.
    #[must_use]
    pub fn score(
        &self,
        context: &ContextSnapshot,
        plateau_days: Option<i64>,
        history: &[ContextSnapshot],
    ) -> f64 {
        let earlier: Vec<&ContextSnapshot> = history
            .iter()
            .filter(|past| match (past.event_date, context.event_date) {
                (Some(then), Some(now)) => then < now,
                _ => true,
            })
            .collect();
        if earlier.is_empty() {
            return self.config.default_confidence;
        }

        let similar = earlier
            .iter()
            .filter(|past| self.is_similar(context, past))
            .count();
        let mut probability = (similar as f64 + 1.0) / (earlier.len() as f64 + 2.0);

        if plateau_days.is_some_and(|days| days > self.config.long_plateau_days) {
            probability *= self.config.long_plateau_boost;
        }

        probability.min(self.config.max_confidence)
    }

    /// Sleep within the hour band and calories within the relative band
    fn is_similar(&self, current: &ContextSnapshot, past: &ContextSnapshot) -> bool {
        let sleep_close = match (current.avg_sleep_hours, past.avg_sleep_hours) {
            (Some(now), Some(then)) => (now - then).abs() <= self.config.similar_sleep_hours,
            _ => false,
        };
        let calories_close = match (current.avg_calories, past.avg_calories) {
            (Some(now), Some(then)) if then > 0.0 => {
                (now - then).abs() / then <= self.config.similar_calories_ratio
            }
            _ => false,
        };
        sleep_close && calories_close
    }

    fn segment_id(kind: &str, subject: &str, date: NaiveDate) -> Uuid {
        Uuid::new_v5(
            &Uuid::NAMESPACE_OID,
            format!("plateau-breaker:{kind}:{subject}:{date}").as_bytes(),
        )
    }
}
