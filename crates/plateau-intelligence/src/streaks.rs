// ABOUTME: Logging streaks, density, badges, and multi-variable compliance scoring
// ABOUTME: Recomputed from logged dates against a caller-supplied reference day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: day counts are far below f64 precision limits

use crate::config::StreakConfig;
use crate::daily_series::days_before;
use chrono::{Datelike, Duration, NaiveDate};
use plateau_core::constants::streaks::{POINTS_FOR_FULL_COMPLIANCE, POINTS_PER_STREAK_DAY};
use plateau_core::models::{BadgeTier, DailyRecord, Milestone, StreakMetrics, TrackedVariable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

/// Compliance of the critical variables over a window ending at the reference day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Last day of the window
    pub reference_date: NaiveDate,
    /// First day of the window (never before the first record)
    pub window_start: NaiveDate,
    /// Calendar days in the window
    pub window_days: i64,
    /// Days on which every critical variable was logged
    pub compliant_days: usize,
    /// `compliant_days / window_days`
    pub compliance_rate: f64,
    /// Fraction of window days each critical variable was logged
    pub variable_rates: BTreeMap<String, f64>,
    /// Streak over fully compliant days
    pub streak: StreakMetrics,
    /// `current streak * 10 + compliance rate * 100`
    pub points: f64,
}

fn to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Streak and compliance engine
pub struct StreakComplianceEngine {
    config: StreakConfig,
}

impl Default for StreakComplianceEngine {
    fn default() -> Self {
        Self::new(StreakConfig::default())
    }
}

impl StreakComplianceEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub const fn new(config: StreakConfig) -> Self {
        Self { config }
    }

    /// Streak metrics over a set of logged days
    ///
    /// Days after `reference` are ignored. Density is measured from `origin`
    /// when given, otherwise from the first logged day.
    #[must_use]
    pub fn streak_metrics(
        &self,
        dates: &[NaiveDate],
        reference: NaiveDate,
        origin: Option<NaiveDate>,
    ) -> StreakMetrics {
        let logged: BTreeSet<NaiveDate> = dates
            .iter()
            .copied()
            .filter(|date| *date <= reference)
            .collect();

        let (Some(&first), Some(&last)) = (logged.first(), logged.last()) else {
            return StreakMetrics {
                current_streak: 0,
                longest_streak: 0,
                density_score: 0.0,
                last_logged: None,
                badges: Vec::new(),
                next_milestone: Self::milestone(0),
                freezes_used: 0,
            };
        };

        let frozen = if self.config.allow_weekly_freeze {
            Self::weekly_freezes(&logged)
        } else {
            BTreeSet::new()
        };
        let effective: BTreeSet<NaiveDate> = logged.union(&frozen).copied().collect();

        let longest_streak = Self::longest_run(&effective);
        let (current_streak, freezes_used) = if (reference - last).num_days() > 1 {
            (0, 0)
        } else {
            let run_start = Self::run_start(&effective, last);
            let freezes = frozen.range(run_start..=last).count();
            (
                to_u32((last - run_start).num_days() + 1),
                u32::try_from(freezes).unwrap_or(u32::MAX),
            )
        };

        let density_start = origin.map_or(first, |origin| origin.min(first));
        let span_days = (reference - density_start).num_days() + 1;
        let density_score = (logged.len() as f64 / span_days.max(1) as f64).clamp(0.0, 1.0);

        StreakMetrics {
            current_streak,
            longest_streak,
            density_score,
            last_logged: Some(last),
            badges: BadgeTier::earned_by(longest_streak),
            next_milestone: Self::milestone(current_streak),
            freezes_used,
        }
    }

    /// Streak metrics for one tracked variable across raw records
    #[must_use]
    pub fn variable_streak(
        &self,
        records: &[DailyRecord],
        variable: TrackedVariable,
        reference: NaiveDate,
    ) -> StreakMetrics {
        let dates: Vec<NaiveDate> = records
            .iter()
            .filter(|record| variable.is_logged(record))
            .map(DailyRecord::date)
            .collect();
        self.streak_metrics(&dates, reference, None)
    }

    /// Compliance of the critical variables over the configured window
    #[must_use]
    pub fn compliance(&self, records: &[DailyRecord], reference: NaiveDate) -> ComplianceReport {
        let mut logged_by_day: BTreeMap<NaiveDate, HashSet<TrackedVariable>> = BTreeMap::new();
        for record in records.iter().filter(|record| record.date() <= reference) {
            let day = logged_by_day.entry(record.date()).or_default();
            for variable in &self.config.critical_variables {
                if variable.is_logged(record) {
                    day.insert(*variable);
                }
            }
        }

        let configured_start =
            days_before(reference, self.config.compliance_window_days.max(1) - 1);
        let window_start = logged_by_day
            .keys()
            .next()
            .map_or(configured_start, |first| (*first).max(configured_start));
        let window_days = ((reference - window_start).num_days() + 1).max(1);

        let in_window = || logged_by_day.range(window_start..=reference);

        let compliant_dates: Vec<NaiveDate> = in_window()
            .filter(|(_, logged)| {
                self.config
                    .critical_variables
                    .iter()
                    .all(|variable| logged.contains(variable))
            })
            .map(|(date, _)| *date)
            .collect();

        let variable_rates = self
            .config
            .critical_variables
            .iter()
            .map(|variable| {
                let days = in_window()
                    .filter(|(_, logged)| logged.contains(variable))
                    .count();
                (variable.to_string(), days as f64 / window_days as f64)
            })
            .collect();

        let compliance_rate = (compliant_dates.len() as f64 / window_days as f64).clamp(0.0, 1.0);
        let streak = self.streak_metrics(&compliant_dates, reference, Some(window_start));
        let points = f64::from(streak.current_streak)
            .mul_add(POINTS_PER_STREAK_DAY, compliance_rate * POINTS_FOR_FULL_COMPLIANCE);

        debug!(
            %reference,
            compliant_days = compliant_dates.len(),
            window_days,
            compliance_rate,
            "Compliance computed"
        );

        ComplianceReport {
            reference_date: reference,
            window_start,
            window_days,
            compliant_days: compliant_dates.len(),
            compliance_rate,
            variable_rates,
            streak,
            points,
        }
    }

    /// Single missed days bridged by the weekly freeze, at most one per ISO week
    fn weekly_freezes(logged: &BTreeSet<NaiveDate>) -> BTreeSet<NaiveDate> {
        let mut used_weeks: HashSet<(i32, u32)> = HashSet::new();
        let mut frozen = BTreeSet::new();
        let days: Vec<NaiveDate> = logged.iter().copied().collect();
        for pair in days.windows(2) {
            if (pair[1] - pair[0]).num_days() != 2 {
                continue;
            }
            let missed = pair[0] + Duration::days(1);
            let week = missed.iso_week();
            if used_weeks.insert((week.year(), week.week())) {
                frozen.insert(missed);
            }
        }
        frozen
    }

    /// Longest run of consecutive days
    fn longest_run(days: &BTreeSet<NaiveDate>) -> u32 {
        let mut longest = 0_u32;
        let mut current = 0_u32;
        let mut previous: Option<NaiveDate> = None;
        for &day in days {
            current = match previous {
                Some(prev) if (day - prev).num_days() == 1 => current + 1,
                _ => 1,
            };
            longest = longest.max(current);
            previous = Some(day);
        }
        longest
    }

    /// First day of the consecutive run ending at `last`
    fn run_start(days: &BTreeSet<NaiveDate>, last: NaiveDate) -> NaiveDate {
        let mut start = last;
        for &day in days.range(..last).rev() {
            if (start - day).num_days() != 1 {
                break;
            }
            start = day;
        }
        start
    }

    fn milestone(current_streak: u32) -> Option<Milestone> {
        BadgeTier::next_after(current_streak).map(|tier| Milestone {
            tier,
            days_remaining: tier.threshold_days() - current_streak,
        })
    }
}
