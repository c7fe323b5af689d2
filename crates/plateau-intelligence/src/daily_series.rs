// ABOUTME: Reduces raw daily records to one point per calendar day in kilograms
// ABOUTME: Provides lookback windows, weight velocity, and context snapshots over day ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: per-day record counts are small

use crate::config::DuplicateDayPolicy;
use chrono::{Duration, NaiveDate};
use plateau_core::models::{ContextSnapshot, DailyRecord, LifestyleVariable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One calendar day after same-day reduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPoint {
    /// Calendar day (UTC)
    pub date: NaiveDate,
    /// Reduced weight (kg)
    pub weight_kg: f64,
    /// Records that contributed to this day
    pub record_count: usize,
    /// Reduced lifestyle values, absent when not logged that day
    pub lifestyle: BTreeMap<LifestyleVariable, f64>,
}

impl DayPoint {
    /// Value of a lifestyle variable on this day
    #[must_use]
    pub fn value(&self, variable: LifestyleVariable) -> Option<f64> {
        self.lifestyle.get(&variable).copied()
    }
}

/// Day-over-day weight change between two consecutive calendar days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityPoint {
    /// Later of the two days
    pub date: NaiveDate,
    /// Weight change from the previous day (kg)
    pub velocity_kg: f64,
}

/// Chronological series with at most one point per day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    points: Vec<DayPoint>,
}

fn reduce(values: &[f64], policy: DuplicateDayPolicy) -> Option<f64> {
    match policy {
        DuplicateDayPolicy::Mean if !values.is_empty() => {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
        DuplicateDayPolicy::Mean => None,
        DuplicateDayPolicy::First => values.first().copied(),
        DuplicateDayPolicy::Last => values.last().copied(),
    }
}

/// The day `days` calendar days before `date`, `NaiveDate::MIN` when out of range
#[must_use]
pub fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|span| date.checked_sub_signed(span))
        .unwrap_or(NaiveDate::MIN)
}

impl DailySeries {
    /// Reduce raw records to one point per calendar day
    ///
    /// Records may arrive in any order. Records whose weight is not a finite
    /// positive number are skipped. `First`/`Last` pick by `logged_at` within the
    /// day, independently for weight and for each lifestyle variable.
    #[must_use]
    pub fn from_records(records: &[DailyRecord], policy: DuplicateDayPolicy) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Vec<&DailyRecord>> = BTreeMap::new();
        for record in records {
            let weight = record.weight_kg();
            if !weight.is_finite() || weight <= 0.0 {
                debug!(
                    logged_at = %record.logged_at,
                    weight = record.weight,
                    "Skipping record with invalid weight"
                );
                continue;
            }
            by_day.entry(record.date()).or_default().push(record);
        }

        let points = by_day
            .into_iter()
            .filter_map(|(date, mut day_records)| {
                day_records.sort_by_key(|record| record.logged_at);

                let weights: Vec<f64> = day_records.iter().map(|r| r.weight_kg()).collect();
                let weight_kg = reduce(&weights, policy)?;

                let lifestyle = LifestyleVariable::ALL
                    .into_iter()
                    .filter_map(|variable| {
                        let values: Vec<f64> = day_records
                            .iter()
                            .filter_map(|record| variable.value(record))
                            .filter(|value| value.is_finite())
                            .collect();
                        reduce(&values, policy).map(|value| (variable, value))
                    })
                    .collect();

                Some(DayPoint {
                    date,
                    weight_kg,
                    record_count: day_records.len(),
                    lifestyle,
                })
            })
            .collect();

        Self { points }
    }

    /// Build directly from already-reduced points (sorted and deduplicated by date)
    #[must_use]
    pub fn from_points(mut points: Vec<DayPoint>) -> Self {
        points.sort_by_key(|point| point.date);
        points.dedup_by_key(|point| point.date);
        Self { points }
    }

    /// Points in chronological order
    #[must_use]
    pub fn points(&self) -> &[DayPoint] {
        &self.points
    }

    /// Number of days
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no days
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Weights in chronological order (kg)
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.weight_kg).collect()
    }

    /// First and last day
    #[must_use]
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    /// Days within `lookback_days` calendar days ending at the latest day
    ///
    /// A window reaching past the earliest representable date keeps every day.
    #[must_use]
    pub fn lookback(&self, lookback_days: i64) -> Self {
        let Some((_, last)) = self.span() else {
            return Self::default();
        };
        let first_included = days_before(last, lookback_days.max(1) - 1);
        Self {
            points: self
                .points
                .iter()
                .filter(|point| point.date >= first_included)
                .cloned()
                .collect(),
        }
    }

    /// Weight velocity for every pair of consecutive calendar days
    ///
    /// Gaps in logging produce no velocity for the day after the gap.
    #[must_use]
    pub fn velocities(&self) -> Vec<VelocityPoint> {
        self.points
            .windows(2)
            .filter(|pair| pair[1].date - pair[0].date == Duration::days(1))
            .map(|pair| VelocityPoint {
                date: pair[1].date,
                velocity_kg: pair[1].weight_kg - pair[0].weight_kg,
            })
            .collect()
    }

    /// Velocity keyed by day
    #[must_use]
    pub fn velocity_by_date(&self) -> BTreeMap<NaiveDate, f64> {
        self.velocities()
            .into_iter()
            .map(|point| (point.date, point.velocity_kg))
            .collect()
    }

    /// Average lifestyle values over the days in `[start, end]`
    #[must_use]
    pub fn context_between(&self, start: NaiveDate, end: NaiveDate) -> ContextSnapshot {
        let window: Vec<&DayPoint> = self
            .points
            .iter()
            .filter(|point| point.date >= start && point.date <= end)
            .collect();

        let average = |extract: &dyn Fn(&DayPoint) -> Option<f64>| {
            let values: Vec<f64> = window.iter().filter_map(|point| extract(point)).collect();
            reduce(&values, DuplicateDayPolicy::Mean)
        };
        let variable = |variable: LifestyleVariable| average(&|point| point.value(variable));

        ContextSnapshot {
            event_date: None,
            days: window.len(),
            avg_weight_kg: average(&|point| Some(point.weight_kg)),
            avg_calories: variable(LifestyleVariable::Calories),
            avg_protein_g: variable(LifestyleVariable::ProteinG),
            avg_carbs_g: variable(LifestyleVariable::CarbsG),
            avg_fats_g: variable(LifestyleVariable::FatsG),
            avg_sleep_hours: variable(LifestyleVariable::SleepHours),
            avg_sleep_quality: variable(LifestyleVariable::SleepQuality),
            avg_stress_level: variable(LifestyleVariable::StressLevel),
            avg_water_ml: variable(LifestyleVariable::WaterMl),
            avg_eating_window_hours: variable(LifestyleVariable::EatingWindowHours),
        }
    }
}
