// ABOUTME: Shared fixtures for analytics integration tests
// ABOUTME: Builds dated daily records and reduced series from compact weight lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss
)]
//! Shared test utilities for `plateau_intelligence`

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use plateau_core::models::{DailyRecord, WeightUnit};
use plateau_intelligence::config::DuplicateDayPolicy;
use plateau_intelligence::DailySeries;

/// First day of every synthetic series
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

/// Day `offset` of the synthetic calendar
pub fn day(offset: i64) -> NaiveDate {
    start_date() + Duration::days(offset)
}

/// 07:30 UTC on day `offset`
pub fn morning(offset: i64) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day(offset).and_hms_opt(7, 30, 0).unwrap())
}

/// One kilogram record per consecutive day
pub fn weight_records(weights: &[f64]) -> Vec<DailyRecord> {
    weights
        .iter()
        .enumerate()
        .map(|(offset, weight)| {
            DailyRecord::new(morning(offset as i64), *weight, WeightUnit::Kilograms)
        })
        .collect()
}

/// Reduced series of consecutive daily kilogram weights
pub fn weight_series(weights: &[f64]) -> DailySeries {
    DailySeries::from_records(&weight_records(weights), DuplicateDayPolicy::Mean)
}

/// Reduce arbitrary records with the default policy
pub fn series_of(records: &[DailyRecord]) -> DailySeries {
    DailySeries::from_records(records, DuplicateDayPolicy::Mean)
}
