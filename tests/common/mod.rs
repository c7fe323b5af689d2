// ABOUTME: Shared fixtures for host-level integration tests
// ABOUTME: Builds a subject's records with a plateau, a breakthrough, and lifestyle logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss
)]
//! Shared test utilities for `plateau_breaker`

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use plateau_core::models::{DailyRecord, WeightUnit};

/// First day of every synthetic history (a Monday)
pub fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap() + Duration::days(offset)
}

/// 07:30 UTC on day `offset`
pub fn morning(offset: i64) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day(offset).and_hms_opt(7, 30, 0).unwrap())
}

/// Evening of day `offset`, used as the reference instant of a run
pub fn evening(offset: i64) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day(offset).and_hms_opt(20, 0, 0).unwrap())
}

/// Ten flat days at 100 kg on short sleep, then more sleep and a 2 kg drop on day 10
///
/// Weight, calories and sleep are logged every day, so every critical
/// variable is compliant.
pub fn plateau_then_breakthrough() -> Vec<DailyRecord> {
    (0..11)
        .map(|offset| {
            let weight = if offset == 10 { 98.0 } else { 100.0 };
            let sleep = match offset {
                8 | 10 => 8.5,
                9 => 8.0,
                odd if odd % 2 == 1 => 6.5,
                _ => 6.0,
            };
            DailyRecord::new(morning(offset), weight, WeightUnit::Kilograms)
                .with_calories(2000.0)
                .with_sleep_hours(sleep)
        })
        .collect()
}

/// A few consecutive weigh-ins, too short for detection or correlation
pub fn short_history(days: i64) -> Vec<DailyRecord> {
    (0..days)
        .map(|offset| DailyRecord::new(morning(offset), 80.0, WeightUnit::Kilograms))
        .collect()
}
