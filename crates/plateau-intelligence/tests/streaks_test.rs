// ABOUTME: Integration tests for logging streaks and compliance scoring
// ABOUTME: Current/longest streaks, density, weekly freeze, badges, and point totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveDate;
use common::{day, morning};
use plateau_core::models::{
    BadgeTier, DailyRecord, LifestyleVariable, TrackedVariable, WeightUnit,
};
use plateau_intelligence::config::StreakConfig;
use plateau_intelligence::StreakComplianceEngine;

fn days(offsets: &[i64]) -> Vec<NaiveDate> {
    offsets.iter().map(|offset| day(*offset)).collect()
}

fn freezing_engine() -> StreakComplianceEngine {
    StreakComplianceEngine::new(StreakConfig {
        allow_weekly_freeze: true,
        ..StreakConfig::default()
    })
}

#[test]
fn test_gap_breaks_current_streak_but_not_longest() {
    let metrics =
        StreakComplianceEngine::default().streak_metrics(&days(&[0, 1, 2, 5]), day(5), None);

    assert_eq!(metrics.current_streak, 1);
    assert_eq!(metrics.longest_streak, 3);
    assert_eq!(metrics.last_logged, Some(day(5)));
    assert!((metrics.density_score - 4.0 / 6.0).abs() < 1e-12);
    assert_eq!(metrics.freezes_used, 0);
}

#[test]
fn test_density_over_days_since_first_log() {
    let metrics =
        StreakComplianceEngine::default().streak_metrics(&days(&[0, 2, 4, 6, 9]), day(9), None);
    assert!((metrics.density_score - 0.5).abs() < 1e-12);
}

#[test]
fn test_streak_through_yesterday_still_counts() {
    let metrics =
        StreakComplianceEngine::default().streak_metrics(&days(&[0, 1, 2, 3]), day(4), None);
    assert_eq!(metrics.current_streak, 4);
    assert!((metrics.density_score - 0.8).abs() < 1e-12);
}

#[test]
fn test_stale_streak_resets_to_zero() {
    let metrics =
        StreakComplianceEngine::default().streak_metrics(&days(&[0, 1, 2, 3]), day(5), None);
    assert_eq!(metrics.current_streak, 0);
    assert_eq!(metrics.longest_streak, 4);
    assert_eq!(metrics.last_logged, Some(day(3)));
}

#[test]
fn test_future_dates_are_ignored() {
    let metrics =
        StreakComplianceEngine::default().streak_metrics(&days(&[0, 1, 2, 10, 11]), day(2), None);
    assert_eq!(metrics.current_streak, 3);
    assert_eq!(metrics.longest_streak, 3);
    assert_eq!(metrics.last_logged, Some(day(2)));
}

#[test]
fn test_duplicate_dates_count_once() {
    let metrics =
        StreakComplianceEngine::default().streak_metrics(&days(&[0, 0, 1, 1, 2]), day(2), None);
    assert_eq!(metrics.current_streak, 3);
    assert!((metrics.density_score - 1.0).abs() < 1e-12);
}

#[test]
fn test_empty_history() {
    let metrics = StreakComplianceEngine::default().streak_metrics(&[], day(0), None);
    assert_eq!(metrics.current_streak, 0);
    assert_eq!(metrics.longest_streak, 0);
    assert!(metrics.density_score.abs() < f64::EPSILON);
    assert!(metrics.last_logged.is_none());
    assert!(metrics.badges.is_empty());
    let milestone = metrics.next_milestone.unwrap();
    assert_eq!(milestone.tier, BadgeTier::Bronze);
    assert_eq!(milestone.days_remaining, 7);
}

#[test]
fn test_badges_and_next_milestone() {
    let offsets: Vec<i64> = (0..8).collect();
    let metrics = StreakComplianceEngine::default().streak_metrics(&days(&offsets), day(7), None);

    assert_eq!(metrics.current_streak, 8);
    assert_eq!(metrics.badges, vec![BadgeTier::Bronze]);
    let milestone = metrics.next_milestone.unwrap();
    assert_eq!(milestone.tier, BadgeTier::Silver);
    assert_eq!(milestone.days_remaining, 22);
}

#[test]
fn test_badges_follow_longest_streak() {
    let mut offsets: Vec<i64> = (0..31).collect();
    offsets.push(40);
    let metrics = StreakComplianceEngine::default().streak_metrics(&days(&offsets), day(40), None);

    assert_eq!(metrics.current_streak, 1);
    assert_eq!(metrics.longest_streak, 31);
    assert_eq!(metrics.badges, vec![BadgeTier::Bronze, BadgeTier::Silver]);
    assert_eq!(metrics.next_milestone.unwrap().tier, BadgeTier::Bronze);
}

#[test]
fn test_weekly_freeze_bridges_single_missed_day() {
    // 2025-03-05 (a Wednesday) is missed
    let metrics = freezing_engine().streak_metrics(&days(&[0, 1, 3, 4]), day(4), None);
    assert_eq!(metrics.current_streak, 5);
    assert_eq!(metrics.longest_streak, 5);
    assert_eq!(metrics.freezes_used, 1);
    // Density reflects real logs only
    assert!((metrics.density_score - 0.8).abs() < 1e-12);

    let without =
        StreakComplianceEngine::default().streak_metrics(&days(&[0, 1, 3, 4]), day(4), None);
    assert_eq!(without.current_streak, 2);
}

#[test]
fn test_weekly_freeze_used_once_per_week() {
    // Days 2 and 4 fall in the same ISO week: only the first is bridged
    let metrics = freezing_engine().streak_metrics(&days(&[0, 1, 3, 5, 6]), day(6), None);
    assert_eq!(metrics.current_streak, 2);
    assert_eq!(metrics.longest_streak, 4);
    assert_eq!(metrics.freezes_used, 0);
}

#[test]
fn test_weekly_freeze_renews_each_week() {
    // Misses on day 2 (week of 03-03) and day 8 (week of 03-10)
    let metrics = freezing_engine().streak_metrics(&days(&[0, 1, 3, 4, 5, 6, 7, 9]), day(9), None);
    assert_eq!(metrics.current_streak, 10);
    assert_eq!(metrics.freezes_used, 2);
    assert_eq!(metrics.badges, vec![BadgeTier::Bronze]);
}

#[test]
fn test_freeze_never_bridges_two_missed_days() {
    let metrics = freezing_engine().streak_metrics(&days(&[0, 1, 4, 5]), day(5), None);
    assert_eq!(metrics.current_streak, 2);
    assert_eq!(metrics.freezes_used, 0);
}

#[test]
fn test_variable_streak_uses_only_logged_values() {
    let records: Vec<DailyRecord> = (0..6)
        .map(|offset| {
            let record = DailyRecord::new(morning(offset), 80.0, WeightUnit::Kilograms);
            if offset == 3 {
                record
            } else {
                record.with_sleep_hours(7.0)
            }
        })
        .collect();
    let engine = StreakComplianceEngine::default();

    let sleep = engine.variable_streak(
        &records,
        TrackedVariable::Lifestyle(LifestyleVariable::SleepHours),
        day(5),
    );
    assert_eq!(sleep.current_streak, 2);
    assert_eq!(sleep.longest_streak, 3);

    let weight = engine.variable_streak(&records, TrackedVariable::Weight, day(5));
    assert_eq!(weight.current_streak, 6);
}

#[test]
fn test_compliance_over_critical_variables() {
    // Sleep is missing on days 3 and 9
    let records: Vec<DailyRecord> = (0..10)
        .map(|offset| {
            let record = DailyRecord::new(morning(offset), 80.0, WeightUnit::Kilograms)
                .with_calories(1900.0);
            if offset == 3 || offset == 9 {
                record
            } else {
                record.with_sleep_hours(7.5)
            }
        })
        .collect();
    let report = StreakComplianceEngine::default().compliance(&records, day(9));

    assert_eq!(report.window_start, day(0));
    assert_eq!(report.window_days, 10);
    assert_eq!(report.compliant_days, 8);
    assert!((report.compliance_rate - 0.8).abs() < 1e-12);
    assert!((report.variable_rates["weight"] - 1.0).abs() < 1e-12);
    assert!((report.variable_rates["calories"] - 1.0).abs() < 1e-12);
    assert!((report.variable_rates["sleep_hours"] - 0.8).abs() < 1e-12);

    assert_eq!(report.streak.current_streak, 5);
    assert_eq!(report.streak.longest_streak, 5);
    assert!((report.streak.density_score - 0.8).abs() < 1e-12);
    assert!((report.points - 130.0).abs() < 1e-9);
}

#[test]
fn test_compliance_window_is_bounded() {
    let records: Vec<DailyRecord> = (0..20)
        .map(|offset| {
            DailyRecord::new(morning(offset), 80.0, WeightUnit::Kilograms)
                .with_calories(2000.0)
                .with_sleep_hours(8.0)
        })
        .collect();
    let engine = StreakComplianceEngine::new(StreakConfig {
        compliance_window_days: 7,
        ..StreakConfig::default()
    });
    let report = engine.compliance(&records, day(19));

    assert_eq!(report.window_start, day(13));
    assert_eq!(report.window_days, 7);
    assert_eq!(report.compliant_days, 7);
    assert!((report.compliance_rate - 1.0).abs() < 1e-12);
    assert_eq!(report.streak.current_streak, 7);
    assert!((report.points - 170.0).abs() < 1e-9);
}

#[test]
fn test_compliance_without_records() {
    let report = StreakComplianceEngine::default().compliance(&[], day(0));
    assert_eq!(report.compliant_days, 0);
    assert!(report.compliance_rate.abs() < f64::EPSILON);
    assert!(report.points.abs() < f64::EPSILON);
}
