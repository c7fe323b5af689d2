// ABOUTME: Integration tests for insight generation
// ABOUTME: Correlation and threshold insights, confidence floor, ordering, and signature dedup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs, clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

mod common;

use chrono::{DateTime, TimeZone, Utc};
use common::{morning, series_of};
use plateau_core::models::{
    CorrelationResult, DailyRecord, ExistingInsight, GeneratedInsight, InsightType,
    LifestyleVariable, WeightUnit,
};
use plateau_intelligence::config::{InsightConfig, ThresholdRule};
use plateau_intelligence::{CorrelationEngine, DailySeries, InsightGenerator};

const SLEEP: [f64; 21] = [
    6.0, 8.0, 7.0, 5.0, 9.0, 6.5, 7.5, 8.5, 5.5, 7.0, 6.0, 8.0, 9.0, 5.0, 7.5, 6.5, 8.5, 7.0, 6.0,
    8.0, 5.5,
];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap()
}

fn sleep_driven_series(lag: usize) -> DailySeries {
    let mut weight = 100.0;
    let records: Vec<DailyRecord> = SLEEP
        .iter()
        .enumerate()
        .map(|(offset, sleep)| {
            if offset >= lag && offset > 0 {
                weight += -0.2 * (SLEEP[offset - lag] - 7.0);
            }
            DailyRecord::new(morning(offset as i64), weight, WeightUnit::Kilograms)
                .with_sleep_hours(*sleep)
        })
        .collect();
    series_of(&records)
}

fn correlations(series: &DailySeries) -> Vec<CorrelationResult> {
    CorrelationEngine::default().sweep(series, &LifestyleVariable::ALL)
}

#[test]
fn test_generates_correlation_and_threshold_insights() {
    let series = sleep_driven_series(0);
    let insights = InsightGenerator::new().generate(&correlations(&series), &series, &[], now());

    assert!(!insights.is_empty());
    assert!(insights.len() <= 10);
    assert!(insights.iter().all(|insight| insight.confidence >= 0.5));
    assert!(insights
        .windows(2)
        .all(|pair| pair[0].confidence >= pair[1].confidence));
    assert!(insights.iter().all(|insight| insight.generated_at == now()));

    let correlation = insights
        .iter()
        .find(|insight| insight.insight_type == InsightType::Correlation)
        .expect("correlation insight");
    assert_eq!(correlation.variables, vec!["sleep_hours", "weight_velocity"]);
    assert!(correlation.message.starts_with("Sleep duration shows a strong negative correlation"));
    assert_eq!(correlation.supporting_data["lag_days"], 0);

    let threshold = insights
        .iter()
        .find(|insight| insight.insight_type == InsightType::Threshold)
        .expect("threshold insight");
    assert!(threshold.message.starts_with("Sleep duration high (>= 7.5) vs low (<= 6)"));
    assert!(threshold.confidence <= 0.95);
    assert!(threshold.supporting_data["mean_difference"].as_f64().unwrap() < 0.0);
}

#[test]
fn test_second_run_against_surfaced_insights_is_empty() {
    let series = sleep_driven_series(0);
    let correlations = correlations(&series);
    let generator = InsightGenerator::new();

    let first = generator.generate(&correlations, &series, &[], now());
    assert!(!first.is_empty());

    let existing: Vec<ExistingInsight> = first.iter().map(GeneratedInsight::to_existing).collect();
    let second = generator.generate(&correlations, &series, &existing, now());
    assert!(second.is_empty());
}

#[test]
fn test_dismissed_insights_may_resurface() {
    let series = sleep_driven_series(0);
    let correlations = correlations(&series);
    let generator = InsightGenerator::new();

    let first = generator.generate(&correlations, &series, &[], now());
    let dismissed: Vec<ExistingInsight> = first
        .iter()
        .map(|insight| ExistingInsight {
            dismissed: true,
            ..insight.to_existing()
        })
        .collect();
    let again = generator.generate(&correlations, &series, &dismissed, now());
    assert_eq!(again.len(), first.len());
}

#[test]
fn test_signature_survives_changing_numbers() {
    // Same relationship, slightly different data: the message prefix is unchanged
    let series = sleep_driven_series(0);
    let generator = InsightGenerator::new();
    let first = generator.generate(&correlations(&series), &series, &[], now());
    let existing: Vec<ExistingInsight> = first.iter().map(GeneratedInsight::to_existing).collect();

    let shorter = DailySeries::from_points(series.points()[..18].to_vec());
    let rerun = generator.generate(&correlations(&shorter), &shorter, &existing, now());
    assert!(rerun
        .iter()
        .all(|insight| insight.insight_type != InsightType::Correlation));
}

#[test]
fn test_lagged_correlation_becomes_lag_insight() {
    let series = sleep_driven_series(2);
    let insights = InsightGenerator::new().correlation_insights(&correlations(&series), now());

    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].insight_type, InsightType::Lag);
    assert!(insights[0].message.contains("2 days later"));
    assert_eq!(insights[0].supporting_data["lag_days"], 2);
}

#[test]
fn test_confidence_floor_filters_everything() {
    let series = sleep_driven_series(0);
    let generator = InsightGenerator::with_config(InsightConfig {
        min_confidence: 0.99,
        ..InsightConfig::default()
    });
    assert!(generator
        .generate(&correlations(&series), &series, &[], now())
        .is_empty());
}

#[test]
fn test_output_is_truncated() {
    let series = sleep_driven_series(0);
    let generator = InsightGenerator::with_config(InsightConfig {
        max_insights: 1,
        ..InsightConfig::default()
    });
    let insights = generator.generate(&correlations(&series), &series, &[], now());
    assert_eq!(insights.len(), 1);
}

#[test]
fn test_insignificant_correlations_are_ignored() {
    let series = sleep_driven_series(0);
    let mut results = correlations(&series);
    for result in &mut results {
        result.p_value = 0.2;
    }
    assert!(InsightGenerator::new()
        .correlation_insights(&results, now())
        .is_empty());
}

#[test]
fn test_threshold_split_requires_both_groups() {
    let records: Vec<DailyRecord> = (0..12)
        .map(|offset| {
            let weight = 100.0 - 0.1 * f64::from(offset as i32);
            DailyRecord::new(morning(offset), weight, WeightUnit::Kilograms).with_sleep_hours(8.0)
        })
        .collect();
    let rule = ThresholdRule::new(LifestyleVariable::SleepHours, 7.5, 6.0);
    let error = InsightGenerator::new()
        .threshold_split(&series_of(&records), &rule)
        .unwrap_err();
    assert!(error.is_insufficient_data());
}

#[test]
fn test_threshold_split_statistics() {
    let series = sleep_driven_series(0);
    let rule = ThresholdRule::new(LifestyleVariable::SleepHours, 7.5, 6.0);
    let split = InsightGenerator::new().threshold_split(&series, &rule).unwrap();

    assert_eq!(split.high.n, 9);
    assert_eq!(split.low.n, 6);
    assert!(split.mean_difference < -0.3);
    assert!(split.t_statistic < 0.0);
    assert!(split.p_value < 0.001);
    assert!(split.effect_size < -0.8);
}

#[test]
fn test_small_effects_produce_no_threshold_insight() {
    // Weight barely moves regardless of stress
    let stress = [8.0, 3.0, 8.0, 3.0, 8.0, 3.0, 8.0, 3.0, 8.0, 3.0, 8.0, 3.0];
    let records: Vec<DailyRecord> = stress
        .iter()
        .enumerate()
        .map(|(offset, level)| {
            let jitter = if offset % 2 == 0 { 0.01 } else { -0.01 };
            DailyRecord::new(morning(offset as i64), 80.0 + jitter, WeightUnit::Kilograms)
                .with_stress_level(*level)
        })
        .collect();
    let insights = InsightGenerator::new().threshold_insights(&series_of(&records), now());
    assert!(insights.is_empty());
}
