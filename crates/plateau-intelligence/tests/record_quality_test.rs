// ABOUTME: Integration tests for weight anomaly screening
// ABOUTME: Day-over-day change limit, IQR fences over prior history, and serialized reasons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{day, weight_series};
use plateau_intelligence::config::QualityConfig;
use plateau_intelligence::{AnomalyReason, RecordQualityScreener};

const STEADY_THEN_JUMP: [f64; 12] = [
    80.0, 80.2, 79.9, 80.1, 80.0, 80.3, 79.8, 80.1, 80.2, 80.0, 86.0, 80.1,
];

#[test]
fn test_jump_breaks_both_rules() {
    let anomalies = RecordQualityScreener::default().screen(&weight_series(&STEADY_THEN_JUMP));

    let indices: Vec<usize> = anomalies.iter().map(|anomaly| anomaly.index).collect();
    assert_eq!(indices, vec![10, 11]);

    let jump = &anomalies[0];
    assert_eq!(jump.date, day(10));
    assert!((jump.weight_kg - 86.0).abs() < 1e-12);
    assert_eq!(jump.reasons.len(), 2);
    match &jump.reasons[0] {
        AnomalyReason::LargeDailyChange {
            previous_kg,
            change_ratio,
        } => {
            assert!((previous_kg - 80.0).abs() < 1e-12);
            assert!((change_ratio - 0.075).abs() < 1e-9);
        }
        other => panic!("unexpected reason {other:?}"),
    }
    match &jump.reasons[1] {
        AnomalyReason::OutsideIqrFence { lower_kg, upper_kg } => {
            assert!((lower_kg - 79.7).abs() < 1e-9);
            assert!((upper_kg - 80.5).abs() < 1e-9);
        }
        other => panic!("unexpected reason {other:?}"),
    }
}

#[test]
fn test_return_after_jump_is_only_a_large_change() {
    let anomalies = RecordQualityScreener::default().screen(&weight_series(&STEADY_THEN_JUMP));
    let back = &anomalies[1];
    assert_eq!(back.reasons.len(), 1);
    assert!(matches!(
        back.reasons[0],
        AnomalyReason::LargeDailyChange { .. }
    ));
}

#[test]
fn test_iqr_needs_history() {
    let anomalies =
        RecordQualityScreener::default().screen(&weight_series(&[80.0, 80.1, 80.0, 90.0]));
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].index, 3);
    assert_eq!(anomalies[0].reasons.len(), 1);
}

#[test]
fn test_steady_series_is_clean() {
    let weights: Vec<f64> = (0..30).map(|i| 80.0 - 0.05 * f64::from(i)).collect();
    assert!(RecordQualityScreener::default()
        .screen(&weight_series(&weights))
        .is_empty());
}

#[test]
fn test_change_limit_is_configurable() {
    let screener = RecordQualityScreener::new(QualityConfig {
        max_daily_change_ratio: 0.001,
        ..QualityConfig::default()
    });
    let anomalies = screener.screen(&weight_series(&[80.0, 80.2, 80.2]));
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].index, 1);
}

#[test]
fn test_iqr_fences() {
    let screener = RecordQualityScreener::default();
    assert!(screener.iqr_fences(&[]).is_none());

    let (lower, upper) = screener.iqr_fences(&[4.0, 1.0, 3.0, 2.0]).unwrap();
    assert!((lower + 1.0).abs() < 1e-12);
    assert!((upper - 7.0).abs() < 1e-12);
}

#[test]
fn test_reason_serialization_is_tagged() {
    let reason = AnomalyReason::OutsideIqrFence {
        lower_kg: 79.7,
        upper_kg: 80.5,
    };
    let json = serde_json::to_value(&reason).unwrap();
    assert_eq!(json["kind"], "outside_iqr_fence");
    assert_eq!(json["upper_kg"], 80.5);
}
