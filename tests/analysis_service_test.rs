// ABOUTME: Integration tests for the analysis orchestration service
// ABOUTME: Full runs, partial results on short data, report shape, and history carried between runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{day, evening, plateau_then_breakthrough, short_history};
use plateau_breaker::input::AnalysisHistory;
use plateau_breaker::services::{AnalysisReport, AnalysisRequest, AnalysisService, Outcome};
use plateau_intelligence::config::{DetectionConfig, StreakConfig};
use plateau_intelligence::{AnalysisConfig, AnomalyReason};

const SUBJECT: &str = "user-42";

fn full_request() -> AnalysisRequest {
    AnalysisRequest::new(SUBJECT, plateau_then_breakthrough()).at(evening(10))
}

#[test]
fn test_full_run_computes_every_component() {
    let report = AnalysisService::default().analyze(&full_request());

    assert_eq!(report.subject, SUBJECT);
    assert_eq!(report.generated_at, evening(10));
    assert_eq!(report.days_analyzed, 11);

    let detection = report.detection.computed().unwrap();
    assert_eq!(detection.breakthroughs.len(), 1);
    assert_eq!(detection.breakthroughs[0].date, day(10));
    assert_eq!(detection.plateaus.len(), 1);

    let forensics = report.forensics.computed().unwrap();
    assert_eq!(forensics.len(), 1);
    assert_eq!(forensics[0].plateau_id, Some(detection.plateaus[0].id));
    assert_eq!(forensics[0].breakthrough_id, Some(detection.breakthroughs[0].id));
    assert_eq!(forensics[0].plateau_days, 8);
    assert_eq!(forensics[0].breakthrough_days, 3);

    assert!(report.correlations.is_computed());
    assert!(report.insights.len() <= AnalysisConfig::default().insights.max_insights);
}

#[test]
fn test_drop_below_flat_history_is_flagged() {
    let report = AnalysisService::default().analyze(&full_request());

    assert_eq!(report.anomalies.len(), 1);
    let anomaly = &report.anomalies[0];
    assert_eq!(anomaly.date, day(10));
    assert!(matches!(
        anomaly.reasons.as_slice(),
        [AnomalyReason::OutsideIqrFence { .. }]
    ));
}

#[test]
fn test_streaks_and_compliance_use_reference_day() {
    let report = AnalysisService::default().analyze(&full_request());

    assert_eq!(report.weight_streak.current_streak, 11);
    assert_eq!(report.weight_streak.longest_streak, 11);
    assert_eq!(report.weight_streak.last_logged, Some(day(10)));

    assert_eq!(report.compliance.reference_date, day(10));
    assert_eq!(report.compliance.window_start, day(0));
    assert_eq!(report.compliance.compliant_days, 11);
    assert!((report.compliance.compliance_rate - 1.0).abs() < 1e-12);
    assert!((report.compliance.points - 210.0).abs() < 1e-9);
}

#[test]
fn test_short_history_returns_partial_results() {
    let request = AnalysisRequest::new(SUBJECT, short_history(5)).at(evening(4));
    let report = AnalysisService::default().analyze(&request);

    assert_eq!(report.days_analyzed, 5);
    match &report.detection {
        Outcome::Unavailable { reason } => {
            assert!(reason.contains("need at least 10, got 5"), "{reason}");
        }
        Outcome::Computed(_) => panic!("detection should need ten days"),
    }
    assert!(!report.forensics.is_computed());
    assert!(!report.correlations.is_computed());
    assert!(report.insights.is_empty());

    assert_eq!(report.weight_streak.current_streak, 5);
    assert!(report.anomalies.is_empty());
}

#[test]
fn test_empty_request_still_reports() {
    let request = AnalysisRequest::new(SUBJECT, Vec::new()).at(evening(0));
    let report = AnalysisService::default().analyze(&request);

    assert_eq!(report.days_analyzed, 0);
    assert!(!report.detection.is_computed());
    assert_eq!(report.weight_streak.current_streak, 0);
    assert_eq!(report.compliance.compliant_days, 0);
}

#[test]
fn test_lookback_bounds_days_analyzed() {
    let config = AnalysisConfig {
        detection: DetectionConfig {
            lookback_days: 10,
            ..DetectionConfig::default()
        },
        ..AnalysisConfig::default()
    };
    let report = AnalysisService::new(config).analyze(&full_request());
    assert_eq!(report.days_analyzed, 10);
}

#[test]
fn test_windows_past_the_calendar_range_keep_every_day() {
    let config = AnalysisConfig {
        detection: DetectionConfig {
            lookback_days: 200_000_000,
            context_window_days: i64::MAX,
            ..DetectionConfig::default()
        },
        streaks: StreakConfig {
            compliance_window_days: 200_000_000,
            ..StreakConfig::default()
        },
        ..AnalysisConfig::default()
    };
    let report = AnalysisService::new(config).analyze(&full_request());

    assert_eq!(report.days_analyzed, 11);
    let detection = report.detection.computed().unwrap();
    assert_eq!(detection.window_start, day(0));
    assert_eq!(detection.breakthroughs[0].context.days, 10);
    assert_eq!(report.compliance.window_start, day(0));
    assert_eq!(report.compliance.window_days, 11);
}

#[test]
fn test_outcomes_serialize_with_status_tag() {
    let full = serde_json::to_value(AnalysisService::default().analyze(&full_request())).unwrap();
    assert_eq!(full["detection"]["status"], "computed");
    assert_eq!(full["detection"]["result"]["breakthroughs"].as_array().unwrap().len(), 1);

    let short = AnalysisRequest::new(SUBJECT, short_history(3)).at(evening(2));
    let partial = serde_json::to_value(AnalysisService::default().analyze(&short)).unwrap();
    assert_eq!(partial["forensics"]["status"], "unavailable");
    assert!(partial["forensics"]["result"]["reason"].is_string());
}

#[test]
fn test_runs_are_reproducible() {
    let service = AnalysisService::default();
    let first = service.analyze(&full_request());
    let second = service.analyze(&full_request());
    assert_eq!(first, second);
}

#[test]
fn test_next_history_feeds_following_run() {
    let service = AnalysisService::default();
    let first = service.analyze(&full_request());
    let history = first.next_history(&AnalysisHistory::default());

    assert_eq!(history.breakthrough_contexts.len(), 1);
    assert_eq!(history.existing_insights.len(), first.insights.len());

    // Carrying the same breakthrough twice does not duplicate its context
    assert_eq!(first.next_history(&history).breakthrough_contexts.len(), 1);

    let second = service.analyze(&full_request().with_history(history));
    assert!(second.detection.is_computed());
    for insight in &second.insights {
        assert!(
            first.insights.iter().all(|earlier| earlier.signature != insight.signature),
            "insight repeated: {}",
            insight.message
        );
    }
}

#[test]
fn test_rerun_with_own_history_keeps_breakthrough_probability() {
    let service = AnalysisService::default();
    let first = service.analyze(&full_request());
    let history = first.next_history(&AnalysisHistory::default());
    let second = service.analyze(&full_request().with_history(history.clone()));
    let third = service.analyze(&full_request().with_history(second.next_history(&history)));

    let probability = |report: &AnalysisReport| {
        report.detection.computed().unwrap().breakthroughs[0].probability
    };
    assert!((probability(&first) - 0.1).abs() < 1e-12);
    assert!((probability(&second) - probability(&first)).abs() < 1e-12);
    assert!((probability(&third) - probability(&first)).abs() < 1e-12);
    assert_eq!(first.detection, second.detection);
}
