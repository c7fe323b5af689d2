// ABOUTME: Criterion benchmarks for the plateau analytics pipeline
// ABOUTME: Measures daily reduction, detection, the correlation sweep, and full analysis runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the analytics pipeline.
//!
//! Synthetic histories alternate plateaus with drops and carry every lifestyle
//! variable, so each component does its full amount of work.

#![allow(clippy::missing_docs_in_private_items, missing_docs, clippy::unwrap_used)]

use chrono::{Duration, NaiveTime, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use plateau_breaker::services::{AnalysisRequest, AnalysisService};
use plateau_core::models::{DailyRecord, LifestyleVariable, WeightUnit};
use plateau_intelligence::config::{CorrelationConfig, DuplicateDayPolicy};
use plateau_intelligence::{CorrelationEngine, DailySeries, PlateauBreakthroughDetector};

const HISTORY_DAYS: [usize; 3] = [30, 90, 365];

/// Deterministic history: 12-day plateaus separated by 1.2 kg drops, two weigh-ins a day
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn synthetic_records(days: usize) -> Vec<DailyRecord> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
    let first_meal = NaiveTime::from_hms_opt(11, 30, 0).unwrap();
    let last_meal = NaiveTime::from_hms_opt(19, 0, 0).unwrap();

    (0..days)
        .flat_map(|index| {
            let plateau = (index / 12) as f64;
            let wobble = ((index * 37) % 7) as f64 / 20.0 - 0.15;
            let weight = 1.2f64.mul_add(-plateau, 95.0) + wobble;
            let sleep = 6.0 + ((index * 13) % 5) as f64 / 2.0;
            let morning = start + Duration::days(index as i64);

            let record = DailyRecord::new(morning, weight, WeightUnit::Kilograms)
                .with_calories(1900.0 + ((index * 53) % 400) as f64)
                .with_macros(140.0, 180.0 + (index % 40) as f64, 60.0)
                .with_sleep_hours(sleep)
                .with_sleep_quality(5.0 + (index % 5) as f64)
                .with_stress_level(3.0 + ((index * 3) % 5) as f64)
                .with_water_ml(2000.0 + ((index * 29) % 800) as f64)
                .with_meal_times(first_meal, last_meal);
            let evening = DailyRecord::new(
                morning + Duration::hours(13),
                weight + 0.6,
                WeightUnit::Kilograms,
            );
            [record, evening]
        })
        .collect()
}

fn bench_daily_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("daily_reduction");

    for days in HISTORY_DAYS {
        let records = synthetic_records(days);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &records, |b, records| {
            b.iter(|| DailySeries::from_records(black_box(records), DuplicateDayPolicy::Mean));
        });
    }

    group.finish();
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("plateau_detection");
    let detector = PlateauBreakthroughDetector::default();

    for days in HISTORY_DAYS {
        let series = DailySeries::from_records(&synthetic_records(days), DuplicateDayPolicy::Mean);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &series, |b, series| {
            b.iter(|| detector.detect("bench", black_box(series), &[]));
        });
    }

    group.finish();
}

fn bench_correlation_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_sweep");
    let series = DailySeries::from_records(&synthetic_records(90), DuplicateDayPolicy::Mean);

    for max_lag_days in [0_u32, 7, 30] {
        let engine = CorrelationEngine::new(CorrelationConfig {
            max_lag_days,
            ..CorrelationConfig::default()
        });
        group.bench_with_input(
            BenchmarkId::new("max_lag", max_lag_days),
            &series,
            |b, series| {
                b.iter(|| engine.sweep(black_box(series), &LifestyleVariable::ALL));
            },
        );
    }

    group.finish();
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");
    group.sample_size(20);
    let service = AnalysisService::default();
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

    for days in HISTORY_DAYS {
        let request = AnalysisRequest::new("bench", synthetic_records(days)).at(now);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &request, |b, request| {
            b.iter(|| service.analyze(black_box(request)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_daily_reduction,
    bench_detection,
    bench_correlation_sweep,
    bench_full_analysis,
);
criterion_main!(benches);
