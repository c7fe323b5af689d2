// ABOUTME: Integration tests for the statistics kernel public API
// ABOUTME: Degenerate-input policy, t distribution properties, and significance banding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use plateau_core::models::CorrelationType;
use plateau_intelligence::{SampleSummary, SignificanceLevel, StatisticsKernel};

#[test]
fn test_zero_variance_weights_never_correlate() {
    let flat_weights = [82.5; 12];
    let candidates: [Vec<f64>; 3] = [
        (0..12).map(f64::from).collect(),
        (0..12).map(|i| f64::from(i * i) - 3.0).collect(),
        vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0, 4.0, -4.0, 5.0, -5.0, 6.0, -6.0],
    ];
    for other in &candidates {
        for correlation_type in [CorrelationType::Pearson, CorrelationType::Spearman] {
            let r = StatisticsKernel::correlation(&flat_weights, other, correlation_type);
            assert!(r.abs() < f64::EPSILON, "{correlation_type:?} gave {r}");
        }
    }
}

#[test]
fn test_t_cdf_symmetry() {
    for df in [1.0, 3.0, 12.0, 57.0] {
        for t in [0.3, 1.1, 2.5, 6.0] {
            let upper = StatisticsKernel::t_distribution_cdf(t, df);
            let lower = StatisticsKernel::t_distribution_cdf(-t, df);
            assert!((upper + lower - 1.0).abs() < 1e-12, "df={df} t={t}");
        }
    }
}

#[test]
fn test_t_cdf_extremes() {
    assert!((StatisticsKernel::t_distribution_cdf(f64::INFINITY, 5.0) - 1.0).abs() < 1e-12);
    assert!(StatisticsKernel::t_distribution_cdf(f64::NEG_INFINITY, 5.0).abs() < 1e-12);
    // Degenerate degrees of freedom resolve to the uninformative midpoint
    assert!((StatisticsKernel::t_distribution_cdf(2.0, 0.0) - 0.5).abs() < 1e-12);
    assert!((StatisticsKernel::t_distribution_cdf(f64::NAN, 4.0) - 0.5).abs() < 1e-12);
}

#[test]
fn test_large_df_approaches_normal() {
    // 1.959964 is the two-sided 5% point of the standard normal
    let p = StatisticsKernel::two_tailed_p_value(1.959_964, 1.0e4);
    assert!((p - 0.05).abs() < 1e-4, "p = {p}");
}

#[test]
fn test_p_value_for_t_two_df_ten() {
    let p = StatisticsKernel::two_tailed_p_value(2.0, 10.0);
    assert!((p - 0.0734).abs() < 1e-3, "p = {p}");
    assert!((StatisticsKernel::two_tailed_p_value(0.0, 3.0) - 1.0).abs() < 1e-9);
}

#[test]
fn test_welch_on_identical_samples() {
    let sample = [0.1, -0.2, 0.05, -0.15, 0.0, 0.12];
    let summary = SampleSummary::from_values(&sample);
    let test = StatisticsKernel::welch_t_test_samples(&summary, &summary);
    assert!(test.t_statistic.abs() < 1e-12);
    assert!(test.degrees_of_freedom >= 1.0);
}

#[test]
fn test_welch_single_observation_groups() {
    // Neither group contributes a degrees-of-freedom term: df falls back to 1
    let test = StatisticsKernel::welch_t_test(1.0, 0.0, 1.0, 1.0, 1, 1);
    assert!((test.degrees_of_freedom - 1.0).abs() < 1e-12);
    assert!(test.t_statistic > 0.0);

    let empty = StatisticsKernel::welch_t_test(1.0, 0.0, 1.0, 1.0, 0, 5);
    assert!(empty.t_statistic.abs() < 1e-12);
    assert!((empty.degrees_of_freedom - 1.0).abs() < 1e-12);
}

#[test]
fn test_sample_summary() {
    let summary = SampleSummary::from_values(&[2.0, 4.0, 6.0]);
    assert_eq!(summary.n, 3);
    assert!((summary.mean - 4.0).abs() < 1e-12);
    assert!((summary.variance - 4.0).abs() < 1e-12);
    assert!((summary.std_dev() - 2.0).abs() < 1e-12);

    let empty = SampleSummary::from_values(&[]);
    assert_eq!(empty.n, 0);
    assert!(empty.mean.abs() < 1e-12);
    assert!(empty.variance.abs() < 1e-12);
}

#[test]
fn test_significance_levels() {
    assert_eq!(SignificanceLevel::from_p_value(0.0005), SignificanceLevel::VeryStrong);
    assert_eq!(SignificanceLevel::from_p_value(0.005), SignificanceLevel::Strong);
    assert_eq!(SignificanceLevel::from_p_value(0.03), SignificanceLevel::Moderate);
    assert_eq!(SignificanceLevel::from_p_value(0.07), SignificanceLevel::Weak);
    assert_eq!(SignificanceLevel::from_p_value(0.4), SignificanceLevel::NotSignificant);
    assert!((SignificanceLevel::Moderate.alpha_threshold() - 0.05).abs() < f64::EPSILON);
}
