// ABOUTME: First-principles statistics kernel for correlation and hypothesis testing
// ABOUTME: Pearson/Spearman, Welch t-test, Cohen's d, Student t CDF via regularized incomplete beta
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: sample sizes are bounded by the analysis window

//! Statistics Kernel
//!
//! Pure numeric primitives used by every analytics component. Degenerate
//! inputs resolve to defined fallback values instead of errors:
//!
//! - variance of fewer than two values is 0
//! - correlation of mismatched, empty, or constant sequences is 0
//! - a Welch test with zero standard error gives `t = 0`, `df = 1`
//! - Cohen's d with no pooled degrees of freedom or zero pooled spread is 0
//!
//! The Student t CDF is evaluated through the regularized incomplete beta
//! function `I_x(a, b)` with `x = df / (df + t²)`, `a = df / 2`, `b = 1/2`.
//! The incomplete beta uses a modified Lentz continued fraction and a Lanczos
//! log-gamma (reflection below 0.5).
//!
//! # References
//!
//! - Press, W.H., et al. (2007). *Numerical Recipes*, 3rd ed., §6.1 and §6.4.
//! - Welch, B.L. (1947). The generalization of "Student's" problem when several
//!   different population variances are involved. *Biometrika*, 34(1-2), 28-35.

use plateau_core::models::CorrelationType;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::PI;

/// Continued-fraction iteration cap
const MAX_BETA_ITERATIONS: u32 = 200;

/// Continued-fraction convergence tolerance
const BETA_EPSILON: f64 = 3.0e-14;

/// Guard against division by zero inside the Lentz recurrence
const BETA_FPMIN: f64 = 1.0e-300;

/// Lanczos approximation parameter
const LANCZOS_G: f64 = 7.0;

/// Lanczos coefficients for g = 7, n = 9
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Statistical significance levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignificanceLevel {
    /// No statistical significance (p >= 0.1)
    NotSignificant,
    /// Weak significance (p < 0.1)
    Weak,
    /// Moderate significance (p < 0.05)
    Moderate,
    /// Strong significance (p < 0.01)
    Strong,
    /// Very strong significance (p < 0.001)
    VeryStrong,
}

impl SignificanceLevel {
    /// Get the alpha threshold for this significance level
    #[must_use]
    pub const fn alpha_threshold(self) -> f64 {
        match self {
            Self::NotSignificant => 1.0,
            Self::Weak => 0.1,
            Self::Moderate => 0.05,
            Self::Strong => 0.01,
            Self::VeryStrong => 0.001,
        }
    }

    /// Create significance level from p-value
    #[must_use]
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value < 0.001 {
            Self::VeryStrong
        } else if p_value < 0.01 {
            Self::Strong
        } else if p_value < 0.05 {
            Self::Moderate
        } else if p_value < 0.1 {
            Self::Weak
        } else {
            Self::NotSignificant
        }
    }
}

/// Result of Welch's unequal-variance t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WelchTTest {
    /// t statistic (group 1 minus group 2)
    pub t_statistic: f64,
    /// Welch-Satterthwaite degrees of freedom (at least 1)
    pub degrees_of_freedom: f64,
}

impl WelchTTest {
    /// Two-tailed p-value of this test
    #[must_use]
    pub fn p_value(&self) -> f64 {
        StatisticsKernel::two_tailed_p_value(self.t_statistic, self.degrees_of_freedom)
    }
}

/// Count, mean and unbiased variance of one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Number of values
    pub n: usize,
    /// Arithmetic mean (0 when empty)
    pub mean: f64,
    /// Unbiased variance (0 when fewer than two values)
    pub variance: f64,
}

impl SampleSummary {
    /// Summarize a sample
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let mean = StatisticsKernel::mean(values);
        Self {
            n: values.len(),
            mean,
            variance: StatisticsKernel::sample_variance(values, mean),
        }
    }

    /// Sample standard deviation
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Statistics kernel with first-principles implementations
pub struct StatisticsKernel;

impl StatisticsKernel {
    /// Arithmetic mean, 0 for an empty slice
    #[must_use]
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Unbiased (n - 1) sample variance around a precomputed mean
    ///
    /// Defined as 0 for fewer than two values.
    #[must_use]
    pub fn sample_variance(values: &[f64], mean: f64) -> f64 {
        if values.len() < 2 {
            return 0.0;
        }
        let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        sum_sq / (values.len() - 1) as f64
    }

    /// Sample standard deviation
    #[must_use]
    pub fn std_dev(values: &[f64]) -> f64 {
        Self::sample_variance(values, Self::mean(values)).sqrt()
    }

    /// Whether every value in the slice is identical
    fn is_constant(values: &[f64]) -> bool {
        values.windows(2).all(|pair| pair[0] == pair[1])
    }

    /// Pearson product-moment correlation
    ///
    /// Returns 0 for mismatched or empty sequences and when either side has
    /// zero variance.
    #[must_use]
    pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
        if x.len() != y.len() || x.is_empty() || Self::is_constant(x) || Self::is_constant(y) {
            return 0.0;
        }

        let mean_x = Self::mean(x);
        let mean_y = Self::mean(y);

        let (sum_xy, sum_xx, sum_yy) =
            x.iter()
                .zip(y)
                .fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (xi, yi)| {
                    let dx = xi - mean_x;
                    let dy = yi - mean_y;
                    (dx.mul_add(dy, sxy), dx.mul_add(dx, sxx), dy.mul_add(dy, syy))
                });

        let denominator = (sum_xx * sum_yy).sqrt();
        if denominator == 0.0 || !denominator.is_finite() {
            return 0.0;
        }

        (sum_xy / denominator).clamp(-1.0, 1.0)
    }

    /// Average ranks (1-based); tied values share the mean of their positions
    #[must_use]
    pub fn ranks(values: &[f64]) -> Vec<f64> {
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

        let mut ranks = vec![0.0; values.len()];
        let mut start = 0;
        while start < order.len() {
            let mut end = start;
            while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
                end += 1;
            }
            // Positions start..=end are 0-based; ranks are 1-based
            let shared_rank = (start + end) as f64 / 2.0 + 1.0;
            for &index in &order[start..=end] {
                ranks[index] = shared_rank;
            }
            start = end + 1;
        }
        ranks
    }

    /// Spearman rank correlation (Pearson over average ranks)
    #[must_use]
    pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
        if x.len() != y.len() || x.is_empty() {
            return 0.0;
        }
        Self::pearson(&Self::ranks(x), &Self::ranks(y))
    }

    /// Correlation of the requested family
    #[must_use]
    pub fn correlation(x: &[f64], y: &[f64], correlation_type: CorrelationType) -> f64 {
        match correlation_type {
            CorrelationType::Pearson => Self::pearson(x, y),
            CorrelationType::Spearman => Self::spearman(x, y),
        }
    }

    /// Two-tailed p-value of a correlation coefficient over `n` pairs
    ///
    /// Uses `t = r * sqrt((n - 2) / (1 - r²))` with `n - 2` degrees of freedom.
    /// Fewer than three pairs carry no evidence (p = 1).
    #[must_use]
    pub fn correlation_p_value(r: f64, n: usize) -> f64 {
        if n < 3 || !r.is_finite() {
            return 1.0;
        }
        let df = (n - 2) as f64;
        let r_squared = r * r;
        if r_squared >= 1.0 {
            return 0.0;
        }
        let t = r * (df / (1.0 - r_squared)).sqrt();
        Self::two_tailed_p_value(t, df)
    }

    /// Welch's t-test from group summaries
    ///
    /// Degrees of freedom are floored at 1. A zero standard error (or an empty
    /// group) gives `t = 0`, `df = 1`.
    #[must_use]
    pub fn welch_t_test(
        mean1: f64,
        mean2: f64,
        var1: f64,
        var2: f64,
        n1: usize,
        n2: usize,
    ) -> WelchTTest {
        const DEGENERATE: WelchTTest = WelchTTest {
            t_statistic: 0.0,
            degrees_of_freedom: 1.0,
        };

        if n1 == 0 || n2 == 0 {
            return DEGENERATE;
        }

        let term1 = var1.max(0.0) / n1 as f64;
        let term2 = var2.max(0.0) / n2 as f64;
        let se_squared = term1 + term2;
        if se_squared == 0.0 || !se_squared.is_finite() {
            return DEGENERATE;
        }

        let t_statistic = (mean1 - mean2) / se_squared.sqrt();

        let df_term = |term: f64, n: usize| {
            if n > 1 {
                term * term / (n - 1) as f64
            } else {
                0.0
            }
        };
        let denominator = df_term(term1, n1) + df_term(term2, n2);
        let degrees_of_freedom = if denominator > 0.0 {
            (se_squared * se_squared / denominator).max(1.0)
        } else {
            1.0
        };

        WelchTTest {
            t_statistic,
            degrees_of_freedom,
        }
    }

    /// Welch's t-test between two samples
    #[must_use]
    pub fn welch_t_test_samples(first: &SampleSummary, second: &SampleSummary) -> WelchTTest {
        Self::welch_t_test(
            first.mean,
            second.mean,
            first.variance,
            second.variance,
            first.n,
            second.n,
        )
    }

    /// Cohen's d with pooled standard deviation (group 1 minus group 2)
    ///
    /// Returns 0 when the pooled degrees of freedom `n1 + n2 - 2` are below 1
    /// or the pooled standard deviation is 0.
    #[must_use]
    pub fn cohens_d(
        mean1: f64,
        mean2: f64,
        var1: f64,
        var2: f64,
        n1: usize,
        n2: usize,
    ) -> f64 {
        let pooled_df = (n1 + n2).saturating_sub(2);
        if pooled_df < 1 {
            return 0.0;
        }
        let weighted = (n1.saturating_sub(1) as f64).mul_add(
            var1.max(0.0),
            n2.saturating_sub(1) as f64 * var2.max(0.0),
        );
        let pooled_sd = (weighted / pooled_df as f64).sqrt();
        if pooled_sd == 0.0 || !pooled_sd.is_finite() {
            return 0.0;
        }
        (mean1 - mean2) / pooled_sd
    }

    /// Cumulative distribution function of Student's t
    ///
    /// Non-positive or non-finite degrees of freedom, or a NaN statistic,
    /// yield the uninformative 0.5.
    #[must_use]
    pub fn t_distribution_cdf(t: f64, df: f64) -> f64 {
        if t.is_nan() || df.is_nan() || df <= 0.0 {
            return 0.5;
        }
        let x = df / t.mul_add(t, df);
        let tail = 0.5 * Self::regularized_incomplete_beta(x, df / 2.0, 0.5);
        if t >= 0.0 {
            1.0 - tail
        } else {
            tail
        }
    }

    /// Two-tailed p-value `2 * (1 - CDF(|t|, df))`, clamped to [0, 1]
    #[must_use]
    pub fn two_tailed_p_value(t: f64, df: f64) -> f64 {
        (2.0 * (1.0 - Self::t_distribution_cdf(t.abs(), df))).clamp(0.0, 1.0)
    }

    /// Regularized incomplete beta function `I_x(a, b)`
    #[must_use]
    pub fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let ln_front = a.mul_add(x.ln(), b * (1.0 - x).ln()) + Self::ln_gamma(a + b)
            - Self::ln_gamma(a)
            - Self::ln_gamma(b);
        let front = ln_front.exp();

        // The continued fraction converges fastest below the distribution's mean
        if x < (a + 1.0) / (a + b + 2.0) {
            front * Self::beta_continued_fraction(x, a, b) / a
        } else {
            1.0 - front * Self::beta_continued_fraction(1.0 - x, b, a) / b
        }
    }

    /// Continued fraction for the incomplete beta (modified Lentz)
    fn beta_continued_fraction(x: f64, a: f64, b: f64) -> f64 {
        let guard = |value: f64| {
            if value.abs() < BETA_FPMIN {
                BETA_FPMIN
            } else {
                value
            }
        };

        let qab = a + b;
        let qap = a + 1.0;
        let qam = a - 1.0;
        let mut c = 1.0;
        let mut d = 1.0 / guard(1.0 - qab * x / qap);
        let mut h = d;

        for iteration in 1..=MAX_BETA_ITERATIONS {
            let m = f64::from(iteration);
            let m2 = 2.0 * m;

            // Even step
            let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
            d = 1.0 / guard(aa.mul_add(d, 1.0));
            c = guard(1.0 + aa / c);
            h *= d * c;

            // Odd step
            let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
            d = 1.0 / guard(aa.mul_add(d, 1.0));
            c = guard(1.0 + aa / c);
            let delta = d * c;
            h *= delta;

            if (delta - 1.0).abs() < BETA_EPSILON {
                break;
            }
        }

        h
    }

    /// Natural logarithm of the gamma function
    ///
    /// Lanczos approximation (g = 7) for `x >= 0.5`, reflection formula below.
    #[must_use]
    pub fn ln_gamma(x: f64) -> f64 {
        if x < 0.5 {
            // Reflection: Γ(x)Γ(1-x) = π / sin(πx)
            return (PI / (PI * x).sin().abs()).ln() - Self::ln_gamma(1.0 - x);
        }

        let x = x - 1.0;
        let series = LANCZOS_COEFFICIENTS
            .iter()
            .enumerate()
            .skip(1)
            .fold(LANCZOS_COEFFICIENTS[0], |acc, (i, coefficient)| {
                acc + coefficient / (x + i as f64)
            });
        let t = x + LANCZOS_G + 0.5;

        0.5f64.mul_add((2.0 * PI).ln(), (x + 0.5) * t.ln()) - t + series.ln()
    }
}
