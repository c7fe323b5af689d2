// ABOUTME: Application constants organized by domain for the analytics core
// ABOUTME: Unit conversion factors and the canonical default threshold set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants used across the analytics core.
//!
//! Every weight threshold is expressed in kilograms. Pound-denominated defaults
//! are converted exactly once, here, so no component ever compares values in
//! mixed units.

/// Unit conversion factors
pub mod units {
    /// Kilograms per pound
    pub const LB_TO_KG: f64 = 0.453_592;

    /// Hours per day
    pub const HOURS_PER_DAY: f64 = 24.0;

    /// Minutes per hour
    pub const MINUTES_PER_HOUR: f64 = 60.0;

    /// Energy per gram of protein (kcal)
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;

    /// Energy per gram of carbohydrate (kcal)
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;

    /// Energy per gram of fat (kcal)
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

    /// Longest configurable day window (ten years)
    pub const MAX_WINDOW_DAYS: i64 = 3650;
}

/// Plateau and breakthrough detection defaults (kilograms unless noted)
pub mod detection {
    use super::units::LB_TO_KG;

    /// Trailing rolling average window (days)
    pub const ROLLING_WINDOW_DAYS: usize = 3;

    /// Minimum drop below the rolling average that flags a breakthrough candidate
    pub const BREAKTHROUGH_THRESHOLD_KG: f64 = 1.5 * LB_TO_KG;

    /// Rebound band around the pre-drop baseline that marks a transient fluid shift
    pub const WATER_WEIGHT_BAND_KG: f64 = 0.5;

    /// Days after a candidate drop that are checked for a rebound
    pub const REBOUND_WINDOW_DAYS: usize = 2;

    /// Maximum min-max range for the plateau preceding a breakthrough
    pub const PLATEAU_VARIANCE_THRESHOLD_KG: f64 = 0.2 * LB_TO_KG;

    /// Minimum plateau duration (days)
    pub const MIN_PLATEAU_DAYS: i64 = 7;

    /// Window scanned for an open plateau (days)
    pub const ACTIVE_PLATEAU_WINDOW_DAYS: usize = 7;

    /// Maximum min-max range for an open plateau
    pub const ACTIVE_PLATEAU_VARIANCE_KG: f64 = LB_TO_KG;

    /// Upward jump over the rolling average reported as a spike
    pub const SPIKE_THRESHOLD_KG: f64 = 2.0 * LB_TO_KG;

    /// Plateau length above which breakthrough confidence is boosted (days)
    pub const LONG_PLATEAU_DAYS: i64 = 14;

    /// Multiplier applied after a long plateau
    pub const LONG_PLATEAU_BOOST: f64 = 1.3;

    /// Upper bound for breakthrough confidence
    pub const MAX_BREAKTHROUGH_CONFIDENCE: f64 = 0.95;

    /// Confidence used when no historical breakthroughs exist
    pub const DEFAULT_BREAKTHROUGH_CONFIDENCE: f64 = 0.1;

    /// Sleep difference (hours) under which two contexts are similar
    pub const SIMILAR_SLEEP_HOURS: f64 = 1.0;

    /// Relative calorie difference under which two contexts are similar
    pub const SIMILAR_CALORIES_RATIO: f64 = 0.15;

    /// Days before a breakthrough summarized in its context snapshot
    pub const CONTEXT_WINDOW_DAYS: i64 = 7;

    /// Minimum daily points required for detection
    pub const MIN_DETECTION_POINTS: usize = 10;

    /// Lookback window (days) ending at the latest record
    pub const LOOKBACK_DAYS: i64 = 90;
}

/// Correlation and insight defaults
pub mod correlation {
    /// Largest supported lag between a lifestyle variable and weight velocity (days)
    pub const MAX_LAG_DAYS: u32 = 30;

    /// Minimum aligned pairs for a correlation
    pub const MIN_SAMPLES: usize = 7;

    /// Significance level for correlation insights
    pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

    /// |r| at or above which a correlation is strong
    pub const STRONG_CORRELATION: f64 = 0.7;

    /// |r| at or above which a correlation is moderate
    pub const MODERATE_CORRELATION: f64 = 0.4;

    /// Upper bound for correlation confidence
    pub const MAX_CORRELATION_CONFIDENCE: f64 = 0.99;

    /// Upper bound for threshold-split confidence
    pub const MAX_THRESHOLD_CONFIDENCE: f64 = 0.95;

    /// Default minimum confidence for emitted insights
    pub const MIN_INSIGHT_CONFIDENCE: f64 = 0.5;

    /// Maximum insights returned per generation run
    pub const MAX_INSIGHTS: usize = 10;

    /// Characters of the message kept in a dedup signature
    pub const SIGNATURE_PREFIX_CHARS: usize = 40;

    /// Minimum samples per group in a threshold split
    pub const MIN_GROUP_SIZE: usize = 3;

    /// Minimum mean velocity difference (kg/day) worth testing
    pub const MIN_EFFECT_SIZE_KG: f64 = 0.05;
}

/// Streak and compliance defaults
pub mod streaks {
    /// Badge tier thresholds (days): bronze, silver, gold, platinum
    pub const BADGE_THRESHOLDS: [u32; 4] = [7, 30, 90, 180];

    /// Points awarded per streak day
    pub const POINTS_PER_STREAK_DAY: f64 = 10.0;

    /// Points awarded for full compliance
    pub const POINTS_FOR_FULL_COMPLIANCE: f64 = 100.0;

    /// Default compliance window (days)
    pub const COMPLIANCE_WINDOW_DAYS: i64 = 90;
}

/// Record quality defaults
pub mod quality {
    /// Day-over-day relative weight change flagged as anomalous
    pub const MAX_DAILY_CHANGE_RATIO: f64 = 0.05;

    /// Prior points needed before IQR screening applies
    pub const MIN_IQR_HISTORY: usize = 7;

    /// Tukey fence multiplier
    pub const IQR_FENCE_MULTIPLIER: f64 = 1.5;
}
