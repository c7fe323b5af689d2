// ABOUTME: Detection configuration for plateaus, breakthroughs, and forensic windows
// ABOUTME: All weight thresholds in kilograms; unit-aware setters convert at the boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plateau and Breakthrough Detection Configuration
//!
//! Thresholds are stored in kilograms. Callers holding pound values go through
//! the unit-aware setters so the conversion happens exactly once.

use plateau_core::constants::correlation::SIGNIFICANCE_LEVEL;
use plateau_core::constants::detection::{
    ACTIVE_PLATEAU_VARIANCE_KG, ACTIVE_PLATEAU_WINDOW_DAYS, BREAKTHROUGH_THRESHOLD_KG,
    CONTEXT_WINDOW_DAYS, DEFAULT_BREAKTHROUGH_CONFIDENCE, LONG_PLATEAU_BOOST, LONG_PLATEAU_DAYS,
    LOOKBACK_DAYS, MAX_BREAKTHROUGH_CONFIDENCE, MIN_DETECTION_POINTS, MIN_PLATEAU_DAYS,
    PLATEAU_VARIANCE_THRESHOLD_KG, REBOUND_WINDOW_DAYS, ROLLING_WINDOW_DAYS,
    SIMILAR_CALORIES_RATIO, SIMILAR_SLEEP_HOURS, SPIKE_THRESHOLD_KG, WATER_WEIGHT_BAND_KG,
};
use plateau_core::models::WeightUnit;
use serde::{Deserialize, Serialize};

/// How several records logged on the same day are reduced to one value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateDayPolicy {
    /// Average every record of the day
    #[default]
    Mean,
    /// Keep the earliest record of the day
    First,
    /// Keep the latest record of the day
    Last,
}

/// Plateau/breakthrough detector parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Trailing rolling average window (days)
    pub rolling_window_days: usize,
    /// Drop below the rolling average that flags a candidate (kg)
    pub breakthrough_threshold_kg: f64,
    /// Rebound band around the baseline that suppresses a candidate (kg)
    pub water_weight_band_kg: f64,
    /// Days after a candidate checked for a rebound
    pub rebound_window_days: usize,
    /// Max min-max range of the plateau preceding a breakthrough (kg)
    pub plateau_variance_threshold_kg: f64,
    /// Minimum plateau duration (days)
    pub min_plateau_days: i64,
    /// Trailing window scanned for an open plateau (days)
    pub active_plateau_window_days: usize,
    /// Max min-max range of an open plateau (kg)
    pub active_plateau_variance_kg: f64,
    /// Upward jump reported as a spike (kg)
    pub spike_threshold_kg: f64,
    /// Plateau length above which confidence is boosted (days)
    pub long_plateau_days: i64,
    /// Confidence multiplier after a long plateau
    pub long_plateau_boost: f64,
    /// Confidence cap
    pub max_confidence: f64,
    /// Confidence when no historical breakthroughs exist
    pub default_confidence: f64,
    /// Sleep difference under which contexts are similar (hours)
    pub similar_sleep_hours: f64,
    /// Relative calorie difference under which contexts are similar
    pub similar_calories_ratio: f64,
    /// Days summarized in a breakthrough context snapshot
    pub context_window_days: i64,
    /// Minimum daily points in the lookback window
    pub min_points: usize,
    /// Lookback window ending at the latest record (days)
    pub lookback_days: i64,
    /// Same-day reduction policy
    pub duplicate_day_policy: DuplicateDayPolicy,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            rolling_window_days: ROLLING_WINDOW_DAYS,
            breakthrough_threshold_kg: BREAKTHROUGH_THRESHOLD_KG,
            water_weight_band_kg: WATER_WEIGHT_BAND_KG,
            rebound_window_days: REBOUND_WINDOW_DAYS,
            plateau_variance_threshold_kg: PLATEAU_VARIANCE_THRESHOLD_KG,
            min_plateau_days: MIN_PLATEAU_DAYS,
            active_plateau_window_days: ACTIVE_PLATEAU_WINDOW_DAYS,
            active_plateau_variance_kg: ACTIVE_PLATEAU_VARIANCE_KG,
            spike_threshold_kg: SPIKE_THRESHOLD_KG,
            long_plateau_days: LONG_PLATEAU_DAYS,
            long_plateau_boost: LONG_PLATEAU_BOOST,
            max_confidence: MAX_BREAKTHROUGH_CONFIDENCE,
            default_confidence: DEFAULT_BREAKTHROUGH_CONFIDENCE,
            similar_sleep_hours: SIMILAR_SLEEP_HOURS,
            similar_calories_ratio: SIMILAR_CALORIES_RATIO,
            context_window_days: CONTEXT_WINDOW_DAYS,
            min_points: MIN_DETECTION_POINTS,
            lookback_days: LOOKBACK_DAYS,
            duplicate_day_policy: DuplicateDayPolicy::Mean,
        }
    }
}

impl DetectionConfig {
    /// Set the breakthrough threshold from a value in any unit
    #[must_use]
    pub fn with_breakthrough_threshold(mut self, value: f64, unit: WeightUnit) -> Self {
        self.breakthrough_threshold_kg = unit.to_kg(value);
        self
    }

    /// Set the preceding-plateau variance threshold from a value in any unit
    #[must_use]
    pub fn with_plateau_variance_threshold(mut self, value: f64, unit: WeightUnit) -> Self {
        self.plateau_variance_threshold_kg = unit.to_kg(value);
        self
    }

    /// Set the open-plateau variance threshold from a value in any unit
    #[must_use]
    pub fn with_active_plateau_variance(mut self, value: f64, unit: WeightUnit) -> Self {
        self.active_plateau_variance_kg = unit.to_kg(value);
        self
    }

    /// Set the water-weight band from a value in any unit
    #[must_use]
    pub fn with_water_weight_band(mut self, value: f64, unit: WeightUnit) -> Self {
        self.water_weight_band_kg = unit.to_kg(value);
        self
    }

    /// Rolling window clamped to at least one day
    #[must_use]
    pub fn effective_rolling_window(&self) -> usize {
        self.rolling_window_days.max(1)
    }

    /// Open-plateau window clamped to at least two days
    #[must_use]
    pub fn effective_active_window(&self) -> usize {
        self.active_plateau_window_days.max(2)
    }
}

/// Forensic differential analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicsConfig {
    /// Days ending on the breakthrough day attributed to the breakthrough side
    pub breakthrough_window_days: i64,
    /// Significance level for flagging a variable
    pub significance_level: f64,
}

impl Default for ForensicsConfig {
    fn default() -> Self {
        Self {
            breakthrough_window_days: 3,
            significance_level: SIGNIFICANCE_LEVEL,
        }
    }
}
