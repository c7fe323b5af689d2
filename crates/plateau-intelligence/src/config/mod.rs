// ABOUTME: Analytics configuration aggregate with defaults, validation, and environment overrides
// ABOUTME: One immutable object passed into every component; no process-wide singletons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis Configuration Module
//!
//! Provides type-safe configuration for every analytics component. The
//! aggregate is built once (defaults, then environment overrides, then
//! validation) and passed by reference into each component.
//!
//! # Module Structure
//!
//! - `detection` - Plateau/breakthrough thresholds, same-day reduction, forensic windows
//! - `insights` - Correlation lag range, significance, insight confidence and cutoff rules
//! - `compliance` - Streak freeze, compliance variables, anomaly screening
//! - `error` - Configuration errors

pub mod compliance;
pub mod detection;
pub mod error;
pub mod insights;

pub use compliance::{QualityConfig, StreakConfig};
pub use detection::{DetectionConfig, DuplicateDayPolicy, ForensicsConfig};
pub use error::ConfigError;
pub use insights::{CorrelationConfig, InsightConfig, ThresholdRule};

use plateau_core::constants::correlation::MAX_LAG_DAYS;
use plateau_core::constants::units::MAX_WINDOW_DAYS;
use plateau_core::models::WeightUnit;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Complete analytics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Plateau and breakthrough detection
    pub detection: DetectionConfig,
    /// Correlation engine
    pub correlation: CorrelationConfig,
    /// Insight generation
    pub insights: InsightConfig,
    /// Streaks and compliance
    pub streaks: StreakConfig,
    /// Forensic differential analysis
    pub forensics: ForensicsConfig,
    /// Record quality screening
    pub quality: QualityConfig,
}

/// Read and parse an environment override, `None` when unset
fn env_override<T: FromStr>(variable: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Parse { variable, value: raw }),
        Err(_) => Ok(None),
    }
}

fn parse_weight_unit(raw: &str) -> Option<WeightUnit> {
    match raw.trim().to_lowercase().as_str() {
        "kg" | "kgs" | "kilograms" => Some(WeightUnit::Kilograms),
        "lb" | "lbs" | "pounds" => Some(WeightUnit::Pounds),
        _ => None,
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables with fallback to defaults
    ///
    /// Weight thresholds read from the environment are interpreted in
    /// `PLATEAU_THRESHOLD_UNIT` (`kg` or `lb`, default `kg`) and converted to
    /// kilograms here.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or the result is invalid
    pub fn from_environment() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let unit = match env::var("PLATEAU_THRESHOLD_UNIT") {
            Ok(raw) => parse_weight_unit(&raw).ok_or(ConfigError::Parse {
                variable: "PLATEAU_THRESHOLD_UNIT",
                value: raw,
            })?,
            Err(_) => WeightUnit::Kilograms,
        };

        if let Some(value) = env_override("PLATEAU_BREAKTHROUGH_THRESHOLD")? {
            config.detection.breakthrough_threshold_kg = unit.to_kg(value);
        }
        if let Some(value) = env_override("PLATEAU_VARIANCE_THRESHOLD")? {
            config.detection.plateau_variance_threshold_kg = unit.to_kg(value);
        }
        if let Some(value) = env_override("PLATEAU_ACTIVE_VARIANCE_THRESHOLD")? {
            config.detection.active_plateau_variance_kg = unit.to_kg(value);
        }
        if let Some(value) = env_override("PLATEAU_WATER_WEIGHT_BAND")? {
            config.detection.water_weight_band_kg = unit.to_kg(value);
        }
        if let Some(value) = env_override("PLATEAU_ROLLING_WINDOW_DAYS")? {
            config.detection.rolling_window_days = value;
        }
        if let Some(value) = env_override("PLATEAU_LOOKBACK_DAYS")? {
            config.detection.lookback_days = value;
        }
        if let Some(value) = env_override("PLATEAU_MIN_CONFIDENCE")? {
            config.insights.min_confidence = value;
        }
        if let Some(value) = env_override("PLATEAU_MAX_LAG_DAYS")? {
            config.correlation.max_lag_days = value;
        }
        if let Some(value) = env_override("PLATEAU_ALLOW_STREAK_FREEZE")? {
            config.streaks.allow_weekly_freeze = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_detection()?;
        self.validate_correlation()?;
        self.validate_insights()?;
        self.validate_compliance()
    }

    fn validate_detection(&self) -> Result<(), ConfigError> {
        let detection = &self.detection;
        if detection.rolling_window_days == 0 {
            return Err(ConfigError::InvalidRange("rolling_window_days must be > 0"));
        }
        if detection.breakthrough_threshold_kg <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "breakthrough_threshold_kg must be > 0",
            ));
        }
        if detection.plateau_variance_threshold_kg <= 0.0
            || detection.active_plateau_variance_kg <= 0.0
        {
            return Err(ConfigError::InvalidRange(
                "plateau variance thresholds must be > 0",
            ));
        }
        if detection.water_weight_band_kg < 0.0 || detection.spike_threshold_kg <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "water_weight_band_kg must be >= 0 and spike_threshold_kg > 0",
            ));
        }
        if detection.min_plateau_days < 1 || detection.active_plateau_window_days < 2 {
            return Err(ConfigError::InvalidRange(
                "plateau windows must cover at least one (closed) or two (open) days",
            ));
        }
        if !(0.0..=1.0).contains(&detection.default_confidence)
            || !(0.0..=1.0).contains(&detection.max_confidence)
            || detection.long_plateau_boost < 1.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "breakthrough confidences must be in [0, 1] and the boost >= 1",
            ));
        }
        if detection.min_points < 2 {
            return Err(ConfigError::InvalidRange("min_points must be >= 2"));
        }
        if !(1..=MAX_WINDOW_DAYS).contains(&detection.lookback_days)
            || !(1..=MAX_WINDOW_DAYS).contains(&detection.context_window_days)
        {
            return Err(ConfigError::ValueOutOfRange(
                "lookback_days and context_window_days must be in [1, 3650]",
            ));
        }
        Ok(())
    }

    fn validate_correlation(&self) -> Result<(), ConfigError> {
        if self.correlation.max_lag_days > MAX_LAG_DAYS {
            return Err(ConfigError::ValueOutOfRange("max_lag_days must be <= 30"));
        }
        if self.correlation.min_samples < 3 {
            return Err(ConfigError::InvalidRange("min_samples must be >= 3"));
        }
        let alpha = self.correlation.significance_level;
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "significance_level must be in (0, 1)",
            ));
        }
        Ok(())
    }

    fn validate_insights(&self) -> Result<(), ConfigError> {
        let insights = &self.insights;
        if !(0.0..=1.0).contains(&insights.min_confidence) {
            return Err(ConfigError::ValueOutOfRange(
                "min_confidence must be between 0 and 1",
            ));
        }
        if insights.max_insights == 0 || insights.signature_prefix_chars == 0 {
            return Err(ConfigError::InvalidRange(
                "max_insights and signature_prefix_chars must be > 0",
            ));
        }
        if insights.min_group_size < 2 || insights.min_effect_size_kg < 0.0 {
            return Err(ConfigError::InvalidRange(
                "min_group_size must be >= 2 and min_effect_size_kg >= 0",
            ));
        }
        if let Some(rule) = insights
            .threshold_rules
            .iter()
            .find(|rule| rule.high_cutoff < rule.low_cutoff)
        {
            return Err(ConfigError::InconsistentCutoffs(
                rule.variable.name().to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_compliance(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.streaks.compliance_window_days)
            || self.streaks.critical_variables.is_empty()
        {
            return Err(ConfigError::InvalidRange(
                "compliance window must be in [1, 3650] days with at least one critical variable",
            ));
        }
        if self.quality.max_daily_change_ratio <= 0.0 || self.quality.iqr_fence_multiplier <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "quality screening thresholds must be > 0",
            ));
        }
        let alpha = self.forensics.significance_level;
        if !(1..=MAX_WINDOW_DAYS).contains(&self.forensics.breakthrough_window_days)
            || alpha <= 0.0
            || alpha >= 1.0
        {
            return Err(ConfigError::InvalidRange(
                "forensic window must be in [1, 3650] days and significance in (0, 1)",
            ));
        }
        Ok(())
    }
}
