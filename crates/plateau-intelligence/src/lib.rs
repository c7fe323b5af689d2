// ABOUTME: Analytics engine for weight plateaus, breakthroughs, lifestyle correlates, and streaks
// ABOUTME: Pure synchronous components configured through one immutable AnalysisConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Plateau Intelligence
//!
//! The analytics core. Every component is a pure function over in-memory
//! records and an [`AnalysisConfig`]; none performs I/O or keeps state between
//! calls, so the host may run independent analyses on any thread.
//!
//! Data flows leaves-first:
//!
//! 1. [`daily_series`] reduces raw records to one point per day
//! 2. [`plateau_detection`] finds plateaus, breakthroughs and spikes
//! 3. [`forensics`] contrasts plateau days against breakthrough days
//! 4. [`correlation`] sweeps lifestyle variables and lags against weight velocity
//! 5. [`insights`] turns correlations and threshold splits into deduplicated insights
//! 6. [`streaks`] scores logging consistency
//!
//! [`statistics`] provides the numeric primitives and [`record_quality`]
//! screens weights for implausible entries.

/// Immutable configuration with defaults, validation, and environment overrides
pub mod config;

/// First-principles statistics: correlation, Welch t-test, Cohen's d, t distribution
pub mod statistics;

/// Same-day reduction and day-over-day weight velocity
pub mod daily_series;

/// Plateau, breakthrough, and spike detection
pub mod plateau_detection;

/// Lagged correlation of lifestyle variables against weight velocity
pub mod correlation;

/// Confidence-scored, deduplicated insight generation
pub mod insights;

/// Logging streaks, density, badges, and compliance
pub mod streaks;

/// Plateau versus breakthrough differential analysis
pub mod forensics;

/// Weight anomaly screening
pub mod record_quality;

pub use config::{AnalysisConfig, ConfigError};
pub use correlation::CorrelationEngine;
pub use daily_series::{DailySeries, DayPoint};
pub use forensics::{
    EffectMagnitude, ForensicDifferentialAnalyzer, ForensicReport, VariableDifferential,
};
pub use insights::InsightGenerator;
pub use plateau_detection::{DetectionReport, PlateauBreakthroughDetector};
pub use record_quality::{AnomalyReason, RecordQualityScreener, WeightAnomaly};
pub use statistics::{SampleSummary, SignificanceLevel, StatisticsKernel, WelchTTest};
pub use streaks::{ComplianceReport, StreakComplianceEngine};
