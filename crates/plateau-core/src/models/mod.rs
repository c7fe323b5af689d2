// ABOUTME: Canonical entity definitions shared by the analytics core and its host
// ABOUTME: Re-exports daily records, plateau segments, correlations, insights, and streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! One canonical set of entities. Records are read-only inputs owned by the
//! ingestion side; every other entity is produced fresh per analysis run.

/// Daily records, weight units, and tracked lifestyle variables
pub mod record;

/// Plateau segments, breakthrough events, and context snapshots
pub mod plateau;

/// Correlation results and their banding
pub mod correlation;

/// Generated and previously surfaced insights with dedup signatures
pub mod insight;

/// Streak metrics and badge tiers
pub mod streak;

pub use correlation::{
    CorrelationDirection, CorrelationResult, CorrelationStrength, CorrelationType, DateRange,
};
pub use insight::{ExistingInsight, GeneratedInsight, InsightSignature, InsightType};
pub use plateau::{BreakthroughEvent, ContextSnapshot, PlateauSegment, WeightSpike};
pub use record::{DailyRecord, LifestyleVariable, TrackedVariable, WeightUnit};
pub use streak::{BadgeTier, Milestone, StreakMetrics};
