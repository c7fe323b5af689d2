// ABOUTME: Plateau segment, breakthrough event, and context snapshot entities
// ABOUTME: Produced by the detector; context snapshots double as historical scoring input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A multi-day stagnation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateauSegment {
    /// Deterministic identifier derived from the segment start
    pub id: Uuid,
    /// Index of the first day in the analyzed daily series
    pub start_index: usize,
    /// First day of the plateau
    pub start_date: NaiveDate,
    /// Index of the last day, `None` while the plateau is still open
    pub end_index: Option<usize>,
    /// Last day, `None` while the plateau is still open
    pub end_date: Option<NaiveDate>,
    /// Calendar days covered (inclusive)
    pub duration_days: i64,
    /// Mean weight over the segment (kg)
    pub mean_weight_kg: f64,
    /// Max minus min of the smoothed weight over the segment (kg)
    pub variance_kg: f64,
    /// Whether a breakthrough ended this plateau
    pub is_broken: bool,
    /// Breakthrough that ended the plateau
    pub breakthrough_id: Option<Uuid>,
}

impl PlateauSegment {
    /// Whether the plateau is still open
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.end_date.is_none()
    }

    /// Whether the given day falls inside the segment (open segments extend indefinitely)
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }
}

/// Averages of lifestyle variables over the days preceding an event
///
/// Every field is `None` when the variable was never logged in the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    /// Day of the event the window precedes; `None` for contexts of unknown date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    /// Days in the window that had a record
    pub days: usize,
    /// Mean weight (kg)
    pub avg_weight_kg: Option<f64>,
    /// Mean calorie intake
    pub avg_calories: Option<f64>,
    /// Mean protein intake (g)
    pub avg_protein_g: Option<f64>,
    /// Mean carbohydrate intake (g)
    pub avg_carbs_g: Option<f64>,
    /// Mean fat intake (g)
    pub avg_fats_g: Option<f64>,
    /// Mean sleep duration (h)
    pub avg_sleep_hours: Option<f64>,
    /// Mean sleep quality
    pub avg_sleep_quality: Option<f64>,
    /// Mean stress level
    pub avg_stress_level: Option<f64>,
    /// Mean water intake (ml)
    pub avg_water_ml: Option<f64>,
    /// Mean eating window (h)
    pub avg_eating_window_hours: Option<f64>,
}

/// A qualifying sudden weight drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakthroughEvent {
    /// Deterministic identifier derived from the event date
    pub id: Uuid,
    /// Index of the day in the analyzed daily series
    pub index: usize,
    /// Day of the drop
    pub date: NaiveDate,
    /// Weight on the day of the drop (kg)
    pub weight_kg: f64,
    /// Rolling average the drop was measured against (kg)
    pub baseline_kg: f64,
    /// Size of the drop (positive, kg)
    pub magnitude_kg: f64,
    /// Plateau this breakthrough closed
    pub preceding_plateau_id: Option<Uuid>,
    /// Lifestyle averages over the preceding days
    pub context: ContextSnapshot,
    /// Estimated probability that a similar context leads to a breakthrough
    pub probability: f64,
}

/// An upward jump over the rolling average, reported for context only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSpike {
    /// Index of the day in the analyzed daily series
    pub index: usize,
    /// Day of the spike
    pub date: NaiveDate,
    /// Weight on that day (kg)
    pub weight_kg: f64,
    /// Rolling average before the spike (kg)
    pub baseline_kg: f64,
    /// Size of the jump (positive, kg)
    pub magnitude_kg: f64,
}
