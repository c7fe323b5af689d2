// ABOUTME: Daily record model with weight units and optional lifestyle fields
// ABOUTME: Flexible date/time deserialization and derived variables (eating window, macro shares)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::units::{
    HOURS_PER_DAY, KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN, LB_TO_KG,
    MINUTES_PER_HOUR,
};
use crate::errors::AnalysisError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Custom deserializer for flexible date parsing
/// Accepts both full ISO 8601 datetime ("2025-11-26T07:30:00Z") and simple date ("2025-11-26")
fn deserialize_flexible_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // ISO 8601 without timezone (assume UTC)
    if let Ok(dt) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&dt));
    }

    // Simple date format (YYYY-MM-DD), midnight UTC
    if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        let datetime = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| serde::de::Error::custom("Invalid date"))?;
        return Ok(Utc.from_utc_datetime(&datetime));
    }

    Err(serde::de::Error::custom(format!(
        "Invalid date format: '{s}'. Expected 'YYYY-MM-DD' or 'YYYY-MM-DDTHH:MM:SSZ'"
    )))
}

/// Meal times are logged as "HH:MM" (seconds optional)
mod optional_meal_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(s) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map(Some)
            .map_err(|_| {
                serde::de::Error::custom(format!("Invalid meal time '{s}'. Expected 'HH:MM'"))
            })
    }
}

/// Unit a weight was logged in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Kilograms (canonical unit)
    #[default]
    #[serde(alias = "kg")]
    Kilograms,
    /// Pounds
    #[serde(alias = "lb", alias = "lbs")]
    Pounds,
}

impl WeightUnit {
    /// Convert a value in this unit to kilograms
    #[must_use]
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Self::Kilograms => value,
            Self::Pounds => value * LB_TO_KG,
        }
    }

    /// Convert a value in kilograms to this unit
    #[must_use]
    pub fn from_kg(self, kilograms: f64) -> f64 {
        match self {
            Self::Kilograms => kilograms,
            Self::Pounds => kilograms / LB_TO_KG,
        }
    }
}

/// One day's logged measurements
///
/// Absence of an optional field means "not logged that day".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// When the record was logged (day granularity, sub-day precision allowed)
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    pub logged_at: DateTime<Utc>,
    /// Body weight in `weight_unit`
    pub weight: f64,
    /// Unit of `weight`
    #[serde(default)]
    pub weight_unit: WeightUnit,
    /// Energy intake (kcal)
    #[serde(default)]
    pub calories: Option<f64>,
    /// Protein intake (grams)
    #[serde(default)]
    pub protein_g: Option<f64>,
    /// Carbohydrate intake (grams)
    #[serde(default)]
    pub carbs_g: Option<f64>,
    /// Fat intake (grams)
    #[serde(default)]
    pub fats_g: Option<f64>,
    /// Sleep duration (hours)
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    /// Subjective sleep quality (1-10)
    #[serde(default)]
    pub sleep_quality: Option<f64>,
    /// Subjective stress level (1-10)
    #[serde(default)]
    pub stress_level: Option<f64>,
    /// Water intake (millilitres)
    #[serde(default)]
    pub water_ml: Option<f64>,
    /// Time of the first meal
    #[serde(default, with = "optional_meal_time")]
    pub first_meal_at: Option<NaiveTime>,
    /// Time of the last meal
    #[serde(default, with = "optional_meal_time")]
    pub last_meal_at: Option<NaiveTime>,
}

impl DailyRecord {
    /// Create a record carrying only a weight
    #[must_use]
    pub const fn new(logged_at: DateTime<Utc>, weight: f64, weight_unit: WeightUnit) -> Self {
        Self {
            logged_at,
            weight,
            weight_unit,
            calories: None,
            protein_g: None,
            carbs_g: None,
            fats_g: None,
            sleep_hours: None,
            sleep_quality: None,
            stress_level: None,
            water_ml: None,
            first_meal_at: None,
            last_meal_at: None,
        }
    }

    /// Set calorie intake
    #[must_use]
    pub const fn with_calories(mut self, calories: f64) -> Self {
        self.calories = Some(calories);
        self
    }

    /// Set macronutrient intake (grams)
    #[must_use]
    pub const fn with_macros(mut self, protein_g: f64, carbs_g: f64, fats_g: f64) -> Self {
        self.protein_g = Some(protein_g);
        self.carbs_g = Some(carbs_g);
        self.fats_g = Some(fats_g);
        self
    }

    /// Set sleep duration
    #[must_use]
    pub const fn with_sleep_hours(mut self, hours: f64) -> Self {
        self.sleep_hours = Some(hours);
        self
    }

    /// Set sleep quality
    #[must_use]
    pub const fn with_sleep_quality(mut self, quality: f64) -> Self {
        self.sleep_quality = Some(quality);
        self
    }

    /// Set stress level
    #[must_use]
    pub const fn with_stress_level(mut self, level: f64) -> Self {
        self.stress_level = Some(level);
        self
    }

    /// Set water intake
    #[must_use]
    pub const fn with_water_ml(mut self, water_ml: f64) -> Self {
        self.water_ml = Some(water_ml);
        self
    }

    /// Set first and last meal times
    #[must_use]
    pub const fn with_meal_times(mut self, first: NaiveTime, last: NaiveTime) -> Self {
        self.first_meal_at = Some(first);
        self.last_meal_at = Some(last);
        self
    }

    /// Calendar day (UTC) of this record
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.logged_at.date_naive()
    }

    /// Weight normalized to kilograms
    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        self.weight_unit.to_kg(self.weight)
    }

    /// Hours between first and last meal, wrapping past midnight
    #[must_use]
    pub fn eating_window_hours(&self) -> Option<f64> {
        let (first, last) = (self.first_meal_at?, self.last_meal_at?);
        let start = f64::from(first.hour()).mul_add(MINUTES_PER_HOUR, f64::from(first.minute()));
        let mut end = f64::from(last.hour()).mul_add(MINUTES_PER_HOUR, f64::from(last.minute()));
        if end < start {
            end += HOURS_PER_DAY * MINUTES_PER_HOUR;
        }
        Some((end - start) / MINUTES_PER_HOUR)
    }

    /// Percentage of calories contributed by a macronutrient
    fn macro_share(&self, grams: Option<f64>, kcal_per_gram: f64) -> Option<f64> {
        let calories = self.calories.filter(|c| *c > 0.0)?;
        Some(grams? * kcal_per_gram / calories * 100.0)
    }
}

/// Lifestyle variables that can be correlated against weight velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleVariable {
    /// Energy intake (kcal)
    Calories,
    /// Protein intake (g)
    ProteinG,
    /// Carbohydrate intake (g)
    CarbsG,
    /// Fat intake (g)
    FatsG,
    /// Sleep duration (h)
    SleepHours,
    /// Sleep quality (1-10)
    SleepQuality,
    /// Stress level (1-10)
    StressLevel,
    /// Water intake (ml)
    WaterMl,
    /// Hours between first and last meal
    EatingWindowHours,
    /// Protein share of calories (%)
    ProteinPercent,
    /// Carbohydrate share of calories (%)
    CarbsPercent,
    /// Fat share of calories (%)
    FatsPercent,
}

impl LifestyleVariable {
    /// Every variable, in a stable order
    pub const ALL: [Self; 12] = [
        Self::Calories,
        Self::ProteinG,
        Self::CarbsG,
        Self::FatsG,
        Self::SleepHours,
        Self::SleepQuality,
        Self::StressLevel,
        Self::WaterMl,
        Self::EatingWindowHours,
        Self::ProteinPercent,
        Self::CarbsPercent,
        Self::FatsPercent,
    ];

    /// Stable snake-case name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::ProteinG => "protein_g",
            Self::CarbsG => "carbs_g",
            Self::FatsG => "fats_g",
            Self::SleepHours => "sleep_hours",
            Self::SleepQuality => "sleep_quality",
            Self::StressLevel => "stress_level",
            Self::WaterMl => "water_ml",
            Self::EatingWindowHours => "eating_window_hours",
            Self::ProteinPercent => "protein_percent",
            Self::CarbsPercent => "carbs_percent",
            Self::FatsPercent => "fats_percent",
        }
    }

    /// Human-readable label used in insight messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Calories => "Calorie intake",
            Self::ProteinG => "Protein intake",
            Self::CarbsG => "Carbohydrate intake",
            Self::FatsG => "Fat intake",
            Self::SleepHours => "Sleep duration",
            Self::SleepQuality => "Sleep quality",
            Self::StressLevel => "Stress level",
            Self::WaterMl => "Water intake",
            Self::EatingWindowHours => "Eating window",
            Self::ProteinPercent => "Protein share",
            Self::CarbsPercent => "Carbohydrate share",
            Self::FatsPercent => "Fat share",
        }
    }

    /// Extract this variable's value from a record
    #[must_use]
    pub fn value(self, record: &DailyRecord) -> Option<f64> {
        match self {
            Self::Calories => record.calories,
            Self::ProteinG => record.protein_g,
            Self::CarbsG => record.carbs_g,
            Self::FatsG => record.fats_g,
            Self::SleepHours => record.sleep_hours,
            Self::SleepQuality => record.sleep_quality,
            Self::StressLevel => record.stress_level,
            Self::WaterMl => record.water_ml,
            Self::EatingWindowHours => record.eating_window_hours(),
            Self::ProteinPercent => record.macro_share(record.protein_g, KCAL_PER_GRAM_PROTEIN),
            Self::CarbsPercent => record.macro_share(record.carbs_g, KCAL_PER_GRAM_CARBS),
            Self::FatsPercent => record.macro_share(record.fats_g, KCAL_PER_GRAM_FAT),
        }
    }
}

impl fmt::Display for LifestyleVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LifestyleVariable {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|variable| variable.name() == normalized)
            .ok_or_else(|| AnalysisError::UnknownVariable(s.to_owned()))
    }
}

/// Anything whose logging consistency can be tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedVariable {
    /// Body weight (always present on a record)
    Weight,
    /// A lifestyle variable
    Lifestyle(LifestyleVariable),
}

impl TrackedVariable {
    /// Whether the record carries this variable
    #[must_use]
    pub fn is_logged(self, record: &DailyRecord) -> bool {
        match self {
            Self::Weight => record.weight.is_finite() && record.weight > 0.0,
            Self::Lifestyle(variable) => variable.value(record).is_some(),
        }
    }
}

impl fmt::Display for TrackedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weight => f.write_str("weight"),
            Self::Lifestyle(variable) => f.write_str(variable.name()),
        }
    }
}

impl FromStr for TrackedVariable {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("weight") {
            return Ok(Self::Weight);
        }
        LifestyleVariable::from_str(s).map(Self::Lifestyle)
    }
}
