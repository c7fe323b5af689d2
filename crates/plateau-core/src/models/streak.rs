// ABOUTME: Streak metrics and badge tiers for logging consistency
// ABOUTME: Recomputed on demand from logged dates; no persisted mutable state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::streaks::BADGE_THRESHOLDS;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Badge tiers awarded for streak length
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    /// 7 consecutive days
    Bronze,
    /// 30 consecutive days
    Silver,
    /// 90 consecutive days
    Gold,
    /// 180 consecutive days
    Platinum,
}

impl BadgeTier {
    /// Every tier in ascending order
    pub const ALL: [Self; 4] = [Self::Bronze, Self::Silver, Self::Gold, Self::Platinum];

    /// Streak length required for this tier
    #[must_use]
    pub const fn threshold_days(self) -> u32 {
        match self {
            Self::Bronze => BADGE_THRESHOLDS[0],
            Self::Silver => BADGE_THRESHOLDS[1],
            Self::Gold => BADGE_THRESHOLDS[2],
            Self::Platinum => BADGE_THRESHOLDS[3],
        }
    }

    /// Tiers earned by a streak of the given length
    #[must_use]
    pub fn earned_by(streak_days: u32) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|tier| streak_days >= tier.threshold_days())
            .collect()
    }

    /// First tier not yet reached by a streak of the given length
    #[must_use]
    pub fn next_after(streak_days: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| streak_days < tier.threshold_days())
    }
}

/// Next badge to work toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Tier to reach
    pub tier: BadgeTier,
    /// Consecutive days still needed
    pub days_remaining: u32,
}

/// Logging consistency metrics for one variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakMetrics {
    /// Consecutive days ending today or yesterday
    pub current_streak: u32,
    /// Longest consecutive run in the history
    pub longest_streak: u32,
    /// Distinct logged days over days since the first log (0 to 1)
    pub density_score: f64,
    /// Most recent logged day on or before the reference day
    pub last_logged: Option<NaiveDate>,
    /// Badges earned by the longest streak
    pub badges: Vec<BadgeTier>,
    /// Next tier for the current streak
    pub next_milestone: Option<Milestone>,
    /// Missed days bridged by the weekly freeze in the current streak
    pub freezes_used: u32,
}
