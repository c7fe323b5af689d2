// ABOUTME: Runtime configuration combining logging settings and analytics thresholds
// ABOUTME: Built once at startup from environment variables and validated before use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::logging::LoggingConfig;
use plateau_core::errors::AppResult;
use plateau_intelligence::AnalysisConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything a host process needs to run analyses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Logging setup
    pub logging: LoggingConfig,
    /// Analytics thresholds after `PLATEAU_*` overrides
    pub analysis: AnalysisConfig,
}

impl RuntimeConfig {
    /// Load logging and analytics configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a `PLATEAU_*` override cannot be
    /// parsed or leaves the analytics configuration invalid
    pub fn from_env() -> AppResult<Self> {
        let logging = LoggingConfig::from_env();
        let analysis = AnalysisConfig::from_environment()?;
        debug!(
            lookback_days = analysis.detection.lookback_days,
            max_lag_days = analysis.correlation.max_lag_days,
            "Runtime configuration loaded"
        );
        Ok(Self { logging, analysis })
    }
}
