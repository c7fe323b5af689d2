// ABOUTME: Configuration error types for analytics configuration validation
// ABOUTME: Error variants for invalid ranges, unparsable overrides, and inconsistent cutoffs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for analytics configuration validation.

use plateau_core::errors::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., a threshold that must be positive)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Environment override could not be parsed
    #[error("Parse error for {variable}: '{value}'")]
    Parse {
        /// Environment variable name
        variable: &'static str,
        /// Raw value that failed to parse
        value: String,
    },

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// A threshold rule has its high cutoff below its low cutoff
    #[error("Inconsistent cutoffs for {0}: high cutoff must be >= low cutoff")]
    InconsistentCutoffs(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string())
    }
}
