// ABOUTME: Component-level error taxonomy for analytics computations
// ABOUTME: Distinguishes "cannot compute" outcomes from invalid input and converts to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analysis Error Types
//!
//! Expected failure kinds of the analytics components. Degenerate arithmetic
//! (zero variance, zero standard error) is never reported here; those cases
//! resolve to defined fallback values inside the statistics kernel.

use super::AppError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by analytics components
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Fewer qualifying points than the component needs
    #[error("{component}: insufficient data (need at least {required}, got {actual})")]
    InsufficientData {
        /// Component that could not compute
        component: &'static str,
        /// Minimum number of qualifying points
        required: usize,
        /// Number of qualifying points actually available
        actual: usize,
    },

    /// Input violates a documented precondition
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A variable name did not match any tracked variable
    #[error("unknown variable: {0}")]
    UnknownVariable(String),
}

impl AnalysisError {
    /// Create an insufficient-data error
    #[must_use]
    pub const fn insufficient(component: &'static str, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            component,
            required,
            actual,
        }
    }

    /// Create an invalid-input error
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether this is a "cannot compute" result rather than a caller mistake
    #[must_use]
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

impl From<AnalysisError> for AppError {
    fn from(error: AnalysisError) -> Self {
        match &error {
            AnalysisError::InsufficientData {
                component,
                required,
                actual,
            } => Self::insufficient_data(error.to_string()).with_details(json!({
                "component": component,
                "required": required,
                "actual": actual,
            })),
            AnalysisError::InvalidInput(_) | AnalysisError::UnknownVariable(_) => {
                Self::invalid_input(error.to_string())
            }
        }
    }
}
