// ABOUTME: Unified error handling with standard error codes for the analytics platform
// ABOUTME: Defines ErrorCode, AppError, and the AppResult alias shared by all crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Centralized error types for the analytics platform. Component-level
//! "cannot compute" outcomes live in [`analysis::AnalysisError`] and convert
//! into [`AppError`] when they cross into the host.

/// Component-level analysis errors (insufficient data, invalid input)
pub mod analysis;

pub use analysis::AnalysisError;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// The provided input is invalid
    InvalidInput = 3000,
    /// The data format is invalid
    InvalidFormat = 3002,
    /// A value is outside the acceptable range
    ValueOutOfRange = 3003,

    // Data availability (4000-4999)
    /// Not enough qualifying data points to compute a result
    InsufficientData = 4004,

    // Configuration (6000-6999)
    /// Configuration error encountered
    ConfigError = 6000,
    /// Configuration is invalid
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// An internal error occurred
    InternalError = 9000,
    /// Storage or file access failed
    StorageError = 9002,
    /// Data serialization/deserialization failed
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidFormat => "The data format is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::InsufficientData => "Not enough data to compute this analysis",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the error stems from caller-supplied data rather than the system
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::InvalidFormat
                | Self::ValueOutOfRange
                | Self::InsufficientData
                | Self::ConfigInvalid
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional structured context
    pub details: Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Null,
            source: None,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Insufficient data for a component
    #[must_use]
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientData, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Storage or file access error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::InsufficientData).unwrap();
        assert_eq!(json, "\"INSUFFICIENT_DATA\"");
    }

    #[test]
    fn test_app_error_display_includes_description() {
        let error = AppError::invalid_input("weight must be positive");
        assert_eq!(
            error.to_string(),
            "The provided input is invalid: weight must be positive"
        );
        assert!(error.code.is_client_error());
        assert!(!ErrorCode::InternalError.is_client_error());
    }

    #[test]
    fn test_app_error_chains_source() {
        let parse_error = serde_json::from_str::<Value>("{").unwrap_err();
        let error = AppError::from(parse_error);
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(error.source().is_some());
        assert!(AppError::storage("disk full").source().is_none());
    }
}
