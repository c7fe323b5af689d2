// ABOUTME: Host-level constants for service identity and environment variable names
// ABOUTME: Analytics thresholds live in plateau-core; this module covers the runtime shell only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Service identity and the environment variables read by the runtime shell.

/// Service names used in structured logs
pub mod service_names {
    /// Default service name
    pub const PLATEAU_BREAKER: &str = "plateau-breaker";
    /// Command-line tool
    pub const PLATEAU_CLI: &str = "plateau-cli";
}

/// Environment variables read by the logging layer
pub mod env_vars {
    /// Log filter directive
    pub const RUST_LOG: &str = "RUST_LOG";
    /// `json`, `pretty` or `compact`
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Include file and line in log records when set
    pub const LOG_INCLUDE_LOCATION: &str = "LOG_INCLUDE_LOCATION";
    /// Include thread ids and names when set
    pub const LOG_INCLUDE_THREAD: &str = "LOG_INCLUDE_THREAD";
    /// Service name override
    pub const SERVICE_NAME: &str = "SERVICE_NAME";
    /// Deployment environment (development, staging, production)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Logging defaults
pub mod logging {
    /// Default log level
    pub const DEFAULT_LEVEL: &str = "info";
    /// Default deployment environment
    pub const DEFAULT_ENVIRONMENT: &str = "development";
    /// Production environment name
    pub const PRODUCTION: &str = "production";
}
