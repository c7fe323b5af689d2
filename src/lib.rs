// ABOUTME: Host library for the plateau analytics engine with logging, config, and orchestration
// ABOUTME: Loads records, runs every analytics component, and reports partial results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Plateau Breaker
//!
//! Host glue around the analytics crates. The analytics themselves live in
//! [`plateau_intelligence`]; this crate supplies what a process needs around
//! them:
//!
//! - **logging**: `tracing-subscriber` setup driven by the environment
//! - **config**: runtime configuration (logging plus analytics overrides)
//! - **input**: JSON record and history files
//! - **services**: the [`services::AnalysisService`] orchestrator
//!
//! ## Example
//!
//! ```rust,no_run
//! use plateau_breaker::config::RuntimeConfig;
//! use plateau_breaker::input::load_records;
//! use plateau_breaker::services::{AnalysisRequest, AnalysisService};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RuntimeConfig::from_env()?;
//! let records = load_records("records.json")?;
//! let service = AnalysisService::new(config.analysis);
//! let report = service.analyze(&AnalysisRequest::new(records.subject, records.records));
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```

/// Service identity and environment variable names
pub mod constants;

/// Structured logging setup
pub mod logging;

/// Runtime configuration assembled from the environment
pub mod config;

/// Record and history file loading
pub mod input;

/// Orchestration over the analytics components
pub mod services;

pub use plateau_core;
pub use plateau_intelligence;
