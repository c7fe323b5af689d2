// ABOUTME: Logging configuration and structured logging setup for the analytics host
// ABOUTME: Configures log level, output format, and stderr destination from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration
//!
//! Logs are written to stderr so command output on stdout stays machine-readable.
//! The analytics crates only emit `tracing` events; installing the subscriber is
//! the host's job and happens here.

use crate::constants::{env_vars, logging, service_names};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events follow the configured level even when `RUST_LOG`
/// names other targets
const WORKSPACE_TARGETS: [&str; 3] = ["plateau_breaker", "plateau_intelligence", "plateau_core"];

/// How and what the host logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `warn,plateau_intelligence=debug`
    pub level: String,
    /// Line format on stderr
    pub format: LogFormat,
    /// Emit file and line of each event
    pub include_location: bool,
    /// Emit thread ids and names
    pub include_thread: bool,
    /// Reported in the startup event
    pub service_name: String,
    /// Crate version, reported in the startup event
    pub service_version: String,
    /// Deployment environment; `production` turns on location and thread fields
    pub environment: String,
}

/// Line format on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Human-readable multi-field lines
    Pretty,
    /// Single short line per event, no target
    Compact,
}

impl LogFormat {
    /// Parse a format name, `None` when unrecognized
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LEVEL.to_owned(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            service_name: service_names::PLATEAU_BREAKER.to_owned(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: logging::DEFAULT_ENVIRONMENT.to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG`, `LOG_FORMAT`, `LOG_INCLUDE_LOCATION`,
    /// `LOG_INCLUDE_THREAD`, `SERVICE_NAME` and `ENVIRONMENT`
    ///
    /// Unset or unrecognized values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = env::var(env_vars::ENVIRONMENT).unwrap_or(defaults.environment);
        let production = environment == logging::PRODUCTION;

        Self {
            level: env::var(env_vars::RUST_LOG).unwrap_or(defaults.level),
            format: env::var(env_vars::LOG_FORMAT)
                .ok()
                .and_then(|raw| LogFormat::parse(&raw))
                .unwrap_or(defaults.format),
            include_location: production || env::var(env_vars::LOG_INCLUDE_LOCATION).is_ok(),
            include_thread: production || env::var(env_vars::LOG_INCLUDE_THREAD).is_ok(),
            service_name: env::var(env_vars::SERVICE_NAME).unwrap_or(defaults.service_name),
            service_version: defaults.service_version,
            environment,
        }
    }

    /// Replace the level, e.g. from a `--verbose` flag
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Filter applying `level` to every crate of the workspace
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        let filter = EnvFilter::try_new(&self.level)
            .unwrap_or_else(|_| EnvFilter::new(logging::DEFAULT_LEVEL));
        WORKSPACE_TARGETS
            .into_iter()
            .filter_map(|target| format!("{target}={}", self.level).parse::<Directive>().ok())
            .fold(filter, EnvFilter::add_directive)
    }

    /// Install the global subscriber writing to stderr
    ///
    /// # Errors
    ///
    /// Fails when a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let detailed = fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_thread_ids(self.include_thread)
            .with_thread_names(self.include_thread);

        match self.format {
            LogFormat::Json => registry.with(detailed.json()).try_init(),
            LogFormat::Pretty => registry.with(detailed).try_init(),
            LogFormat::Compact => registry
                .with(fmt::layer().with_writer(io::stderr).with_target(false).compact())
                .try_init(),
        }
        .map_err(|error| anyhow!("tracing subscriber already installed: {error}"))?;

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            level = %self.level,
            format = ?self.format,
            "Logging initialized"
        );
        Ok(())
    }
}
