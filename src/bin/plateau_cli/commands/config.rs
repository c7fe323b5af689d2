// ABOUTME: config subcommand printing the effective runtime configuration
// ABOUTME: Shows defaults with PLATEAU_* overrides applied, thresholds in kilograms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::output::print_json;
use anyhow::Result;
use plateau_breaker::config::RuntimeConfig;

pub fn run(config: &RuntimeConfig, pretty: bool) -> Result<()> {
    print_json(config, pretty)
}
