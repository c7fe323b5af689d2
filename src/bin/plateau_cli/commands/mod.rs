// ABOUTME: Subcommand implementations for plateau-cli
// ABOUTME: analyze, streaks, and config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod analyze;
pub mod config;
pub mod streaks;
