// ABOUTME: Helper modules for plateau-cli
// ABOUTME: JSON output and argument parsing utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod output;
