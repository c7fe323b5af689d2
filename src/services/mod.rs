// ABOUTME: Domain service layer orchestrating the analytics components over one subject
// ABOUTME: Reusable by the CLI and by any host embedding the library
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services wire the pure analytics components into a single request/report
//! flow. They hold configuration only, never per-request state, so one
//! service may serve any number of subjects.

/// Full analysis: quality scan, detection, forensics, correlations, insights, streaks
pub mod analysis;

pub use analysis::{AnalysisReport, AnalysisRequest, AnalysisService, Outcome};
