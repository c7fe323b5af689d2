// ABOUTME: Core types and constants for the plateau analytics platform
// ABOUTME: Foundation crate with error handling, canonical entity models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Plateau Core
//!
//! Foundation crate providing the shared entity definitions used by the analytics
//! engine and by the host that feeds it records. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AnalysisError`
//! - **constants**: Unit conversion factors and default analysis thresholds
//! - **models**: Daily records, plateau/breakthrough segments, correlations, insights, streaks

/// Unified error handling system with standard error codes
pub mod errors;

/// Unit conversions and default thresholds organized by domain
pub mod constants;

/// Canonical entity definitions consumed and produced by the analytics core
pub mod models;
