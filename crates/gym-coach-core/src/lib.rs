// ABOUTME: Core types and constants for the gym coach workout generation platform
// ABOUTME: Foundation crate with error handling, fitness domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gym Coach Core
//!
//! Foundation crate providing shared types for the gym coach server. This crate is
//! designed to change infrequently, enabling incremental compilation benefits in the
//! workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Validation bounds and generation limits
//! - **models**: Users, fitness profiles, exercises, and generated workout plans

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Validation bounds and generation limits shared across crates
pub mod constants;

/// Core data models (User, UserProfile, Exercise, GeneratedPlan, etc.)
pub mod models;
