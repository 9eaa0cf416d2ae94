// ABOUTME: Unified error handling re-exported from gym-coach-core
// ABOUTME: AppError, ErrorCode, and the JSON error envelope used by every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Error types are defined in `gym-coach-core` with the `http-response` feature
//! enabled, so `AppError` can be returned directly from axum handlers.

pub use gym_coach_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails,
};
