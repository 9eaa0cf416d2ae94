// ABOUTME: Core data models re-exported from gym-coach-core
// ABOUTME: Users, fitness profiles, exercises, and workout plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! The domain types live in the `gym-coach-core` crate so they compile once and can
//! be shared by tools and tests without pulling in the server stack.

pub use gym_coach_core::models::*;
