// ABOUTME: Core data models for the gym coach server
// ABOUTME: Re-exports users, fitness profiles, exercises, and workout plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `User`: registered account
//! - `UserProfile`: one fitness profile per user, with closed objective and level enums
//! - `Exercise`: immutable reference data from the exercise library
//! - `GeneratedPlan`: validated plan returned by the language model
//! - `PlanRecord`: a generated plan persisted for a user

mod exercise;
mod profile;
mod user;
mod workout;

pub use exercise::{Exercise, VolumeGuidelines};
pub use profile::{
    CreateProfileRequest, ExperienceLevel, FitnessObjective, UpdateProfileRequest, UserProfile,
};
pub use user::User;
pub use workout::{
    ExerciseBlock, FatigueScore, FatigueScoreError, GeneratedPlan, PlanRecord, PlanSummary,
    WorkoutPlanDetail,
};
