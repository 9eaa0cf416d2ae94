// ABOUTME: Workout plan generation pipeline
// ABOUTME: Prompt building, output extraction, validation, gateway, and orchestration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Workout Generation
//!
//! ```text
//! WorkoutService ── profile + exercise library (Database)
//!       │
//!       └── WorkoutGateway ── build_workout_prompt ── LlmProvider
//!                                                        │
//!                          parse_plan ◄── extract_payload ┘
//! ```
//!
//! Extraction and validation are separate stages so each can be tested on
//! plain strings. Retries are never attempted; the deadline lives in
//! [`WorkoutService`].

mod extraction;
mod gateway;
mod orchestrator;
mod prompt;
mod validation;

pub use extraction::extract_payload;
pub use gateway::{GenerationError, LlmWorkoutGateway, WorkoutGateway};
pub use orchestrator::{WorkoutError, WorkoutService};
pub use prompt::{build_workout_prompt, FatigueTier};
pub use validation::{parse_plan, PlanValidationError};
