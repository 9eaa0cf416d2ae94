// ABOUTME: Validation bounds and limits for profiles, plans, and generation
// ABOUTME: Pure data constants shared between the server crate and its tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Bounds are grouped by the entity they constrain.

/// Fitness profile bounds
pub mod profile {
    /// Minimum user age in years
    pub const MIN_AGE: u32 = 13;
    /// Maximum user age in years
    pub const MAX_AGE: u32 = 120;
    /// Maximum body weight in kilograms (exclusive lower bound is zero)
    pub const MAX_WEIGHT_KG: f64 = 500.0;
    /// Maximum height in centimetres (exclusive lower bound is zero)
    pub const MAX_HEIGHT_CM: f64 = 300.0;
    /// Minimum training days per week
    pub const MIN_TRAINING_DAYS: u32 = 1;
    /// Maximum training days per week
    pub const MAX_TRAINING_DAYS: u32 = 7;
}

/// Generated plan bounds
pub mod plan {
    /// Minimum number of exercise blocks in a plan
    pub const MIN_BLOCKS: usize = 3;
    /// Maximum number of exercise blocks in a plan
    pub const MAX_BLOCKS: usize = 15;
    /// Target muscle label length bounds (characters)
    pub const MUSCLE_LEN: (usize, usize) = (3, 50);
    /// Exercise name length bounds (characters)
    pub const EXERCISE_LEN: (usize, usize) = (3, 100);
    /// Set count bounds
    pub const SETS: (i64, i64) = (1, 10);
    /// Target RPE bounds
    pub const RPE: (i64, i64) = (1, 10);
    /// Rest interval bounds in seconds
    pub const REST_SECONDS: (i64, i64) = (30, 600);
    /// Safety note length bounds (characters)
    pub const SAFETY_NOTES_LEN: (usize, usize) = (10, 500);
    /// Rep range pattern, a single count or a `low-high` range
    pub const REP_RANGE_PATTERN: &str = r"^\d{1,2}(-\d{1,2})?$";
    /// Disclaimer used when the model omits one
    pub const DEFAULT_MEDICAL_DISCLAIMER: &str = "Consulta con un profesional de la salud antes de iniciar cualquier programa de ejercicio. Detente inmediatamente si experimentas dolor.";
}

/// Fatigue score bounds
pub mod fatigue {
    /// Lowest accepted fatigue score
    pub const MIN_SCORE: u8 = 0;
    /// Highest accepted fatigue score
    pub const MAX_SCORE: u8 = 100;
    /// Score used when the caller does not supply one
    pub const DEFAULT_SCORE: u8 = 50;
}

/// Workout generation limits
pub mod generation {
    /// Maximum number of exercises rendered into a prompt
    pub const MAX_PROMPT_EXERCISES: usize = 50;
    /// Number of plans returned by the history endpoint
    pub const HISTORY_LIMIT: u32 = 30;
}
