// ABOUTME: Strict parsing and range validation of model-produced workout plans
// ABOUTME: Turns raw JSON text into a typed GeneratedPlan or a descriptive error
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::LazyLock;

use gym_coach_core::constants::plan::{
    DEFAULT_MEDICAL_DISCLAIMER, EXERCISE_LEN, MAX_BLOCKS, MIN_BLOCKS, MUSCLE_LEN, REP_RANGE_PATTERN,
    REST_SECONDS, RPE, SAFETY_NOTES_LEN, SETS,
};
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{ExerciseBlock, FatigueScore, GeneratedPlan};

static REP_RANGE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(REP_RANGE_PATTERN).ok());

/// Why a model response was rejected
#[derive(Debug, Error)]
pub enum PlanValidationError {
    /// Text is not JSON of the expected shape
    #[error("response is not valid plan JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Too few or too many exercise blocks
    #[error("plan must contain between {min} and {max} exercises, got {count}", min = MIN_BLOCKS, max = MAX_BLOCKS)]
    BlockCount {
        /// Blocks received
        count: usize,
    },

    /// A block field is outside its accepted range or format
    #[error("exercise {index}: {field} {reason}")]
    InvalidField {
        /// Zero-based block index
        index: usize,
        /// Wire field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Reported fatigue score outside `0..=100`
    #[error("fatiga_score_usado must be between 0 and 100, got {0}")]
    FatigueScore(i64),
}

#[derive(Debug, Deserialize)]
struct RawPlan {
    workout_plan: Vec<RawBlock>,
    #[serde(default)]
    disclaimer_medico: Option<String>,
    fatiga_score_usado: i64,
    #[serde(default)]
    ajuste_aplicado: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    musculo: String,
    ejercicio: String,
    series: i64,
    repeticiones: String,
    rpe_objetivo: i64,
    descanso_segundos: i64,
    notas_seguridad: String,
}

/// Parse and validate a JSON plan payload
///
/// # Errors
///
/// Returns [`PlanValidationError`] if the payload is not JSON of the plan
/// shape or any value violates its bounds
pub fn parse_plan(payload: &str) -> Result<GeneratedPlan, PlanValidationError> {
    let raw: RawPlan = serde_json::from_str(payload)?;

    let count = raw.workout_plan.len();
    if !(MIN_BLOCKS..=MAX_BLOCKS).contains(&count) {
        return Err(PlanValidationError::BlockCount { count });
    }

    let blocks = raw
        .workout_plan
        .into_iter()
        .enumerate()
        .map(|(index, block)| validate_block(index, block))
        .collect::<Result<Vec<_>, _>>()?;

    let fatigue_score_used = FatigueScore::new(raw.fatiga_score_usado)
        .map_err(|e| PlanValidationError::FatigueScore(e.0))?;

    Ok(GeneratedPlan {
        blocks,
        medical_disclaimer: raw
            .disclaimer_medico
            .unwrap_or_else(|| DEFAULT_MEDICAL_DISCLAIMER.to_owned()),
        fatigue_score_used,
        adjustment_applied: raw.ajuste_aplicado,
    })
}

fn validate_block(index: usize, block: RawBlock) -> Result<ExerciseBlock, PlanValidationError> {
    let invalid = |field: &'static str, reason: String| PlanValidationError::InvalidField {
        index,
        field,
        reason,
    };

    check_length(&block.musculo, MUSCLE_LEN).map_err(|r| invalid("musculo", r))?;
    check_length(&block.ejercicio, EXERCISE_LEN).map_err(|r| invalid("ejercicio", r))?;
    check_length(&block.notas_seguridad, SAFETY_NOTES_LEN)
        .map_err(|r| invalid("notas_seguridad", r))?;

    let sets = check_range(block.series, SETS).map_err(|r| invalid("series", r))?;
    let rpe = check_range(block.rpe_objetivo, RPE).map_err(|r| invalid("rpe_objetivo", r))?;
    let rest =
        check_range(block.descanso_segundos, REST_SECONDS).map_err(|r| invalid("descanso_segundos", r))?;

    let rep_range_ok = REP_RANGE
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(&block.repeticiones));
    if !rep_range_ok {
        return Err(invalid(
            "repeticiones",
            format!("'{}' is not a count or range like 8-12", block.repeticiones),
        ));
    }

    Ok(ExerciseBlock {
        muscle: block.musculo,
        exercise: block.ejercicio,
        sets: u8::try_from(sets).map_err(|e| invalid("series", e.to_string()))?,
        reps: block.repeticiones,
        target_rpe: u8::try_from(rpe).map_err(|e| invalid("rpe_objetivo", e.to_string()))?,
        rest_seconds: u16::try_from(rest)
            .map_err(|e| invalid("descanso_segundos", e.to_string()))?,
        safety_notes: block.notas_seguridad,
    })
}

fn check_length(value: &str, (min, max): (usize, usize)) -> Result<(), String> {
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(format!("length must be between {min} and {max}, got {len}"))
    }
}

fn check_range(value: i64, (min, max): (i64, i64)) -> Result<i64, String> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(format!("must be between {min} and {max}, got {value}"))
    }
}
