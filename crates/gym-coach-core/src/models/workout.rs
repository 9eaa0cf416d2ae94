// ABOUTME: Generated workout plan types, fatigue score newtype, and persisted plan records
// ABOUTME: Serde field names follow the Spanish JSON contract shared with the language model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::constants::fatigue::{DEFAULT_SCORE, MAX_SCORE, MIN_SCORE};

/// Fatigue score outside `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("fatigue score must be between 0 and 100, got {0}")]
pub struct FatigueScoreError(pub i64);

/// Self-reported fatigue, always in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct FatigueScore(u8);

impl FatigueScore {
    /// Validate and wrap a raw score
    ///
    /// # Errors
    ///
    /// Returns [`FatigueScoreError`] if `value` is outside `0..=100`
    pub fn new(value: i64) -> Result<Self, FatigueScoreError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (MIN_SCORE..=MAX_SCORE).contains(v))
            .map(Self)
            .ok_or(FatigueScoreError(value))
    }

    /// Raw score
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for FatigueScore {
    fn default() -> Self {
        Self(DEFAULT_SCORE)
    }
}

impl TryFrom<i64> for FatigueScore {
    type Error = FatigueScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FatigueScore> for u8 {
    fn from(score: FatigueScore) -> Self {
        score.0
    }
}

impl fmt::Display for FatigueScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One exercise in a generated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseBlock {
    /// Target muscle
    #[serde(rename = "musculo")]
    pub muscle: String,
    /// Exercise name
    #[serde(rename = "ejercicio")]
    pub exercise: String,
    /// Set count
    #[serde(rename = "series")]
    pub sets: u8,
    /// Rep count or range, e.g. `"10"` or `"8-12"`
    #[serde(rename = "repeticiones")]
    pub reps: String,
    /// Target rate of perceived exertion
    #[serde(rename = "rpe_objetivo")]
    pub target_rpe: u8,
    /// Rest between sets in seconds
    #[serde(rename = "descanso_segundos")]
    pub rest_seconds: u16,
    /// Technique and safety notes
    #[serde(rename = "notas_seguridad")]
    pub safety_notes: String,
}

/// A validated plan as produced by the language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    /// Exercise blocks in session order
    #[serde(rename = "workout_plan")]
    pub blocks: Vec<ExerciseBlock>,
    /// Medical disclaimer shown with the plan
    #[serde(rename = "disclaimer_medico")]
    pub medical_disclaimer: String,
    /// Fatigue score the model reports having used
    #[serde(rename = "fatiga_score_usado")]
    pub fatigue_score_used: FatigueScore,
    /// Free-text description of the fatigue adjustment
    #[serde(rename = "ajuste_aplicado")]
    pub adjustment_applied: Option<String>,
}

/// A generated plan persisted for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRecord {
    /// Plan ID
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Validated plan content
    pub plan: GeneratedPlan,
    /// Fatigue score the request was generated with
    pub fatigue_score_used: FatigueScore,
    /// Generation time
    pub created_at: DateTime<Utc>,
}

/// History list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: Uuid,
    /// Generation time
    pub created_at: DateTime<Utc>,
    /// Fatigue score the request was generated with
    pub fatigue_score_used: FatigueScore,
    /// Number of exercise blocks
    pub exercise_count: usize,
}

impl From<&PlanRecord> for PlanSummary {
    fn from(record: &PlanRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            fatigue_score_used: record.fatigue_score_used,
            exercise_count: record.plan.blocks.len(),
        }
    }
}

/// Full plan as returned to the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlanDetail {
    /// Plan ID
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Exercise blocks
    pub workout_plan: Vec<ExerciseBlock>,
    /// Medical disclaimer
    pub disclaimer_medico: String,
    /// Fatigue score stored with the plan record
    pub fatiga_score_usado: FatigueScore,
    /// Fatigue adjustment note
    pub ajuste_aplicado: Option<String>,
    /// Generation time
    pub created_at: DateTime<Utc>,
}

impl From<PlanRecord> for WorkoutPlanDetail {
    fn from(record: PlanRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            workout_plan: record.plan.blocks,
            disclaimer_medico: record.plan.medical_disclaimer,
            fatiga_score_usado: record.fatigue_score_used,
            ajuste_aplicado: record.plan.adjustment_applied,
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatigue_score_bounds() {
        assert_eq!(FatigueScore::new(0).unwrap().value(), 0);
        assert_eq!(FatigueScore::new(100).unwrap().value(), 100);
        assert_eq!(FatigueScore::new(101), Err(FatigueScoreError(101)));
        assert_eq!(FatigueScore::new(-1), Err(FatigueScoreError(-1)));
        assert_eq!(FatigueScore::default().value(), 50);
    }

    #[test]
    fn test_fatigue_score_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<FatigueScore>("45").is_ok());
        assert!(serde_json::from_str::<FatigueScore>("150").is_err());
    }

    #[test]
    fn test_plan_uses_spanish_keys() {
        let plan = GeneratedPlan {
            blocks: vec![ExerciseBlock {
                muscle: "pectoral".to_owned(),
                exercise: "Press Banca con Barra".to_owned(),
                sets: 4,
                reps: "8-12".to_owned(),
                target_rpe: 7,
                rest_seconds: 120,
                safety_notes: "Escápulas retraídas".to_owned(),
            }],
            medical_disclaimer: "Consulta".to_owned(),
            fatigue_score_used: FatigueScore::new(45).unwrap(),
            adjustment_applied: None,
        };
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["workout_plan"][0]["musculo"], "pectoral");
        assert_eq!(value["workout_plan"][0]["descanso_segundos"], 120);
        assert_eq!(value["fatiga_score_usado"], 45);
        assert!(value["ajuste_aplicado"].is_null());
    }
}
