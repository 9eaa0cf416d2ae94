// ABOUTME: Fitness profile model with closed objective and experience enums
// ABOUTME: Create and partial-update requests validate biometric and training ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::profile::{
    MAX_AGE, MAX_HEIGHT_CM, MAX_TRAINING_DAYS, MAX_WEIGHT_KG, MIN_AGE, MIN_TRAINING_DAYS,
};
use crate::errors::{AppError, AppResult};

/// Training goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessObjective {
    /// Muscle gain
    Hypertrophy,
    /// Fat loss
    Cutting,
    /// Maximal strength
    Strength,
    /// Simultaneous fat loss and muscle gain
    Recomposition,
}

impl FitnessObjective {
    /// Storage and wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hypertrophy => "hypertrophy",
            Self::Cutting => "cutting",
            Self::Strength => "strength",
            Self::Recomposition => "recomposition",
        }
    }
}

impl fmt::Display for FitnessObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessObjective {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hypertrophy" => Ok(Self::Hypertrophy),
            "cutting" => Ok(Self::Cutting),
            "strength" => Ok(Self::Strength),
            "recomposition" => Ok(Self::Recomposition),
            other => Err(AppError::invalid_input(format!(
                "Unknown fitness objective: {other}"
            ))),
        }
    }
}

/// Training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    /// Less than a year of structured training
    Beginner,
    /// One to three years
    Intermediate,
    /// Several years of consistent training
    Advanced,
}

impl ExperienceLevel {
    /// Storage and wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(AppError::invalid_input(format!(
                "Unknown experience level: {other}"
            ))),
        }
    }
}

/// A user's fitness profile, one per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning user
    pub user_id: Uuid,
    /// Age in years
    pub age: u32,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimetres
    pub height_cm: f64,
    /// Training goal
    pub objective: FitnessObjective,
    /// Training experience
    pub experience_level: ExperienceLevel,
    /// Planned sessions per week
    pub training_days_per_week: u32,
    /// Equipment the user has access to
    pub equipment_available: Vec<String>,
    /// Past or current injuries
    pub injury_history: Vec<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a profile
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateProfileRequest {
    /// Age in years
    pub age: u32,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimetres
    pub height_cm: f64,
    /// Training goal
    pub objective: FitnessObjective,
    /// Training experience
    pub experience_level: ExperienceLevel,
    /// Planned sessions per week
    pub training_days_per_week: u32,
    /// Equipment the user has access to, at least one item
    pub equipment_available: Vec<String>,
    /// Past or current injuries
    #[serde(default)]
    pub injury_history: Option<Vec<String>>,
}

impl CreateProfileRequest {
    /// Validate ranges and build the profile for `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if any field is outside its accepted range
    pub fn into_profile(self, user_id: Uuid) -> AppResult<UserProfile> {
        validate_age(self.age)?;
        validate_weight(self.weight_kg)?;
        validate_height(self.height_cm)?;
        validate_training_days(self.training_days_per_week)?;
        validate_equipment(&self.equipment_available)?;

        let now = Utc::now();
        Ok(UserProfile {
            user_id,
            age: self.age,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            objective: self.objective,
            experience_level: self.experience_level,
            training_days_per_week: self.training_days_per_week,
            equipment_available: self.equipment_available,
            injury_history: self.injury_history.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Request body for a partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateProfileRequest {
    /// Age in years
    pub age: Option<u32>,
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimetres
    pub height_cm: Option<f64>,
    /// Training goal
    pub objective: Option<FitnessObjective>,
    /// Training experience
    pub experience_level: Option<ExperienceLevel>,
    /// Planned sessions per week
    pub training_days_per_week: Option<u32>,
    /// Equipment the user has access to
    pub equipment_available: Option<Vec<String>>,
    /// Past or current injuries
    pub injury_history: Option<Vec<String>>,
}

impl UpdateProfileRequest {
    /// Validate the supplied fields and apply them to `profile`
    ///
    /// Validation runs before any field is written, so a rejected update leaves the
    /// profile untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if any supplied field is outside its accepted range
    pub fn apply_to(self, profile: &mut UserProfile) -> AppResult<()> {
        if let Some(age) = self.age {
            validate_age(age)?;
        }
        if let Some(weight) = self.weight_kg {
            validate_weight(weight)?;
        }
        if let Some(height) = self.height_cm {
            validate_height(height)?;
        }
        if let Some(days) = self.training_days_per_week {
            validate_training_days(days)?;
        }
        if let Some(equipment) = &self.equipment_available {
            validate_equipment(equipment)?;
        }

        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(weight) = self.weight_kg {
            profile.weight_kg = weight;
        }
        if let Some(height) = self.height_cm {
            profile.height_cm = height;
        }
        if let Some(objective) = self.objective {
            profile.objective = objective;
        }
        if let Some(level) = self.experience_level {
            profile.experience_level = level;
        }
        if let Some(days) = self.training_days_per_week {
            profile.training_days_per_week = days;
        }
        if let Some(equipment) = self.equipment_available {
            profile.equipment_available = equipment;
        }
        if let Some(injuries) = self.injury_history {
            profile.injury_history = injuries;
        }
        profile.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_age(age: u32) -> AppResult<()> {
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(AppError::out_of_range("age", MIN_AGE, MAX_AGE))
    }
}

fn validate_weight(weight_kg: f64) -> AppResult<()> {
    if weight_kg > 0.0 && weight_kg <= MAX_WEIGHT_KG {
        Ok(())
    } else {
        Err(AppError::out_of_range("weight_kg", "0 (exclusive)", MAX_WEIGHT_KG))
    }
}

fn validate_height(height_cm: f64) -> AppResult<()> {
    if height_cm > 0.0 && height_cm <= MAX_HEIGHT_CM {
        Ok(())
    } else {
        Err(AppError::out_of_range("height_cm", "0 (exclusive)", MAX_HEIGHT_CM))
    }
}

fn validate_training_days(days: u32) -> AppResult<()> {
    if (MIN_TRAINING_DAYS..=MAX_TRAINING_DAYS).contains(&days) {
        Ok(())
    } else {
        Err(AppError::out_of_range(
            "training_days_per_week",
            MIN_TRAINING_DAYS,
            MAX_TRAINING_DAYS,
        ))
    }
}

fn validate_equipment(equipment: &[String]) -> AppResult<()> {
    if equipment.is_empty() {
        Err(AppError::invalid_input(
            "equipment_available must contain at least one item",
        ))
    } else {
        Ok(())
    }
}
