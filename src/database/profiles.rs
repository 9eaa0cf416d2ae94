// ABOUTME: Fitness profile persistence, one row per user
// ABOUTME: List-valued fields are stored as JSON text columns
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{format_timestamp, is_unique_violation, parse_timestamp, Database};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::UserProfile;

impl Database {
    pub(super) async fn migrate_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                age INTEGER NOT NULL,
                weight_kg REAL NOT NULL,
                height_cm REAL NOT NULL,
                objective TEXT NOT NULL,
                experience_level TEXT NOT NULL,
                training_days_per_week INTEGER NOT NULL,
                equipment_available TEXT NOT NULL,
                injury_history TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create user_profiles table: {e}")))?;
        Ok(())
    }

    /// Insert a profile for a user who has none yet
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the user already has a profile
    pub async fn create_profile(&self, profile: &UserProfile) -> AppResult<()> {
        let equipment = serde_json::to_string(&profile.equipment_available)?;
        let injuries = serde_json::to_string(&profile.injury_history)?;

        sqlx::query(
            r"
            INSERT INTO user_profiles (
                user_id, age, weight_kg, height_cm, objective, experience_level,
                training_days_per_week, equipment_available, injury_history,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(profile.user_id.to_string())
        .bind(i64::from(profile.age))
        .bind(profile.weight_kg)
        .bind(profile.height_cm)
        .bind(profile.objective.as_str())
        .bind(profile.experience_level.as_str())
        .bind(i64::from(profile.training_days_per_week))
        .bind(equipment)
        .bind(injuries)
        .bind(format_timestamp(profile.created_at))
        .bind(format_timestamp(profile.updated_at))
        .execute(self.pool())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_exists("User profile already exists. Use PUT /update to modify.")
            } else {
                AppError::database(format!("Failed to create profile: {e}"))
            }
        })?;
        Ok(())
    }

    /// Fetch the profile owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            r"
            SELECT user_id, age, weight_kg, height_cm, objective, experience_level,
                   training_days_per_week, equipment_available, injury_history,
                   created_at, updated_at
            FROM user_profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        row.as_ref().map(row_to_profile).transpose()
    }

    /// Overwrite every mutable column of an existing profile
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user has no profile
    pub async fn update_profile(&self, profile: &UserProfile) -> AppResult<()> {
        let equipment = serde_json::to_string(&profile.equipment_available)?;
        let injuries = serde_json::to_string(&profile.injury_history)?;

        let result = sqlx::query(
            r"
            UPDATE user_profiles
            SET age = $1, weight_kg = $2, height_cm = $3, objective = $4,
                experience_level = $5, training_days_per_week = $6,
                equipment_available = $7, injury_history = $8, updated_at = $9
            WHERE user_id = $10
            ",
        )
        .bind(i64::from(profile.age))
        .bind(profile.weight_kg)
        .bind(profile.height_cm)
        .bind(profile.objective.as_str())
        .bind(profile.experience_level.as_str())
        .bind(i64::from(profile.training_days_per_week))
        .bind(equipment)
        .bind(injuries)
        .bind(format_timestamp(profile.updated_at))
        .bind(profile.user_id.to_string())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to update profile: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::new(
                ErrorCode::ResourceNotFound,
                "User profile not found. Use POST /create first.",
            ));
        }
        Ok(())
    }
}

fn row_to_profile(row: &SqliteRow) -> AppResult<UserProfile> {
    let user_id: String = row.get("user_id");
    let age: i64 = row.get("age");
    let days: i64 = row.get("training_days_per_week");
    let objective: String = row.get("objective");
    let level: String = row.get("experience_level");
    let equipment: String = row.get("equipment_available");
    let injuries: String = row.get("injury_history");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(UserProfile {
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::database(format!("Invalid stored user id '{user_id}': {e}")))?,
        age: u32::try_from(age)
            .map_err(|e| AppError::database(format!("Invalid stored age {age}: {e}")))?,
        weight_kg: row.get("weight_kg"),
        height_cm: row.get("height_cm"),
        objective: objective.parse()?,
        experience_level: level.parse()?,
        training_days_per_week: u32::try_from(days)
            .map_err(|e| AppError::database(format!("Invalid stored training days {days}: {e}")))?,
        equipment_available: serde_json::from_str(&equipment)?,
        injury_history: serde_json::from_str(&injuries)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
