// ABOUTME: Generated workout plan persistence with owner-scoped reads
// ABOUTME: Exercise blocks are stored as a JSON text column alongside plan metadata
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{FatigueScore, GeneratedPlan, PlanRecord};

impl Database {
    pub(super) async fn migrate_workout_plans(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                plan_json TEXT NOT NULL,
                fatigue_score_used INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout_plans table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_plans_user_created ON workout_plans(user_id, created_at)",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout_plans index: {e}")))?;
        Ok(())
    }

    /// Persist a generated plan
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn insert_workout_plan(&self, record: &PlanRecord) -> AppResult<()> {
        let plan_json = serde_json::to_string(&record.plan)?;

        sqlx::query(
            r"
            INSERT INTO workout_plans (id, user_id, plan_json, fatigue_score_used, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(plan_json)
        .bind(i64::from(record.fatigue_score_used.value()))
        .bind(format_timestamp(record.created_at))
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to insert workout plan: {e}")))?;
        Ok(())
    }

    /// A user's most recent plans, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_workout_plans(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<PlanRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, plan_json, fatigue_score_used, created_at
            FROM workout_plans
            WHERE user_id = $1
            ORDER BY created_at DESC, rowid DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list workout plans: {e}")))?;

        rows.iter().map(row_to_record).collect()
    }

    /// Fetch one plan if it exists and belongs to `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt
    pub async fn get_workout_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> AppResult<Option<PlanRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, plan_json, fatigue_score_used, created_at
            FROM workout_plans
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(plan_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout plan: {e}")))?;

        row.as_ref().map(row_to_record).transpose()
    }
}

fn row_to_record(row: &SqliteRow) -> AppResult<PlanRecord> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let plan_json: String = row.get("plan_json");
    let fatigue: i64 = row.get("fatigue_score_used");
    let created_at: String = row.get("created_at");

    let plan: GeneratedPlan = serde_json::from_str(&plan_json)?;
    Ok(PlanRecord {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid stored plan id '{id}': {e}")))?,
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::database(format!("Invalid stored user id '{user_id}': {e}")))?,
        plan,
        fatigue_score_used: FatigueScore::new(fatigue)
            .map_err(|e| AppError::database(format!("Invalid stored fatigue score: {e}")))?,
        created_at: parse_timestamp(&created_at)?,
    })
}
