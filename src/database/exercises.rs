// ABOUTME: Exercise library persistence and seeding
// ABOUTME: Library rows are reference data, written only by the seeding path
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Exercise;

impl Database {
    pub(super) async fn migrate_exercises(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                muscle_groups TEXT NOT NULL,
                equipment TEXT NOT NULL,
                safety_notes TEXT NOT NULL,
                technique_cues TEXT NOT NULL,
                volume_guidelines TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create exercises table: {e}")))?;
        Ok(())
    }

    /// Insert library entries, returning how many rows were written
    ///
    /// Existing names are skipped unless `replace` is set, in which case their
    /// rows are overwritten with the supplied content.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any insert fails; no rows are kept
    /// on failure
    pub async fn seed_exercises(&self, exercises: &[Exercise], replace: bool) -> AppResult<u64> {
        let statement = if replace {
            r"
            INSERT OR REPLACE INTO exercises
                (name, muscle_groups, equipment, safety_notes, technique_cues, volume_guidelines)
            VALUES ($1, $2, $3, $4, $5, $6)
            "
        } else {
            r"
            INSERT OR IGNORE INTO exercises
                (name, muscle_groups, equipment, safety_notes, technique_cues, volume_guidelines)
            VALUES ($1, $2, $3, $4, $5, $6)
            "
        };

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin seed transaction: {e}")))?;

        let mut written = 0;
        for exercise in exercises {
            let result = sqlx::query(statement)
                .bind(&exercise.name)
                .bind(serde_json::to_string(&exercise.muscle_groups)?)
                .bind(serde_json::to_string(&exercise.equipment)?)
                .bind(&exercise.safety_notes)
                .bind(serde_json::to_string(&exercise.technique_cues)?)
                .bind(serde_json::to_string(&exercise.volume_guidelines)?)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to seed exercise '{}': {e}", exercise.name))
                })?;
            written += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit exercise seed: {e}")))?;

        info!(
            supplied = exercises.len(),
            written, replace, "Exercise library seeded"
        );
        Ok(written)
    }

    /// All library entries in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row holds invalid JSON
    pub async fn list_exercises(&self) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query(
            r"
            SELECT name, muscle_groups, equipment, safety_notes, technique_cues, volume_guidelines
            FROM exercises
            ORDER BY id
            ",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        rows.iter().map(row_to_exercise).collect()
    }

    /// Number of library entries
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_exercises(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM exercises")
            .fetch_one(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to count exercises: {e}")))?;
        Ok(row.get("total"))
    }
}

fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    let muscle_groups: String = row.get("muscle_groups");
    let equipment: String = row.get("equipment");
    let technique_cues: String = row.get("technique_cues");
    let volume_guidelines: String = row.get("volume_guidelines");

    Ok(Exercise {
        name: row.get("name"),
        muscle_groups: serde_json::from_str(&muscle_groups)?,
        equipment: serde_json::from_str(&equipment)?,
        safety_notes: row.get("safety_notes"),
        technique_cues: serde_json::from_str(&technique_cues)?,
        volume_guidelines: serde_json::from_str(&volume_guidelines)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::database::test_utils::create_test_db;
    use crate::models::{Exercise, VolumeGuidelines};

    fn exercise(name: &str, notes: &str) -> Exercise {
        Exercise {
            name: name.to_owned(),
            muscle_groups: vec!["pectoral".to_owned()],
            equipment: vec!["barbell".to_owned(), "bench".to_owned()],
            safety_notes: notes.to_owned(),
            technique_cues: vec!["Escápulas retraídas".to_owned()],
            volume_guidelines: VolumeGuidelines {
                beginner: "3x8-12".to_owned(),
                intermediate: "4x6-10".to_owned(),
                advanced: "4-5x5-8".to_owned(),
            },
        }
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = create_test_db().await;
        let library = vec![exercise("Press Banca", "a"), exercise("Press Inclinado", "b")];

        assert_eq!(db.seed_exercises(&library, false).await.unwrap(), 2);
        assert_eq!(db.seed_exercises(&library, false).await.unwrap(), 0);
        assert_eq!(db.count_exercises().await.unwrap(), 2);

        let listed = db.list_exercises().await.unwrap();
        assert_eq!(listed, library);
    }

    #[tokio::test]
    async fn test_replace_overwrites_existing_rows() {
        let db = create_test_db().await;
        db.seed_exercises(&[exercise("Press Banca", "old")], false)
            .await
            .unwrap();
        db.seed_exercises(&[exercise("Press Banca", "new")], true)
            .await
            .unwrap();

        let listed = db.list_exercises().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].safety_notes, "new");
    }

    #[tokio::test]
    async fn test_empty_library() {
        let db = create_test_db().await;
        assert!(db.list_exercises().await.unwrap().is_empty());
        assert_eq!(db.count_exercises().await.unwrap(), 0);
    }
}
