// ABOUTME: SQLite database management for users, profiles, exercises, and workout plans
// ABOUTME: Owns the connection pool and creates the schema on startup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Database Management
//!
//! A single [`Database`] handle wraps the `SQLite` pool. Each table has its own
//! module adding methods to `Database`; JSON-shaped columns (equipment lists,
//! exercise blocks) are stored as TEXT and decoded on read.

mod exercises;
mod profiles;
mod users;
mod workout_plans;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Database manager shared by every request
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open the database at `url` and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::config(format!("Cannot create {}: {e}", parent.display()))
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every in-memory connection is its own database, so the pool must hold exactly one
        let max_connections = if url.is_memory() { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE TABLE` statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_profiles().await?;
        self.migrate_exercises().await?;
        self.migrate_workout_plans().await?;
        debug!("Database migrations applied");
        Ok(())
    }

    /// Verify the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database health check failed: {e}")))?;
        Ok(())
    }
}

/// Fixed-width RFC 3339 so TEXT ordering matches chronological ordering
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp '{raw}': {e}")))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_error) if db_error.is_unique_violation())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_sort_lexically() {
        let earlier = DateTime::from_timestamp(1_700_000_000, 5_000).unwrap();
        let later = DateTime::from_timestamp(1_700_000_000, 900_000_000).unwrap();
        assert!(format_timestamp(earlier) < format_timestamp(later));
        assert_eq!(parse_timestamp(&format_timestamp(later)).unwrap(), later);
    }

    #[tokio::test]
    async fn test_memory_database_migrates_and_answers() {
        let db = test_utils::create_test_db().await;
        db.health_check().await.unwrap();
        // Running migrations twice is harmless
        db.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_dir_and_persists() {
        use crate::models::User;

        let dir = tempfile::tempdir().unwrap();
        let url = DatabaseUrl::SQLite {
            path: dir.path().join("nested").join("coach.db"),
        };

        let user = User::new("persist@example.com".to_owned(), "hash".to_owned());
        {
            let db = Database::new(&url).await.unwrap();
            db.create_user(&user).await.unwrap();
            db.pool().close().await;
        }

        let reopened = Database::new(&url).await.unwrap();
        let found = reopened
            .get_user_by_email("persist@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
    }
}
