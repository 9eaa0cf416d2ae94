// ABOUTME: User account persistence with unique email enforcement
// ABOUTME: Create and lookup by id or email
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{format_timestamp, is_unique_violation, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::User;

impl Database {
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;
        Ok(())
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the email is taken, or a database error
    pub async fn create_user(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(format_timestamp(user.created_at))
        .execute(self.pool())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_exists("Email already registered")
            } else {
                AppError::database(format!("Failed to create user: {e}"))
            }
        })?;
        Ok(())
    }

    /// Look up a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(user_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Look up a user by email (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email.to_lowercase())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");
    Ok(User {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid stored user id '{id}': {e}")))?,
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: parse_timestamp(&created_at)?,
    })
}
