// ABOUTME: Registered user account model
// ABOUTME: Holds identity, login email, and the stored password hash
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,
    /// Login email, stored lowercase
    pub email: String,
    /// Bcrypt password hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh ID
    #[must_use]
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
