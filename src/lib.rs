// ABOUTME: Main library entry point for the gym coach API server
// ABOUTME: Profiles, token auth, and language-model backed workout plan generation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Gym Coach Server
//!
//! An HTTP API that stores each user's training profile and asks a language
//! model for a workout plan tailored to that profile and the user's current
//! fatigue. Generated plans are validated against a strict shape before they
//! are stored.
//!
//! ## Architecture
//!
//! - **Rate limiting**: sliding-window counters behind a pluggable store
//! - **Exercise library**: static reference data seeded into the database
//! - **Workouts**: prompt building, model call, response validation, persistence
//! - **Routes**: thin axum handlers over [`resources::ServerResources`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gym_coach_server::{config::ServerConfig, database::Database, resources::ServerResources};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(ServerConfig::from_env()?);
//!     let database = Database::new(&config.database.url).await?;
//!     let resources = Arc::new(ServerResources::from_config(database, config).await?);
//!     gym_coach_server::server::run(resources).await
//! }
//! ```

/// JWT issuance and validation, password hashing
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Application constants and defaults
pub mod constants;

/// `SQLite` persistence for users, profiles, exercises, and plans
pub mod database;

/// Error types shared with `gym-coach-core`
pub mod errors;

/// Built-in exercise reference data
pub mod exercise_library;

/// Language model provider abstraction
pub mod llm;

/// Structured logging setup and event helpers
pub mod logging;

/// Authentication, CORS, and rate-limit middleware
pub mod middleware;

/// Domain models shared with `gym-coach-core`
pub mod models;

/// Request rate limiting
pub mod rate_limiting;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Workout plan generation pipeline
pub mod workouts;
