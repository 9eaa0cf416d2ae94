// ABOUTME: Route module organization for the gym coach HTTP API
// ABOUTME: Groups handlers by domain and assembles the versioned API router
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Route module for the gym coach server
//!
//! Each domain module owns its route table and thin handlers that delegate to
//! the database, token manager, or workout service.

use std::sync::Arc;

use axum::Router;

use crate::{constants::endpoints::API_V1, resources::ServerResources};

/// Registration, login, and token refresh
pub mod auth;
/// Liveness and readiness probes
pub mod health;
/// JSON request body extraction
pub mod json_body;
/// Fitness profile CRUD
pub mod profile;
/// Workout generation and history
pub mod workouts;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Login request payload
pub use auth::LoginRequest;
/// Token refresh request payload
pub use auth::RefreshTokenRequest;
/// Registration request payload
pub use auth::RegisterRequest;
/// JSON body extractor with enveloped errors
pub use json_body::JsonBody;
/// Health route handlers
pub use health::HealthRoutes;
/// Profile route handlers
pub use profile::ProfileRoutes;
/// Workout generation request payload
pub use workouts::GenerateWorkoutRequest;
/// Workout route handlers
pub use workouts::WorkoutRoutes;

/// Every API route nested under the versioned prefix
pub fn api_router(resources: &Arc<ServerResources>) -> Router {
    let api = Router::new()
        .merge(AuthRoutes::routes(Arc::clone(resources)))
        .merge(ProfileRoutes::routes(Arc::clone(resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(resources)))
        .merge(HealthRoutes::routes(Arc::clone(resources)));

    Router::new().nest(API_V1, api)
}
