// ABOUTME: Route handlers for the caller's fitness profile
// ABOUTME: Read, create once, and partially update the authenticated user's profile
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Profile routes
//!
//! All endpoints require an access token; a user can only see and edit their
//! own profile.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use tracing::info;

use crate::{
    errors::{AppError, ErrorCode},
    middleware::AuthenticatedUser,
    models::{CreateProfileRequest, UpdateProfileRequest},
    resources::ServerResources,
    routes::JsonBody,
};

/// Profile routes implementation
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/profile/me", get(Self::handle_get))
            .route("/profile/create", post(Self::handle_create))
            .route("/profile/update", put(Self::handle_update))
            .with_state(resources)
    }

    async fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthenticatedUser, AppError> {
        resources.auth_middleware.authenticate_headers(headers).await
    }

    /// Handle GET /profile/me
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let profile = resources
            .database
            .get_profile(auth.user_id)
            .await?
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ResourceNotFound,
                    "Profile not found. Please create profile first.",
                )
            })?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle POST /profile/create
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let JsonBody(body) = JsonBody::<CreateProfileRequest>::from_bytes(&body)?;

        let profile = body.into_profile(auth.user_id)?;
        resources.database.create_profile(&profile).await?;
        info!(user_id = %auth.user_id, "Profile created");

        Ok((StatusCode::CREATED, Json(profile)).into_response())
    }

    /// Handle PUT /profile/update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let JsonBody(body) = JsonBody::<UpdateProfileRequest>::from_bytes(&body)?;

        let mut profile = resources
            .database
            .get_profile(auth.user_id)
            .await?
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ResourceNotFound,
                    "User profile not found. Use POST /create first.",
                )
            })?;

        body.apply_to(&mut profile)?;
        resources.database.update_profile(&profile).await?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
