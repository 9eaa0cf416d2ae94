// ABOUTME: Route handlers for workout plan generation and history
// ABOUTME: Delegates to WorkoutService and maps workout failures onto HTTP errors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Workout routes
//!
//! Generation can take tens of seconds while the model responds; the request
//! holds no database lock during that time.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{AppError, ErrorCode},
    middleware::AuthenticatedUser,
    models::{FatigueScore, WorkoutPlanDetail},
    resources::ServerResources,
    routes::JsonBody,
};

/// Request body for plan generation; an empty body uses the default fatigue
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerateWorkoutRequest {
    /// Current fatigue, 0 to 100
    #[serde(default)]
    pub fatigue_score: Option<i64>,
}

impl GenerateWorkoutRequest {
    /// Parse an optional JSON body
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if a non-empty body is not valid JSON
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        JsonBody::from_bytes(body).map(|JsonBody(request)| request)
    }

    /// Validate the requested fatigue score
    ///
    /// # Errors
    ///
    /// Returns an out-of-range error when the score is outside 0 to 100
    pub fn fatigue(&self) -> Result<Option<FatigueScore>, AppError> {
        self.fatigue_score
            .map(FatigueScore::new)
            .transpose()
            .map_err(|_| AppError::out_of_range("fatigue_score", 0, 100))
    }
}

/// Workout routes implementation
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts/generate", post(Self::handle_generate))
            .route("/workouts/history", get(Self::handle_history))
            .route("/workouts/:id", get(Self::handle_get))
            .with_state(resources)
    }

    async fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthenticatedUser, AppError> {
        resources.auth_middleware.authenticate_headers(headers).await
    }

    /// Handle POST /workouts/generate
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let fatigue = GenerateWorkoutRequest::from_body(&body)?.fatigue()?;

        let record = resources
            .workouts
            .generate_workout(auth.user_id, fatigue)
            .await?;

        let response: WorkoutPlanDetail = record.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /workouts/history
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let summaries = resources.workouts.workout_history(auth.user_id).await?;
        Ok((StatusCode::OK, Json(summaries)).into_response())
    }

    /// Handle GET /workouts/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        // Unparseable ids cannot name a stored plan
        let plan_id = Uuid::parse_str(&id).map_err(|_| {
            AppError::new(
                ErrorCode::ResourceNotFound,
                "Workout plan not found or you don't have access",
            )
        })?;

        let record = resources
            .workouts
            .workout_plan(auth.user_id, plan_id)
            .await?;

        let response: WorkoutPlanDetail = record.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_uses_default_fatigue() {
        let request = GenerateWorkoutRequest::from_body(b"").unwrap();
        assert_eq!(request.fatigue().unwrap(), None);

        let request = GenerateWorkoutRequest::from_body(b"{}").unwrap();
        assert_eq!(request.fatigue().unwrap(), None);
    }

    #[test]
    fn test_fatigue_bounds() {
        let ok = GenerateWorkoutRequest::from_body(br#"{"fatigue_score": 100}"#).unwrap();
        assert_eq!(ok.fatigue().unwrap().map(FatigueScore::value), Some(100));

        let high = GenerateWorkoutRequest::from_body(br#"{"fatigue_score": 101}"#).unwrap();
        assert_eq!(high.fatigue().unwrap_err().http_status(), 400);

        let negative = GenerateWorkoutRequest::from_body(br#"{"fatigue_score": -1}"#).unwrap();
        assert!(negative.fatigue().is_err());
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        let err = GenerateWorkoutRequest::from_body(b"{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
