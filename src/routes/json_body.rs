// ABOUTME: JSON request body extraction that reports failures through the API error envelope
// ABOUTME: Malformed, mistyped, or incomplete bodies become INVALID_INPUT responses
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// `Json<T>` whose rejection is an [`AppError`] instead of axum's plain-text 4xx
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T: DeserializeOwned> JsonBody<T> {
    /// Parse an already-buffered body
    ///
    /// Protected handlers buffer the body and authenticate before parsing, so
    /// an anonymous caller gets 401 regardless of what it sent.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if the bytes are not JSON of type `T`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        Json::<T>::from_bytes(bytes)
            .map(|Json(value)| Self(value))
            .map_err(rejection_to_error)
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(rejection_to_error)
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
}
