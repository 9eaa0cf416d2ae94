// ABOUTME: Gateway from a profile and fatigue score to a validated plan via a language model
// ABOUTME: One upstream call per generation, then extraction and strict validation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::extraction::extract_payload;
use super::prompt::build_workout_prompt;
use super::validation::{parse_plan, PlanValidationError};
use crate::config::LlmConfig;
use crate::errors::AppError;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{Exercise, FatigueScore, GeneratedPlan, UserProfile};

/// Plan generation failure
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The provider call failed
    #[error("language model request failed: {0}")]
    Upstream(#[source] AppError),

    /// The model answered with text that is not a valid plan
    #[error("invalid plan from language model: {0}")]
    MalformedResponse(#[from] PlanValidationError),

    /// No answer within the caller's deadline
    #[error("language model did not answer within {0} seconds")]
    TimedOut(u64),
}

/// Produces a validated plan for a profile
#[async_trait]
pub trait WorkoutGateway: Send + Sync {
    /// Generate a plan from the given exercise candidates
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the upstream call fails or its output
    /// does not validate
    async fn generate(
        &self,
        profile: &UserProfile,
        fatigue: FatigueScore,
        exercises: &[Exercise],
    ) -> Result<GeneratedPlan, GenerationError>;
}

/// [`WorkoutGateway`] backed by an [`LlmProvider`]
pub struct LlmWorkoutGateway {
    provider: Arc<dyn LlmProvider>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl LlmWorkoutGateway {
    /// Wrap `provider` with the sampling settings from `config`
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: &LlmConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl WorkoutGateway for LlmWorkoutGateway {
    #[instrument(skip_all, fields(provider = self.provider.name(), fatigue = fatigue.value()))]
    async fn generate(
        &self,
        profile: &UserProfile,
        fatigue: FatigueScore,
        exercises: &[Exercise],
    ) -> Result<GeneratedPlan, GenerationError> {
        let prompt = build_workout_prompt(profile, fatigue, exercises);
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)])
            .with_model(self.model.clone())
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(GenerationError::Upstream)?;

        debug!(chars = response.content.len(), "Parsing model output");
        parse_plan(extract_payload(&response.content)).map_err(|e| {
            warn!(error = %e, "Model output rejected");
            GenerationError::from(e)
        })
    }
}
