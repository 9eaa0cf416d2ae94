// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, test resources, and a scripted LLM provider
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `gym_coach_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use axum::Router;
use gym_coach_server::{
    config::{
        AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LlmConfig,
        RateLimitConfig, ServerConfig,
    },
    database::Database,
    errors::AppError,
    exercise_library::default_exercises,
    llm::{ChatRequest, ChatResponse, LlmProvider},
    rate_limiting::RateLimiter,
    resources::ServerResources,
    server::build_router,
};
use serde_json::{json, Value};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration suitable for tests: in-memory database, short generation deadline
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        http_port: 0,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
            seed_exercises: false,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret-with-enough-entropy".to_owned(),
            access_token_expire_minutes: 60,
            refresh_token_expire_days: 30,
        },
        llm: LlmConfig {
            api_key: "test-key".to_owned(),
            model: "test-model".to_owned(),
            max_tokens: 4000,
            temperature: 0.7,
            base_url: "http://127.0.0.1:9".to_owned(),
            generation_timeout_secs: 5,
        },
        rate_limit: RateLimitConfig::default(),
        cors: CorsConfig::default(),
    }
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new(&DatabaseUrl::Memory)
        .await
        .expect("in-memory database")
}

/// Test database with the built-in exercise library loaded
pub async fn create_seeded_database() -> Database {
    let database = create_test_database().await;
    database
        .seed_exercises(&default_exercises(), false)
        .await
        .expect("seed exercises");
    database
}

/// LLM provider that answers every request with a fixed text and records prompts
pub struct ScriptedLlmProvider {
    reply: Mutex<Result<String, String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlmProvider {
    /// Provider replying with `text`
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Ok(text.into())),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Provider failing every call with an upstream error
    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Err(message.into())),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlmProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.clone())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);

        let reply = self.reply.lock().unwrap().clone();
        reply
            .map(|content| ChatResponse {
                content,
                model: "test-model".to_owned(),
                usage: None,
                finish_reason: Some("end_turn".to_owned()),
            })
            .map_err(|message| AppError::external_service("scripted", message))
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Server resources over `database` and `provider` with an in-memory limiter
pub fn create_test_resources(
    database: Database,
    provider: Arc<dyn LlmProvider>,
) -> Arc<ServerResources> {
    Arc::new(ServerResources::with_provider(
        database,
        Arc::new(test_config()),
        RateLimiter::in_memory(),
        provider,
    ))
}

/// Full application router over seeded resources
pub async fn create_test_app(provider: Arc<dyn LlmProvider>) -> (Router, Arc<ServerResources>) {
    create_test_app_with_config(provider, test_config()).await
}

/// Full application router over seeded resources with a custom configuration
pub async fn create_test_app_with_config(
    provider: Arc<dyn LlmProvider>,
    config: ServerConfig,
) -> (Router, Arc<ServerResources>) {
    let database = create_seeded_database().await;
    let resources = Arc::new(ServerResources::with_provider(
        database,
        Arc::new(config),
        RateLimiter::in_memory(),
        provider,
    ));
    (build_router(&resources), resources)
}

/// One valid plan block
pub fn plan_block(index: usize) -> Value {
    json!({
        "musculo": "Pecho",
        "ejercicio": format!("Press de banca variante {index}"),
        "series": 4,
        "repeticiones": "8-12",
        "rpe_objetivo": 7,
        "descanso_segundos": 120,
        "notas_seguridad": "Mantener escápulas retraídas durante todo el movimiento"
    })
}

/// A model reply holding a plan with `blocks` exercises
pub fn plan_json(blocks: usize, fatigue: u8) -> String {
    json!({
        "workout_plan": (0..blocks).map(plan_block).collect::<Vec<_>>(),
        "disclaimer_medico": "Consulta a un profesional antes de iniciar cualquier rutina.",
        "fatiga_score_usado": fatigue,
        "ajuste_aplicado": "Volumen mantenido"
    })
    .to_string()
}

/// The documented sample profile body
pub fn sample_profile() -> Value {
    json!({
        "age": 28,
        "weight_kg": 75.5,
        "height_cm": 178.0,
        "objective": "hypertrophy",
        "experience_level": "intermediate",
        "training_days_per_week": 4,
        "equipment_available": ["barbell", "dumbbells", "bench"],
        "injury_history": ["lower back strain"]
    })
}
