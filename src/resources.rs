// ABOUTME: Centralized resource container for dependency injection into route handlers
// ABOUTME: Holds the database, token manager, rate limiter, workout service, and configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Server Resources
//!
//! Built once at startup and shared as `Arc<ServerResources>` axum state.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::llm::{AnthropicProvider, LlmProvider};
use crate::middleware::AuthMiddleware;
use crate::rate_limiting::RateLimiter;
use crate::workouts::{LlmWorkoutGateway, WorkoutGateway, WorkoutService};

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Persistence
    pub database: Database,
    /// Token issuance and validation
    pub auth_manager: AuthManager,
    /// Bearer authentication for protected routes
    pub auth_middleware: AuthMiddleware,
    /// Register and login throttling
    pub rate_limiter: RateLimiter,
    /// Plan generation and lookup
    pub workouts: WorkoutService,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources around an explicit workout gateway and rate limiter
    #[must_use]
    pub fn new(
        database: Database,
        config: Arc<ServerConfig>,
        rate_limiter: RateLimiter,
        gateway: Arc<dyn WorkoutGateway>,
    ) -> Self {
        let auth_manager = AuthManager::new(&config.auth);
        let auth_middleware = AuthMiddleware::new(auth_manager.clone(), database.clone());
        let workouts = WorkoutService::new(
            database.clone(),
            gateway,
            Duration::from_secs(config.llm.generation_timeout_secs),
        );

        Self {
            database,
            auth_manager,
            auth_middleware,
            rate_limiter,
            workouts,
            config,
        }
    }

    /// Assemble resources using `provider` for generation
    #[must_use]
    pub fn with_provider(
        database: Database,
        config: Arc<ServerConfig>,
        rate_limiter: RateLimiter,
        provider: Arc<dyn LlmProvider>,
    ) -> Self {
        let gateway = Arc::new(LlmWorkoutGateway::new(provider, &config.llm));
        Self::new(database, config, rate_limiter, gateway)
    }

    /// Production wiring: Anthropic provider and the configured limiter backend
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the rate limiter store cannot be built
    pub async fn from_config(database: Database, config: Arc<ServerConfig>) -> AppResult<Self> {
        let provider = Arc::new(AnthropicProvider::new(&config.llm)?);
        let rate_limiter = RateLimiter::from_config(&config.rate_limit).await?;
        Ok(Self::with_provider(database, config, rate_limiter, provider))
    }
}
