// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses env vars into typed server, database, auth, LLM, rate-limit, and CORS configs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration management for production deployment

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{auth, cors, llm, ports, rate_limits};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development, relaxed secret requirements
    #[default]
    Development,
    /// Production, every secret must be configured
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for `PostgreSQL` URLs, which this server does not support
    pub fn parse_url(s: &str) -> Result<Self> {
        if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            return Err(anyhow!("PostgreSQL is not supported, use a sqlite: URL"));
        }
        let path_str = s.strip_prefix("sqlite://").or_else(|| s.strip_prefix("sqlite:")).unwrap_or(s);
        if path_str == ":memory:" {
            Ok(Self::Memory)
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/gym_coach.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Which store backs the rate limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitBackend {
    /// Process-local map, lost on restart
    #[default]
    Memory,
    /// Shared Redis sorted sets
    Redis,
}

impl FromStr for RateLimitBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            other => Err(anyhow!("Unknown RATE_LIMIT_BACKEND: {other}")),
        }
    }
}

/// A fixed-window allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPolicy {
    /// Requests allowed inside the window
    pub max_requests: u32,
    /// Window length in seconds
    pub window_secs: u64,
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Language model configuration
    pub llm: LlmConfig,
    /// Rate limiter configuration
    pub rate_limit: RateLimitConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: DatabaseUrl,
    /// Seed the exercise library on startup when it is empty
    pub seed_exercises: bool,
}

/// JWT configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_expire_days: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .field("refresh_token_expire_days", &self.refresh_token_expire_days)
            .finish()
    }
}

/// Language model configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// Anthropic API key
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Maximum output tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// API base URL
    pub base_url: String,
    /// Seconds the orchestrator waits for a plan
    pub generation_timeout_secs: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .field("generation_timeout_secs", &self.generation_timeout_secs)
            .finish()
    }
}

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Backing store
    pub backend: RateLimitBackend,
    /// Redis URL when `backend` is Redis
    pub redis_url: Option<String>,
    /// Registration allowance per client IP
    pub register: RateLimitPolicy,
    /// Login allowance per email
    pub login: RateLimitPolicy,
    /// Key registration limits on `X-Forwarded-For` / `X-Real-IP` instead of the socket peer.
    /// Only safe behind a reverse proxy that overwrites these headers.
    pub trust_proxy_headers: bool,
}

impl RateLimitConfig {
    /// Longest window among the configured policies
    #[must_use]
    pub fn max_window_secs(&self) -> u64 {
        self.register.window_secs.max(self.login.window_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            backend: RateLimitBackend::Memory,
            redis_url: None,
            register: RateLimitPolicy {
                max_requests: rate_limits::REGISTER_MAX_REQUESTS,
                window_secs: rate_limits::REGISTER_WINDOW_SECS,
            },
            login: RateLimitPolicy {
                max_requests: rate_limits::LOGIN_MAX_REQUESTS,
                window_secs: rate_limits::LOGIN_WINDOW_SECS,
            },
            trust_proxy_headers: false,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins, `*` for any
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: parse_origins(cors::DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or a production secret is missing
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment =
            Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let config = Self {
            host: env_var_or("HOST", ports::DEFAULT_HOST),
            http_port: parse_env("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    "DATABASE_URL",
                    &DatabaseUrl::default().to_connection_string(),
                ))?,
                seed_exercises: parse_env("SEED_EXERCISES_ON_STARTUP", true)?,
            },
            auth: AuthConfig {
                jwt_secret: jwt_secret_from_env(environment)?,
                access_token_expire_minutes: parse_env(
                    "ACCESS_TOKEN_EXPIRE_MINUTES",
                    auth::ACCESS_TOKEN_EXPIRE_MINUTES,
                )?,
                refresh_token_expire_days: parse_env(
                    "REFRESH_TOKEN_EXPIRE_DAYS",
                    auth::REFRESH_TOKEN_EXPIRE_DAYS,
                )?,
            },
            llm: LlmConfig {
                api_key: env::var("ANTHROPIC_API_KEY")
                    .context("ANTHROPIC_API_KEY environment variable is required")?,
                model: env_var_or("LLM_MODEL", llm::DEFAULT_MODEL),
                max_tokens: parse_env("LLM_MAX_TOKENS", llm::DEFAULT_MAX_TOKENS)?,
                temperature: parse_env("LLM_TEMPERATURE", llm::DEFAULT_TEMPERATURE)?,
                base_url: env_var_or("ANTHROPIC_BASE_URL", llm::DEFAULT_ANTHROPIC_BASE_URL),
                generation_timeout_secs: parse_env(
                    "LLM_REQUEST_TIMEOUT_SECS",
                    llm::DEFAULT_GENERATION_TIMEOUT_SECS,
                )?,
            },
            rate_limit: RateLimitConfig {
                backend: env_var_or("RATE_LIMIT_BACKEND", "memory").parse()?,
                redis_url: env::var("REDIS_URL").ok(),
                register: RateLimitPolicy {
                    max_requests: parse_env(
                        "RATE_LIMIT_REGISTER_MAX",
                        rate_limits::REGISTER_MAX_REQUESTS,
                    )?,
                    window_secs: parse_env(
                        "RATE_LIMIT_REGISTER_WINDOW_SECS",
                        rate_limits::REGISTER_WINDOW_SECS,
                    )?,
                },
                login: RateLimitPolicy {
                    max_requests: parse_env(
                        "RATE_LIMIT_LOGIN_MAX",
                        rate_limits::LOGIN_MAX_REQUESTS,
                    )?,
                    window_secs: parse_env(
                        "RATE_LIMIT_LOGIN_WINDOW_SECS",
                        rate_limits::LOGIN_WINDOW_SECS,
                    )?,
                },
                trust_proxy_headers: parse_env("TRUST_PROXY_HEADERS", false)?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_var_or(
                    "CORS_ALLOWED_ORIGINS",
                    cors::DEFAULT_ALLOWED_ORIGINS,
                )),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis backend has no URL or a numeric setting is unusable
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit.backend == RateLimitBackend::Redis && self.rate_limit.redis_url.is_none()
        {
            return Err(anyhow!("RATE_LIMIT_BACKEND=redis requires REDIS_URL"));
        }
        if !(0.0..=1.0).contains(&self.llm.temperature) {
            return Err(anyhow!("LLM_TEMPERATURE must be between 0.0 and 1.0"));
        }
        if self.llm.generation_timeout_secs == 0 {
            return Err(anyhow!("LLM_REQUEST_TIMEOUT_SECS must be positive"));
        }
        if self.auth.access_token_expire_minutes <= 0 || self.auth.refresh_token_expire_days <= 0 {
            return Err(anyhow!("Token lifetimes must be positive"));
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Gym Coach Server Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Model: {} (max_tokens={}, temperature={})\n\
             - Generation Timeout: {}s\n\
             - Rate Limit Backend: {:?} (trust proxy headers: {})\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.database.url,
            self.llm.model,
            self.llm.max_tokens,
            self.llm.temperature,
            self.llm.generation_timeout_secs,
            self.rate_limit.backend,
            self.rate_limit.trust_proxy_headers,
            self.cors.allowed_origins.join(", "),
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}")),
        Err(_) => Ok(default),
    }
}

/// Read the JWT secret, generating an ephemeral one outside production
fn jwt_secret_from_env(environment: Environment) -> Result<String> {
    if let Ok(secret) = env::var("JWT_SECRET_KEY") {
        if !secret.is_empty() {
            return Ok(secret);
        }
    }
    if environment.is_production() {
        return Err(anyhow!("JWT_SECRET_KEY is required in production"));
    }
    warn!("JWT_SECRET_KEY not set, generating an ephemeral secret; tokens will not survive a restart");
    Ok(rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
