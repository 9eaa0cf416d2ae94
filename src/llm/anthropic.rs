// ABOUTME: Anthropic Messages API provider implementation
// ABOUTME: Single non-streaming completion call with API key and version headers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Anthropic Provider
//!
//! Implementation of the `LlmProvider` trait for the Anthropic Messages API.
//! System messages are lifted into the top-level `system` field; the remaining
//! messages are sent in order.
//!
//! ## Configuration
//!
//! Built from [`LlmConfig`]: `ANTHROPIC_API_KEY`, `LLM_MODEL`, and
//! `ANTHROPIC_BASE_URL` (useful for pointing tests at a local stub).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, MessageRole, TokenUsage};
use crate::config::LlmConfig;
use crate::constants::llm::{ANTHROPIC_API_VERSION, CONNECT_TIMEOUT_SECS, DEFAULT_MAX_TOKENS};
use crate::constants::service_names::ANTHROPIC;
use crate::errors::AppError;

const SERVICE: &str = "Anthropic";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ApiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Anthropic Messages API client
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    /// Create a provider from the language model configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &LlmConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            model: config.model.clone(),
        })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// Split system messages out of the conversation
    fn convert_messages(messages: &[ChatMessage]) -> (Option<String>, Vec<ApiMessage<'_>>) {
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect();

        let conversation = messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| ApiMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect();

        let system = (!system.is_empty()).then(|| system.join("\n\n"));
        (system, conversation)
    }

    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        serde_json::from_str::<ApiErrorResponse>(body).map_or_else(
            |_| {
                AppError::external_service(
                    SERVICE,
                    format!(
                        "API error ({status}): {}",
                        body.chars().take(200).collect::<String>()
                    ),
                )
            },
            |parsed| match status.as_u16() {
                401 | 403 => AppError::external_service(
                    SERVICE,
                    format!("Authentication failed: {}", parsed.error.message),
                ),
                429 => AppError::external_service(
                    SERVICE,
                    format!("Rate limit exceeded: {}", parsed.error.message),
                ),
                _ => AppError::external_service(
                    SERVICE,
                    format!("{} - {}", parsed.error.error_type, parsed.error.message),
                ),
            },
        )
    }

    fn into_chat_response(response: MessagesResponse) -> ChatResponse {
        let content = response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<String>();

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens: u.input_tokens.saturating_add(u.output_tokens),
        });

        ChatResponse {
            content,
            model: response.model,
            usage,
            finish_reason: response.stop_reason,
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        ANTHROPIC
    }

    fn display_name(&self) -> &'static str {
        "Anthropic Claude"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        let (system, messages) = Self::convert_messages(&request.messages);

        let api_request = MessagesRequest {
            model,
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages,
            system,
            temperature: request.temperature,
        };

        debug!("Sending messages request to Anthropic");

        let response = self
            .client
            .post(self.api_url("messages"))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("content-type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Anthropic API: {}", e);
                AppError::external_service(SERVICE, format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Anthropic API response: {}", e);
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Anthropic API response: {}", e);
            AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
        })?;

        let chat_response = Self::into_chat_response(parsed);
        debug!(
            finish_reason = chat_response.finish_reason.as_deref().unwrap_or("unknown"),
            chars = chat_response.content.len(),
            "Received Anthropic completion"
        );
        Ok(chat_response)
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        let response = self
            .client
            .get(self.api_url("models"))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("Health check failed: {e}")))?;

        Ok(response.status().is_success())
    }
}
