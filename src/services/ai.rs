// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat-completion client for the hosted AI collaborator.
//!
//! Speaks the OpenAI-compatible wire format: `POST {endpoint}` with
//! `{model, messages}` and a bearer credential. Every call is bounded by
//! the configured timeout; when it fires the in-flight request future is
//! dropped, which aborts the HTTP request.

use crate::config::Config;
use crate::error::AppError;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

/// Endpoint settings. Present only when both URL and key are configured.
#[derive(Clone)]
struct Endpoint {
    url: String,
    api_key: String,
}

/// AI collaborator client.
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    endpoint: Option<Endpoint>,
    model: String,
    timeout: Duration,
}

impl AiClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Self {
        let endpoint = match (&config.ai_api_url, &config.ai_api_key) {
            (Some(url), Some(api_key)) => Some(Endpoint {
                url: url.clone(),
                api_key: api_key.clone(),
            }),
            _ => None,
        };

        Self {
            http: reqwest::Client::new(),
            endpoint,
            model: config.ai_model.clone(),
            timeout: config.ai_timeout,
        }
    }

    fn endpoint(&self) -> Result<&Endpoint, AppError> {
        self.endpoint
            .as_ref()
            .ok_or_else(|| AppError::Configuration("AI API configuration missing".to_string()))
    }

    /// Fail fast when the endpoint is unconfigured.
    pub fn ensure_configured(&self) -> Result<(), AppError> {
        self.endpoint().map(|_| ())
    }

    /// Send a single user prompt and return the raw completion JSON.
    ///
    /// Returns [`AppError::Timeout`] if no response arrives within the
    /// configured bound.
    pub async fn chat(&self, prompt: &str) -> Result<serde_json::Value, AppError> {
        let endpoint = self.endpoint()?;

        match tokio::time::timeout(self.timeout, self.send_chat(endpoint, prompt)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs_f64(),
                    "AI request timed out, aborting"
                );
                Err(AppError::Timeout)
            }
        }
    }

    /// Send a prompt and return the first choice's message content.
    pub async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let response = self.chat(prompt).await?;
        completion_content(&response)
            .map(str::to_string)
            .ok_or(AppError::InvalidAiResponse)
    }

    async fn send_chat(
        &self,
        endpoint: &Endpoint,
        prompt: &str,
    ) -> Result<serde_json::Value, AppError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Sending AI request");

        let response = self
            .http
            .post(&endpoint.url)
            .bearer_auth(&endpoint.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 0,
                message: format!("AI request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "AI API error");
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: "AI service failed".to_string(),
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!(error = %e, "AI response was not JSON");
            AppError::InvalidAiResponse
        })
    }
}

/// Non-empty `choices[0].message.content` of a completion response.
pub fn completion_content(response: &serde_json::Value) -> Option<&str> {
    response
        .pointer("/choices/0/message/content")
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
