// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Collaborator settings (backend, AI, scheduler secret) are optional so the
//! server can start with a partial environment. Each client reports a
//! configuration error on first use when its settings are missing.

use std::env;
use std::time::Duration;

/// Model used when `AI_MODEL` is not set.
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// Bound on the free-form suggestion round trip.
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for auth redirects
    pub frontend_url: String,
    /// Server port
    pub port: u16,

    // --- Backend collaborator ---
    /// Base URL of the hosted backend (e.g. `https://xyz.supabase.co`)
    pub supabase_url: Option<String>,
    /// Service-role credential used for server-side reads and writes
    pub supabase_service_key: Option<String>,
    /// Public (anon) key sent as `apikey` on user-scoped calls
    pub supabase_anon_key: Option<String>,
    /// Secret used to verify session JWTs issued by the backend
    pub supabase_jwt_secret: Option<Vec<u8>>,

    // --- AI collaborator ---
    /// Chat-completion endpoint URL
    pub ai_api_url: Option<String>,
    /// Bearer credential for the chat-completion endpoint
    pub ai_api_key: Option<String>,
    pub ai_model: String,
    pub ai_timeout: Duration,

    // --- Scheduler ---
    /// Bearer secret the external scheduler presents on `/tasks/*`
    pub cron_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        // Must be a positive number of seconds
        let ai_timeout_secs = match env::var("AI_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("AI_TIMEOUT_SECS", raw))?,
            Err(_) => DEFAULT_AI_TIMEOUT_SECS,
        };

        let supabase_service_key = optional_var("SUPABASE_SERVICE_ROLE_KEY");

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port,
            supabase_url: optional_var("SUPABASE_URL").map(|v| v.trim_end_matches('/').to_string()),
            supabase_anon_key: optional_var("SUPABASE_ANON_KEY")
                .or_else(|| supabase_service_key.clone()),
            supabase_service_key,
            supabase_jwt_secret: optional_var("SUPABASE_JWT_SECRET").map(String::into_bytes),
            ai_api_url: optional_var("AI_API_URL"),
            ai_api_key: optional_var("AI_API_KEY"),
            ai_model: optional_var("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            ai_timeout: Duration::from_secs(ai_timeout_secs),
            cron_secret: optional_var("CRON_SECRET"),
        })
    }

    /// Deterministic config for tests. Collaborator URLs point nowhere;
    /// tests override them with stub server addresses.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            supabase_url: Some("http://127.0.0.1:9".to_string()),
            supabase_service_key: Some("test_service_key".to_string()),
            supabase_anon_key: Some("test_anon_key".to_string()),
            supabase_jwt_secret: Some(b"test_jwt_secret_32_bytes_minimum!".to_vec()),
            ai_api_url: Some("http://127.0.0.1:9/v1/chat/completions".to_string()),
            ai_api_key: Some("test_ai_key".to_string()),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            ai_timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
            cron_secret: Some("test_cron_secret".to_string()),
        }
    }

    /// Log which collaborators are unconfigured. Requests that need them
    /// fail with a configuration error rather than aborting startup.
    pub fn warn_missing(&self) {
        if self.supabase_url.is_none() || self.supabase_service_key.is_none() {
            tracing::warn!("SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY not set; backend routes disabled");
        }
        if self.supabase_jwt_secret.is_none() {
            tracing::warn!("SUPABASE_JWT_SECRET not set; authenticated API routes disabled");
        }
        if self.ai_api_url.is_none() || self.ai_api_key.is_none() {
            tracing::warn!("AI_API_URL or AI_API_KEY not set; AI routes disabled");
        }
        if self.cron_secret.is_none() {
            tracing::warn!("CRON_SECRET not set; scheduled refresh disabled");
        }
    }
}

/// Read an env var, treating blank values as unset.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
