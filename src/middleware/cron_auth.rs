// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scheduler authentication middleware for `/tasks/*` routes.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Constant-time check of an `Authorization` header against the secret.
fn bearer_matches(auth_header: Option<&str>, secret: &str) -> bool {
    auth_header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| bool::from(token.as_bytes().ct_eq(secret.as_bytes())))
        .unwrap_or(false)
}

/// Require `Authorization: Bearer <CRON_SECRET>`.
pub async fn require_cron_secret(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(secret) = state.config.cron_secret.as_deref() else {
        tracing::error!("CRON_SECRET not set, refusing scheduled task");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if !bearer_matches(auth_header, secret) {
        tracing::warn!(
            path = %request.uri().path(),
            "Blocked task request with missing or invalid bearer secret"
        );
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}
