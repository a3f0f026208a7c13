// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.
//!
//! Sessions are JWTs issued by the backend's auth service. We verify them
//! locally and forward the raw token on backend calls so row-level security
//! sees the same user.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie holding the session access token.
pub const SESSION_COOKIE: &str = "savory_session";

/// Cookie holding the PKCE code verifier between sign-in and callback.
pub const CODE_VERIFIER_COOKIE: &str = "savory_code_verifier";

/// Audience the backend stamps on user access tokens.
const SESSION_AUDIENCE: &str = "authenticated";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (backend user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    pub aud: String,
    /// Carried by the backend's tokens; not used for authorization
    #[serde(default)]
    pub email: Option<String>,
}

/// Authenticated user extracted from the session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    /// Raw token, forwarded to the backend
    pub access_token: String,
}

/// Verify a session token and return its claims.
pub fn verify_session(token: &str, secret: &[u8]) -> Option<Claims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[SESSION_AUDIENCE]);

    decode::<Claims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
        .filter(|claims| !claims.sub.is_empty())
}

/// Middleware that requires a valid session.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(secret) = state.config.supabase_jwt_secret.as_deref() else {
        tracing::error!("SUPABASE_JWT_SECRET not set, cannot verify sessions");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    };

    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(t) => t.to_string(),
            None => return Err(StatusCode::UNAUTHORIZED),
        }
    };

    let claims = verify_session(&token, secret).ok_or_else(|| {
        tracing::debug!("Rejected invalid or expired session token");
        StatusCode::UNAUTHORIZED
    })?;

    request.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        access_token: token,
    });

    Ok(next.run(request).await)
}
