// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth routes: sign-in callback and logout.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::Session;
use crate::middleware::auth::{CODE_VERIFIER_COOKIE, SESSION_COOKIE};
use crate::AppState;

/// Session lifetime when the backend does not report one.
const DEFAULT_SESSION_SECS: i64 = 60 * 60;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/callback", get(auth_callback))
        .route("/auth/logout", post(logout))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
}

/// Cookies are `Secure` unless the frontend is served over plain HTTP.
fn is_secure(frontend_url: &str) -> bool {
    frontend_url.starts_with("https://")
}

fn session_cookie(session: Session, secure: bool) -> Cookie<'static> {
    let max_age = session.expires_in.unwrap_or(DEFAULT_SESSION_SECS);
    Cookie::build((SESSION_COOKIE, session.access_token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Removal cookie. Path and flags must match the ones used on creation.
fn removal_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build(name)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Sign-in callback - exchange the authorization code for a session.
///
/// Always lands on the dashboard when a code is present; a failed
/// exchange is logged but does not change the redirect.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, Redirect) {
    let frontend_url = &state.config.frontend_url;

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        tracing::warn!("Auth callback without code");
        let redirect = format!("{}/login?error=callback_error", frontend_url);
        return (jar, Redirect::temporary(&redirect));
    };

    let secure = is_secure(frontend_url);
    let verifier = jar
        .get(CODE_VERIFIER_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    tracing::info!("Exchanging authorization code for session");

    let jar = match state.db.exchange_code_for_session(&code, &verifier).await {
        Ok(session) => {
            let user_id = session
                .user
                .as_ref()
                .and_then(|u| u["id"].as_str())
                .unwrap_or("unknown");
            tracing::info!(
                user_id,
                refresh_token = session.refresh_token.is_some(),
                "Session established"
            );
            jar.add(session_cookie(session, secure))
                .remove(removal_cookie(CODE_VERIFIER_COOKIE, secure))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Code exchange failed, redirecting to dashboard anyway");
            jar
        }
    };

    let redirect = format!("{}/dashboard?emailConfirmed=true", frontend_url);
    (jar, Redirect::temporary(&redirect))
}

/// Logout - clear the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let secure = is_secure(&state.config.frontend_url);
    (
        jar.remove(removal_cookie(SESSION_COOKIE, secure)),
        StatusCode::NO_CONTENT,
    )
}
