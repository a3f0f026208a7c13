// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in callback and logout.

use axum::{
    body::Body,
    extract::Query,
    http::{header, Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

mod common;

fn location(response: &axum::http::Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn set_cookies(response: &axum::http::Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Auth stub issuing a session for any code, recording exchange bodies.
fn auth_backend(seen: Arc<Mutex<Vec<Value>>>) -> Router {
    Router::new().route(
        "/auth/v1/token",
        post(
            move |Query(q): Query<HashMap<String, String>>, Json(body): Json<Value>| {
                let seen = seen.clone();
                async move {
                    assert_eq!(q.get("grant_type").map(String::as_str), Some("pkce"));
                    seen.lock().unwrap().push(body);
                    Json(json!({
                        "access_token": "issued-access-token",
                        "refresh_token": "issued-refresh-token",
                        "expires_in": 3600,
                        "token_type": "bearer",
                        "user": {"id": "user-1"}
                    }))
                }
            },
        ),
    )
}

#[tokio::test]
async fn test_callback_without_code_redirects_to_login() {
    let (app, _) = common::create_test_app(savory_circle::config::Config::test_default());

    for uri in ["/auth/callback", "/auth/callback?code="] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            location(&response),
            "http://localhost:3000/login?error=callback_error"
        );
    }
}

#[tokio::test]
async fn test_callback_success_sets_session_cookie() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let backend = common::spawn_stub(auth_backend(seen.clone())).await;
    let (app, _) = common::create_test_app(common::config_with(Some(&backend), None));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/callback?code=abc")
                .header(header::COOKIE, "savory_code_verifier=verifier-xyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&response),
        "http://localhost:3000/dashboard?emailConfirmed=true"
    );

    let cookies = set_cookies(&response);
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("savory_session=issued-access-token") && c.contains("HttpOnly")));
    assert!(cookies.iter().any(|c| c.starts_with("savory_code_verifier=")));

    let bodies = seen.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["auth_code"], "abc");
    assert_eq!(bodies[0]["code_verifier"], "verifier-xyz");
}

#[tokio::test]
async fn test_callback_failed_exchange_still_redirects_to_dashboard() {
    let backend =
        common::spawn_stub(common::failing_backend(StatusCode::BAD_REQUEST)).await;
    let (app, _) = common::create_test_app(common::config_with(Some(&backend), None));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/callback?code=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(location(&response).ends_with("/dashboard?emailConfirmed=true"));
    assert!(set_cookies(&response)
        .iter()
        .all(|c| !c.starts_with("savory_session=")));
}

#[tokio::test]
async fn test_callback_unconfigured_backend_still_redirects() {
    let mut config = savory_circle::config::Config::test_default();
    config.supabase_url = None;
    let (app, _) = common::create_test_app(config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/callback?code=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(location(&response).ends_with("/dashboard?emailConfirmed=true"));
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let (app, _) = common::create_test_app(savory_circle::config::Config::test_default());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, "savory_session=some-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookies = set_cookies(&response);
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("savory_session=") && c.contains("Max-Age=0")));
}
