// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    extract::Query,
    http::{Response, StatusCode},
    routing::get,
    Json, Router,
};
use savory_circle::config::Config;
use savory_circle::middleware::auth::Claims;
use savory_circle::routes::create_router;
use savory_circle::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Serve a stub collaborator on an ephemeral loopback port.
/// Returns its base URL.
#[allow(dead_code)]
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Test config pointing at stub collaborators.
#[allow(dead_code)]
pub fn config_with(backend_url: Option<&str>, ai_base_url: Option<&str>) -> Config {
    let mut config = Config::test_default();
    if let Some(url) = backend_url {
        config.supabase_url = Some(url.to_string());
    }
    if let Some(url) = ai_base_url {
        config.ai_api_url = Some(format!("{}/v1/chat/completions", url));
    }
    config
}

/// Create a test app from config.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Session token the way the backend's auth service would sign it.
#[allow(dead_code)]
pub fn create_session_token(user_id: &str, secret: &[u8]) -> String {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    let claims = Claims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        aud: "authenticated".to_string(),
        email: Some("cook@example.com".to_string()),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A chat-completion response carrying `content` in the first choice.
#[allow(dead_code)]
pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// Stub backend serving a fixed set of `daily_recipes` rows.
/// Honors the `date=eq.X` filter, otherwise returns the newest row.
#[allow(dead_code)]
pub fn recipe_backend(rows: Vec<(String, Value)>) -> Router {
    let rows = Arc::new(rows);
    Router::new().route(
        "/rest/v1/daily_recipes",
        get(move |Query(q): Query<HashMap<String, String>>| {
            let rows = rows.clone();
            async move {
                let mut matched: Vec<&(String, Value)> = match q.get("date") {
                    Some(filter) => {
                        let date = filter.trim_start_matches("eq.");
                        rows.iter().filter(|(d, _)| d == date).collect()
                    }
                    None => {
                        let mut all: Vec<_> = rows.iter().collect();
                        all.sort_by(|a, b| b.0.cmp(&a.0));
                        all
                    }
                };
                matched.truncate(1);

                let body: Vec<Value> = matched
                    .into_iter()
                    .map(|(d, r)| json!({"date": d, "recipe_data": r}))
                    .collect();
                Json(body)
            }
        }),
    )
}

/// Stub backend whose every request fails with `status`.
#[allow(dead_code)]
pub fn failing_backend(status: StatusCode) -> Router {
    Router::new().fallback(move || async move {
        (status, Json(json!({"message": "stub failure"})))
    })
}
