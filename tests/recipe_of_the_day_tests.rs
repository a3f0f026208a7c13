// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe of the day: today lookup, most-recent fallback, error mapping.

use axum::{
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use savory_circle::time_utils::today_utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::ServiceExt;

mod common;

fn get_recipe() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/recipe-of-the-day")
        .body(Body::empty())
        .unwrap()
}

fn omelette() -> Value {
    json!({
        "name": "Herb Omelette",
        "ingredients": ["3 eggs", "1 tbsp chives"],
        "instructions": ["Whisk eggs", "Cook gently", "Fold"],
        "metadata": {"cuisine": "French", "difficulty": "easy"}
    })
}

#[tokio::test]
async fn test_returns_todays_recipe_unmodified() {
    let backend = common::spawn_stub(common::recipe_backend(vec![
        ("2001-01-01".to_string(), json!({"name": "Old Stew"})),
        (today_utc(), omelette()),
    ]))
    .await;
    let (app, _) = common::create_test_app(common::config_with(Some(&backend), None));

    let response = app.oneshot(get_recipe()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, omelette());
}

#[tokio::test]
async fn test_falls_back_to_most_recent_recipe() {
    let backend = common::spawn_stub(common::recipe_backend(vec![
        ("2001-01-01".to_string(), json!({"name": "Old Stew"})),
        ("2001-03-15".to_string(), json!({"name": "Newer Curry"})),
        ("2001-02-01".to_string(), json!({"name": "Middle Soup"})),
    ]))
    .await;
    let (app, _) = common::create_test_app(common::config_with(Some(&backend), None));

    let response = app.oneshot(get_recipe()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, json!({"name": "Newer Curry"}));
}

#[tokio::test]
async fn test_failed_today_query_still_falls_back() {
    // Date-filtered lookups fail, unfiltered (latest) lookups succeed
    let stub = Router::new().route(
        "/rest/v1/daily_recipes",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            if q.contains_key("date") {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "boom"})))
            } else {
                (
                    StatusCode::OK,
                    Json(json!([{"date": "2001-01-01", "recipe_data": {"name": "Fallback"}}])),
                )
            }
        }),
    );
    let backend = common::spawn_stub(stub).await;
    let (app, _) = common::create_test_app(common::config_with(Some(&backend), None));

    let response = app.oneshot(get_recipe()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, json!({"name": "Fallback"}));
}

#[tokio::test]
async fn test_no_recipes_at_all_is_not_found() {
    let backend = common::spawn_stub(common::recipe_backend(vec![])).await;
    let (app, _) = common::create_test_app(common::config_with(Some(&backend), None));

    let response = app.oneshot(get_recipe()).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "No recipe available");
}

#[tokio::test]
async fn test_backend_failure_is_fetch_error_with_details() {
    let backend =
        common::spawn_stub(common::failing_backend(StatusCode::SERVICE_UNAVAILABLE)).await;
    let (app, _) = common::create_test_app(common::config_with(Some(&backend), None));

    let response = app.oneshot(get_recipe()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch recipe");
    assert!(body["details"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn test_missing_backend_config_is_config_error() {
    let mut config = savory_circle::config::Config::test_default();
    config.supabase_url = None;
    let (app, _) = common::create_test_app(config);

    let response = app.oneshot(get_recipe()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Supabase configuration missing");
}

#[tokio::test]
async fn test_repeated_reads_are_identical() {
    let backend = common::spawn_stub(common::recipe_backend(vec![(today_utc(), omelette())])).await;
    let (app, _) = common::create_test_app(common::config_with(Some(&backend), None));

    let first = common::body_json(app.clone().oneshot(get_recipe()).await.unwrap()).await;
    let second = common::body_json(app.oneshot(get_recipe()).await.unwrap()).await;

    assert_eq!(first, second);
}
