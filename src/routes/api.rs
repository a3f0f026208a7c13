// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::food::FavoriteFoodInsert;
use crate::models::meal_plan::MealPlanInsert;
use crate::models::{FavoriteFood, MealPlan, NewFavoriteFood, NewMealPlan, Post};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

const DEFAULT_FEED_LIMIT: u32 = 20;
const MAX_FEED_LIMIT: u32 = 100;

/// API routes (require a session).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/foods", get(list_foods).post(create_food))
        .route("/api/foods/{id}", delete(delete_food))
        .route("/api/meal-plans", get(list_meal_plans).post(create_meal_plan))
        .route("/api/posts", get(list_posts))
        .route("/api/trending", get(trending_posts))
}

// ─── Favorite Foods ──────────────────────────────────────────

async fn list_foods(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<FavoriteFood>>> {
    let foods = state
        .db
        .list_favorite_foods(&user.access_token, &user.user_id)
        .await?;
    Ok(Json(foods))
}

async fn create_food(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(food), _): WithRejection<Json<NewFavoriteFood>, AppError>,
) -> Result<(StatusCode, Json<FavoriteFood>)> {
    food.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if food.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be blank".to_string()));
    }

    let insert = FavoriteFoodInsert::new(&user.user_id, &food);
    let stored = state
        .db
        .insert_favorite_food(&user.access_token, &insert)
        .await?;

    tracing::info!(user_id = %user.user_id, food_id = %stored.id, "Favorite food added");
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn delete_food(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state
        .db
        .delete_favorite_food(&user.access_token, &user.user_id, &id)
        .await?;

    tracing::info!(user_id = %user.user_id, food_id = %id, "Favorite food deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ─── Meal Plans ──────────────────────────────────────────────

async fn list_meal_plans(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<MealPlan>>> {
    let plans = state
        .db
        .list_meal_plans(&user.access_token, &user.user_id)
        .await?;
    Ok(Json(plans))
}

async fn create_meal_plan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(plan), _): WithRejection<Json<NewMealPlan>, AppError>,
) -> Result<(StatusCode, Json<MealPlan>)> {
    plan.check().map_err(AppError::BadRequest)?;

    let insert = MealPlanInsert {
        user_id: &user.user_id,
        meals: &plan.meals,
        duration: plan.duration,
    };
    let stored = state
        .db
        .insert_meal_plan(&user.access_token, &insert)
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        plan_id = %stored.id,
        meals = stored.meals.len(),
        "Meal plan created"
    );
    Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Posts ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct FeedQuery {
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_FEED_LIMIT
}

fn check_limit(limit: u32) -> Result<u32> {
    if limit == 0 || limit > MAX_FEED_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_FEED_LIMIT
        )));
    }
    Ok(limit)
}

async fn list_posts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<FeedQuery>,
) -> Result<Json<Vec<Post>>> {
    let limit = check_limit(params.limit)?;
    let posts = state.db.list_posts(&user.access_token, limit).await?;
    Ok(Json(posts))
}

/// Posts in the order the backend ranks them.
async fn trending_posts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<FeedQuery>,
) -> Result<Json<Vec<Post>>> {
    let limit = check_limit(params.limit)?;
    let posts = state.db.trending_posts(&user.access_token, limit).await?;
    Ok(Json(posts))
}
