// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public recipe routes: recipe of the day and AI suggestions.

use crate::error::{AppError, Result};
use crate::services::ai::completion_content;
use crate::services::recipes;
use crate::services::DailyRecipeService;
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Longest free-form prompt accepted.
const MAX_PROMPT_CHARS: usize = 2000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/recipe-of-the-day", get(recipe_of_the_day))
        .route("/api/recipe-suggestions", post(recipe_suggestions))
        .route("/api/ai-suggestions", post(ai_suggestions))
}

// ─── Recipe of the Day ───────────────────────────────────────

/// Today's recipe payload (or the most recent one), unmodified.
async fn recipe_of_the_day(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let today = today_utc();
    let payload = DailyRecipeService::new(&state.db).recipe_for(&today).await?;

    Ok((
        [(header::CACHE_CONTROL, "public, max-age=300")],
        Json(payload),
    ))
}

// ─── Structured Suggestions ──────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSuggestionsRequest {
    #[serde(default)]
    #[validate(length(max = 50))]
    favorite_foods: Vec<String>,
    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 10))]
    count: u32,
}

fn default_count() -> u32 {
    1
}

/// Ask the AI collaborator for recipes built around favorite foods.
async fn recipe_suggestions(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<RecipeSuggestionsRequest>, AppError>,
) -> Result<Json<Vec<serde_json::Value>>> {
    state.ai.ensure_configured()?;
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let foods: Vec<String> = payload
        .favorite_foods
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();

    tracing::info!(
        foods = foods.len(),
        count = payload.count,
        "Generating recipe suggestions"
    );

    let suggestions = recipes::suggest_recipes(&state.ai, &foods, payload.count).await?;
    Ok(Json(suggestions))
}

// ─── Free-form Suggestions ───────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AiSuggestionsRequest {
    #[serde(default)]
    prompt: Option<String>,
}

/// Forward a free-form request with the meal-ideas template. The raw
/// completion JSON is returned as-is.
async fn ai_suggestions(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<AiSuggestionsRequest>, AppError>,
) -> Result<Json<serde_json::Value>> {
    let prompt = payload
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Prompt is required".to_string()))?;

    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(AppError::BadRequest(format!(
            "Prompt must be at most {} characters",
            MAX_PROMPT_CHARS
        )));
    }

    let response = state.ai.chat(&recipes::meal_ideas_prompt(prompt)).await?;

    if completion_content(&response).is_none() {
        return Err(AppError::InvalidAiResponse);
    }

    Ok(Json(response))
}
