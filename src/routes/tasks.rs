// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Task handler routes for the external scheduler.
//!
//! These endpoints are called on a schedule, not directly by users. They
//! are protected by the `CRON_SECRET` bearer check in routes/mod.rs.

use crate::error::Result;
use crate::services::DailyRecipeService;
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Task handler routes (called by the scheduler).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/refresh-daily-recipe", post(refresh_daily_recipe))
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub date: String,
    pub recipe: serde_json::Value,
}

/// Generate and store today's recipe, replacing any existing one.
async fn refresh_daily_recipe(State(state): State<Arc<AppState>>) -> Result<Json<RefreshResponse>> {
    let today = today_utc();
    tracing::info!(date = %today, "Refreshing recipe of the day");

    let row = DailyRecipeService::new(&state.db)
        .refresh(&state.ai, &today)
        .await?;

    Ok(Json(RefreshResponse {
        date: row.date,
        recipe: row.recipe_data,
    }))
}
