// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe of the day: date-keyed lookup with most-recent fallback, and the
//! scheduled refresh that writes a new row for today.

use crate::db::SupabaseDb;
use crate::error::AppError;
use crate::models::DailyRecipe;
use crate::services::ai::AiClient;
use crate::services::recipes;
use crate::time_utils::day_of_year;

/// Ingredients the refresh task rotates through, one per day of year.
const STAPLES: &[&str] = &[
    "chicken", "salmon", "chickpeas", "mushrooms", "eggs", "tofu", "lentils", "beef",
    "shrimp", "sweet potatoes", "spinach", "black beans", "pork", "cauliflower",
    "quinoa", "tomatoes", "zucchini", "rice", "cod", "eggplant", "turkey",
];

/// Reads and refreshes the recipe of the day.
pub struct DailyRecipeService<'a> {
    db: &'a SupabaseDb,
}

impl<'a> DailyRecipeService<'a> {
    pub fn new(db: &'a SupabaseDb) -> Self {
        Self { db }
    }

    /// Recipe payload for `today`, or the most recent stored one.
    ///
    /// A failed or empty lookup for today falls back to the newest row.
    /// Errors:
    /// - `Configuration` if the backend is not configured (no query is made)
    /// - `RecipeFetch` if the fallback query itself fails
    /// - `NotFound` if no recipe exists at all
    pub async fn recipe_for(&self, today: &str) -> Result<serde_json::Value, AppError> {
        match self.db.get_daily_recipe(today).await {
            Ok(Some(recipe)) => {
                tracing::debug!(date = today, "Serving today's recipe");
                return Ok(recipe.recipe_data);
            }
            Ok(None) => {
                tracing::info!(date = today, "No recipe for today, using most recent");
            }
            Err(e @ AppError::Configuration(_)) => return Err(e),
            Err(e) => {
                tracing::warn!(date = today, error = %e, "Today's recipe lookup failed, using most recent");
            }
        }

        match self.db.get_latest_daily_recipe().await {
            Ok(Some(recipe)) => {
                tracing::info!(date = %recipe.date, "Serving fallback recipe");
                Ok(recipe.recipe_data)
            }
            Ok(None) => Err(AppError::NotFound("No recipe available".to_string())),
            Err(e @ AppError::Configuration(_)) => Err(e),
            Err(e) => {
                tracing::error!(error = %e, "Fallback recipe lookup failed");
                Err(AppError::RecipeFetch(e.to_string()))
            }
        }
    }

    /// Generate a recipe with the AI collaborator and store it for `today`,
    /// overwriting any existing row for that date.
    pub async fn refresh(&self, ai: &AiClient, today: &str) -> Result<DailyRecipe, AppError> {
        self.db.ensure_configured()?;

        let staple = staple_for(today);
        tracing::info!(date = today, staple, "Generating recipe of the day");

        let mut recipes = recipes::suggest_recipes(ai, &[staple.to_string()], 1).await?;
        let recipe = recipes.swap_remove(0);

        let row = DailyRecipe {
            date: today.to_string(),
            recipe_data: recipe,
        };

        self.db.upsert_daily_recipe(&row).await?;
        tracing::info!(
            date = today,
            name = row.recipe_data["name"].as_str().unwrap_or_default(),
            "Recipe of the day stored"
        );

        Ok(row)
    }
}

/// Staple ingredient for a date key; stable for a given day.
fn staple_for(date_key: &str) -> &'static str {
    let index = day_of_year(date_key).unwrap_or(0) as usize % STAPLES.len();
    STAPLES[index]
}
