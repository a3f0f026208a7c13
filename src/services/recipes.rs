// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe generation on top of the AI collaborator.
//!
//! Two prompt contracts live here:
//! - structured suggestions: a JSON array of [`RecipeSuggestion`] objects,
//!   parsed and validated before it reaches a client
//! - free-form meal ideas: three meals in a fixed plain-text layout, passed
//!   through unparsed

use crate::error::AppError;
use crate::models::RecipeSuggestion;
use crate::services::ai::AiClient;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Build the prompt asking for `count` structured recipes.
pub fn recipe_prompt(favorite_foods: &[String], count: u32) -> String {
    let foods = if favorite_foods.is_empty() {
        "any common pantry ingredients".to_string()
    } else {
        favorite_foods.join(", ")
    };
    let noun = if count == 1 { "recipe" } else { "recipes" };

    format!(
        "Create exactly {count} {noun} inspired by these favorite foods: {foods}.\n\
         Each recipe must be a JSON object with these fields:\n\
         - \"name\": the recipe name (string)\n\
         - \"ingredients\": an array of strings, each with a measurement\n\
         - \"instructions\": an array of strings, one step each\n\
         - \"prepTime\": preparation time (string)\n\
         - \"cookTime\": cooking time (string)\n\
         - \"servings\": number of servings (integer)\n\
         Respond with a JSON array of exactly {count} such objects and nothing else."
    )
}

/// Build the free-form meal-ideas prompt around a user's request.
pub fn meal_ideas_prompt(user_prompt: &str) -> String {
    format!(
        "Suggest exactly 3 meal ideas for the following request: {user_prompt}\n\n\
         Use this exact plain-text format for each meal, with no introduction, \
         summary or other commentary:\n\n\
         Name: <meal name>\n\
         Description: <one or two sentences>\n\
         Ingredients:\n\
         <one ingredient per line>\n\
         Recipe Instructions:\n\
         1. <first step>\n\
         2. <next step>\n\n\
         Separate meals with a blank line."
    )
}

/// Remove a surrounding Markdown code fence (```json ... ```), if any.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse AI output into validated suggestions.
///
/// Each element must decode as a [`RecipeSuggestion`] and pass validation,
/// but the elements are returned as the model wrote them, extra fields
/// included. Anything short of a non-empty array of well-formed recipes is
/// a parse error; partial results are never returned.
pub fn parse_recipes(content: &str) -> Result<Vec<Value>, AppError> {
    let recipes: Vec<Value> = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| AppError::RecipeParse(e.to_string()))?;

    if recipes.is_empty() {
        return Err(AppError::RecipeParse("empty recipe list".to_string()));
    }

    for (i, raw) in recipes.iter().enumerate() {
        RecipeSuggestion::deserialize(raw)
            .map_err(|e| AppError::RecipeParse(format!("recipe {}: {}", i, e)))?
            .validate()
            .map_err(|e| AppError::RecipeParse(format!("recipe {}: {}", i, e)))?;
    }

    Ok(recipes)
}

/// Ask the AI collaborator for `count` recipes based on favorite foods.
pub async fn suggest_recipes(
    ai: &AiClient,
    favorite_foods: &[String],
    count: u32,
) -> Result<Vec<Value>, AppError> {
    ai.ensure_configured()?;

    let prompt = recipe_prompt(favorite_foods, count);
    let content = ai.complete(&prompt).await?;
    let recipes = parse_recipes(&content)?;

    if recipes.len() != count as usize {
        tracing::warn!(
            requested = count,
            received = recipes.len(),
            "AI returned a different number of recipes than requested"
        );
    }

    Ok(recipes)
}
