// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe models: the stored recipe of the day and transient AI suggestions.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Row in the `daily_recipes` table. At most one row per `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecipe {
    /// UTC calendar day, `YYYY-MM-DD`
    pub date: String,
    /// Opaque recipe payload returned to clients unmodified
    pub recipe_data: serde_json::Value,
}

/// A structured recipe produced by the AI collaborator.
///
/// Built per request and never persisted, except as the payload of a
/// [`DailyRecipe`] written by the refresh task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecipeSuggestion {
    #[validate(length(min = 1))]
    pub name: String,
    /// Ingredients with measurements, in order
    #[validate(length(min = 1))]
    pub ingredients: Vec<String>,
    /// Preparation steps, in order
    #[validate(length(min = 1))]
    pub instructions: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    #[validate(range(min = 1))]
    pub servings: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_uses_camel_case_fields() {
        let json = serde_json::json!({
            "name": "Spinach Omelette",
            "ingredients": ["2 eggs", "1 cup spinach"],
            "instructions": ["Whisk eggs", "Cook with spinach"],
            "prepTime": "5 minutes",
            "cookTime": "10 minutes",
            "servings": 1
        });

        let recipe: RecipeSuggestion = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(recipe.prep_time, "5 minutes");
        assert!(recipe.validate().is_ok());
        assert_eq!(serde_json::to_value(&recipe).unwrap(), json);
    }

    #[test]
    fn test_suggestion_validation_rejects_empty_lists() {
        let recipe = RecipeSuggestion {
            name: "Air".to_string(),
            ingredients: vec![],
            instructions: vec!["Breathe".to_string()],
            prep_time: "0".to_string(),
            cook_time: "0".to_string(),
            servings: 0,
        };

        let errors = recipe.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("ingredients"));
        assert!(fields.contains_key("servings"));
        assert!(!fields.contains_key("instructions"));
    }
}
