// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite food model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Meal category a food or planned meal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// Who can see a favorite food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

/// Row in the `favorite_foods` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FavoriteFood {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub recipe: Option<String>,
    /// 1-5 stars
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub meal_types: Vec<MealType>,
    #[serde(default)]
    pub visibility: Visibility,
    pub created_at: String,
}

/// Request body for creating a favorite food.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NewFavoriteFood {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub ingredients: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub recipe: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,
    #[serde(default)]
    pub meal_types: Vec<MealType>,
    #[serde(default)]
    pub visibility: Visibility,
}

/// Insert payload sent to the backend (owner attached server-side).
#[derive(Debug, Serialize)]
pub struct FavoriteFoodInsert<'a> {
    pub user_id: &'a str,
    pub name: &'a str,
    pub ingredients: Option<&'a str>,
    pub recipe: Option<&'a str>,
    pub rating: Option<u8>,
    pub meal_types: Vec<MealType>,
    pub visibility: Visibility,
}

impl<'a> FavoriteFoodInsert<'a> {
    pub fn new(user_id: &'a str, food: &'a NewFavoriteFood) -> Self {
        let mut meal_types = food.meal_types.clone();
        meal_types.sort_by_key(|m| *m as u8);
        meal_types.dedup();

        Self {
            user_id,
            name: food.name.trim(),
            ingredients: food.ingredients.as_deref(),
            recipe: food.recipe.as_deref(),
            rating: food.rating,
            meal_types,
            visibility: food.visibility,
        }
    }
}
