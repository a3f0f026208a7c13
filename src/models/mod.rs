// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod food;
pub mod meal_plan;
pub mod post;
pub mod recipe;

pub use food::{FavoriteFood, MealType, NewFavoriteFood, Visibility};
pub use meal_plan::{Meal, MealPlan, NewMealPlan};
pub use post::Post;
pub use recipe::{DailyRecipe, RecipeSuggestion};
