// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod ai;
pub mod daily_recipe;
pub mod recipes;

pub use ai::AiClient;
pub use daily_recipe::DailyRecipeService;
