// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Supabase).

pub mod supabase;

pub use supabase::{Session, SupabaseDb};

/// Table names as constants.
pub mod tables {
    /// One row per UTC date
    pub const DAILY_RECIPES: &str = "daily_recipes";
    pub const FAVORITE_FOODS: &str = "favorite_foods";
    pub const MEAL_PLANS: &str = "meal_plans";
    pub const POSTS: &str = "posts";
}

/// Backend RPC function names.
pub mod rpc {
    /// Returns posts ordered by the backend's trending score
    pub const TRENDING_POSTS: &str = "get_trending_posts";
}
