// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! SavoryCircle: meal planning and recipe sharing
//!
//! This crate provides the backend API: recipe of the day, AI recipe
//! suggestions, sign-in callback, and user data routes proxied to the
//! hosted backend.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SupabaseDb;
use services::AiClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SupabaseDb,
    pub ai: AiClient,
}

impl AppState {
    /// Build clients from configuration.
    pub fn new(config: Config) -> Self {
        let db = SupabaseDb::new(&config);
        let ai = AiClient::new(&config);
        Self { config, db, ai }
    }
}
