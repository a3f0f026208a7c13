// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase client wrapper with typed operations.
//!
//! Talks to the hosted backend over HTTP:
//! - REST tables under `/rest/v1/<table>` (PostgREST filter syntax)
//! - RPC functions under `/rest/v1/rpc/<name>`
//! - Auth (session exchange) under `/auth/v1`
//!
//! Server-side reads and writes use the service-role key. User-scoped calls
//! forward the caller's access token so row-level security applies.

use crate::config::Config;
use crate::db::{rpc, tables};
use crate::error::AppError;
use crate::models::food::FavoriteFoodInsert;
use crate::models::meal_plan::MealPlanInsert;
use crate::models::{DailyRecipe, FavoriteFood, MealPlan, Post};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Resolved connection settings. Present only when fully configured.
#[derive(Clone)]
struct Connection {
    base_url: String,
    service_key: String,
    anon_key: String,
}

/// Session returned by the auth service after a code exchange.
///
/// Mirrors the token endpoint's response. Only `access_token` and
/// `expires_in` go into the session cookie; the refresh token and user
/// record are only logged.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of `access_token` in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// Request body for the PKCE code exchange.
#[derive(Serialize)]
struct PkceExchange<'a> {
    auth_code: &'a str,
    code_verifier: &'a str,
}

/// Supabase database client.
#[derive(Clone)]
pub struct SupabaseDb {
    http: reqwest::Client,
    conn: Option<Connection>,
}

impl SupabaseDb {
    /// Create a client from configuration.
    ///
    /// Missing URL or service key leaves the client unconfigured; every
    /// operation then fails with [`AppError::Configuration`] before any
    /// request is made.
    pub fn new(config: &Config) -> Self {
        let conn = match (&config.supabase_url, &config.supabase_service_key) {
            (Some(url), Some(key)) => Some(Connection {
                base_url: url.trim_end_matches('/').to_string(),
                service_key: key.clone(),
                anon_key: config
                    .supabase_anon_key
                    .clone()
                    .unwrap_or_else(|| key.clone()),
            }),
            _ => None,
        };

        if let Some(conn) = &conn {
            tracing::info!(url = %conn.base_url, "Supabase client configured");
        }

        Self {
            http: reqwest::Client::new(),
            conn,
        }
    }

    /// Create an unconfigured client for testing (offline mode).
    ///
    /// All database operations will return a configuration error if called.
    pub fn new_mock() -> Self {
        Self {
            http: reqwest::Client::new(),
            conn: None,
        }
    }

    /// Helper to get the connection or return an error if unconfigured.
    fn conn(&self) -> Result<&Connection, AppError> {
        self.conn
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Supabase configuration missing".to_string()))
    }

    /// Fail fast when the backend is unconfigured.
    pub fn ensure_configured(&self) -> Result<(), AppError> {
        self.conn().map(|_| ())
    }

    /// Request against a REST table using the service-role key.
    fn service(&self, method: reqwest::Method, table: &str) -> Result<RequestBuilder, AppError> {
        let conn = self.conn()?;
        Ok(self
            .http
            .request(method, format!("{}/rest/v1/{}", conn.base_url, table))
            .header("apikey", &conn.service_key)
            .bearer_auth(&conn.service_key))
    }

    /// Request against a REST path on behalf of a signed-in user.
    fn as_user(
        &self,
        method: reqwest::Method,
        path: &str,
        access_token: &str,
    ) -> Result<RequestBuilder, AppError> {
        let conn = self.conn()?;
        Ok(self
            .http
            .request(method, format!("{}/rest/v1/{}", conn.base_url, path))
            .header("apikey", &conn.anon_key)
            .bearer_auth(access_token))
    }

    // ─── Daily Recipes ───────────────────────────────────────────

    /// Get the recipe stored for a given `YYYY-MM-DD` date.
    pub async fn get_daily_recipe(&self, date: &str) -> Result<Option<DailyRecipe>, AppError> {
        let request = self
            .service(reqwest::Method::GET, tables::DAILY_RECIPES)?
            .query(&[
                ("select", "date,recipe_data".to_string()),
                ("date", format!("eq.{}", date)),
                ("limit", "1".to_string()),
            ]);

        let rows: Vec<DailyRecipe> = send_json(request).await?;
        Ok(rows.into_iter().next())
    }

    /// Get the recipe with the greatest stored date.
    pub async fn get_latest_daily_recipe(&self) -> Result<Option<DailyRecipe>, AppError> {
        let request = self
            .service(reqwest::Method::GET, tables::DAILY_RECIPES)?
            .query(&[
                ("select", "date,recipe_data"),
                ("order", "date.desc"),
                ("limit", "1"),
            ]);

        let rows: Vec<DailyRecipe> = send_json(request).await?;
        Ok(rows.into_iter().next())
    }

    /// Create or overwrite the recipe for `recipe.date`.
    pub async fn upsert_daily_recipe(&self, recipe: &DailyRecipe) -> Result<(), AppError> {
        let request = self
            .service(reqwest::Method::POST, tables::DAILY_RECIPES)?
            .query(&[("on_conflict", "date")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(recipe);

        send(request).await
    }

    // ─── Favorite Foods ──────────────────────────────────────────

    /// List a user's favorite foods, newest first.
    pub async fn list_favorite_foods(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<Vec<FavoriteFood>, AppError> {
        let request = self
            .as_user(reqwest::Method::GET, tables::FAVORITE_FOODS, access_token)?
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", user_id)),
                ("order", "created_at.desc".to_string()),
            ]);

        send_json(request).await
    }

    /// Insert a favorite food and return the stored row.
    pub async fn insert_favorite_food(
        &self,
        access_token: &str,
        food: &FavoriteFoodInsert<'_>,
    ) -> Result<FavoriteFood, AppError> {
        let request = self
            .as_user(reqwest::Method::POST, tables::FAVORITE_FOODS, access_token)?
            .header("Prefer", "return=representation")
            .json(food);

        single_row(send_json(request).await?, "favorite food")
    }

    /// Delete one of a user's favorite foods.
    pub async fn delete_favorite_food(
        &self,
        access_token: &str,
        user_id: &str,
        food_id: &str,
    ) -> Result<(), AppError> {
        let request = self
            .as_user(reqwest::Method::DELETE, tables::FAVORITE_FOODS, access_token)?
            .query(&[
                ("id", format!("eq.{}", food_id)),
                ("user_id", format!("eq.{}", user_id)),
            ])
            .header("Prefer", "return=representation");

        let deleted: Vec<FavoriteFood> = send_json(request).await?;
        if deleted.is_empty() {
            return Err(AppError::NotFound(format!(
                "Favorite food {} not found",
                food_id
            )));
        }
        Ok(())
    }

    // ─── Meal Plans ──────────────────────────────────────────────

    /// List a user's meal plans, newest first.
    pub async fn list_meal_plans(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<Vec<MealPlan>, AppError> {
        let request = self
            .as_user(reqwest::Method::GET, tables::MEAL_PLANS, access_token)?
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", user_id)),
                ("order", "created_at.desc".to_string()),
            ]);

        send_json(request).await
    }

    /// Insert a meal plan and return the stored row.
    pub async fn insert_meal_plan(
        &self,
        access_token: &str,
        plan: &MealPlanInsert<'_>,
    ) -> Result<MealPlan, AppError> {
        let request = self
            .as_user(reqwest::Method::POST, tables::MEAL_PLANS, access_token)?
            .header("Prefer", "return=representation")
            .json(plan);

        single_row(send_json(request).await?, "meal plan")
    }

    // ─── Posts ───────────────────────────────────────────────────

    /// Most recent posts visible to the caller.
    pub async fn list_posts(&self, access_token: &str, limit: u32) -> Result<Vec<Post>, AppError> {
        let request = self
            .as_user(reqwest::Method::GET, tables::POSTS, access_token)?
            .query(&[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
                ("limit", limit.to_string()),
            ]);

        send_json(request).await
    }

    /// Trending posts, ranked by the backend.
    pub async fn trending_posts(
        &self,
        access_token: &str,
        limit: u32,
    ) -> Result<Vec<Post>, AppError> {
        let request = self
            .as_user(
                reqwest::Method::POST,
                &format!("rpc/{}", rpc::TRENDING_POSTS),
                access_token,
            )?
            .json(&serde_json::json!({ "limit_count": limit }));

        send_json(request).await
    }

    // ─── Auth ────────────────────────────────────────────────────

    /// Exchange an authorization code (PKCE flow) for a session.
    pub async fn exchange_code_for_session(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<Session, AppError> {
        let conn = self.conn()?;
        let request = self
            .http
            .post(format!("{}/auth/v1/token", conn.base_url))
            .query(&[("grant_type", "pkce")])
            .header("apikey", &conn.anon_key)
            .json(&PkceExchange {
                auth_code,
                code_verifier,
            });

        send_json(request).await
    }
}

/// Send a request and map transport errors and non-success statuses.
async fn dispatch(request: RequestBuilder) -> Result<reqwest::Response, AppError> {
    let response = request.send().await.map_err(|e| AppError::Upstream {
        status: 0,
        message: format!("Supabase request failed: {}", e),
    })?;

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), body = %body, "Supabase returned an error");

    Err(AppError::Upstream {
        status: status.as_u16(),
        message: format!("Supabase HTTP {}: {}", status, body),
    })
}

/// Send a request, discarding the body.
async fn send(request: RequestBuilder) -> Result<(), AppError> {
    dispatch(request).await?;
    Ok(())
}

/// Send a request and parse the JSON body.
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, AppError> {
    dispatch(request)
        .await?
        .json()
        .await
        .map_err(|e| AppError::Upstream {
            status: 0,
            message: format!("Supabase JSON parse error: {}", e),
        })
}

/// Unwrap a `return=representation` insert response.
fn single_row<T>(rows: Vec<T>, what: &str) -> Result<T, AppError> {
    rows.into_iter().next().ok_or_else(|| AppError::Upstream {
        status: 0,
        message: format!("Supabase returned no {} row after insert", what),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_client_fails_before_request() {
        let db = SupabaseDb::new_mock();

        let err = db.get_daily_recipe("2026-01-01").await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));

        let err = db.exchange_code_for_session("code", "").await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_partial_config_is_unconfigured() {
        let mut config = Config::test_default();
        config.supabase_service_key = None;
        assert!(SupabaseDb::new(&config).conn().is_err());

        let config = Config::test_default();
        assert!(SupabaseDb::new(&config).conn().is_ok());
    }
}
