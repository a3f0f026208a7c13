// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal plan model.

use crate::models::MealType;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Longest plan a user can create, in days.
pub const MAX_PLAN_DAYS: u32 = 31;

/// A single meal within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    /// Zero-based day index within the plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_time: Option<MealType>,
}

/// Row in the `meal_plans` table. `meals` is stored as a JSON column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealPlan {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub meals: Vec<Meal>,
    pub duration: u32,
    pub created_at: String,
}

/// Request body for creating a meal plan.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMealPlan {
    #[validate(range(min = 1, max = MAX_PLAN_DAYS))]
    pub duration: u32,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl NewMealPlan {
    /// Field validation plus the cross-field rule that every meal's day
    /// falls inside the plan.
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())?;

        for meal in &self.meals {
            if meal.name.trim().is_empty() {
                return Err(format!("meal {} has an empty name", meal.id));
            }
            if let Some(day) = meal.day {
                if day >= self.duration {
                    return Err(format!(
                        "meal {} is on day {} but the plan lasts {} days",
                        meal.id, day, self.duration
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Insert payload sent to the backend.
#[derive(Debug, Serialize)]
pub struct MealPlanInsert<'a> {
    pub user_id: &'a str,
    pub meals: &'a [Meal],
    pub duration: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(day: Option<u32>) -> Meal {
        Meal {
            id: "m1".to_string(),
            name: "Oatmeal".to_string(),
            ingredients: None,
            day,
            meal_time: Some(MealType::Breakfast),
        }
    }

    #[test]
    fn test_meal_day_must_fit_plan() {
        let plan = NewMealPlan {
            duration: 7,
            meals: vec![meal(Some(6))],
        };
        assert!(plan.check().is_ok());

        let plan = NewMealPlan {
            duration: 7,
            meals: vec![meal(Some(7))],
        };
        assert!(plan.check().unwrap_err().contains("day 7"));
    }

    #[test]
    fn test_duration_bounds() {
        let plan = NewMealPlan {
            duration: 0,
            meals: vec![],
        };
        assert!(plan.check().is_err());

        let plan = NewMealPlan {
            duration: MAX_PLAN_DAYS + 1,
            meals: vec![],
        };
        assert!(plan.check().is_err());
    }

    #[test]
    fn test_meal_time_wire_format() {
        let json = serde_json::to_value(meal(None)).unwrap();
        assert_eq!(json["mealTime"], "breakfast");
        assert!(json.get("day").is_none());
    }
}
