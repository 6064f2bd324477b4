//! Read-side views over the meal history of the active cat.
//!
//! Nothing is cached: each call scans the full meal list, so results always
//! reflect the latest store state.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{CatId, Meal, MealType};

/// Length of the trailing window counted by `recent_meals`.
pub fn recent_window() -> Duration {
    Duration::days(7)
}

/// Aggregates over one cat's meal history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_meals: usize,
    /// Meals with `occurred_at` inside the trailing seven days.
    pub recent_meals: usize,
    pub last_meal: Meal,
    /// Only types that occur at least once are present.
    pub meal_type_counts: BTreeMap<MealType, usize>,
}

pub struct MealQuery<'a> {
    meals: &'a [Meal],
    active: Option<CatId>,
    now: DateTime<Utc>,
}

impl<'a> MealQuery<'a> {
    pub fn new(meals: &'a [Meal], active: Option<CatId>, now: DateTime<Utc>) -> Self {
        Self { meals, active, now }
    }

    /// Meals of the active cat, most recent first. Meals sharing a timestamp
    /// keep their insertion order.
    pub fn meals_for_active_cat(&self) -> Vec<&'a Meal> {
        let Some(cat_id) = self.active else {
            return Vec::new();
        };

        let mut meals: Vec<&Meal> = self
            .meals
            .iter()
            .filter(|meal| meal.cat_id == cat_id)
            .collect();
        meals.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        meals
    }

    /// `None` when no cat is active or the active cat has no meals.
    pub fn statistics_for_active_cat(&self) -> Option<Statistics> {
        let meals = self.meals_for_active_cat();
        let last_meal = (*meals.first()?).clone();

        let since = self.now - recent_window();
        let recent_meals = meals
            .iter()
            .filter(|meal| meal.occurred_at >= since)
            .count();

        let mut meal_type_counts = BTreeMap::new();
        for meal in &meals {
            *meal_type_counts.entry(meal.meal_type).or_insert(0) += 1;
        }

        Some(Statistics {
            total_meals: meals.len(),
            recent_meals,
            last_meal,
            meal_type_counts,
        })
    }
}
