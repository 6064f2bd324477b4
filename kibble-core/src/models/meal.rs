use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::cat::CatId;
use super::meal_type::MealType;

/// Stable identifier of a meal.
pub type MealId = Uuid;

/// A single logged feeding. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: MealId,
    pub cat_id: CatId,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    /// Free-text quantity such as "1/4 cup" or "10g".
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl Meal {
    pub fn new(
        cat_id: CatId,
        meal_type: MealType,
        amount: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            cat_id,
            meal_type,
            amount: amount.into(),
            notes: None,
            occurred_at,
        }
    }

    /// Blank notes are dropped so that "" and no notes persist identically.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.amount.trim().is_empty()
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.occurred_at.with_timezone(&Local);
        writeln!(f, "{} - {}", self.meal_type, self.amount)?;
        writeln!(f, "  When: {}", local.format("%Y-%m-%d %H:%M"))?;
        if let Some(notes) = &self.notes {
            writeln!(f, "  Notes: {}", notes)?;
        }
        write!(f, "  ID: {}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_meal_new() {
        let cat_id = Uuid::new_v4();
        let meal = Meal::new(cat_id, MealType::DryFood, "1 cup", at());

        assert_eq!(meal.cat_id, cat_id);
        assert_eq!(meal.meal_type, MealType::DryFood);
        assert_eq!(meal.amount, "1 cup");
        assert!(meal.notes.is_none());
        assert_eq!(meal.occurred_at, at());
    }

    #[test]
    fn test_meal_with_notes() {
        let meal = Meal::new(Uuid::new_v4(), MealType::Treats, "2", at()).with_notes("Ate fast");
        assert_eq!(meal.notes, Some("Ate fast".to_string()));
    }

    #[test]
    fn test_meal_blank_notes_dropped() {
        let meal = Meal::new(Uuid::new_v4(), MealType::Treats, "2", at()).with_notes("  ");
        assert!(meal.notes.is_none());
    }

    #[test]
    fn test_meal_display() {
        let meal = Meal::new(Uuid::new_v4(), MealType::WetFood, "1 can", at()).with_notes("Hungry");

        let output = format!("{}", meal);
        assert!(output.contains("Wet Food - 1 can"));
        assert!(output.contains("Notes: Hungry"));
        assert!(output.contains(&meal.id.to_string()));
    }

    #[test]
    fn test_meal_json_uses_type_key() {
        let meal = Meal::new(Uuid::new_v4(), MealType::DryFood, "10g", at());

        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["type"], "Dry Food");
        assert!(json.get("catId").is_some());
        assert!(json.get("notes").is_none());
    }
}
