use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseMealTypeError;

/// Kind of food served in a meal.
///
/// The display name doubles as the persisted encoding, so a blob written by
/// one version reads back as the same variant.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MealType {
    #[default]
    #[serde(rename = "Wet Food")]
    WetFood,
    #[serde(rename = "Dry Food")]
    DryFood,
    #[serde(rename = "Treats")]
    Treats,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::WetFood, MealType::DryFood, MealType::Treats];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::WetFood => "Wet Food",
            MealType::DryFood => "Dry Food",
            MealType::Treats => "Treats",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = ParseMealTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect();

        match normalized.as_str() {
            "wet" | "wet food" | "wetfood" => Ok(MealType::WetFood),
            "dry" | "dry food" | "dryfood" => Ok(MealType::DryFood),
            "treat" | "treats" => Ok(MealType::Treats),
            _ => Err(ParseMealTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_display() {
        assert_eq!(format!("{}", MealType::WetFood), "Wet Food");
        assert_eq!(format!("{}", MealType::DryFood), "Dry Food");
        assert_eq!(format!("{}", MealType::Treats), "Treats");
    }

    #[test]
    fn test_meal_type_from_str() {
        assert_eq!(MealType::from_str("Wet Food").unwrap(), MealType::WetFood);
        assert_eq!(MealType::from_str("dry_food").unwrap(), MealType::DryFood);
        assert_eq!(MealType::from_str("DRY").unwrap(), MealType::DryFood);
        assert_eq!(MealType::from_str("wet-food").unwrap(), MealType::WetFood);
        assert_eq!(MealType::from_str("treat").unwrap(), MealType::Treats);
        assert_eq!(MealType::from_str(" Treats ").unwrap(), MealType::Treats);
    }

    #[test]
    fn test_meal_type_from_str_invalid() {
        let err = MealType::from_str("kibble").unwrap_err();
        assert!(err.to_string().contains("kibble"));
        assert!(MealType::from_str("").is_err());
    }

    #[test]
    fn test_meal_type_default_is_wet_food() {
        assert_eq!(MealType::default(), MealType::WetFood);
    }

    #[test]
    fn test_meal_type_json_uses_display_name() {
        let json = serde_json::to_string(&MealType::DryFood).unwrap();
        assert_eq!(json, "\"Dry Food\"");

        let parsed: MealType = serde_json::from_str("\"Treats\"").unwrap();
        assert_eq!(parsed, MealType::Treats);
    }
}
