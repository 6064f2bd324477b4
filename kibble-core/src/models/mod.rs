mod cat;
mod meal;
mod meal_type;

pub use cat::{Cat, CatId};
pub use meal::{Meal, MealId};
pub use meal_type::MealType;
