//! Meal-plan domain models and persistence-friendly types.

pub mod common;
pub mod ingredient;
pub mod menu;
pub mod plan;

pub use common::{find_by_id, find_by_name, Displayable, Identifiable, NamedEntity};
pub use ingredient::{Ingredient, IngredientTotal, MenuIngredient};
pub use menu::{Menu, MenuType, MenuTypeSet};
pub use plan::{MealSlot, Plan, PlanDay};
