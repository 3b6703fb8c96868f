//! Ingredients, per-menu ingredient lines and derived shopping totals.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A purchasable ingredient measured in a given unit.
///
/// Both fields are trimmed at construction; the trimmed `(name, unit)` pair is
/// the identity used when totals are aggregated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ingredient {
    pub name: String,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl AsRef<str>, unit: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            unit: unit.as_ref().trim().to_string(),
        }
    }

    /// True when both name and unit are non-empty after trimming.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.unit.trim().is_empty()
    }

    /// The aggregation key, trimmed even if the fields were set directly.
    pub fn key(&self) -> (&str, &str) {
        (self.name.trim(), self.unit.trim())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.unit)
    }
}

/// One ingredient line of a menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuIngredient {
    pub ingredient: Ingredient,
    pub quantity: f64,
}

impl MenuIngredient {
    pub fn new(ingredient: Ingredient, quantity: f64) -> Self {
        Self {
            ingredient,
            quantity,
        }
    }

    /// Valid lines name a valid ingredient and a strictly positive quantity.
    pub fn is_valid(&self) -> bool {
        self.ingredient.is_valid() && self.quantity > 0.0
    }
}

/// Aggregated quantity of one `(name, unit)` pair across a plan window.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientTotal {
    pub ingredient: Ingredient,
    pub total_quantity: f64,
}

impl IngredientTotal {
    pub fn new(ingredient: Ingredient, total_quantity: f64) -> Self {
        Self {
            ingredient,
            total_quantity,
        }
    }
}

impl fmt::Display for IngredientTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.1} {}",
            self.ingredient.name, self.total_quantity, self.ingredient.unit
        )
    }
}
