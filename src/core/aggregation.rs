//! Shopping-list aggregation over a plan window.

use std::collections::BTreeMap;

use crate::domain::{Ingredient, IngredientTotal, Plan};

/// Sums the ingredient lines of every assigned meal in `plan`.
///
/// Days are walked in order and lunch before dinner; invalid lines are
/// skipped. Lines are grouped by trimmed `(name, unit)` so the same name in two
/// units yields two totals. Output is sorted by name, then unit.
pub fn ingredient_totals(plan: &Plan) -> Vec<IngredientTotal> {
    // Tuple ordering on (name, unit) is the required output order.
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();

    let lines = plan
        .days
        .iter()
        .flat_map(|day| day.meals())
        .flat_map(|menu| menu.ingredients.iter())
        .filter(|line| line.is_valid());

    for line in lines {
        let (name, unit) = line.ingredient.key();
        *totals
            .entry((name.to_string(), unit.to_string()))
            .or_insert(0.0) += line.quantity.max(0.0);
    }

    totals
        .into_iter()
        .map(|((name, unit), quantity)| IngredientTotal::new(Ingredient { name, unit }, quantity))
        .collect()
}
