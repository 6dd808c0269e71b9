//! Shopping list: every ingredient the week needs, grouped by shelf.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::catalog::IngredientCategory;
use crate::matcher::matches_any;
use crate::plan::WeekPlan;
use crate::tokenize::{TokenSet, tokenize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub name: String,
    pub category: IngredientCategory,
    /// Some pantry item already covers this ingredient.
    pub in_pantry: bool,
}

/// Items of one category, in the order the week first needs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingGroup {
    pub category: IngredientCategory,
    pub items: Vec<ShoppingItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShoppingList {
    groups: Vec<ShoppingGroup>,
}

impl ShoppingList {
    /// Groups sorted by category display name.
    pub fn groups(&self) -> &[ShoppingGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    /// Items not covered by the pantry.
    pub fn to_buy(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .filter(|item| !item.in_pantry)
    }
}

/// Build the shopping list for `plan`.
///
/// Ingredient lines are deduplicated by exact name, keeping the first
/// occurrence in week order.
pub fn shopping_list(plan: &WeekPlan, pantry: &[TokenSet]) -> ShoppingList {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut grouped: BTreeMap<String, ShoppingGroup> = BTreeMap::new();

    for ingredient in plan.recipes().flat_map(|recipe| recipe.ingredients.iter()) {
        if !seen.insert(ingredient.name.as_str()) {
            continue;
        }
        let tokens = tokenize(&ingredient.name);
        let item = ShoppingItem {
            name: ingredient.name.clone(),
            category: ingredient.category,
            in_pantry: matches_any(&tokens, pantry),
        };
        grouped
            .entry(ingredient.category.to_string())
            .or_insert_with(|| ShoppingGroup {
                category: ingredient.category,
                items: Vec::new(),
            })
            .items
            .push(item);
    }

    ShoppingList {
        groups: grouped.into_values().collect(),
    }
}
