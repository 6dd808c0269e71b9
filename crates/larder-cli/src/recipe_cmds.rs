//! Read-only views over the catalog: pantry matches, goal browsing, and the
//! shopping list.

use anyhow::Result;

use larder_core::filter::{GoalFocus, TimeLimit, UserPreferences, filter_by_goal, filter_catalog};
use larder_core::rank::rank_by_pantry;
use larder_core::{Catalog, Recipe, shopping_list};

use crate::store::DataStore;

fn summary(recipe: &Recipe) -> String {
    format!(
        "[{}] {} ({}, {}, {} min, {:.0} kcal, {:.0} g protein)",
        recipe.id,
        recipe.name,
        recipe.cuisine,
        recipe.diet,
        recipe.total_minutes(),
        recipe.nutrition.calories,
        recipe.nutrition.protein
    )
}

/// `larder recipes`: catalog recipes ranked by pantry coverage.
pub fn run_recipes(store: &DataStore, catalog: &Catalog, time: TimeLimit) -> Result<()> {
    let pantry = store.load_pantry()?;
    if pantry.is_empty() {
        println!("Your pantry is empty. Add items with `larder pantry add <name>`.");
        return Ok(());
    }

    let ranked = rank_by_pantry(catalog.recipes(), &pantry.token_sets());
    let shown: Vec<_> = ranked.iter().filter(|r| time.admits(&r.recipe)).collect();
    if shown.is_empty() {
        println!("No recipes use what is in your pantry (time limit: {time}).");
        return Ok(());
    }
    for entry in shown {
        println!(
            "{}/{}  {}",
            entry.match_count,
            entry.ingredient_count(),
            summary(&entry.recipe)
        );
    }
    Ok(())
}

/// `larder browse`: diet-filtered recipes seen through a goal lens.
///
/// Without `--goal`, the lens follows the goal in the user's preferences.
pub fn run_browse(
    catalog: &Catalog,
    prefs: Option<&UserPreferences>,
    goal: Option<GoalFocus>,
) -> Result<()> {
    let focus = goal
        .or_else(|| prefs.and_then(|p| p.goal).map(|g| g.focus()))
        .unwrap_or_default();
    let diet_only = prefs.map(|p| UserPreferences {
        diet: p.diet.clone(),
        ..Default::default()
    });

    let pool = filter_catalog(catalog.recipes(), diet_only.as_ref());
    let recipes = filter_by_goal(&pool, focus);
    if recipes.is_empty() {
        println!("No recipes match ({focus}).");
        return Ok(());
    }
    println!("{} recipe(s), focus: {focus}", recipes.len());
    for recipe in &recipes {
        println!("  {}", summary(recipe));
    }
    Ok(())
}

/// `larder shopping`: ingredients for the current week, grouped by shelf.
pub fn run_shopping(store: &DataStore) -> Result<()> {
    let plan = store.load_week_plan()?;
    let pantry = store.load_pantry()?;
    let list = shopping_list(&plan, &pantry.token_sets());

    if list.is_empty() {
        println!("Nothing to buy: the week is empty.");
        return Ok(());
    }
    for group in list.groups() {
        println!("{}", group.category);
        for item in &group.items {
            let mark = if item.in_pantry { "x" } else { " " };
            println!("  [{mark}] {}", item.name);
        }
    }
    Ok(())
}
