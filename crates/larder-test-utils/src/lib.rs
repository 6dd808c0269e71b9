//! Shared fixtures for larder integration tests.
//!
//! Provides a recipe builder, a small fixed catalog, and a scripted
//! [`PlanProposer`] that records how often it was asked for a draft.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use larder_core::catalog::{
    Catalog, DietCategory, Ingredient, IngredientCategory, Nutrition, Recipe, RecipeId,
};
use larder_core::proposal::{PlanProposer, ProposalRequest};

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

/// Builder for test recipes. Defaults: vegetarian, Italian, 10 + 20 min.
#[derive(Debug, Clone)]
pub struct RecipeBuilder {
    recipe: Recipe,
}

/// Start building a recipe.
pub fn recipe(id: u32, name: &str) -> RecipeBuilder {
    RecipeBuilder {
        recipe: Recipe {
            id: RecipeId(id),
            name: name.to_string(),
            diet: DietCategory::Vegetarian,
            cuisine: "Italian".to_string(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            prep_time: "10 min".to_string(),
            cook_time: "20 min".to_string(),
            servings: 2,
            image_url: None,
            nutrition: Nutrition::default(),
        },
    }
}

impl RecipeBuilder {
    pub fn diet(mut self, diet: DietCategory) -> Self {
        self.recipe.diet = diet;
        self
    }

    pub fn cuisine(mut self, cuisine: &str) -> Self {
        self.recipe.cuisine = cuisine.to_string();
        self
    }

    pub fn ingredient(mut self, name: &str, category: IngredientCategory) -> Self {
        self.recipe.ingredients.push(Ingredient::new(name, category));
        self
    }

    pub fn times(mut self, prep: &str, cook: &str) -> Self {
        self.recipe.prep_time = prep.to_string();
        self.recipe.cook_time = cook.to_string();
        self
    }

    pub fn nutrition(mut self, calories: f64, protein: f64) -> Self {
        self.recipe.nutrition.calories = calories;
        self.recipe.nutrition.protein = protein;
        self
    }

    pub fn build(self) -> Recipe {
        self.recipe
    }

    pub fn arc(self) -> Arc<Recipe> {
        Arc::new(self.recipe)
    }
}

/// Fourteen recipes, ids 1..=14: three vegan (2, 5, 9), five vegetarian
/// (1, 4, 7, 11, 12), six non-veg.
pub fn sample_recipes() -> Vec<Recipe> {
    use DietCategory::{NonVeg, Vegan, Vegetarian};
    use IngredientCategory::{Bakery, Dairy, PantryStaples, Produce, Protein, Spices};

    vec![
        recipe(1, "Greek Yogurt Parfait")
            .diet(Vegetarian)
            .cuisine("Mediterranean")
            .ingredient("1 cup greek yogurt", Dairy)
            .ingredient("1/2 cup mixed berries", Produce)
            .times("5 min", "0 min")
            .nutrition(280.0, 18.0)
            .build(),
        recipe(2, "Chickpea Curry")
            .diet(Vegan)
            .cuisine("Indian")
            .ingredient("1 can chickpeas, drained", Protein)
            .ingredient("1 onion, diced", Produce)
            .ingredient("1 tsp garam masala", Spices)
            .times("10 min", "25 min")
            .nutrition(420.0, 15.0)
            .build(),
        recipe(3, "Grilled Chicken Salad")
            .diet(NonVeg)
            .cuisine("American")
            .ingredient("1 chicken breast", Protein)
            .ingredient("2 cups romaine lettuce", Produce)
            .times("10 min", "15 min")
            .nutrition(390.0, 42.0)
            .build(),
        recipe(4, "Caprese Sandwich")
            .diet(Vegetarian)
            .ingredient("2 slices whole wheat bread", Bakery)
            .ingredient("fresh mozzarella", Dairy)
            .ingredient("1 tomato, sliced", Produce)
            .times("10 min", "0 min")
            .nutrition(450.0, 21.0)
            .build(),
        recipe(5, "Tofu Stir-Fry")
            .diet(Vegan)
            .cuisine("Thai")
            .ingredient("1 block firm tofu", Protein)
            .ingredient("1 red bell pepper", Produce)
            .ingredient("2 tbsp soy sauce", PantryStaples)
            .times("15 min", "15 min")
            .nutrition(350.0, 24.0)
            .build(),
        recipe(6, "Beef Tacos")
            .diet(NonVeg)
            .cuisine("Mexican")
            .ingredient("1 lb ground beef", Protein)
            .ingredient("8 corn tortillas", Bakery)
            .times("10 min", "20 min")
            .nutrition(610.0, 35.0)
            .build(),
        recipe(7, "Margherita Pizza")
            .diet(Vegetarian)
            .ingredient("2 cups all-purpose flour", PantryStaples)
            .ingredient("fresh mozzarella", Dairy)
            .ingredient("fresh basil", Produce)
            .times("1 hr 30 min", "15 min")
            .nutrition(700.0, 28.0)
            .build(),
        recipe(8, "Salmon with Rice")
            .diet(NonVeg)
            .cuisine("American")
            .ingredient("1 salmon fillet", Protein)
            .ingredient("1 cup brown rice", PantryStaples)
            .times("5 min", "25 min")
            .nutrition(520.0, 38.0)
            .build(),
        recipe(9, "Lentil Soup")
            .diet(Vegan)
            .cuisine("Mediterranean")
            .ingredient("1 cup red lentils", PantryStaples)
            .ingredient("2 carrots, chopped", Produce)
            .ingredient("1 onion, diced", Produce)
            .times("10 min", "35 min")
            .nutrition(330.0, 18.0)
            .build(),
        recipe(10, "Chicken Tikka")
            .diet(NonVeg)
            .cuisine("Indian")
            .ingredient("2 chicken thighs", Protein)
            .ingredient("1/2 cup plain yogurt", Dairy)
            .times("20 min", "25 min")
            .nutrition(480.0, 40.0)
            .build(),
        recipe(11, "Spinach Omelette")
            .diet(Vegetarian)
            .cuisine("American")
            .ingredient("3 eggs", Protein)
            .ingredient("1 cup spinach", Produce)
            .times("5 min", "10 min")
            .nutrition(300.0, 22.0)
            .build(),
        recipe(12, "Pesto Pasta")
            .diet(Vegetarian)
            .ingredient("8 oz penne", PantryStaples)
            .ingredient("fresh basil", Produce)
            .times("5 min", "15 min")
            .nutrition(560.0, 16.0)
            .build(),
        recipe(13, "Shrimp Pad Thai")
            .diet(NonVeg)
            .cuisine("Thai")
            .ingredient("8 oz rice noodles", PantryStaples)
            .ingredient("1/2 lb shrimp", Protein)
            .times("15 min", "15 min")
            .nutrition(540.0, 31.0)
            .build(),
        recipe(14, "Turkey Chili")
            .diet(NonVeg)
            .cuisine("American")
            .ingredient("1 lb ground turkey", Protein)
            .ingredient("1 can kidney beans", Protein)
            .ingredient("1 tsp chili powder", Spices)
            .times("10 min", "40 min")
            .nutrition(450.0, 36.0)
            .build(),
    ]
}

/// [`sample_recipes`] as a validated catalog.
pub fn sample_catalog() -> Catalog {
    Catalog::new(sample_recipes()).expect("sample recipes have unique ids")
}

// ---------------------------------------------------------------------------
// Proposers
// ---------------------------------------------------------------------------

/// A proposer that answers every request with the same canned text (or
/// error) and counts its calls.
#[derive(Debug, Clone)]
pub struct ScriptedProposer {
    response: std::result::Result<String, String>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProposer {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times [`PlanProposer::propose`] has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlanProposer for ScriptedProposer {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn propose(&self, _request: &ProposalRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(anyhow!("{message}")),
        }
    }
}

/// A draft entry in the proposer wire format.
pub fn draft_day(day: &str, breakfast: &[u32], lunch: &[u32], dinner: &[u32]) -> String {
    format!(
        r#"{{"day":"{day}","breakfast_recipe_ids":{breakfast:?},"lunch_recipe_ids":{lunch:?},"dinner_recipe_ids":{dinner:?}}}"#
    )
}
