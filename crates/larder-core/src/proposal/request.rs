//! Proposal request construction and the prompt sent to a proposer.
//!
//! This module is pure: it shapes data and text, it never talks to a
//! proposer.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{DietCategory, Nutrition, Recipe, RecipeId};
use crate::filter::UserPreferences;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A recipe as shown to the proposer: enough to choose with, no
/// instructions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecipe {
    pub id: RecipeId,
    pub name: String,
    pub category: DietCategory,
    pub cuisine: String,
    pub prep_time: String,
    pub cook_time: String,
    pub nutrition: Nutrition,
    /// Ingredient names without preparation notes (`"onion, diced"` becomes
    /// `"onion"`).
    pub ingredients: Vec<String>,
}

impl From<&Recipe> for CandidateRecipe {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            category: recipe.diet,
            cuisine: recipe.cuisine.clone(),
            prep_time: recipe.prep_time.clone(),
            cook_time: recipe.cook_time.clone(),
            nutrition: recipe.nutrition,
            ingredients: recipe
                .ingredients
                .iter()
                .map(|ingredient| short_ingredient_name(&ingredient.name))
                .collect(),
        }
    }
}

fn short_ingredient_name(name: &str) -> String {
    name.split(',').next().unwrap_or(name).trim().to_string()
}

/// Everything a proposer is told about one planning request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
    pub preferences: Option<UserPreferences>,
    pub pantry_item_names: Vec<String>,
    pub candidate_recipes: Vec<CandidateRecipe>,
}

impl ProposalRequest {
    pub fn new(
        preferences: Option<&UserPreferences>,
        pantry_item_names: &[String],
        pool: &[Arc<Recipe>],
    ) -> Self {
        Self {
            preferences: preferences.cloned(),
            pantry_item_names: pantry_item_names.to_vec(),
            candidate_recipes: pool.iter().map(|r| CandidateRecipe::from(r.as_ref())).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt construction
// ---------------------------------------------------------------------------

/// Response schema the proposer is asked to follow.
const RESPONSE_SCHEMA: &str = r#"## Response Format

Reply with a JSON array of exactly 7 objects, Monday through Sunday:

```json
[
  {
    "day": "Monday",
    "breakfast_recipe_ids": [1],
    "lunch_recipe_ids": [4],
    "dinner_recipe_ids": [9]
  }
]
```

- `day` is the English day name.
- Each `*_recipe_ids` list holds ids taken from the candidate list. Use an
  empty list for no dish.
- Do not use the same recipe twice in the week.
- Output only the JSON array, with no commentary.
"#;

/// Build the natural-language prompt for a planning request.
pub fn build_proposal_prompt(request: &ProposalRequest) -> String {
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(
        "You are a meal planning assistant. Create a 7-day meal plan \
         (Monday to Sunday) for a user with these preferences:\n",
    );

    let prefs = request.preferences.as_ref();
    let diet = prefs
        .filter(|p| !p.diet.is_empty())
        .map(|p| {
            p.diet
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_else(|| "any".to_string());
    let max_time = prefs
        .and_then(|p| p.cook_time_max)
        .map(|m| format!("{m} minutes"))
        .unwrap_or_else(|| "any".to_string());
    let goal = prefs
        .and_then(|p| p.goal)
        .map(|g| g.to_string())
        .unwrap_or_else(|| "any".to_string());
    let cuisine = prefs
        .map(|p| p.cuisine.to_string())
        .unwrap_or_else(|| "any".to_string());

    prompt.push_str(&format!("- Diet: {diet}\n"));
    prompt.push_str(&format!("- Cuisine: {cuisine}\n"));
    prompt.push_str(&format!("- Max cooking time per meal: {max_time}\n"));
    prompt.push_str(&format!("- Health goal: {goal}\n\n"));

    if request.pantry_item_names.is_empty() {
        prompt.push_str("The user's pantry is empty.\n\n");
    } else {
        prompt.push_str(&format!(
            "The user has these ingredients in their pantry: {}. \
             Please prioritize recipes that use these ingredients.\n\n",
            request.pantry_item_names.join(", ")
        ));
    }

    prompt.push_str("Here is the list of available recipes. Choose only from this list:\n");
    // Serializing plain data structs cannot fail.
    let candidates = serde_json::to_string(&request.candidate_recipes).unwrap_or_default();
    prompt.push_str(&candidates);
    prompt.push_str("\n\n");

    prompt.push_str(RESPONSE_SCHEMA);
    prompt
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::catalog::{Ingredient, IngredientCategory};
    use crate::filter::Goal;

    fn pool() -> Vec<Arc<Recipe>> {
        vec![Arc::new(Recipe {
            id: RecipeId(3),
            name: "Veggie Stir-Fry".to_string(),
            diet: DietCategory::Vegan,
            cuisine: "Thai".to_string(),
            ingredients: vec![
                Ingredient::new("1 red bell pepper, sliced", IngredientCategory::Produce),
                Ingredient::new("2 tbsp soy sauce", IngredientCategory::PantryStaples),
            ],
            instructions: vec!["Stir-fry everything.".to_string()],
            prep_time: "10 min".to_string(),
            cook_time: "10 min".to_string(),
            servings: 2,
            image_url: None,
            nutrition: Nutrition {
                calories: 310.0,
                protein: 12.0,
                carbs: 40.0,
                fat: 9.0,
            },
        })]
    }

    #[test]
    fn candidate_strips_preparation_notes() {
        let request = ProposalRequest::new(None, &[], &pool());
        assert_eq!(
            request.candidate_recipes[0].ingredients,
            vec!["1 red bell pepper", "2 tbsp soy sauce"]
        );
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = ProposalRequest::new(None, &["rice".to_string()], &pool());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["pantryItemNames"][0], "rice");
        assert_eq!(json["candidateRecipes"][0]["prepTime"], "10 min");
        assert_eq!(json["candidateRecipes"][0]["category"], "vegan");
        assert!(json["candidateRecipes"][0].get("instructions").is_none());
    }

    #[test]
    fn prompt_without_preferences_says_any() {
        let request = ProposalRequest::new(None, &[], &pool());
        let prompt = build_proposal_prompt(&request);
        assert!(prompt.contains("- Diet: any"));
        assert!(prompt.contains("- Health goal: any"));
        assert!(prompt.contains("pantry is empty"));
        assert!(prompt.contains("breakfast_recipe_ids"));
        assert!(prompt.contains(r#""id":3"#));
    }

    #[test]
    fn prompt_lists_preferences_and_pantry() {
        let prefs = UserPreferences {
            diet: BTreeSet::from([DietCategory::Vegan]),
            cook_time_max: Some(30),
            goal: Some(Goal::Protein),
            ..Default::default()
        };
        let pantry = vec!["rice".to_string(), "tofu".to_string()];
        let prompt = build_proposal_prompt(&ProposalRequest::new(Some(&prefs), &pantry, &pool()));
        assert!(prompt.contains("- Diet: vegan"));
        assert!(prompt.contains("- Max cooking time per meal: 30 minutes"));
        assert!(prompt.contains("- Health goal: protein"));
        assert!(prompt.contains("rice, tofu"));
    }
}
