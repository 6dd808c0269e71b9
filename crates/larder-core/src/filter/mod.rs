//! Preference filter: narrows the catalog to the recipes a user accepts.
//!
//! The preference filter is conjunctive over diet, cuisine, and total time;
//! each rule passes everything through when its preference is unset. Two
//! screen-level filters sit on top of it: [`TimeLimit`] for the pantry view
//! and [`GoalFocus`] for goal browsing.

mod preferences;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::catalog::Recipe;

pub use preferences::{ANY_CUISINE, CuisinePreference, Goal, GoalParseError, UserPreferences};

/// Calorie ceiling (exclusive) for [`GoalFocus::LowCalorie`].
pub const LOW_CALORIE_MAX: f64 = 450.0;
/// Protein floor in grams (exclusive) for [`GoalFocus::HighProtein`].
pub const HIGH_PROTEIN_MIN: f64 = 30.0;

/// Return the recipes that satisfy `prefs`, in catalog order.
///
/// `None` preferences, or preferences with every field unset, return the
/// whole catalog.
pub fn filter_catalog(catalog: &[Arc<Recipe>], prefs: Option<&UserPreferences>) -> Vec<Arc<Recipe>> {
    let Some(prefs) = prefs else {
        return catalog.to_vec();
    };
    catalog
        .iter()
        .filter(|recipe| satisfies(recipe, prefs))
        .cloned()
        .collect()
}

/// Check a single recipe against every preference rule.
pub fn satisfies(recipe: &Recipe, prefs: &UserPreferences) -> bool {
    let diet_ok = prefs.diet.is_empty() || prefs.diet.contains(&recipe.diet);
    let cuisine_ok = prefs.cuisine.allows(&recipe.cuisine);
    let time_ok = match prefs.cook_time_max {
        Some(max) => recipe.total_minutes() <= max,
        None => true,
    };
    diet_ok && cuisine_ok && time_ok
}

// ---------------------------------------------------------------------------
// Time buckets (pantry view)
// ---------------------------------------------------------------------------

/// Total-time bucket offered on the pantry recipes view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeLimit {
    #[default]
    All,
    Under30,
    Under60,
}

impl TimeLimit {
    /// Inclusive upper bound in minutes, or `None` for no bound.
    pub fn max_minutes(self) -> Option<u32> {
        match self {
            Self::All => None,
            Self::Under30 => Some(30),
            Self::Under60 => Some(60),
        }
    }

    pub fn admits(self, recipe: &Recipe) -> bool {
        self.max_minutes()
            .is_none_or(|max| recipe.total_minutes() <= max)
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::All => "all",
            Self::Under30 => "under30",
            Self::Under60 => "under60",
        };
        f.write_str(s)
    }
}

impl FromStr for TimeLimit {
    type Err = TimeLimitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "under30" | "30" => Ok(Self::Under30),
            "under60" | "60" => Ok(Self::Under60),
            _ => Err(TimeLimitParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`TimeLimit`] string.
#[derive(Debug, Clone)]
pub struct TimeLimitParseError(pub String);

impl fmt::Display for TimeLimitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid time limit: {:?} (expected all, under30, or under60)",
            self.0
        )
    }
}

impl std::error::Error for TimeLimitParseError {}

// ---------------------------------------------------------------------------
// Goal browsing
// ---------------------------------------------------------------------------

/// Nutrition lens used when browsing recipes by goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GoalFocus {
    #[default]
    All,
    LowCalorie,
    HighProtein,
}

impl GoalFocus {
    pub fn admits(self, recipe: &Recipe) -> bool {
        match self {
            Self::All => true,
            Self::LowCalorie => recipe.nutrition.calories < LOW_CALORIE_MAX,
            Self::HighProtein => recipe.nutrition.protein > HIGH_PROTEIN_MIN,
        }
    }
}

impl Goal {
    /// The browsing lens that serves this goal.
    pub fn focus(self) -> GoalFocus {
        match self {
            Goal::Loss => GoalFocus::LowCalorie,
            Goal::Protein => GoalFocus::HighProtein,
            Goal::Maintain => GoalFocus::All,
        }
    }
}

impl fmt::Display for GoalFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::All => "all",
            Self::LowCalorie => "low-calorie",
            Self::HighProtein => "high-protein",
        };
        f.write_str(s)
    }
}

impl FromStr for GoalFocus {
    type Err = GoalFocusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "low-calorie" | "low_calorie" => Ok(Self::LowCalorie),
            "high-protein" | "high_protein" => Ok(Self::HighProtein),
            _ => Err(GoalFocusParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`GoalFocus`] string.
#[derive(Debug, Clone)]
pub struct GoalFocusParseError(pub String);

impl fmt::Display for GoalFocusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid goal focus: {:?} (expected all, low-calorie, or high-protein)",
            self.0
        )
    }
}

impl std::error::Error for GoalFocusParseError {}

/// Keep the recipes `focus` admits, preserving order.
pub fn filter_by_goal(recipes: &[Arc<Recipe>], focus: GoalFocus) -> Vec<Arc<Recipe>> {
    recipes
        .iter()
        .filter(|recipe| focus.admits(recipe))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::catalog::{DietCategory, Nutrition, RecipeId};

    fn recipe(id: u32, diet: DietCategory, cuisine: &str, prep: &str, cook: &str) -> Arc<Recipe> {
        Arc::new(Recipe {
            id: RecipeId(id),
            name: format!("Recipe {id}"),
            diet,
            cuisine: cuisine.to_string(),
            ingredients: vec![],
            instructions: vec![],
            prep_time: prep.to_string(),
            cook_time: cook.to_string(),
            servings: 1,
            image_url: None,
            nutrition: Nutrition::default(),
        })
    }

    fn ids(recipes: &[Arc<Recipe>]) -> Vec<u32> {
        recipes.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn no_preferences_pass_everything_through() {
        let catalog = vec![
            recipe(1, DietCategory::Vegan, "Thai", "5 min", "5 min"),
            recipe(2, DietCategory::NonVeg, "Indian", "1 hr", "1 hr"),
        ];
        assert_eq!(ids(&filter_catalog(&catalog, None)), vec![1, 2]);
        let empty = UserPreferences::default();
        assert_eq!(ids(&filter_catalog(&catalog, Some(&empty))), vec![1, 2]);
    }

    #[test]
    fn vegan_only_keeps_vegan_recipes_in_order() {
        let mut catalog = Vec::new();
        for id in 1..=13 {
            let diet = if id % 4 == 0 { DietCategory::Vegan } else { DietCategory::NonVeg };
            catalog.push(recipe(id, diet, "Any", "5 min", "10 min"));
        }
        let prefs = UserPreferences {
            diet: BTreeSet::from([DietCategory::Vegan]),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, Some(&prefs))), vec![4, 8, 12]);
    }

    #[test]
    fn vegetarian_does_not_imply_vegan() {
        let catalog = vec![
            recipe(1, DietCategory::Vegan, "Thai", "", ""),
            recipe(2, DietCategory::Vegetarian, "Thai", "", ""),
        ];
        let prefs = UserPreferences {
            diet: BTreeSet::from([DietCategory::Vegetarian]),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, Some(&prefs))), vec![2]);
    }

    #[test]
    fn cuisine_is_strict_unless_any() {
        let catalog = vec![
            recipe(1, DietCategory::Vegan, "Thai", "", ""),
            recipe(2, DietCategory::Vegan, "Italian", "", ""),
        ];
        let only_thai = UserPreferences {
            cuisine: CuisinePreference::from(vec!["Thai".to_string()]),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, Some(&only_thai))), vec![1]);

        let any = UserPreferences {
            cuisine: CuisinePreference::from(vec!["Thai".to_string(), "Any".to_string()]),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, Some(&any))), vec![1, 2]);
    }

    #[test]
    fn time_limit_sums_prep_and_cook() {
        let catalog = vec![
            recipe(1, DietCategory::Vegan, "Thai", "10 min", "20 min"),
            recipe(2, DietCategory::Vegan, "Thai", "15 min", "20 min"),
            recipe(3, DietCategory::Vegan, "Thai", "1 hr", ""),
        ];
        let prefs = UserPreferences {
            cook_time_max: Some(30),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, Some(&prefs))), vec![1]);
    }

    #[test]
    fn rules_are_conjunctive() {
        let catalog = vec![
            recipe(1, DietCategory::Vegan, "Thai", "5 min", "5 min"),
            recipe(2, DietCategory::Vegan, "Italian", "5 min", "5 min"),
            recipe(3, DietCategory::NonVeg, "Thai", "5 min", "5 min"),
            recipe(4, DietCategory::Vegan, "Thai", "1 hr", "5 min"),
        ];
        let prefs = UserPreferences {
            diet: BTreeSet::from([DietCategory::Vegan]),
            cuisine: CuisinePreference::from(vec!["Thai".to_string()]),
            cook_time_max: Some(15),
            goal: None,
        };
        assert_eq!(ids(&filter_catalog(&catalog, Some(&prefs))), vec![1]);
    }

    #[test]
    fn time_limit_buckets() {
        let quick = recipe(1, DietCategory::Vegan, "Thai", "10 min", "20 min");
        let slow = recipe(2, DietCategory::Vegan, "Thai", "45 min", "30 min");
        assert!(TimeLimit::Under30.admits(&quick));
        assert!(!TimeLimit::Under30.admits(&slow));
        assert!(!TimeLimit::Under60.admits(&slow));
        assert!(TimeLimit::All.admits(&slow));
        assert_eq!("under60".parse::<TimeLimit>().unwrap(), TimeLimit::Under60);
        assert!("soon".parse::<TimeLimit>().is_err());
    }

    #[test]
    fn goal_focus_thresholds_are_exclusive() {
        let mut light = (*recipe(1, DietCategory::Vegan, "Thai", "", "")).clone();
        light.nutrition.calories = 449.0;
        light.nutrition.protein = 30.0;
        let mut hearty = light.clone();
        hearty.id = RecipeId(2);
        hearty.nutrition.calories = 450.0;
        hearty.nutrition.protein = 31.0;
        let recipes = vec![Arc::new(light), Arc::new(hearty)];

        assert_eq!(ids(&filter_by_goal(&recipes, GoalFocus::LowCalorie)), vec![1]);
        assert_eq!(ids(&filter_by_goal(&recipes, GoalFocus::HighProtein)), vec![2]);
        assert_eq!(ids(&filter_by_goal(&recipes, GoalFocus::All)), vec![1, 2]);
    }

    #[test]
    fn goal_maps_to_focus() {
        assert_eq!(Goal::Loss.focus(), GoalFocus::LowCalorie);
        assert_eq!(Goal::Protein.focus(), GoalFocus::HighProtein);
        assert_eq!(Goal::Maintain.focus(), GoalFocus::All);
        assert_eq!("high-protein".parse::<GoalFocus>().unwrap(), GoalFocus::HighProtein);
    }
}
