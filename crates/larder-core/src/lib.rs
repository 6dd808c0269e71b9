//! Recipe matching and weekly plan assembly.
//!
//! The crate is organized leaves-first:
//!
//! ```text
//! tokenize --> matcher --> rank            (pantry view)
//! catalog  --> filter  --> plan::assemble  (weekly plan)
//!                              ^
//!              proposal -------+  (external draft proposer)
//! ```
//!
//! Everything except [`proposal`] and [`plan::service`] is synchronous and
//! pure; the catalog is shared read-only through `Arc<Recipe>`.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod pantry;
pub mod plan;
pub mod proposal;
pub mod rank;
pub mod saved;
pub mod shopping;
pub mod tokenize;

pub use catalog::{Catalog, DietCategory, Ingredient, IngredientCategory, Nutrition, Recipe, RecipeId};
pub use error::PlanningError;
pub use filter::{CuisinePreference, Goal, GoalFocus, TimeLimit, UserPreferences};
pub use pantry::{Pantry, PantryItem};
pub use plan::{Day, DayPlan, DraftPlan, GeneratedPlan, Meal, MealSlot, WeekPlan};
pub use proposal::{PlanProposer, ProposalRequest};
pub use saved::{SavedPlan, SavedPlans};
pub use shopping::{ShoppingList, shopping_list};
pub use tokenize::TokenSet;
