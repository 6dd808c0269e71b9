//! Recipe catalog: static, read-only recipe data loaded at startup.
//!
//! A built-in catalog is embedded in the binary (`recipes.toml`); callers may
//! also supply their own catalog as JSON (a flat array of recipes) or TOML
//! (`[[recipes]]` tables).

mod duration;

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use duration::parse_minutes;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Shelf category of an ingredient or pantry item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientCategory {
    Produce,
    Protein,
    Dairy,
    #[serde(rename = "Pantry Staples")]
    PantryStaples,
    Spices,
    Bakery,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 6] = [
        Self::Produce,
        Self::Protein,
        Self::Dairy,
        Self::PantryStaples,
        Self::Spices,
        Self::Bakery,
    ];
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Produce => "Produce",
            Self::Protein => "Protein",
            Self::Dairy => "Dairy",
            Self::PantryStaples => "Pantry Staples",
            Self::Spices => "Spices",
            Self::Bakery => "Bakery",
        };
        f.write_str(s)
    }
}

impl FromStr for IngredientCategory {
    type Err = IngredientCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "produce" => Ok(Self::Produce),
            "protein" => Ok(Self::Protein),
            "dairy" => Ok(Self::Dairy),
            "pantry staples" | "pantry" => Ok(Self::PantryStaples),
            "spices" | "spice" => Ok(Self::Spices),
            "bakery" => Ok(Self::Bakery),
            _ => Err(IngredientCategoryParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`IngredientCategory`] string.
#[derive(Debug, Clone)]
pub struct IngredientCategoryParseError(pub String);

impl fmt::Display for IngredientCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid ingredient category: {:?} (expected produce, protein, dairy, pantry-staples, spices, or bakery)",
            self.0
        )
    }
}

impl std::error::Error for IngredientCategoryParseError {}

// ---------------------------------------------------------------------------

/// Dietary category of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietCategory {
    Vegetarian,
    Vegan,
    NonVeg,
}

impl fmt::Display for DietCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::NonVeg => "non-veg",
        };
        f.write_str(s)
    }
}

impl FromStr for DietCategory {
    type Err = DietCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vegetarian" => Ok(Self::Vegetarian),
            "vegan" => Ok(Self::Vegan),
            "non-veg" | "non_veg" | "nonveg" => Ok(Self::NonVeg),
            _ => Err(DietCategoryParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`DietCategory`] string.
#[derive(Debug, Clone)]
pub struct DietCategoryParseError(pub String);

impl fmt::Display for DietCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid diet: {:?} (expected vegetarian, vegan, or non-veg)",
            self.0
        )
    }
}

impl std::error::Error for DietCategoryParseError {}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Catalog-assigned recipe identifier. `0` is reserved for "no dish" on the
/// proposal wire format and never names a recipe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecipeId(pub u32);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single ingredient line of a recipe, e.g. `"2 cups all-purpose flour"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub category: IngredientCategory,
    /// Cuisines this ingredient is typical of. Informational only.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub cuisines: BTreeSet<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, category: IngredientCategory) -> Self {
        Self {
            name: name.into(),
            category,
            cuisines: BTreeSet::new(),
        }
    }
}

/// Per-serving nutrition facts. Calories in kcal, macros in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// An immutable catalog recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Dietary category (`category` on the wire).
    #[serde(rename = "category")]
    pub diet: DietCategory,
    pub cuisine: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Free-text duration, e.g. `"15 min"` or `"1 hr 10 min"`.
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub nutrition: Nutrition,
}

fn default_servings() -> u32 {
    1
}

impl Recipe {
    /// Prep time plus cook time, in minutes.
    pub fn total_minutes(&self) -> u32 {
        parse_minutes(&self.prep_time).saturating_add(parse_minutes(&self.cook_time))
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Errors from loading or validating a recipe catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate recipe id {0}")]
    DuplicateId(RecipeId),

    #[error("recipe {name:?} uses reserved id 0")]
    ReservedId { name: String },
}

/// Container for deserializing a TOML catalog file.
#[derive(Debug, Deserialize)]
struct CatalogToml {
    #[serde(default)]
    recipes: Vec<Recipe>,
}

/// The embedded default catalog.
static EMBEDDED_TOML: &str = include_str!("recipes.toml");

/// A validated, read-only set of recipes in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Arc<Recipe>>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate or reserved ids.
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if recipe.id.0 == 0 {
                return Err(CatalogError::ReservedId {
                    name: recipe.name.clone(),
                });
            }
            if !seen.insert(recipe.id) {
                return Err(CatalogError::DuplicateId(recipe.id));
            }
        }
        Ok(Self {
            recipes: recipes.into_iter().map(Arc::new).collect(),
        })
    }

    /// Load the catalog that ships with the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_toml_str(EMBEDDED_TOML)
    }

    /// Parse a TOML catalog made of `[[recipes]]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let parsed: CatalogToml = toml::from_str(content)?;
        Self::new(parsed.recipes)
    }

    /// Parse a JSON catalog: a flat array of recipe objects.
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_json::from_str(content)?;
        Self::new(recipes)
    }

    pub fn recipes(&self) -> &[Arc<Recipe>] {
        &self.recipes
    }

    pub fn get(&self, id: RecipeId) -> Option<&Arc<Recipe>> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
