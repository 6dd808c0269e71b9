//! Recipe ranker: orders candidate recipes by how much of each the pantry
//! already covers.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::Recipe;
use crate::matcher::matches_any;
use crate::tokenize::{TokenSet, tokenize};

/// A recipe with at least one ingredient found in the pantry.
#[derive(Debug, Clone)]
pub struct RankedRecipe {
    pub recipe: Arc<Recipe>,
    /// Number of ingredient lines matched by some pantry item.
    pub match_count: usize,
}

impl RankedRecipe {
    pub fn ingredient_count(&self) -> usize {
        self.recipe.ingredients.len()
    }

    /// Fraction of the recipe's ingredients covered by the pantry.
    pub fn coverage(&self) -> f64 {
        match self.ingredient_count() {
            0 => 0.0,
            n => self.match_count as f64 / n as f64,
        }
    }

    /// Compare coverage ratios exactly by cross-multiplying the counts.
    fn cmp_coverage(&self, other: &Self) -> Ordering {
        let lhs = self.match_count * other.ingredient_count();
        let rhs = other.match_count * self.ingredient_count();
        lhs.cmp(&rhs)
    }
}

/// Count the ingredients of `recipe` that some pantry entry matches.
///
/// Each ingredient counts once no matter how many pantry entries match it.
/// Ingredient lines with no significant tokens are skipped.
pub fn count_matches(recipe: &Recipe, pantry: &[TokenSet]) -> usize {
    recipe
        .ingredients
        .iter()
        .map(|ingredient| tokenize(&ingredient.name))
        .filter(|tokens| !tokens.is_empty() && matches_any(tokens, pantry))
        .count()
}

/// Rank `candidates` against the pantry.
///
/// Recipes with no matched ingredient are excluded. The rest are ordered by
/// match count, then coverage, both descending; ties keep candidate order.
pub fn rank_by_pantry(candidates: &[Arc<Recipe>], pantry: &[TokenSet]) -> Vec<RankedRecipe> {
    let mut ranked: Vec<RankedRecipe> = candidates
        .iter()
        .filter_map(|recipe| {
            let match_count = count_matches(recipe, pantry);
            (match_count > 0).then(|| RankedRecipe {
                recipe: Arc::clone(recipe),
                match_count,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.match_count
            .cmp(&a.match_count)
            .then_with(|| b.cmp_coverage(a))
    });

    debug!(
        candidates = candidates.len(),
        matched = ranked.len(),
        "ranked recipes by pantry"
    );
    ranked
}
