//! Ingredient matcher: do two ingredient phrases denote the same thing?
//!
//! Matching is a direction-free subset test over token sets, so a coarse
//! pantry entry (`"flour"`) matches a specific recipe line (`"all-purpose
//! flour"`) and a specific pantry entry (`"whole wheat bread"`) matches a
//! coarse recipe line (`"bread"`).

use crate::tokenize::{TokenSet, tokenize};

/// Return `true` if every token of the smaller set occurs in the larger one.
///
/// Empty sets never match. The relation is symmetric.
pub fn matches(a: &TokenSet, b: &TokenSet) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.is_subset(large)
}

/// Tokenize both phrases and match them.
pub fn phrases_match(a: &str, b: &str) -> bool {
    matches(&tokenize(a), &tokenize(b))
}

/// Tokenize a list of pantry phrases, discarding phrases with no content.
pub fn pantry_token_sets<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<TokenSet> {
    names
        .into_iter()
        .map(tokenize)
        .filter(|tokens| !tokens.is_empty())
        .collect()
}

/// Return `true` if `ingredient` matches any of the pantry token sets.
pub fn matches_any(ingredient: &TokenSet, pantry: &[TokenSet]) -> bool {
    pantry.iter().any(|tokens| matches(tokens, ingredient))
}
