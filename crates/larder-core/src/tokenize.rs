//! Ingredient phrase tokenizer.
//!
//! Turns a free-text phrase such as `"2 slices of whole wheat bread"` into a
//! set of significant, singularized keywords (`{"whole", "wheat", "bread"}`).
//! Quantities, units of measure and filler words carry no identity and are
//! removed.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

/// A normalized set of word stems. Order is irrelevant; duplicates collapse.
pub type TokenSet = BTreeSet<String>;

/// Units of measure and filler words ignored during matching.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "clove", "cloves", "cup", "cups", "for", "g", "in", "kg", "l", "lb", "lbs",
    "ml", "of", "on", "or", "oz", "slice", "slices", "tbsp", "the", "tsp", "with",
];

/// Fractions, digit runs, and the punctuation that separates words.
fn noise_regex() -> Option<&'static Regex> {
    static NOISE: OnceLock<Option<Regex>> = OnceLock::new();
    NOISE
        .get_or_init(|| Regex::new(r"[0-9]+/[0-9]+|[0-9]+|[.,()]").ok())
        .as_ref()
}

/// Tokenize an ingredient phrase.
///
/// An empty result means the phrase had no significant content (e.g. it was
/// only a quantity) and must never match anything.
pub fn tokenize(text: &str) -> TokenSet {
    let lowered = text.to_lowercase();
    let cleaned = match noise_regex() {
        Some(re) => re.replace_all(&lowered, " ").into_owned(),
        None => lowered,
    };

    cleaned
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .map(singularize)
        .collect()
}

/// Reduce a plural word to its singular form with a small suffix cascade.
fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{stem}y")
    } else if word.ends_with("oes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") && word.chars().count() > 2 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}
