//! The user's pantry: free-text ingredient names the matcher reads.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::IngredientCategory;
use crate::matcher::pantry_token_sets;
use crate::tokenize::TokenSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: String,
    pub name: String,
    pub category: IngredientCategory,
}

#[derive(Debug, Error)]
pub enum PantryError {
    #[error("pantry item name must not be blank")]
    BlankName,

    #[error("{name:?} is already in the pantry")]
    Duplicate { name: String },

    #[error("no pantry item matches {key:?}")]
    NotFound { key: String },
}

/// Pantry items in insertion order. Names are unique, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pantry {
    items: Vec<PantryItem>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PantryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item under a fresh id. The name is trimmed first.
    pub fn add(
        &mut self,
        name: &str,
        category: IngredientCategory,
    ) -> Result<&PantryItem, PantryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PantryError::BlankName);
        }
        if self.items.iter().any(|item| item.name.eq_ignore_ascii_case(name)) {
            return Err(PantryError::Duplicate {
                name: name.to_string(),
            });
        }
        self.items.push(PantryItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category,
        });
        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    /// Remove the item whose id or name (ignoring case) equals `key`.
    pub fn remove(&mut self, key: &str) -> Result<PantryItem, PantryError> {
        let key = key.trim();
        let position = self
            .items
            .iter()
            .position(|item| item.id == key)
            .or_else(|| {
                self.items
                    .iter()
                    .position(|item| item.name.eq_ignore_ascii_case(key))
            })
            .ok_or_else(|| PantryError::NotFound {
                key: key.to_string(),
            })?;
        Ok(self.items.remove(position))
    }

    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name.clone()).collect()
    }

    /// Token sets of every item with significant content.
    pub fn token_sets(&self) -> Vec<TokenSet> {
        pantry_token_sets(self.items.iter().map(|item| item.name.as_str()))
    }
}
