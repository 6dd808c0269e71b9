//! Draft plans: the untrusted proposal a week plan is assembled from.
//!
//! A proposer answers with a JSON array of day entries:
//!
//! ```json
//! [{"day": "Monday", "breakfast_recipe_ids": [3], "lunch_recipe_ids": [], "dinner_recipe_ids": [7, 9]}]
//! ```
//!
//! Parsing is lenient about the shape of each id field (a single id, a list,
//! or `null`), about missing keys, and about a surrounding Markdown code
//! fence. Anything that is not an array of day objects is rejected.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::catalog::RecipeId;
use crate::error::PlanningError;
use crate::plan::types::{Day, MealSlot, WeekPlan};

/// Recipe ids proposed for each slot of the week, in proposal order.
///
/// May still contain repeats and ids outside the candidate pool; the
/// assembler deals with both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPlan {
    slots: BTreeMap<(Day, MealSlot), Vec<RecipeId>>,
}

impl DraftPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids proposed for a slot. Unmentioned slots are empty.
    pub fn ids(&self, day: Day, slot: MealSlot) -> &[RecipeId] {
        self.slots
            .get(&(day, slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn set(&mut self, day: Day, slot: MealSlot, ids: Vec<RecipeId>) {
        if ids.is_empty() {
            self.slots.remove(&(day, slot));
        } else {
            self.slots.insert((day, slot), ids);
        }
    }

    /// Builder form of [`DraftPlan::set`].
    pub fn with(mut self, day: Day, slot: MealSlot, ids: &[u32]) -> Self {
        self.set(day, slot, ids.iter().copied().map(RecipeId).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl From<&WeekPlan> for DraftPlan {
    fn from(plan: &WeekPlan) -> Self {
        let mut draft = DraftPlan::new();
        for (day, slot, recipes) in plan.entries() {
            draft.set(day, slot, recipes.iter().map(|r| r.id).collect());
        }
        draft
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// An id field as proposers actually send it.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum IdField {
    One(u32),
    Many(Vec<u32>),
    #[default]
    Null,
}

impl IdField {
    fn into_ids(self) -> Vec<RecipeId> {
        let raw = match self {
            Self::One(id) => vec![id],
            Self::Many(ids) => ids,
            Self::Null => Vec::new(),
        };
        raw.into_iter().filter(|id| *id != 0).map(RecipeId).collect()
    }
}

#[derive(Debug, Deserialize)]
struct DraftEntry {
    #[serde(default)]
    day: Option<String>,
    #[serde(default, alias = "breakfast_recipe_id")]
    breakfast_recipe_ids: IdField,
    #[serde(default, alias = "lunch_recipe_id")]
    lunch_recipe_ids: IdField,
    #[serde(default, alias = "dinner_recipe_id")]
    dinner_recipe_ids: IdField,
}

/// Remove a surrounding ```` ``` ```` fence (with or without a language tag).
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Parse a proposer response into a [`DraftPlan`].
///
/// Entries name their day; an entry without a `day` key is placed by its
/// position in the array. Days the response does not mention stay empty.
/// Id `0` means "no dish" and is discarded here.
pub fn parse_draft(raw: &str) -> Result<DraftPlan, PlanningError> {
    let body = strip_code_fence(raw);
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| PlanningError::malformed(format!("response is not valid JSON: {e}")))?;

    let serde_json::Value::Array(entries) = value else {
        return Err(PlanningError::malformed(format!(
            "expected a JSON array of days, got {}",
            json_kind(&value)
        )));
    };

    let mut draft = DraftPlan::new();
    let mut seen_days = Vec::with_capacity(Day::ALL.len());

    for (position, entry) in entries.into_iter().enumerate() {
        let entry: DraftEntry = serde_json::from_value(entry).map_err(|e| {
            PlanningError::malformed(format!("day entry {}: {e}", position + 1))
        })?;

        let day = match entry.day.as_deref() {
            Some(name) => name.parse::<Day>().map_err(|e| {
                PlanningError::malformed(format!("day entry {}: {e}", position + 1))
            })?,
            None => Day::ALL.get(position).copied().ok_or_else(|| {
                PlanningError::malformed(format!(
                    "day entry {} has no day name and the week has only 7 days",
                    position + 1
                ))
            })?,
        };
        if seen_days.contains(&day) {
            return Err(PlanningError::malformed(format!("{day} appears more than once")));
        }
        seen_days.push(day);

        draft.set(day, MealSlot::Breakfast, entry.breakfast_recipe_ids.into_ids());
        draft.set(day, MealSlot::Lunch, entry.lunch_recipe_ids.into_ids());
        draft.set(day, MealSlot::Dinner, entry.dinner_recipe_ids.into_ids());
    }

    debug!(
        days = seen_days.len(),
        references = draft.len(),
        "parsed draft plan"
    );
    Ok(draft)
}
