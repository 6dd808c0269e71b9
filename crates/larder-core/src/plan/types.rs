//! Week plan structure: seven days, three meal slots each.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Recipe, RecipeId};

// ---------------------------------------------------------------------------
// Day
// ---------------------------------------------------------------------------

/// A day of the planning week. Weeks start on Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Zero-based position in the week.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        };
        f.write_str(s)
    }
}

impl FromStr for Day {
    type Err = DayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "tuesday" | "tue" | "tues" => Ok(Self::Tuesday),
            "wednesday" | "wed" => Ok(Self::Wednesday),
            "thursday" | "thu" | "thurs" => Ok(Self::Thursday),
            "friday" | "fri" => Ok(Self::Friday),
            "saturday" | "sat" => Ok(Self::Saturday),
            "sunday" | "sun" => Ok(Self::Sunday),
            _ => Err(DayParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Day`] string.
#[derive(Debug, Clone)]
pub struct DayParseError(pub String);

impl fmt::Display for DayParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid day: {:?} (expected monday through sunday)", self.0)
    }
}

impl std::error::Error for DayParseError {}

// ---------------------------------------------------------------------------
// MealSlot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        };
        f.write_str(s)
    }
}

impl FromStr for MealSlot {
    type Err = MealSlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            _ => Err(MealSlotParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`MealSlot`] string.
#[derive(Debug, Clone)]
pub struct MealSlotParseError(pub String);

impl fmt::Display for MealSlotParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid meal: {:?} (expected breakfast, lunch, or dinner)",
            self.0
        )
    }
}

impl std::error::Error for MealSlotParseError {}

// ---------------------------------------------------------------------------
// Plan records
// ---------------------------------------------------------------------------

/// The dishes planned for one meal, in serving order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default)]
    pub recipes: Vec<Arc<Recipe>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: Day,
    #[serde(default)]
    pub breakfast: Meal,
    #[serde(default)]
    pub lunch: Meal,
    #[serde(default)]
    pub dinner: Meal,
}

impl DayPlan {
    pub fn new(day: Day) -> Self {
        Self {
            day,
            breakfast: Meal::default(),
            lunch: Meal::default(),
            dinner: Meal::default(),
        }
    }

    pub fn meal(&self, slot: MealSlot) -> &Meal {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    pub fn meal_mut(&mut self, slot: MealSlot) -> &mut Meal {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }
}

/// Errors from manually editing a [`WeekPlan`].
#[derive(Debug, Error)]
pub enum PlanEditError {
    #[error("recipe {id} is already planned for {day} {slot}")]
    AlreadyPlanned { id: RecipeId, day: Day, slot: MealSlot },

    #[error("recipe {id} is not planned for {day} {slot}")]
    NotInSlot { id: RecipeId, day: Day, slot: MealSlot },
}

/// Error returned when a stored plan does not list the seven days in order.
#[derive(Debug, Clone)]
pub struct WeekShapeError(String);

impl fmt::Display for WeekShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid week plan: {}", self.0)
    }
}

impl std::error::Error for WeekShapeError {}

/// Seven [`DayPlan`]s, Monday through Sunday.
///
/// Serialized as a flat array of day objects. Plans produced by the assembler,
/// and plans edited through [`WeekPlan::add_recipe`], never hold the same
/// recipe id twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DayPlan>", into = "Vec<DayPlan>")]
pub struct WeekPlan {
    days: [DayPlan; 7],
}

impl Default for WeekPlan {
    fn default() -> Self {
        Self::empty()
    }
}

impl WeekPlan {
    /// A week with every slot empty.
    pub fn empty() -> Self {
        Self {
            days: Day::ALL.map(DayPlan::new),
        }
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn day(&self, day: Day) -> &DayPlan {
        &self.days[day.index()]
    }

    pub fn slot(&self, day: Day, slot: MealSlot) -> &[Arc<Recipe>] {
        &self.day(day).meal(slot).recipes
    }

    pub(crate) fn slot_mut(&mut self, day: Day, slot: MealSlot) -> &mut Vec<Arc<Recipe>> {
        &mut self.days[day.index()].meal_mut(slot).recipes
    }

    /// Every `(day, slot, recipes)` triple in week order.
    pub fn entries(&self) -> impl Iterator<Item = (Day, MealSlot, &[Arc<Recipe>])> {
        self.days.iter().flat_map(|day_plan| {
            MealSlot::ALL
                .into_iter()
                .map(move |slot| (day_plan.day, slot, day_plan.meal(slot).recipes.as_slice()))
        })
    }

    /// Every planned recipe in week order.
    pub fn recipes(&self) -> impl Iterator<Item = &Arc<Recipe>> {
        self.entries().flat_map(|(_, _, recipes)| recipes.iter())
    }

    pub fn recipe_ids(&self) -> impl Iterator<Item = RecipeId> + '_ {
        self.recipes().map(|recipe| recipe.id)
    }

    /// Where `id` is planned, if anywhere.
    pub fn locate(&self, id: RecipeId) -> Option<(Day, MealSlot)> {
        self.entries()
            .find(|(_, _, recipes)| recipes.iter().any(|r| r.id == id))
            .map(|(day, slot, _)| (day, slot))
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.recipe_count() == 0
    }

    /// Append `recipe` to a slot. Rejects recipes already planned this week.
    pub fn add_recipe(
        &mut self,
        day: Day,
        slot: MealSlot,
        recipe: Arc<Recipe>,
    ) -> Result<(), PlanEditError> {
        if let Some((planned_day, planned_slot)) = self.locate(recipe.id) {
            return Err(PlanEditError::AlreadyPlanned {
                id: recipe.id,
                day: planned_day,
                slot: planned_slot,
            });
        }
        self.slot_mut(day, slot).push(recipe);
        Ok(())
    }

    /// Remove the recipe with `id` from a slot and return it.
    pub fn remove_recipe(
        &mut self,
        day: Day,
        slot: MealSlot,
        id: RecipeId,
    ) -> Result<Arc<Recipe>, PlanEditError> {
        let recipes = self.slot_mut(day, slot);
        let position = recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(PlanEditError::NotInSlot { id, day, slot })?;
        Ok(recipes.remove(position))
    }

    /// Empty a slot, returning what it held.
    pub fn clear_slot(&mut self, day: Day, slot: MealSlot) -> Vec<Arc<Recipe>> {
        std::mem::take(self.slot_mut(day, slot))
    }
}

impl TryFrom<Vec<DayPlan>> for WeekPlan {
    type Error = WeekShapeError;

    fn try_from(days: Vec<DayPlan>) -> Result<Self, Self::Error> {
        let count = days.len();
        let days: [DayPlan; 7] = days
            .try_into()
            .map_err(|_| WeekShapeError(format!("expected 7 days, found {count}")))?;
        for (expected, day_plan) in Day::ALL.iter().zip(&days) {
            if day_plan.day != *expected {
                return Err(WeekShapeError(format!(
                    "expected {expected} at position {}, found {}",
                    expected.index() + 1,
                    day_plan.day
                )));
            }
        }
        Ok(Self { days })
    }
}

impl From<WeekPlan> for Vec<DayPlan> {
    fn from(plan: WeekPlan) -> Self {
        plan.days.into()
    }
}
