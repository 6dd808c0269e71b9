//! Plan assembler: turns a draft into a week plan with no repeated recipe.
//!
//! The draft is walked once, Monday to Sunday and breakfast to dinner, in
//! proposal order within each slot. A repeated id is swapped for the first
//! pool recipe not yet used; ids outside the pool are dropped.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{Recipe, RecipeId};
use crate::error::PlanningError;
use crate::plan::draft::DraftPlan;
use crate::plan::types::{Day, MealSlot, WeekPlan};

/// Fewest candidate recipes a week plan can be assembled from.
pub const MIN_POOL_SIZE: usize = 7;

/// Fail with [`PlanningError::InsufficientPool`] when `pool` is too small to
/// plan a week from.
pub fn check_pool(pool: &[Arc<Recipe>]) -> Result<(), PlanningError> {
    if pool.len() < MIN_POOL_SIZE {
        return Err(PlanningError::InsufficientPool {
            available: pool.len(),
            required: MIN_POOL_SIZE,
        });
    }
    Ok(())
}

/// Working state of one assembly pass.
struct Assembly<'a> {
    by_id: HashMap<RecipeId, &'a Arc<Recipe>>,
    /// Pool recipes still available as replacements, in pool order.
    spares: Vec<&'a Arc<Recipe>>,
    used: HashSet<RecipeId>,
    plan: WeekPlan,
}

impl<'a> Assembly<'a> {
    fn new(pool: &'a [Arc<Recipe>]) -> Self {
        Self {
            by_id: pool.iter().map(|recipe| (recipe.id, recipe)).collect(),
            spares: pool.iter().collect(),
            used: HashSet::new(),
            plan: WeekPlan::empty(),
        }
    }

    /// Remove and return the first spare whose id is not yet used.
    fn take_spare(&mut self) -> Option<&'a Arc<Recipe>> {
        let position = self
            .spares
            .iter()
            .position(|recipe| !self.used.contains(&recipe.id))?;
        Some(self.spares.remove(position))
    }

    fn place(&mut self, day: Day, slot: MealSlot, recipe: &Arc<Recipe>) {
        self.used.insert(recipe.id);
        self.plan.slot_mut(day, slot).push(Arc::clone(recipe));
    }

    fn fill(mut self, day: Day, slot: MealSlot, ids: &[RecipeId]) -> Self {
        for &id in ids {
            let Some(&recipe) = self.by_id.get(&id) else {
                debug!(%day, %slot, %id, "dropping reference outside the candidate pool");
                continue;
            };

            if !self.used.contains(&id) {
                self.place(day, slot, recipe);
                continue;
            }

            match self.take_spare() {
                Some(replacement) => {
                    debug!(%day, %slot, %id, replacement = %replacement.id, "replacing repeated recipe");
                    self.place(day, slot, replacement);
                }
                None => {
                    debug!(%day, %slot, %id, "pool exhausted, dropping repeated recipe");
                }
            }
        }
        self
    }
}

/// Assemble a [`WeekPlan`] from `draft`, drawing only on `pool`.
///
/// The result never contains a recipe id twice. The pass is deterministic:
/// the same draft and pool always yield the same plan.
pub fn assemble(draft: &DraftPlan, pool: &[Arc<Recipe>]) -> Result<WeekPlan, PlanningError> {
    check_pool(pool)?;

    let assembly = Day::ALL
        .into_iter()
        .flat_map(|day| MealSlot::ALL.into_iter().map(move |slot| (day, slot)))
        .fold(Assembly::new(pool), |assembly, (day, slot)| {
            assembly.fill(day, slot, draft.ids(day, slot))
        });

    let plan = assembly.plan;
    info!(
        proposed = draft.len(),
        planned = plan.recipe_count(),
        pool = pool.len(),
        "assembled week plan"
    );
    Ok(plan)
}
