//! Week plans: structure, drafts, assembly, and the generation service.

pub mod assemble;
pub mod draft;
pub mod service;
pub mod types;

pub use assemble::{MIN_POOL_SIZE, assemble, check_pool};
pub use draft::{DraftPlan, parse_draft};
pub use service::{GeneratedPlan, generate_week_plan};
pub use types::{
    Day, DayParseError, DayPlan, Meal, MealSlot, MealSlotParseError, PlanEditError, WeekPlan,
    WeekShapeError,
};
