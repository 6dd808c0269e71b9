//! Flat JSON files in the data directory: pantry, current week, saved plans.
//!
//! A missing file means the default state. Writes go through a temp file and
//! a rename so a crash never leaves half a file behind.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use larder_core::{Catalog, Pantry, SavedPlans, WeekPlan};

pub const PANTRY_FILE: &str = "pantry.json";
pub const WEEK_PLAN_FILE: &str = "week_plan.json";
pub const SAVED_PLANS_FILE: &str = "saved_plans.json";

#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_pantry(&self) -> Result<Pantry> {
        self.load(PANTRY_FILE)
    }

    pub fn save_pantry(&self, pantry: &Pantry) -> Result<()> {
        self.save(PANTRY_FILE, pantry)
    }

    pub fn load_week_plan(&self) -> Result<WeekPlan> {
        self.load(WEEK_PLAN_FILE)
    }

    pub fn save_week_plan(&self, plan: &WeekPlan) -> Result<()> {
        self.save(WEEK_PLAN_FILE, plan)
    }

    pub fn load_saved_plans(&self) -> Result<SavedPlans> {
        self.load(SAVED_PLANS_FILE)
    }

    pub fn save_saved_plans(&self, saved: &SavedPlans) -> Result<()> {
        self.save(SAVED_PLANS_FILE, saved)
    }

    fn load<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            debug!(path = %path.display(), "no data file, using defaults");
            return Ok(T::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    fn save<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create data directory {}", self.dir.display()))?;
        let path = self.dir.join(file);
        let tmp = self.dir.join(format!(".{file}.tmp"));
        let contents = serde_json::to_string_pretty(value).context("failed to serialize data")?;
        std::fs::write(&tmp, contents)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }
}

/// Load the recipe catalog: `path` if given (JSON for `.json`, TOML
/// otherwise), else the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Catalog::embedded().context("built-in recipe catalog is invalid");
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read recipe catalog {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let catalog = if is_json {
        Catalog::from_json_str(&contents)
    } else {
        Catalog::from_toml_str(&contents)
    };
    catalog.with_context(|| format!("invalid recipe catalog {}", path.display()))
}
