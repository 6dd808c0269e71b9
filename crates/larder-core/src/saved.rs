//! Saved week plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::plan::WeekPlan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlan {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub plan: WeekPlan,
}

#[derive(Debug, Error)]
pub enum SavedPlanError {
    #[error("no saved plan matches {key:?}")]
    NotFound { key: String },

    #[error("{key:?} matches {count} saved plans, use more of the id")]
    Ambiguous { key: String, count: usize },
}

/// Saved plans, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedPlans {
    plans: Vec<SavedPlan>,
}

impl SavedPlans {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[SavedPlan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&SavedPlan> {
        self.plans.iter().find(|saved| saved.id == id)
    }

    /// Save a snapshot of `plan`. A blank name becomes `"Plan <date>"`.
    pub fn save(&mut self, name: &str, plan: WeekPlan) -> &SavedPlan {
        self.save_at(name, plan, Utc::now())
    }

    pub fn save_at(&mut self, name: &str, plan: WeekPlan, now: DateTime<Utc>) -> &SavedPlan {
        let name = match name.trim() {
            "" => format!("Plan {}", now.format("%Y-%m-%d")),
            trimmed => trimmed.to_string(),
        };
        self.push(SavedPlan {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            plan,
        })
    }

    fn push(&mut self, saved: SavedPlan) -> &SavedPlan {
        self.plans.push(saved);
        let index = self.plans.len() - 1;
        &self.plans[index]
    }

    /// Plans whose name contains `query`, ignoring case. A blank query
    /// matches everything.
    pub fn search(&self, query: &str) -> Vec<&SavedPlan> {
        let needle = query.trim().to_lowercase();
        self.plans
            .iter()
            .filter(|saved| saved.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Resolve a full id or a unique id prefix.
    pub fn resolve(&self, key: &str) -> Result<Uuid, SavedPlanError> {
        let key = key.trim();
        if let Ok(id) = Uuid::parse_str(key) {
            if self.get(id).is_some() {
                return Ok(id);
            }
        }
        let prefix = key.to_ascii_lowercase();
        let matches: Vec<Uuid> = self
            .plans
            .iter()
            .map(|saved| saved.id)
            .filter(|id| !prefix.is_empty() && id.to_string().starts_with(&prefix))
            .collect();
        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(SavedPlanError::NotFound {
                key: key.to_string(),
            }),
            many => Err(SavedPlanError::Ambiguous {
                key: key.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Copy a saved plan under a new id, named `"<name> (copy)"`.
    pub fn duplicate(&mut self, id: Uuid) -> Result<&SavedPlan, SavedPlanError> {
        let original = self.get(id).ok_or_else(|| SavedPlanError::NotFound {
            key: id.to_string(),
        })?;
        let copy = SavedPlan {
            id: Uuid::new_v4(),
            name: format!("{} (copy)", original.name),
            created_at: Utc::now(),
            plan: original.plan.clone(),
        };
        Ok(self.push(copy))
    }

    pub fn remove(&mut self, id: Uuid) -> Result<SavedPlan, SavedPlanError> {
        let position = self
            .plans
            .iter()
            .position(|saved| saved.id == id)
            .ok_or_else(|| SavedPlanError::NotFound {
                key: id.to_string(),
            })?;
        Ok(self.plans.remove(position))
    }
}
