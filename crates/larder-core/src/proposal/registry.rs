//! Proposer registry: a named collection of available proposers.

use std::collections::HashMap;

use super::trait_def::PlanProposer;

/// Registered [`PlanProposer`] implementations, keyed by name.
#[derive(Default)]
pub struct ProposerRegistry {
    proposers: HashMap<String, Box<dyn PlanProposer>>,
}

impl ProposerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a proposer under [`PlanProposer::name`], replacing and
    /// returning any proposer of the same name.
    pub fn register(
        &mut self,
        proposer: impl PlanProposer + 'static,
    ) -> Option<Box<dyn PlanProposer>> {
        let name = proposer.name().to_string();
        self.proposers.insert(name, Box::new(proposer))
    }

    pub fn get(&self, name: &str) -> Option<&dyn PlanProposer> {
        self.proposers.get(name).map(|b| b.as_ref())
    }

    /// Registered names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.proposers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.proposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposers.is_empty()
    }
}

impl std::fmt::Debug for ProposerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProposerRegistry")
            .field("proposers", &self.list())
            .finish()
    }
}
