//! Proposer that replays a draft captured on disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::request::ProposalRequest;
use super::trait_def::PlanProposer;

#[derive(Debug, Clone)]
pub struct FileProposer {
    path: PathBuf,
}

impl FileProposer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PlanProposer for FileProposer {
    fn name(&self) -> &str {
        "file"
    }

    async fn propose(&self, _request: &ProposalRequest) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read draft plan from {}", self.path.display()))
    }
}
