//! Plan generation service: filter, propose, parse, assemble.

use tracing::{info, instrument};

use crate::catalog::Catalog;
use crate::error::PlanningError;
use crate::filter::{UserPreferences, filter_catalog};
use crate::plan::assemble::{assemble, check_pool};
use crate::plan::draft::parse_draft;
use crate::plan::types::WeekPlan;
use crate::proposal::{PlanProposer, ProposalRequest};

/// Result of a successful planning request.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub plan: WeekPlan,
    /// Number of catalog recipes that passed the preference filter.
    pub pool_size: usize,
}

/// Generate a week plan.
///
/// The proposer is awaited exactly once, and not at all when fewer than
/// [`crate::plan::MIN_POOL_SIZE`] recipes satisfy `prefs`. Proposer failures
/// are returned unchanged as [`PlanningError::Proposer`].
#[instrument(skip_all, fields(proposer = proposer.name()))]
pub async fn generate_week_plan(
    catalog: &Catalog,
    prefs: Option<&UserPreferences>,
    pantry_names: &[String],
    proposer: &dyn PlanProposer,
) -> Result<GeneratedPlan, PlanningError> {
    let pool = filter_catalog(catalog.recipes(), prefs);
    check_pool(&pool)?;

    let request = ProposalRequest::new(prefs, pantry_names, &pool);
    info!(pool = pool.len(), pantry = pantry_names.len(), "requesting plan proposal");
    let raw = proposer.propose(&request).await?;

    let draft = parse_draft(&raw)?;
    let plan = assemble(&draft, &pool)?;

    Ok(GeneratedPlan {
        plan,
        pool_size: pool.len(),
    })
}
