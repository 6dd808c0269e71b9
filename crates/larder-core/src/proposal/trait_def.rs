//! The `PlanProposer` trait: the adapter interface for whatever drafts week
//! plans.
//!
//! Concrete proposers (an LLM CLI subprocess, a captured draft on disk) live
//! next to this module. The trait is object-safe so proposers can be stored
//! as `Box<dyn PlanProposer>` in the [`super::ProposerRegistry`].

use anyhow::Result;
use async_trait::async_trait;

use super::request::ProposalRequest;

/// Produces a raw draft plan for a request.
///
/// The returned text is parsed by [`crate::plan::parse_draft`]; a proposer
/// never has to be trusted to return a valid or repeat-free plan.
#[async_trait]
pub trait PlanProposer: Send + Sync {
    /// Short identifier, e.g. `"command"`.
    fn name(&self) -> &str;

    /// Draft a week plan for `request`.
    ///
    /// Called exactly once per planning request. Implementations add no
    /// retry of their own.
    async fn propose(&self, request: &ProposalRequest) -> Result<String>;
}

// Compile-time assertion: PlanProposer must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn PlanProposer) {}
};
