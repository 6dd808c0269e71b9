//! Plan proposal: the request sent to an external proposer and the adapters
//! that answer it.

pub mod command;
pub mod file;
pub mod registry;
pub mod request;
pub mod trait_def;

pub use command::CommandProposer;
pub use file::FileProposer;
pub use registry::ProposerRegistry;
pub use request::{CandidateRecipe, ProposalRequest, build_proposal_prompt};
pub use trait_def::PlanProposer;
