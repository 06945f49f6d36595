//! The governance proposal lifecycle coordinator.
//!
//! A run fetches the governor's event history once, narrows it to the proposals
//! that were created but never executed or canceled, and then walks those
//! proposals one at a time: re-read the live state, execute only when the
//! proposal has succeeded, and record the outcome. A failure while handling
//! one proposal is recorded against it and never stops the batch.

pub mod coordinator;
pub mod eligibility;
pub mod report;

pub use coordinator::ProposalCoordinator;
pub use eligibility::active_proposals;
pub use report::{ProposalOutcome, ProposalResult, RunReport};
