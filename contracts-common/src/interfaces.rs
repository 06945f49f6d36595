//! The collaborator interface the proposal coordinator drives

#![allow(async_fn_in_trait)]

use alloy_primitives::Address;

use crate::{
    errors::GovernorError,
    types::{EventIndex, ExecutionReceipt, ProposalId},
};

/// Access to a deployed governor contract.
///
/// Bundles the three external collaborators of a coordinator run: the event
/// source, the proposal state oracle, and the proposal executor. Each method is
/// a single round trip to the network and reports its own failure; none of them
/// retry.
pub trait GovernorRpc {
    /// Fetch the full history of proposal events for `contract`, grouped by event name
    async fn fetch_events(&self, contract: Address) -> Result<EventIndex, GovernorError>;

    /// Query the raw lifecycle code of `proposal_id` on `contract`
    async fn query_state(
        &self,
        proposal_id: &ProposalId,
        contract: Address,
    ) -> Result<u8, GovernorError>;

    /// Submit the execution of the proposal identified by `description` on `contract`
    async fn submit_execution(
        &self,
        description: &str,
        contract: Address,
    ) -> Result<ExecutionReceipt, GovernorError>;
}
