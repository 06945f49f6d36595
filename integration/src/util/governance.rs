//! Helpers for driving proposals through the governor's lifecycle

use alloy::providers::ext::AnvilApi;
use alloy_primitives::U256;
use contracts_common::types::{ProposalId, ProposalState};
use eyre::{eyre, Result};
use rand::thread_rng;
use test_helpers::misc::random_description;

use crate::{
    constants::VOTE_FOR,
    test_inventory::TestArgs,
    util::transactions::{call_helper, wait_for_tx_success},
};

/// Create a proposal with a fresh description, returning its id and description
pub async fn create_proposal(args: &TestArgs, prefix: &str) -> Result<(ProposalId, String)> {
    let description = random_description(prefix, &mut thread_rng());

    // Simulate first to learn the id the governor assigns
    let proposal_id = call_helper(args.governor.createProposal(description.clone())).await?;
    wait_for_tx_success(args.governor.createProposal(description.clone())).await?;

    Ok((ProposalId::from(proposal_id), description))
}

/// Vote for the proposal and mine past its voting period
pub async fn vote_through(args: &TestArgs, proposal_id: &ProposalId) -> Result<()> {
    let voting_delay = call_helper(args.governor.votingDelay()).await?;
    mine_blocks(args, voting_delay + U256::from(1)).await?;

    wait_for_tx_success(args.governor.castVote(proposal_id.0, VOTE_FOR)).await?;

    let voting_period = call_helper(args.governor.votingPeriod()).await?;
    mine_blocks(args, voting_period + U256::from(1)).await
}

/// Cancel the proposal with the given description
pub async fn cancel_proposal(args: &TestArgs, description: &str) -> Result<()> {
    wait_for_tx_success(args.governor.cancelProposal(description.to_string())).await?;
    Ok(())
}

/// Read the proposal's state from the governor
pub async fn proposal_state(args: &TestArgs, proposal_id: &ProposalId) -> Result<ProposalState> {
    let code = call_helper(args.governor.state(proposal_id.0)).await?;
    ProposalState::try_from(code).map_err(|e| eyre!(e))
}

/// Mine `n` blocks on the devnet
async fn mine_blocks(args: &TestArgs, n: U256) -> Result<()> {
    args.provider.anvil_mine(Some(n.saturating_to::<u64>()), None).await?;
    Ok(())
}
