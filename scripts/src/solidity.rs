//! Definitions of the Solidity interface of the governor contracts

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IGovernor {
        #[derive(Debug, PartialEq, Eq)]
        event ProposalCreated(uint256 proposalId, address proposer, string description, uint256 startBlock, uint256 endBlock);
        #[derive(Debug, PartialEq, Eq)]
        event ProposalExecuted(uint256 proposalId);
        #[derive(Debug, PartialEq, Eq)]
        event ProposalCanceled(uint256 proposalId);

        function state(uint256 proposalId) external view returns (uint8);
        function executeProposal(string memory description) external returns (uint256);

        function createProposal(string memory description) external returns (uint256);
        function cancelProposal(string memory description) external returns (uint256);
        function castVote(uint256 proposalId, uint8 support) external returns (uint256);
        function votingDelay() external view returns (uint256);
        function votingPeriod() external view returns (uint256);
    }
}

pub use IGovernor::*;
