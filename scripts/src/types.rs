//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::Address;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The governed contracts whose artifacts are tracked for redeployment
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum GovernedContract {
    /// The AMM pair factory
    Factory,
    /// The governor for contract upgrade proposals
    GovernorUpgrade,
    /// The governor for token transfer proposals
    GovernorTransferToken,
    /// The governor for text proposals
    GovernorTextProposal,
    /// The governor for token creation proposals
    GovernorTokenCreate,
    /// The fee splitter
    Splitter,
}

impl GovernedContract {
    /// Every tracked contract, in reporting order
    pub const ALL: [GovernedContract; 6] = [
        GovernedContract::Factory,
        GovernedContract::GovernorUpgrade,
        GovernedContract::GovernorTransferToken,
        GovernedContract::GovernorTextProposal,
        GovernedContract::GovernorTokenCreate,
        GovernedContract::Splitter,
    ];

    /// The file stem of the contract's compilation artifact
    pub fn artifact_name(&self) -> &'static str {
        match self {
            GovernedContract::Factory => "Factory",
            GovernedContract::GovernorUpgrade => "GovernorUpgrade",
            GovernedContract::GovernorTransferToken => "GovernorTransferToken",
            GovernedContract::GovernorTextProposal => "GovernorTextProposal",
            GovernedContract::GovernorTokenCreate => "GovernorTokenCreate",
            GovernedContract::Splitter => "Splitter",
        }
    }

    /// The contract's key in the `deployments.json` file
    pub fn deployments_key(&self) -> &'static str {
        match self {
            GovernedContract::Factory => "factory_contract",
            GovernedContract::GovernorUpgrade => "governor_upgrade_contract",
            GovernedContract::GovernorTransferToken => "governor_transfer_token_contract",
            GovernedContract::GovernorTextProposal => "governor_text_proposal_contract",
            GovernedContract::GovernorTokenCreate => "governor_token_create_contract",
            GovernedContract::Splitter => "splitter_contract",
        }
    }
}

impl Display for GovernedContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GovernedContract::Factory => write!(f, "factory"),
            GovernedContract::GovernorUpgrade => write!(f, "governor-upgrade"),
            GovernedContract::GovernorTransferToken => write!(f, "governor-transfer-token"),
            GovernedContract::GovernorTextProposal => write!(f, "governor-text-proposal"),
            GovernedContract::GovernorTokenCreate => write!(f, "governor-token-create"),
            GovernedContract::Splitter => write!(f, "splitter"),
        }
    }
}

/// One contract's entry in the `deployments.json` file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// The deployed address
    pub address: Address,
    /// The MD5 hex digest of the artifact the deployment was built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}
