//! Constants used in the integration tests

/// The default hostport that the Anvil devnet node runs on
pub(crate) const DEFAULT_DEVNET_HOSTPORT: &str = "http://127.0.0.1:8545";

/// The default private key for the tests, the first default account in an Anvil node
pub(crate) const DEFAULT_DEVNET_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The default path of the devnet deployments file
pub(crate) const DEFAULT_DEPLOYMENTS_PATH: &str = "../deployments.devnet.json";

/// The governor contract key in the `deployments.json` file
pub(crate) const GOVERNOR_CONTRACT_KEY: &str = "governor_text_proposal_contract";

/// A deployments key that is never recorded
pub(crate) const UNRECORDED_CONTRACT_KEY: &str = "unrecorded_governor_contract";

/// The vote in favor of a proposal
pub(crate) const VOTE_FOR: u8 = 1;

/// The timeout applied to each RPC call made by the coordinator under test
pub(crate) const RPC_TIMEOUT_SECS: u64 = 30;
