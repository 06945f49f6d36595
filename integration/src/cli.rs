//! Definition of the CLI arguments for integration tests

use std::path::PathBuf;

use clap::Parser;

use crate::constants::{
    DEFAULT_DEPLOYMENTS_PATH, DEFAULT_DEVNET_HOSTPORT, DEFAULT_DEVNET_PKEY, GOVERNOR_CONTRACT_KEY,
};

/// CLI tool for running integration tests against a running devnet node.
///
/// Assumes that the governor invoked in the tests has already been deployed to
/// the devnet and recorded in the deployments file.
#[derive(Debug, Clone, Parser)]
pub(crate) struct Cli {
    /// Test to run, runs every registered test if omitted
    #[arg(short, long)]
    pub(crate) test: Option<String>,

    /// Path to file containing contract deployment info
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub(crate) deployments: PathBuf,

    /// The governor's key in the deployments file
    #[arg(short, long, default_value = GOVERNOR_CONTRACT_KEY)]
    pub(crate) contract: String,

    /// Devnet private key, defaults to the first Anvil account
    #[arg(short, long, env = "PKEY", default_value = DEFAULT_DEVNET_PKEY)]
    pub(crate) priv_key: String,

    /// Devnet RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_DEVNET_HOSTPORT)]
    pub(crate) rpc_url: String,

    /// Print the coordinator's logs while the tests run
    #[arg(short, long)]
    pub(crate) verbose: bool,
}
