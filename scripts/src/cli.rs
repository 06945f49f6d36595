//! Definitions of CLI arguments and commands for the operator scripts

use std::{path::PathBuf, process::ExitCode, time::Duration};

use alloy_primitives::Address;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;

use crate::{
    commands::{changed_contracts, execute_proposals, list_proposals, record_deployment},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_PATH, DEFAULT_RPC_TIMEOUT_SECS,
        PROPOSAL_CONTRACT_ENV_VAR,
    },
    errors::ScriptError,
    types::GovernedContract,
};

/// The operator scripts CLI
#[derive(Parser)]
#[command(about = "Operator scripts for the governance contracts")]
pub struct Cli {
    /// Private key of the operator, required only by commands that send transactions
    #[arg(short, long, env = "PKEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = "http://127.0.0.1:8545")]
    pub rpc_url: String,

    /// Path to the `deployments.json` file
    #[arg(short, long, env = "DEPLOYMENTS_PATH", default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// Timeout applied to every RPC call, in seconds
    #[arg(long, default_value_t = DEFAULT_RPC_TIMEOUT_SECS)]
    pub rpc_timeout_secs: u64,

    /// Maximum level of the emitted logs
    #[arg(short, long, value_enum, default_value_t = Verbosity::Info)]
    pub verbosity: Verbosity,

    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The RPC configuration shared by the commands that talk to a node
    pub fn rpc_config(&self) -> RpcConfig {
        RpcConfig {
            priv_key: self.priv_key.clone(),
            rpc_url: self.rpc_url.clone(),
            timeout: Duration::from_secs(self.rpc_timeout_secs),
        }
    }
}

/// How to reach the node
#[derive(Clone, Debug)]
pub struct RpcConfig {
    /// Private key of the operator
    pub priv_key: Option<String>,
    /// Network RPC URL
    pub rpc_url: String,
    /// Timeout applied to every RPC call
    pub timeout: Duration,
}

/// The maximum level of the emitted logs
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Progress of each run
    Info,
    /// Event counts and repeated proposals
    Debug,
    /// Everything, including the RPC client's own logs
    Trace,
}

impl From<Verbosity> for Level {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Error => Level::ERROR,
            Verbosity::Warn => Level::WARN,
            Verbosity::Info => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
            Verbosity::Trace => Level::TRACE,
        }
    }
}

/// The available scripts
#[derive(Subcommand)]
pub enum Command {
    /// Execute every succeeded proposal of a governor
    ExecuteProposals(ProposalArgs),
    /// Print the live state of every active proposal without executing any
    ListProposals(ProposalArgs),
    /// Report the governed contracts whose artifacts changed since deployment
    ChangedContracts(ChangedContractsArgs),
    /// Record the deployment of a governed contract
    RecordDeployment(RecordDeploymentArgs),
}

impl Command {
    /// Run the command, returning the process exit code
    pub async fn run(
        self,
        rpc: RpcConfig,
        deployments_path: PathBuf,
    ) -> Result<ExitCode, ScriptError> {
        match self {
            Command::ExecuteProposals(args) => {
                let report = execute_proposals(args, &rpc, &deployments_path).await?;
                Ok(ExitCode::from(report.exit_code()))
            }
            Command::ListProposals(args) => {
                list_proposals(args, &rpc, &deployments_path).await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::ChangedContracts(args) => {
                changed_contracts(args, &deployments_path)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::RecordDeployment(args) => {
                record_deployment(args, &deployments_path)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Selects the governor whose proposals are handled.
///
/// Proposals that are not yet executable are skipped and picked up by a later
/// run.
#[derive(Args)]
pub struct ProposalArgs {
    /// The governor, as a key of the deployments file or a recorded hex address
    #[arg(short, long, env = PROPOSAL_CONTRACT_ENV_VAR)]
    pub contract: Option<String>,

    /// The first block scanned for proposal events
    #[arg(long, default_value_t = 0)]
    pub from_block: u64,
}

/// Report the governed contracts whose compiled artifact no longer matches
/// the hash recorded at deployment
#[derive(Args)]
pub struct ChangedContractsArgs {
    /// Directory holding the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,
}

/// Record the deployment of a governed contract, hashing its current artifact
#[derive(Args)]
pub struct RecordDeploymentArgs {
    /// The governed contract deployed
    #[arg(short, long)]
    pub contract: GovernedContract,

    /// The deployed address in hex
    #[arg(long)]
    pub address: Address,

    /// Directory holding the compiled contract artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_execute_proposals() {
        let cli = Cli::try_parse_from([
            "scripts",
            "--rpc-url",
            "http://localhost:8547",
            "-v",
            "debug",
            "execute-proposals",
            "--contract",
            "governor_upgrade_contract",
        ])
        .unwrap();

        assert_eq!(cli.verbosity, Verbosity::Debug);
        assert_eq!(cli.rpc_config().timeout, Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS));
        match cli.command {
            Command::ExecuteProposals(args) => {
                assert_eq!(args.contract.as_deref(), Some("governor_upgrade_contract"));
                assert_eq!(args.from_block, 0);
            }
            _ => panic!("expected execute-proposals"),
        }
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(Level::from(Verbosity::Info), Level::INFO);
        assert_eq!(Level::from(Verbosity::Trace), Level::TRACE);
    }
}
