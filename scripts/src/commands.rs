//! Implementations of the operator scripts

use std::path::Path;

use alloy_primitives::Address;
use itertools::Itertools;
use tracing::info;

use crate::{
    cli::{ChangedContractsArgs, ProposalArgs, RecordDeploymentArgs, RpcConfig},
    errors::ScriptError,
    governance::{ProposalCoordinator, RunReport},
    rpc::AlloyGovernor,
    types::{DeploymentRecord, GovernedContract},
    utils::{
        find_artifact, hash_file, read_deployments_or_default, resolve_contract, setup_client,
        write_deployment, DeploymentsFile,
    },
};

/// Execute every succeeded proposal of the selected governor
pub async fn execute_proposals(
    args: ProposalArgs,
    rpc: &RpcConfig,
    deployments_path: &Path,
) -> Result<RunReport, ScriptError> {
    let contract = target_contract(&args, deployments_path)?;
    let priv_key = rpc.priv_key.as_deref().ok_or_else(|| {
        ScriptError::MissingConfig("a private key is required to execute proposals".to_string())
    })?;

    let client = setup_client(Some(priv_key), &rpc.rpc_url)?;
    let governor = AlloyGovernor::new(client, args.from_block, rpc.timeout);
    ProposalCoordinator::new(&governor).run(contract).await
}

/// Print the live state of every active proposal of the selected governor
pub async fn list_proposals(
    args: ProposalArgs,
    rpc: &RpcConfig,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let contract = target_contract(&args, deployments_path)?;
    let client = setup_client(rpc.priv_key.as_deref(), &rpc.rpc_url)?;
    let governor = AlloyGovernor::new(client, args.from_block, rpc.timeout);

    let statuses = ProposalCoordinator::new(&governor).inspect(contract).await?;
    if statuses.is_empty() {
        println!("No active proposals on {contract:#x}");
    }
    for (proposal, state) in statuses {
        match state {
            Ok(state) => println!("{}\t{state}\t{}", proposal.proposal_id, proposal.description),
            Err(e) => println!("{}\terror: {e}\t{}", proposal.proposal_id, proposal.description),
        }
    }

    Ok(())
}

/// Print the governed contracts whose artifacts changed since they were recorded
pub fn changed_contracts(
    args: ChangedContractsArgs,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let deployments = read_deployments_or_default(deployments_path)?;
    let changed = find_changed_contracts(&args.artifacts_dir, &deployments)?;

    if changed.is_empty() {
        println!("No contract changes");
    } else {
        println!("Changed contracts: {}", changed.iter().join(", "));
    }
    Ok(())
}

/// Record the deployment of a governed contract along with its artifact hash
pub fn record_deployment(
    args: RecordDeploymentArgs,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let artifact = find_artifact(&args.artifacts_dir, args.contract.artifact_name())?;
    let hash = hash_file(&artifact)?;

    let record = DeploymentRecord { address: args.address, hash: Some(hash) };
    write_deployment(deployments_path, args.contract.deployments_key(), record)?;
    info!("recorded {} at {:#x}", args.contract, args.address);
    Ok(())
}

// -----------
// | Helpers |
// -----------

/// Resolve the governor selected by `args` against the deployments file
fn target_contract(args: &ProposalArgs, deployments_path: &Path) -> Result<Address, ScriptError> {
    let contract_id = args.contract.as_deref().ok_or_else(|| {
        ScriptError::MissingConfig(
            "no governor selected, pass --contract or set PROPOSAL_CONTRACT_ID".to_string(),
        )
    })?;

    resolve_contract(deployments_path, contract_id)
}

/// The governed contracts whose artifact hash differs from the recorded one,
/// in the order of [`GovernedContract::ALL`].
///
/// A contract with no recorded hash counts as changed.
pub fn find_changed_contracts(
    artifacts_dir: &Path,
    deployments: &DeploymentsFile,
) -> Result<Vec<GovernedContract>, ScriptError> {
    let mut changed = Vec::new();
    for contract in GovernedContract::ALL {
        let artifact = find_artifact(artifacts_dir, contract.artifact_name())?;
        let hash = hash_file(&artifact)?;

        let recorded = deployments
            .deployments
            .get(contract.deployments_key())
            .and_then(|record| record.hash.as_deref());
        if recorded != Some(hash.as_str()) {
            changed.push(contract);
        }
    }

    Ok(changed)
}
