//! The governor collaborators, backed by an alloy RPC client

use std::{future::Future, time::Duration};

use alloy::{
    contract::Error as ContractError,
    providers::Provider,
    rpc::json_rpc::ErrorPayload,
    transports::TransportError,
};
use alloy_primitives::{Address, Bytes, TxHash};
use contracts_common::{
    constants::{PROPOSAL_CANCELED_EVENT, PROPOSAL_CREATED_EVENT, PROPOSAL_EXECUTED_EVENT},
    errors::GovernorError,
    interfaces::GovernorRpc,
    types::{EventIndex, ExecutionReceipt, ProposalId, ProposalRecord},
};
use tracing::debug;

use crate::{
    solidity::IGovernor::{self, IGovernorInstance},
    utils::GovernorProvider,
};

/// The JSON-RPC error code nodes use for a reverted call
const REVERT_ERROR_CODE: i64 = 3;

/// A [`GovernorRpc`] that talks to a node over JSON-RPC.
///
/// Every call is bounded by `timeout`; an expired call surfaces as
/// [`GovernorError::Timeout`].
#[derive(Clone)]
pub struct AlloyGovernor {
    /// The RPC client
    provider: GovernorProvider,
    /// The first block scanned for proposal events
    from_block: u64,
    /// The timeout applied to each call
    timeout: Duration,
}

impl AlloyGovernor {
    /// Construct a governor client
    pub fn new(provider: GovernorProvider, from_block: u64, timeout: Duration) -> Self {
        AlloyGovernor { provider, from_block, timeout }
    }

    /// The contract bindings for the governor at `contract`
    fn instance(&self, contract: Address) -> IGovernorInstance<GovernorProvider> {
        IGovernor::new(contract, self.provider.clone())
    }

    /// Read all three proposal event kinds from the governor at `contract`
    async fn read_events(&self, contract: Address) -> Result<EventIndex, GovernorError> {
        let code = self
            .provider
            .get_code_at(contract)
            .await
            .map_err(|e| GovernorError::Transport(e.to_string()))?;
        ensure_deployed(contract, &code)?;

        let governor = self.instance(contract);
        let mut index = EventIndex::new();

        let created = governor
            .ProposalCreated_filter()
            .from_block(self.from_block)
            .query()
            .await
            .map_err(transport_error)?;
        for (event, log) in created {
            index.push(
                PROPOSAL_CREATED_EVENT,
                ProposalRecord {
                    proposal_id: event.proposalId.into(),
                    description: event.description,
                    block_number: log.block_number,
                },
            );
        }

        let executed = governor
            .ProposalExecuted_filter()
            .from_block(self.from_block)
            .query()
            .await
            .map_err(transport_error)?;
        for (event, log) in executed {
            let mut record = ProposalRecord::terminal(event.proposalId);
            record.block_number = log.block_number;
            index.push(PROPOSAL_EXECUTED_EVENT, record);
        }

        let canceled = governor
            .ProposalCanceled_filter()
            .from_block(self.from_block)
            .query()
            .await
            .map_err(transport_error)?;
        for (event, log) in canceled {
            let mut record = ProposalRecord::terminal(event.proposalId);
            record.block_number = log.block_number;
            index.push(PROPOSAL_CANCELED_EVENT, record);
        }

        debug!(
            created = index.created().len(),
            executed = index.executed().len(),
            canceled = index.canceled().len(),
            "fetched proposal events"
        );
        Ok(index)
    }

    /// Send `executeProposal(description)` and wait for its receipt
    async fn execute(
        &self,
        description: &str,
        contract: Address,
    ) -> Result<ExecutionReceipt, GovernorError> {
        let governor = self.instance(contract);
        let pending = governor
            .executeProposal(description.to_string())
            .send()
            .await
            .map_err(rejection_error)?;

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| GovernorError::Transport(e.to_string()))?;

        execution_receipt(
            receipt.transaction_hash,
            receipt.status(),
            receipt.block_number,
            receipt.gas_used,
        )
    }
}

impl GovernorRpc for AlloyGovernor {
    async fn fetch_events(&self, contract: Address) -> Result<EventIndex, GovernorError> {
        with_timeout(self.timeout, self.read_events(contract)).await
    }

    async fn query_state(
        &self,
        proposal_id: &ProposalId,
        contract: Address,
    ) -> Result<u8, GovernorError> {
        let governor = self.instance(contract);
        let call = governor.state(proposal_id.0);
        with_timeout(self.timeout, async {
            call.call().await.map_err(|e| state_error(proposal_id, e))
        })
        .await
    }

    async fn submit_execution(
        &self,
        description: &str,
        contract: Address,
    ) -> Result<ExecutionReceipt, GovernorError> {
        with_timeout(self.timeout, self.execute(description, contract)).await
    }
}

/// Bound `fut` by `timeout`
pub async fn with_timeout<T>(
    timeout: Duration,
    fut: impl Future<Output = Result<T, GovernorError>>,
) -> Result<T, GovernorError> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| GovernorError::Timeout(timeout))?
}

/// Map an error from a read-only contract interaction
fn transport_error(err: ContractError) -> GovernorError {
    GovernorError::Transport(err.to_string())
}

/// Fail unless the account at `contract` holds code
fn ensure_deployed(contract: Address, code: &Bytes) -> Result<(), GovernorError> {
    if code.is_empty() {
        return Err(GovernorError::NotFound(format!("no contract code at {contract:#x}")));
    }
    Ok(())
}

/// Convert an included execution into its receipt, failing if it reverted
fn execution_receipt(
    tx_hash: TxHash,
    status: bool,
    block_number: Option<u64>,
    gas_used: u64,
) -> Result<ExecutionReceipt, GovernorError> {
    if !status {
        return Err(GovernorError::Reverted(format!("tx {tx_hash:#x}")));
    }
    Ok(ExecutionReceipt { tx_hash, block_number, gas_used })
}

/// Whether a JSON-RPC error reports an EVM revert rather than a node failure
fn is_revert(payload: &ErrorPayload) -> bool {
    payload.code == REVERT_ERROR_CODE || payload.message.to_lowercase().contains("revert")
}

/// Map an error from a `state` call.
///
/// The governor reverts on proposals it does not know; any other failure is
/// the node's.
fn state_error(proposal_id: &ProposalId, err: ContractError) -> GovernorError {
    match err {
        ContractError::TransportError(TransportError::ErrorResp(payload))
            if is_revert(&payload) =>
        {
            GovernorError::NotFound(format!("proposal {proposal_id}: {}", payload.message))
        }
        e => GovernorError::Transport(e.to_string()),
    }
}

/// Map an error from submitting a transaction, separating node-side rejections
fn rejection_error(err: ContractError) -> GovernorError {
    match err {
        ContractError::TransportError(TransportError::ErrorResp(payload)) => {
            let data = payload.data.map(|d| d.to_string()).unwrap_or_default();
            GovernorError::Rejected(format!("{} (data = {data})", payload.message))
        }
        e => GovernorError::Transport(e.to_string()),
    }
}
