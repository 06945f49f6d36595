//! A scriptable, in-memory stand-in for a deployed governor

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use alloy_primitives::{Address, TxHash, B256};
use contracts_common::{
    errors::GovernorError,
    interfaces::GovernorRpc,
    types::{EventIndex, ExecutionReceipt, ProposalId, ProposalState},
};

/// The gas the mock reports for every execution
pub const MOCK_GAS_USED: u64 = 21_000;

/// A call observed by the mock, in the order it was made
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockCall {
    /// `fetch_events(contract)`
    FetchEvents(Address),
    /// `query_state(proposal_id, contract)`
    QueryState(ProposalId, Address),
    /// `submit_execution(description, contract)`
    SubmitExecution(String, Address),
}

/// A [`GovernorRpc`] whose responses are fixed up front.
///
/// Calls against any contract other than the one the mock was built for fail
/// with [`GovernorError::NotFound`], as do state queries for proposals without
/// a scripted response.
pub struct MockGovernor {
    /// The only contract the mock knows about
    contract: Address,
    /// The response to `fetch_events`
    events: Result<EventIndex, GovernorError>,
    /// The responses to `query_state`, keyed by proposal
    states: HashMap<ProposalId, Result<u8, GovernorError>>,
    /// Executions that fail, keyed by description
    execution_errors: HashMap<String, GovernorError>,
    /// Every call made so far
    calls: Mutex<Vec<MockCall>>,
    /// Counter used to derive distinct transaction hashes
    next_tx: AtomicU64,
}

impl MockGovernor {
    /// A governor at `contract` with an empty history
    pub fn new(contract: Address) -> Self {
        MockGovernor {
            contract,
            events: Ok(EventIndex::new()),
            states: HashMap::new(),
            execution_errors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            next_tx: AtomicU64::new(1),
        }
    }

    /// Serve `events` from `fetch_events`
    pub fn with_events(mut self, events: EventIndex) -> Self {
        self.events = Ok(events);
        self
    }

    /// Fail `fetch_events` with `err`
    pub fn with_fetch_error(mut self, err: GovernorError) -> Self {
        self.events = Err(err);
        self
    }

    /// Report `state` for `id`
    pub fn with_state(self, id: impl Into<ProposalId>, state: ProposalState) -> Self {
        self.with_state_code(id, state.code())
    }

    /// Report the raw code `code` for `id`
    pub fn with_state_code(mut self, id: impl Into<ProposalId>, code: u8) -> Self {
        self.states.insert(id.into(), Ok(code));
        self
    }

    /// Fail state queries for `id` with `err`
    pub fn with_state_error(mut self, id: impl Into<ProposalId>, err: GovernorError) -> Self {
        self.states.insert(id.into(), Err(err));
        self
    }

    /// Fail executions of `description` with `err`
    pub fn with_execution_error(mut self, description: &str, err: GovernorError) -> Self {
        self.execution_errors.insert(description.to_string(), err);
        self
    }

    /// Every call made so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// The proposals whose state was queried, in order
    pub fn state_queries(&self) -> Vec<ProposalId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::QueryState(id, _) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// The descriptions submitted for execution, in order
    pub fn executions(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::SubmitExecution(description, _) => Some(description),
                _ => None,
            })
            .collect()
    }

    /// Record a call
    fn record(&self, call: MockCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    /// Fail unless `contract` is the mocked contract
    fn check_contract(&self, contract: Address) -> Result<(), GovernorError> {
        if contract == self.contract {
            Ok(())
        } else {
            Err(GovernorError::NotFound(format!("no governor at {contract:#x}")))
        }
    }
}

impl GovernorRpc for MockGovernor {
    async fn fetch_events(&self, contract: Address) -> Result<EventIndex, GovernorError> {
        self.record(MockCall::FetchEvents(contract));
        self.check_contract(contract)?;
        self.events.clone()
    }

    async fn query_state(
        &self,
        proposal_id: &ProposalId,
        contract: Address,
    ) -> Result<u8, GovernorError> {
        self.record(MockCall::QueryState(*proposal_id, contract));
        self.check_contract(contract)?;
        self.states
            .get(proposal_id)
            .cloned()
            .unwrap_or_else(|| Err(GovernorError::NotFound(format!("proposal {proposal_id}"))))
    }

    async fn submit_execution(
        &self,
        description: &str,
        contract: Address,
    ) -> Result<ExecutionReceipt, GovernorError> {
        self.record(MockCall::SubmitExecution(description.to_string(), contract));
        self.check_contract(contract)?;
        if let Some(err) = self.execution_errors.get(description) {
            return Err(err.clone());
        }

        let n = self.next_tx.fetch_add(1, Ordering::Relaxed);
        let tx_hash: TxHash = B256::left_padding_from(&n.to_be_bytes());
        Ok(ExecutionReceipt {
            tx_hash,
            block_number: Some(n),
            gas_used: MOCK_GAS_USED,
        })
    }
}
