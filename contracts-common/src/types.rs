//! Common types used throughout the governance tooling.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use alloy_primitives::{TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        NUM_PROPOSAL_STATES, PROPOSAL_CANCELED_EVENT, PROPOSAL_CREATED_EVENT,
        PROPOSAL_EXECUTED_EVENT,
    },
    errors::GovernorError,
};

/// The chain-assigned identifier of a proposal.
///
/// Only equality and hashing are meaningful; the numeric value is never
/// interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProposalId(pub U256);

impl From<U256> for ProposalId {
    fn from(id: U256) -> Self {
        ProposalId(id)
    }
}

impl From<u64> for ProposalId {
    fn from(id: u64) -> Self {
        ProposalId(U256::from(id))
    }
}

impl Display for ProposalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A proposal as observed in one governor event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    /// The identifier of the proposal
    pub proposal_id: ProposalId,
    /// The exact text the governor hashed when the proposal was created.
    ///
    /// Empty for events that do not carry it (executions, cancellations).
    pub description: String,
    /// The block in which the event was emitted, if known
    pub block_number: Option<u64>,
}

impl ProposalRecord {
    /// Construct a record with no block metadata
    pub fn new(proposal_id: impl Into<ProposalId>, description: impl Into<String>) -> Self {
        ProposalRecord {
            proposal_id: proposal_id.into(),
            description: description.into(),
            block_number: None,
        }
    }

    /// Construct a record for an event that carries only the proposal id
    pub fn terminal(proposal_id: impl Into<ProposalId>) -> Self {
        Self::new(proposal_id, String::new())
    }
}

/// The lifecycle state a governor reports for a proposal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProposalState {
    /// Created, voting has not opened yet
    Pending = 0,
    /// Voting is open
    Active = 1,
    /// Withdrawn by the proposer
    Canceled = 2,
    /// Voting closed without reaching quorum or majority
    Defeated = 3,
    /// Voting closed in favor; ready to execute
    Succeeded = 4,
    /// Queued behind a timelock
    Queued = 5,
    /// Timed out before execution
    Expired = 6,
    /// Executed on-chain
    Executed = 7,
}

impl ProposalState {
    /// Every state, in code order
    pub const ALL: [ProposalState; NUM_PROPOSAL_STATES] = [
        ProposalState::Pending,
        ProposalState::Active,
        ProposalState::Canceled,
        ProposalState::Defeated,
        ProposalState::Succeeded,
        ProposalState::Queued,
        ProposalState::Expired,
        ProposalState::Executed,
    ];

    /// Whether a proposal in this state may be executed
    pub fn is_ready(&self) -> bool {
        matches!(self, ProposalState::Succeeded)
    }

    /// The numeric code the governor uses for this state
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for ProposalState {
    type Error = GovernorError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ProposalState::ALL
            .get(code as usize)
            .copied()
            .ok_or(GovernorError::UnknownState(code))
    }
}

impl Display for ProposalState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ProposalState::Pending => write!(f, "pending"),
            ProposalState::Active => write!(f, "active"),
            ProposalState::Canceled => write!(f, "canceled"),
            ProposalState::Defeated => write!(f, "defeated"),
            ProposalState::Succeeded => write!(f, "succeeded"),
            ProposalState::Queued => write!(f, "queued"),
            ProposalState::Expired => write!(f, "expired"),
            ProposalState::Executed => write!(f, "executed"),
        }
    }
}

/// The observable event history of one governor, keyed by event name.
///
/// Each list keeps the order in which the events were emitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventIndex {
    /// The events, grouped by name
    events: BTreeMap<String, Vec<ProposalRecord>>,
}

impl EventIndex {
    /// Construct an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event under `name`
    pub fn push(&mut self, name: &str, record: ProposalRecord) {
        self.events.entry(name.to_string()).or_default().push(record);
    }

    /// Replace the events recorded under `name`
    pub fn insert(&mut self, name: &str, records: Vec<ProposalRecord>) {
        self.events.insert(name.to_string(), records);
    }

    /// The events recorded under `name`, empty if the name was never observed
    pub fn get(&self, name: &str) -> &[ProposalRecord] {
        self.events.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// The `ProposalCreated` events
    pub fn created(&self) -> &[ProposalRecord] {
        self.get(PROPOSAL_CREATED_EVENT)
    }

    /// The `ProposalExecuted` events
    pub fn executed(&self) -> &[ProposalRecord] {
        self.get(PROPOSAL_EXECUTED_EVENT)
    }

    /// The `ProposalCanceled` events
    pub fn canceled(&self) -> &[ProposalRecord] {
        self.get(PROPOSAL_CANCELED_EVENT)
    }

    /// Whether no events were recorded at all
    pub fn is_empty(&self) -> bool {
        self.events.values().all(Vec::is_empty)
    }
}

/// The result of a successful execution submission
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReceipt {
    /// The hash of the execution transaction
    pub tx_hash: TxHash,
    /// The block the transaction was included in
    pub block_number: Option<u64>,
    /// The gas consumed by the transaction
    pub gas_used: u64,
}
