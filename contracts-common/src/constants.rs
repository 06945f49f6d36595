//! Constants describing the on-chain governance interface

/// The name of the event emitted when a proposal is created
pub const PROPOSAL_CREATED_EVENT: &str = "ProposalCreated";

/// The name of the event emitted when a proposal is executed
pub const PROPOSAL_EXECUTED_EVENT: &str = "ProposalExecuted";

/// The name of the event emitted when a proposal is canceled
pub const PROPOSAL_CANCELED_EVENT: &str = "ProposalCanceled";

/// The event names that retire a proposal
pub const TERMINAL_EVENTS: [&str; 2] = [PROPOSAL_EXECUTED_EVENT, PROPOSAL_CANCELED_EVENT];

/// The number of lifecycle states a governor reports
pub const NUM_PROPOSAL_STATES: usize = 8;
