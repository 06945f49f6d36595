//! Builders for event indices

use contracts_common::{
    constants::{PROPOSAL_CANCELED_EVENT, PROPOSAL_CREATED_EVENT, PROPOSAL_EXECUTED_EVENT},
    types::{EventIndex, ProposalId, ProposalRecord},
};

/// Builds an [`EventIndex`] one event at a time, preserving insertion order per event name
#[derive(Default)]
pub struct EventIndexBuilder {
    /// The index under construction
    index: EventIndex,
}

impl EventIndexBuilder {
    /// Start from an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `ProposalCreated` event
    pub fn created(mut self, id: impl Into<ProposalId>, description: &str) -> Self {
        self.index
            .push(PROPOSAL_CREATED_EVENT, ProposalRecord::new(id, description));
        self
    }

    /// Record a `ProposalExecuted` event
    pub fn executed(mut self, id: impl Into<ProposalId>) -> Self {
        self.index
            .push(PROPOSAL_EXECUTED_EVENT, ProposalRecord::terminal(id));
        self
    }

    /// Record a `ProposalCanceled` event
    pub fn canceled(mut self, id: impl Into<ProposalId>) -> Self {
        self.index
            .push(PROPOSAL_CANCELED_EVENT, ProposalRecord::terminal(id));
        self
    }

    /// Record an arbitrary event
    pub fn event(mut self, name: &str, record: ProposalRecord) -> Self {
        self.index.push(name, record);
        self
    }

    /// Finish building
    pub fn build(self) -> EventIndex {
        self.index
    }
}
