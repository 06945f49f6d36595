//! Selection of the proposals still eligible for execution

use std::collections::HashSet;

use contracts_common::{
    constants::TERMINAL_EVENTS,
    types::{EventIndex, ProposalId, ProposalRecord},
};

/// The proposals created on the governor that no terminal event has retired.
///
/// Proposals are matched on `proposal_id` alone; descriptions play no part.
/// The result keeps the creation order of the event history.
pub fn active_proposals(events: &EventIndex) -> Vec<ProposalRecord> {
    let retired: HashSet<&ProposalId> = TERMINAL_EVENTS
        .iter()
        .flat_map(|name| events.get(name))
        .map(|record| &record.proposal_id)
        .collect();

    events
        .created()
        .iter()
        .filter(|record| !retired.contains(&record.proposal_id))
        .cloned()
        .collect()
}
