//! Drives the active proposals of a governor through execution

use std::collections::HashSet;

use alloy_primitives::Address;
use contracts_common::{
    errors::GovernorError,
    interfaces::GovernorRpc,
    types::{ProposalRecord, ProposalState},
};
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::{
    errors::ScriptError,
    governance::{
        eligibility::active_proposals,
        report::{ProposalOutcome, RunReport},
    },
};

/// An active proposal paired with its live state, or the error reading it
pub type ProposalStatus = (ProposalRecord, Result<ProposalState, GovernorError>);

/// Executes every succeeded proposal of a governor, one at a time
pub struct ProposalCoordinator<'a, G> {
    /// The collaborators of the run
    governor: &'a G,
}

impl<'a, G: GovernorRpc> ProposalCoordinator<'a, G> {
    /// Construct a coordinator over `governor`
    pub fn new(governor: &'a G) -> Self {
        ProposalCoordinator { governor }
    }

    /// Run one batch against the governor at `contract`.
    ///
    /// Fails only when the event history cannot be fetched. Once the batch has
    /// started, every error is recorded against the proposal that raised it.
    pub async fn run(&self, contract: Address) -> Result<RunReport, ScriptError> {
        let active = self.fetch_active(contract).await?;
        let mut report = RunReport::new(contract);
        if active.is_empty() {
            info!("no active proposals");
            return Ok(report);
        }

        info!("proposal execution started ({} active)", active.len());
        let mut attempted = HashSet::new();
        for proposal in &active {
            if !attempted.insert(proposal.proposal_id) {
                debug!(proposal_id = %proposal.proposal_id, "proposal already attempted this run");
                continue;
            }

            let span = info_span!("proposal", proposal_id = %proposal.proposal_id);
            let result = self
                .execute_if_ready(proposal, contract)
                .instrument(span.clone())
                .await;

            let _enter = span.enter();
            match &result {
                Ok(ProposalOutcome::Executed(receipt)) => {
                    info!(tx_hash = %receipt.tx_hash, "proposal execution succeeded")
                }
                Ok(ProposalOutcome::Skipped(state)) => {
                    info!(%state, "proposal not ready, skipped")
                }
                Err(e) => error!("proposal execution failed: {e}"),
            }
            report.record(proposal.proposal_id, result);
        }

        if report.failed() > 0 {
            warn!("proposal execution ended with failures: {report}");
        } else {
            info!("proposal execution ended: {report}");
        }
        Ok(report)
    }

    /// Read the live state of every active proposal without executing any
    pub async fn inspect(&self, contract: Address) -> Result<Vec<ProposalStatus>, ScriptError> {
        let active = self.fetch_active(contract).await?;

        let mut statuses = Vec::with_capacity(active.len());
        for proposal in active {
            let state = self.live_state(&proposal, contract).await;
            statuses.push((proposal, state));
        }
        Ok(statuses)
    }

    /// Fetch the event history and narrow it to the active proposals
    async fn fetch_active(&self, contract: Address) -> Result<Vec<ProposalRecord>, ScriptError> {
        info!("fetching proposal events for {contract:#x}");
        let events = self
            .governor
            .fetch_events(contract)
            .await
            .map_err(|e| ScriptError::EventFetching(e.to_string()))?;
        if events.is_empty() {
            debug!("governor {contract:#x} has emitted no proposal events");
            return Ok(Vec::new());
        }

        Ok(active_proposals(&events))
    }

    /// Re-read the proposal's state and execute it if it has succeeded
    async fn execute_if_ready(
        &self,
        proposal: &ProposalRecord,
        contract: Address,
    ) -> Result<ProposalOutcome, GovernorError> {
        info!("proposal execution started");
        let state = self.live_state(proposal, contract).await?;
        if !state.is_ready() {
            return Ok(ProposalOutcome::Skipped(state));
        }

        let receipt = self
            .governor
            .submit_execution(&proposal.description, contract)
            .await?;
        Ok(ProposalOutcome::Executed(receipt))
    }

    /// Query the governor for the proposal's current lifecycle state
    async fn live_state(
        &self,
        proposal: &ProposalRecord,
        contract: Address,
    ) -> Result<ProposalState, GovernorError> {
        let code = self
            .governor
            .query_state(&proposal.proposal_id, contract)
            .await?;
        ProposalState::try_from(code)
    }
}

#[cfg(test)]
mod tests {
    use contracts_common::types::ProposalId;
    use test_helpers::{
        events::EventIndexBuilder,
        mock_governor::{MockCall, MockGovernor},
    };

    use super::*;

    /// The governor address used throughout the tests
    const GOVERNOR: Address = Address::with_last_byte(0x42);

    /// Run the coordinator over `mock`
    async fn run(mock: &MockGovernor) -> RunReport {
        ProposalCoordinator::new(mock).run(GOVERNOR).await.unwrap()
    }

    #[tokio::test]
    async fn test_ready_proposal_is_executed() {
        let events = EventIndexBuilder::new().created(1, "X").build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state(1, ProposalState::Succeeded);

        let report = run(&mock).await;
        assert_eq!(mock.executions(), vec!["X".to_string()]);
        assert_eq!(
            mock.calls().last(),
            Some(&MockCall::SubmitExecution("X".to_string(), GOVERNOR))
        );
        assert_eq!(report.attempted(), 1);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_retired_proposal_is_not_touched() {
        let events = EventIndexBuilder::new()
            .created(1, "A")
            .created(2, "B")
            .executed(1)
            .build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state(1, ProposalState::Succeeded)
            .with_state(2, ProposalState::Succeeded);

        let report = run(&mock).await;
        assert_eq!(mock.state_queries(), vec![ProposalId::from(2)]);
        assert_eq!(mock.executions(), vec!["B".to_string()]);
        assert_eq!(report.attempted(), 1);
    }

    #[tokio::test]
    async fn test_active_proposal_is_skipped() {
        let events = EventIndexBuilder::new().created(1, "X").build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state(1, ProposalState::Active);

        let report = run(&mock).await;
        assert!(mock.executions().is_empty());
        assert_eq!(report.attempted(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 0);
        assert_eq!(
            report.results[0].result,
            Ok(ProposalOutcome::Skipped(ProposalState::Active))
        );
    }

    #[tokio::test]
    async fn test_only_succeeded_reaches_executor() {
        for state in ProposalState::ALL {
            let events = EventIndexBuilder::new().created(1, "X").build();
            let mock = MockGovernor::new(GOVERNOR)
                .with_events(events)
                .with_state(1, state);

            let report = run(&mock).await;
            let executed = !mock.executions().is_empty();
            assert_eq!(executed, state == ProposalState::Succeeded, "state {state}");
            assert_eq!(report.failed(), 0);
        }
    }

    #[tokio::test]
    async fn test_unknown_state_code_is_a_proposal_failure() {
        let events = EventIndexBuilder::new().created(1, "X").created(2, "Y").build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state_code(1, 9)
            .with_state(2, ProposalState::Succeeded);

        let report = run(&mock).await;
        assert_eq!(report.results[0].result, Err(GovernorError::UnknownState(9)));
        assert_eq!(mock.executions(), vec!["Y".to_string()]);
    }

    #[tokio::test]
    async fn test_state_failure_does_not_stop_batch() {
        let events = EventIndexBuilder::new().created(1, "A").created(2, "B").build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state_error(1, GovernorError::Transport("connection reset".to_string()))
            .with_state(2, ProposalState::Succeeded);

        let report = run(&mock).await;
        assert_eq!(mock.executions(), vec!["B".to_string()]);
        assert_eq!(report.attempted(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.results[0].proposal_id, ProposalId::from(1));
        assert!(report.results[0].result.is_err());
        assert_eq!(report.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_execution_failure_does_not_stop_batch() {
        let events = EventIndexBuilder::new()
            .created(1, "A")
            .created(2, "B")
            .created(3, "C")
            .build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state(1, ProposalState::Succeeded)
            .with_state(2, ProposalState::Succeeded)
            .with_state(3, ProposalState::Succeeded)
            .with_execution_error("B", GovernorError::Reverted("quorum not reached".to_string()));

        let report = run(&mock).await;
        assert_eq!(mock.executions(), vec!["A", "B", "C"]);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);

        let failed: Vec<_> = report.failures().map(|(id, _)| *id).collect();
        assert_eq!(failed, vec![ProposalId::from(2)]);
    }

    #[tokio::test]
    async fn test_single_failing_proposal_is_reported() {
        let events = EventIndexBuilder::new().created(1, "A").build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state_error(1, GovernorError::Timeout(std::time::Duration::from_secs(30)));

        let report = run(&mock).await;
        assert_eq!(report.attempted(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[tokio::test]
    async fn test_no_created_proposals() {
        let mock = MockGovernor::new(GOVERNOR);

        let report = run(&mock).await;
        assert!(report.is_empty());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(mock.calls(), vec![MockCall::FetchEvents(GOVERNOR)]);
    }

    #[tokio::test]
    async fn test_inspect_empty_history() {
        let mock = MockGovernor::new(GOVERNOR).with_events(EventIndexBuilder::new().build());

        let statuses = ProposalCoordinator::new(&mock).inspect(GOVERNOR).await.unwrap();
        assert!(statuses.is_empty());
        assert_eq!(mock.calls(), vec![MockCall::FetchEvents(GOVERNOR)]);
    }

    #[tokio::test]
    async fn test_all_retired_is_nothing_to_do() {
        let events = EventIndexBuilder::new()
            .created(1, "A")
            .created(2, "B")
            .executed(1)
            .canceled(2)
            .build();
        let mock = MockGovernor::new(GOVERNOR).with_events(events);

        let report = run(&mock).await;
        assert!(report.is_empty());
        assert!(mock.state_queries().is_empty());
    }

    #[tokio::test]
    async fn test_event_fetch_failure_is_fatal() {
        let mock = MockGovernor::new(GOVERNOR)
            .with_fetch_error(GovernorError::Transport("connection refused".to_string()));

        let res = ProposalCoordinator::new(&mock).run(GOVERNOR).await;
        assert!(matches!(res, Err(ScriptError::EventFetching(_))));
        assert_eq!(mock.calls(), vec![MockCall::FetchEvents(GOVERNOR)]);
    }

    #[tokio::test]
    async fn test_unknown_contract_is_fatal() {
        let mock = MockGovernor::new(GOVERNOR);

        let res = ProposalCoordinator::new(&mock)
            .run(Address::with_last_byte(0x01))
            .await;
        assert!(matches!(res, Err(ScriptError::EventFetching(_))));
    }

    #[tokio::test]
    async fn test_duplicate_creation_attempted_once() {
        let events = EventIndexBuilder::new()
            .created(1, "A")
            .created(1, "A")
            .build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state(1, ProposalState::Succeeded);

        let report = run(&mock).await;
        assert_eq!(mock.executions(), vec!["A".to_string()]);
        assert_eq!(report.attempted(), 1);
    }

    #[tokio::test]
    async fn test_proposals_processed_in_creation_order() {
        let events = EventIndexBuilder::new()
            .created(3, "C")
            .created(1, "A")
            .created(2, "B")
            .build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state(1, ProposalState::Succeeded)
            .with_state(2, ProposalState::Defeated)
            .with_state(3, ProposalState::Succeeded);

        run(&mock).await;
        assert_eq!(
            mock.calls(),
            vec![
                MockCall::FetchEvents(GOVERNOR),
                MockCall::QueryState(ProposalId::from(3), GOVERNOR),
                MockCall::SubmitExecution("C".to_string(), GOVERNOR),
                MockCall::QueryState(ProposalId::from(1), GOVERNOR),
                MockCall::SubmitExecution("A".to_string(), GOVERNOR),
                MockCall::QueryState(ProposalId::from(2), GOVERNOR),
            ]
        );
    }

    #[tokio::test]
    async fn test_rerun_without_new_events_selects_same_proposals() {
        let events = EventIndexBuilder::new()
            .created(1, "A")
            .created(2, "B")
            .build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state(1, ProposalState::Active)
            .with_state_error(2, GovernorError::Transport("flaky".to_string()));

        let first = run(&mock).await;
        let second = run(&mock).await;
        let ids = |r: &RunReport| r.results.iter().map(|p| p.proposal_id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert!(mock.executions().is_empty());
    }

    #[tokio::test]
    async fn test_inspect_never_executes() {
        let events = EventIndexBuilder::new()
            .created(1, "A")
            .created(2, "B")
            .canceled(2)
            .created(3, "C")
            .build();
        let mock = MockGovernor::new(GOVERNOR)
            .with_events(events)
            .with_state(1, ProposalState::Succeeded)
            .with_state_error(3, GovernorError::NotFound("proposal 3".to_string()));

        let statuses = ProposalCoordinator::new(&mock).inspect(GOVERNOR).await.unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].1, Ok(ProposalState::Succeeded));
        assert!(statuses[1].1.is_err());
        assert!(mock.executions().is_empty());
    }
}
