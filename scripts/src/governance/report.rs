//! The outcome of a coordinator run

use std::fmt::{self, Display, Formatter};

use alloy_primitives::Address;
use contracts_common::{
    errors::GovernorError,
    types::{ExecutionReceipt, ProposalId, ProposalState},
};

use crate::constants::PROPOSAL_FAILURE_EXIT_CODE;

/// What happened to a proposal that was handled without error
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProposalOutcome {
    /// The proposal was ready and its execution was included on-chain
    Executed(ExecutionReceipt),
    /// The proposal was not ready; it was left for a later run
    Skipped(ProposalState),
}

/// The result of handling one proposal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalResult {
    /// The proposal handled
    pub proposal_id: ProposalId,
    /// Its outcome, or the error that ended its handling
    pub result: Result<ProposalOutcome, GovernorError>,
}

/// The per-proposal results of one coordinator run, in processing order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// The governor the run targeted
    pub contract: Address,
    /// One entry per proposal attempted
    pub results: Vec<ProposalResult>,
}

impl RunReport {
    /// An empty report for `contract`
    pub fn new(contract: Address) -> Self {
        RunReport { contract, results: Vec::new() }
    }

    /// Record the result of handling `proposal_id`
    pub fn record(
        &mut self,
        proposal_id: ProposalId,
        result: Result<ProposalOutcome, GovernorError>,
    ) {
        self.results.push(ProposalResult { proposal_id, result });
    }

    /// Whether the run found nothing to do
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The number of proposals attempted
    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    /// The number of proposals executed
    pub fn succeeded(&self) -> usize {
        self.count(|r| matches!(r, Ok(ProposalOutcome::Executed(_))))
    }

    /// The number of proposals skipped because they were not ready
    pub fn skipped(&self) -> usize {
        self.count(|r| matches!(r, Ok(ProposalOutcome::Skipped(_))))
    }

    /// The number of proposals whose handling failed
    pub fn failed(&self) -> usize {
        self.count(Result::is_err)
    }

    /// The failed proposals and their errors
    pub fn failures(&self) -> impl Iterator<Item = (&ProposalId, &GovernorError)> {
        self.results
            .iter()
            .filter_map(|r| r.result.as_ref().err().map(|e| (&r.proposal_id, e)))
    }

    /// The process exit code the run maps to.
    ///
    /// Any failed proposal makes the run exit non-zero; skipped proposals do not.
    pub fn exit_code(&self) -> u8 {
        if self.failed() > 0 {
            PROPOSAL_FAILURE_EXIT_CODE
        } else {
            0
        }
    }

    /// Count the results matching `pred`
    fn count(&self, pred: impl Fn(&Result<ProposalOutcome, GovernorError>) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.result)).count()
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempted = {}, succeeded = {}, skipped = {}, failed = {}",
            self.attempted(),
            self.succeeded(),
            self.skipped(),
            self.failed()
        )
    }
}
