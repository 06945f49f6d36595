//! Errors surfaced by a single call to the governor collaborators

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    time::Duration,
};

/// An error returned by one call to the event source, state oracle, or executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernorError {
    /// The RPC transport failed
    Transport(String),
    /// The contract or proposal is unknown on-chain
    NotFound(String),
    /// The node rejected the submission before inclusion
    Rejected(String),
    /// The execution transaction was included but reverted
    Reverted(String),
    /// The call did not complete within the configured timeout
    Timeout(Duration),
    /// The governor reported a lifecycle code outside the known range
    UnknownState(u8),
}

impl Display for GovernorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GovernorError::Transport(s) => write!(f, "transport error: {}", s),
            GovernorError::NotFound(s) => write!(f, "not found: {}", s),
            GovernorError::Rejected(s) => write!(f, "submission rejected: {}", s),
            GovernorError::Reverted(s) => write!(f, "execution reverted: {}", s),
            GovernorError::Timeout(d) => write!(f, "timed out after {:?}", d),
            GovernorError::UnknownState(code) => write!(f, "unknown proposal state code {}", code),
        }
    }
}

impl Error for GovernorError {}
