//! Operator scripts for the governance contracts: proposal execution and
//! deployment bookkeeping.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod governance;
pub mod rpc;
#[allow(missing_docs, clippy::missing_docs_in_private_items)]
pub mod solidity;
pub mod types;
pub mod utils;
