//! Test utilities

pub mod governance;
pub mod transactions;
