//! Common modules used throughout the project, including the operator scripts & testing code

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod constants;
pub mod errors;
pub mod interfaces;
pub mod types;
