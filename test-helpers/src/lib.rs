//! Common helper functions used in unit and integration tests across the project crates

pub mod events;
pub mod misc;
pub mod mock_governor;

pub use eyre;
