//! Integration tests for the proposal lifecycle
