//! Defines types and utilities for managing the inventory of integration tests

use std::{future::Future, path::PathBuf, pin::Pin, time::Duration};

use alloy_primitives::Address;
use eyre::Result;
use scripts::{rpc::AlloyGovernor, solidity::IGovernor::IGovernorInstance, utils::GovernorProvider};

use crate::constants::RPC_TIMEOUT_SECS;

/// A governor instance using the devnet provider
pub type Governor = IGovernorInstance<GovernorProvider>;

/// The arguments provided to each integration test
#[derive(Clone)]
pub struct TestArgs {
    /// The RPC client
    pub provider: GovernorProvider,
    /// The governor contract under test
    pub governor: Governor,
    /// The governor's key in the deployments file
    pub contract_key: String,
    /// The path to the deployments file
    pub deployments: PathBuf,
    /// The RPC URL of the devnet
    pub rpc_url: String,
}

impl TestArgs {
    /// The address of the governor under test
    pub fn governor_addr(&self) -> Address {
        *self.governor.address()
    }

    /// The coordinator's collaborators, backed by the devnet
    pub fn alloy_governor(&self) -> AlloyGovernor {
        AlloyGovernor::new(self.provider.clone(), 0, Duration::from_secs(RPC_TIMEOUT_SECS))
    }
}

/// The signature of an integration test
type TestFn = fn(TestArgs) -> Pin<Box<dyn Future<Output = Result<()>>>>;

/// A struct representing an integration test
pub struct IntegrationTest {
    /// The name of the test
    pub name: &'static str,
    /// The test function
    pub test_fn: TestFn,
}

// Registered tests are gathered at link time and run by `main`
inventory::collect!(IntegrationTest);

/// Macro to register an integration test
#[macro_export]
macro_rules! integration_test {
    ($test_fn:ident) => {
        inventory::submit!($crate::test_inventory::IntegrationTest {
            name: stringify!($test_fn),
            test_fn: move |args| std::boxed::Box::pin($test_fn(args)),
        });
    };
}
