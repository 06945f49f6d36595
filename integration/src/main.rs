//! Integration tests for the governance scripts. These assume that a devnet is
//! already running locally with the governor deployed.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

mod cli;
mod constants;
mod test_inventory;
mod tests;
mod util;

use std::{process::ExitCode, str::FromStr};

use alloy::{
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use eyre::Result;
use scripts::{solidity::IGovernor, utils::parse_addr_from_deployments_file};
use test_inventory::{IntegrationTest, TestArgs};
use tracing::Level;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();
    }

    let args = setup(&cli)?;
    let tests = inventory::iter::<IntegrationTest>
        .into_iter()
        .filter(|test| cli.test.as_deref().map_or(true, |name| test.name == name))
        .collect::<Vec<_>>();
    if tests.is_empty() {
        eyre::bail!("no test named {}", cli.test.unwrap_or_default());
    }

    let mut failures = 0;
    for test in &tests {
        match (test.test_fn)(args.clone()).await {
            Ok(()) => println!("{} {}", "PASS".green().bold(), test.name),
            Err(e) => {
                failures += 1;
                println!("{} {}: {e:?}", "FAIL".red().bold(), test.name);
            }
        }
    }

    println!("\n{} passed, {} failed", tests.len() - failures, failures);
    Ok(if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Build the arguments shared by every test
fn setup(cli: &Cli) -> Result<TestArgs> {
    let signer = PrivateKeySigner::from_str(&cli.priv_key)?;
    let url = Url::parse(&cli.rpc_url)?;
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url).erased();

    let governor_addr = parse_addr_from_deployments_file(&cli.deployments, &cli.contract)?;
    let governor = IGovernor::new(governor_addr, provider.clone());

    Ok(TestArgs {
        provider,
        governor,
        contract_key: cli.contract.clone(),
        deployments: cli.deployments.clone(),
        rpc_url: cli.rpc_url.clone(),
    })
}
