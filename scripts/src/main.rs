use std::process::ExitCode;

use clap::Parser;
use scripts::{cli::Cli, errors::ScriptError};
use tracing::{error, Level};

#[tokio::main]
async fn main() -> Result<ExitCode, ScriptError> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(Level::from(cli.verbosity)).init();

    let rpc = cli.rpc_config();
    let Cli { deployments_path, command, .. } = cli;
    command.run(rpc, deployments_path).await.inspect_err(|e| error!("{e}"))
}
