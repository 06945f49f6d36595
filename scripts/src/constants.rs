//! Constants used in the operator scripts

/// The environment variable naming the governor whose proposals are executed
pub const PROPOSAL_CONTRACT_ENV_VAR: &str = "PROPOSAL_CONTRACT_ID";

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The default directory holding compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The extension of a compiled contract artifact
pub const ARTIFACT_EXTENSION: &str = "json";

/// The default timeout applied to every RPC call, in seconds
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

/// The process exit code when the batch completed but some proposals failed
pub const PROPOSAL_FAILURE_EXIT_CODE: u8 = 2;
