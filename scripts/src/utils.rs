//! Utilities for the operator scripts.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{
    network::Ethereum,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::Address;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::{
    constants::ARTIFACT_EXTENSION, errors::ScriptError, types::DeploymentRecord,
};

/// The provider type used by the scripts
pub type GovernorProvider = DynProvider<Ethereum>;

/// Sets up the RPC client used to talk to the governor.
///
/// Without a private key the client can only read; submitting a transaction
/// through it fails at the node.
pub fn setup_client(
    priv_key: Option<&str>,
    rpc_url: &str,
) -> Result<GovernorProvider, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let provider = match priv_key {
        Some(priv_key) => {
            let signer = PrivateKeySigner::from_str(priv_key)
                .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
            ProviderBuilder::new()
                .wallet(signer)
                .connect_http(url)
                .erased()
        }
        None => ProviderBuilder::new().connect_http(url).erased(),
    };

    Ok(provider)
}

// ---------------
// | Deployments |
// ---------------

/// The contents of the `deployments.json` file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentsFile {
    /// The recorded deployments, keyed by contract
    #[serde(default)]
    pub deployments: BTreeMap<String, DeploymentRecord>,
}

/// Read the deployments file at `file_path`
pub fn read_deployments(file_path: &Path) -> Result<DeploymentsFile, ScriptError> {
    let contents = fs::read_to_string(file_path).map_err(|e| {
        ScriptError::ReadDeployments(format!("{}: {}", file_path.display(), e))
    })?;

    serde_json::from_str(&contents).map_err(|e| ScriptError::Serde(e.to_string()))
}

/// Read the deployments file at `file_path`, treating a missing file as empty
pub fn read_deployments_or_default(file_path: &Path) -> Result<DeploymentsFile, ScriptError> {
    if file_path.exists() {
        read_deployments(file_path)
    } else {
        Ok(DeploymentsFile::default())
    }
}

/// Parse the address recorded under `contract_key` in the deployments file
pub fn parse_addr_from_deployments_file(
    file_path: &Path,
    contract_key: &str,
) -> Result<Address, ScriptError> {
    read_deployments(file_path)?
        .deployments
        .get(contract_key)
        .map(|record| record.address)
        .ok_or_else(|| ScriptError::UnknownContract(contract_key.to_string()))
}

/// Resolve a contract identifier against the deployments file.
///
/// The identifier is either a key of the deployments file or a hex address
/// recorded in it. Any other identifier names an unknown contract.
pub fn resolve_contract(file_path: &Path, contract_id: &str) -> Result<Address, ScriptError> {
    let contract_id = contract_id.trim();
    if contract_id.is_empty() {
        return Err(ScriptError::MissingConfig("contract id is empty".to_string()));
    }

    let deployments = read_deployments(file_path)?.deployments;
    if let Some(record) = deployments.get(contract_id) {
        return Ok(record.address);
    }

    Address::from_str(contract_id)
        .ok()
        .filter(|addr| deployments.values().any(|record| record.address == *addr))
        .ok_or_else(|| ScriptError::UnknownContract(contract_id.to_string()))
}

/// Write a deployment record under `contract_key`, keeping every other entry.
///
/// Creates the file if it does not exist.
pub fn write_deployment(
    file_path: &Path,
    contract_key: &str,
    record: DeploymentRecord,
) -> Result<(), ScriptError> {
    let mut deployments = read_deployments_or_default(file_path)?;
    deployments
        .deployments
        .insert(contract_key.to_string(), record);

    let contents = serde_json::to_string_pretty(&deployments)
        .map_err(|e| ScriptError::Serde(e.to_string()))?;
    fs::write(file_path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}

// -------------
// | Artifacts |
// -------------

/// Locate the compilation artifact for `contract_name` under `artifacts_dir`.
///
/// Searches recursively for a `.json` file whose stem matches the contract
/// name, ignoring case.
pub fn find_artifact(artifacts_dir: &Path, contract_name: &str) -> Result<PathBuf, ScriptError> {
    let mut pending = vec![artifacts_dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", dir.display(), e)))?;

        for entry in entries {
            let path = entry
                .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?
                .path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }

            let is_artifact = path.extension().is_some_and(|ext| ext == ARTIFACT_EXTENSION);
            let stem_matches = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem.eq_ignore_ascii_case(contract_name));
            if is_artifact && stem_matches {
                return Ok(path);
            }
        }
    }

    Err(ScriptError::ArtifactParsing(format!(
        "failed to locate ({contract_name}) contract json"
    )))
}

/// Hash the file at `file_path` with MD5, returning the lowercase hex digest.
///
/// The digest matches the hashes recorded by the deployment tooling.
pub fn hash_file(file_path: &Path) -> Result<String, ScriptError> {
    let bytes = fs::read(file_path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", file_path.display(), e)))?;
    Ok(hex::encode(Md5::digest(bytes)))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    /// A deployments file with two governors
    fn sample_deployments(dir: &Path) -> PathBuf {
        let path = dir.join("deployments.json");
        let contents = r#"{
            "deployments": {
                "governor_upgrade_contract": {
                    "address": "0x0000000000000000000000000000000000000001",
                    "hash": "abc"
                },
                "splitter_contract": {
                    "address": "0x0000000000000000000000000000000000000002"
                }
            }
        }"#;
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_resolve_contract_by_key() {
        let dir = tempdir().unwrap();
        let path = sample_deployments(dir.path());

        let addr = resolve_contract(&path, "governor_upgrade_contract").unwrap();
        assert_eq!(addr, Address::with_last_byte(1));
    }

    #[test]
    fn test_resolve_contract_by_recorded_address() {
        let dir = tempdir().unwrap();
        let path = sample_deployments(dir.path());

        let addr =
            resolve_contract(&path, "0x0000000000000000000000000000000000000002").unwrap();
        assert_eq!(addr, Address::with_last_byte(2));
    }

    #[test]
    fn test_resolve_unknown_contract() {
        let dir = tempdir().unwrap();
        let path = sample_deployments(dir.path());

        let unrecorded = resolve_contract(&path, "0x0000000000000000000000000000000000000003");
        assert!(matches!(unrecorded, Err(ScriptError::UnknownContract(_))));

        let unknown_key = resolve_contract(&path, "factory_contract");
        assert!(matches!(unknown_key, Err(ScriptError::UnknownContract(_))));

        let empty = resolve_contract(&path, "  ");
        assert!(matches!(empty, Err(ScriptError::MissingConfig(_))));
    }

    #[test]
    fn test_missing_deployments_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let res = resolve_contract(&path, "governor_upgrade_contract");
        assert!(matches!(res, Err(ScriptError::ReadDeployments(_))));
        assert_eq!(
            read_deployments_or_default(&path).unwrap(),
            DeploymentsFile::default()
        );
    }

    #[test]
    fn test_write_deployment_keeps_other_entries() {
        let dir = tempdir().unwrap();
        let path = sample_deployments(dir.path());

        let record = DeploymentRecord {
            address: Address::with_last_byte(9),
            hash: Some("def".to_string()),
        };
        write_deployment(&path, "factory_contract", record.clone()).unwrap();

        let deployments = read_deployments(&path).unwrap().deployments;
        assert_eq!(deployments.len(), 3);
        assert_eq!(deployments["factory_contract"], record);
        assert_eq!(
            deployments["governor_upgrade_contract"].hash.as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_write_deployment_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        let record = DeploymentRecord { address: Address::with_last_byte(5), hash: None };
        write_deployment(&path, "splitter_contract", record).unwrap();

        let addr = parse_addr_from_deployments_file(&path, "splitter_contract").unwrap();
        assert_eq!(addr, Address::with_last_byte(5));
    }

    #[test]
    fn test_find_artifact_is_recursive_and_case_insensitive() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("contracts").join("Splitter.sol");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Splitter.json"), "{}").unwrap();
        fs::write(nested.join("Splitter.dbg.txt"), "").unwrap();

        let found = find_artifact(dir.path(), "splitter").unwrap();
        assert_eq!(found, nested.join("Splitter.json"));

        let missing = find_artifact(dir.path(), "Factory");
        assert!(matches!(missing, Err(ScriptError::ArtifactParsing(_))));
    }

    #[test]
    fn test_hash_file_is_md5_hex() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("Empty.json");
        fs::write(&empty, "").unwrap();
        assert_eq!(hash_file(&empty).unwrap(), "d41d8cd98f00b204e9800998ecf8427e");

        let abc = dir.path().join("Abc.json");
        fs::write(&abc, "abc").unwrap();
        assert_eq!(hash_file(&abc).unwrap(), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_hash_file_tracks_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Factory.json");

        fs::write(&path, "{\"bytecode\":\"0x00\"}").unwrap();
        let first = hash_file(&path).unwrap();
        assert_eq!(first.len(), 32);
        assert_eq!(first, hash_file(&path).unwrap());

        fs::write(&path, "{\"bytecode\":\"0x01\"}").unwrap();
        assert_ne!(first, hash_file(&path).unwrap());
    }
}
