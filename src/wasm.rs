//! Compiled contract artifacts: location, validation and hashing.
//!
//! The deployer manages a fixed contract family, so artifact discovery is a
//! static registry from contract key to file name under a configurable
//! artifact directory. Bytes are structurally validated with `wasmparser`
//! before anything is hashed or uploaded; a truncated or mis-built artifact
//! should fail here, not on-chain.

use crate::{DeployerError, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

/// Contract keys this deployer knows how to locate, in install order.
pub const CONTRACT_KEYS: [&str; 4] = ["factory", "pair", "router", "token"];

fn artifact_file(key: &str) -> Result<&'static str> {
    match key {
        "factory" => Ok("amm_factory.optimized.wasm"),
        "pair" => Ok("amm_pair.optimized.wasm"),
        "router" => Ok("amm_router.optimized.wasm"),
        "token" => Ok("soroban_token_contract.optimized.wasm"),
        other => Err(DeployerError::Artifact(format!(
            "unknown contract key '{}' (expected one of {})",
            other,
            CONTRACT_KEYS.join(", ")
        ))
        .into()),
    }
}

/// A directory holding compiled, optimized wasm artifacts.
pub struct ArtifactDir {
    dir: PathBuf,
}

impl ArtifactDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ArtifactDir { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        Ok(self.dir.join(artifact_file(key)?))
    }

    /// Read and validate the artifact for `key`.
    pub fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key)?;
        let bytes = fs::read(&path).map_err(|e| {
            DeployerError::Artifact(format!("cannot read {}: {}", path.display(), e))
        })?;
        validate_module(&bytes)?;
        Ok(bytes)
    }
}

/// Check that `bytes` is a well-formed wasm module.
pub fn validate_module(bytes: &[u8]) -> Result<()> {
    wasmparser::validate(bytes)
        .map_err(|e| DeployerError::Artifact(format!("not a valid wasm module: {}", e)))?;
    Ok(())
}

/// SHA-256 over the raw artifact bytes; matches the on-chain code key.
pub fn wasm_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

// ── tests ─────────────────────────────────────────────────────────────────────
