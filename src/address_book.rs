//! Per-network record of deployed contract IDs and installed wasm hashes.
//!
//! The book is a small JSON file, one per network, living in a directory the
//! CLI controls (`.soroban` by default). Deploy and install operations write
//! it before submitting their transaction, so a failed submission still
//! leaves the derived values on disk; re-running the operation overwrites
//! them.

use crate::config::Network;
use crate::{DeployerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AddressBook {
    /// Contract IDs (`C...` strkeys) by contract key.
    ids: BTreeMap<String, String>,
    /// Hex-encoded SHA-256 wasm hashes by contract key.
    hashes: BTreeMap<String, String>,
    #[serde(skip)]
    path: PathBuf,
}

impl AddressBook {
    /// Load the book for `network` from `dir`, or start an empty one if no
    /// file exists yet.
    pub fn load_or_create(network: Network, dir: &Path) -> Result<Self> {
        let path = dir.join(format!("{}.contracts.json", network));
        let mut book = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str::<AddressBook>(&raw)?
        } else {
            debug!(path = %path.display(), "no address book yet, starting empty");
            AddressBook::default()
        };
        book.path = path;
        Ok(book)
    }

    pub fn contract_id(&self, key: &str) -> Result<&str> {
        self.ids.get(key).map(String::as_str).ok_or_else(|| {
            DeployerError::MissingEntry {
                kind: "contract id",
                key: key.to_string(),
            }
            .into()
        })
    }

    pub fn set_contract_id(&mut self, key: &str, id: &str) {
        self.ids.insert(key.to_string(), id.to_string());
    }

    pub fn wasm_hash(&self, key: &str) -> Result<[u8; 32]> {
        let encoded = self.hashes.get(key).ok_or_else(|| DeployerError::MissingEntry {
            kind: "wasm hash",
            key: key.to_string(),
        })?;
        let bytes = hex::decode(encoded).map_err(|_| {
            DeployerError::Artifact(format!("wasm hash for '{}' is not valid hex", key))
        })?;
        bytes.try_into().map_err(|_| {
            DeployerError::Artifact(format!("wasm hash for '{}' is not 32 bytes", key)).into()
        })
    }

    pub fn set_wasm_hash(&mut self, key: &str, hash: &[u8; 32]) {
        self.hashes.insert(key.to_string(), hex::encode(hash));
    }

    /// Write the book to disk, creating the parent directory on first save.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %self.path.display(), "address book saved");
        Ok(())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = AddressBook::load_or_create(Network::Testnet, dir.path()).unwrap();
        book.set_contract_id("factory", "CAAAA");
        book.set_wasm_hash("factory", &[0xab; 32]);
        book.save().unwrap();

        let reloaded = AddressBook::load_or_create(Network::Testnet, dir.path()).unwrap();
        assert_eq!(reloaded.contract_id("factory").unwrap(), "CAAAA");
        assert_eq!(reloaded.wasm_hash("factory").unwrap(), [0xab; 32]);
    }

    #[test]
    fn books_are_scoped_per_network() {
        let dir = tempfile::tempdir().unwrap();
        let mut testnet = AddressBook::load_or_create(Network::Testnet, dir.path()).unwrap();
        testnet.set_contract_id("router", "CBBBB");
        testnet.save().unwrap();

        let standalone = AddressBook::load_or_create(Network::Standalone, dir.path()).unwrap();
        assert!(standalone.contract_id("router").is_err());
    }

    #[test]
    fn missing_entries_name_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let book = AddressBook::load_or_create(Network::Testnet, dir.path()).unwrap();
        let err = book.contract_id("pair").unwrap_err();
        assert!(err.to_string().contains("pair"));
        let err = book.wasm_hash("pair").unwrap_err();
        assert!(err.to_string().contains("pair"));
    }

    #[test]
    fn rejects_corrupt_wasm_hash() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = AddressBook::load_or_create(Network::Testnet, dir.path()).unwrap();
        book.hashes.insert("token".to_string(), "zz".to_string());
        assert!(book.wasm_hash("token").is_err());
    }
}
