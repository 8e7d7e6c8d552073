//! Deployment tooling for Soroban smart contracts.
//!
//! This crate manages the on-chain lifecycle of a fixed family of AMM
//! contracts (`factory`, `pair`, `router`, `token`): uploading compiled
//! bytecode, creating contract instances at deterministic addresses,
//! invoking contract methods and extending the lifetime of on-chain
//! storage entries.
//!
//! Sub-modules:
//! - [`cli`]          - Command-line surface and command handlers.
//! - [`config`]       - Network presets and environment configuration.
//! - [`keys`]         - Ed25519 keypairs and strkey encodings.
//! - [`address_book`] - Per-network record of contract IDs and wasm hashes.
//! - [`wasm`]         - Compiled artifact location, validation and hashing.
//! - [`scval`]        - JSON to `ScVal` argument conversion.
//! - [`rpc`]          - Thin JSON-RPC client for a Soroban RPC endpoint.
//! - [`tx`]           - Transaction assembly, signing and submission.
//! - [`ops`]          - The deployment operations themselves.

pub mod address_book;
pub mod cli;
pub mod config;
pub mod keys;
pub mod ops;
pub mod rpc;
pub mod scval;
pub mod tx;
pub mod wasm;

use thiserror::Error;

/// Errors raised while deploying or driving contracts.
#[derive(Debug, Error)]
pub enum DeployerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("no {kind} recorded for '{key}', run `install`/`deploy` first")]
    MissingEntry { kind: &'static str, key: String },

    #[error("artifact error: {0}")]
    Artifact(String),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("simulation failed: {0}")]
    Simulation(String),

    #[error("transaction failed: {0}")]
    Transaction(String),

    #[error("xdr error: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Crate-wide result alias. `DeployerError` values are raised into it with
/// `.into()` at the failure site.
pub type Result<T> = anyhow::Result<T>;
