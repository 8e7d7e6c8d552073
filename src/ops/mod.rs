//! The deployment operations.
//!
//! Sub-modules:
//! - [`install`] - Upload compiled contract bytecode on-chain.
//! - [`deploy`]  - Deterministic contract creation from installed bytecode.
//! - [`invoke`]  - Contract method invocation.
//! - [`ttl`]     - TTL extension for instance and code ledger entries.
//! - [`airdrop`] - Friendbot funding for test networks.

pub mod airdrop;
pub mod deploy;
pub mod install;
pub mod invoke;
pub mod ttl;

// Top-level re-exports.
pub use airdrop::airdrop_account;
pub use deploy::{address_preimage, deploy_contract, deploy_token, derive_contract_id};
pub use install::install_contract;
pub use invoke::invoke_contract;
pub use ttl::{bump_contract_code, bump_contract_instance};
