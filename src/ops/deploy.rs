//! Deterministic contract creation from installed bytecode.
//!
//! Contract IDs are derived off-chain before submission: SHA-256 over the
//! XDR of a `HashIdPreimage::ContractId` built from the network ID, the
//! deployer address and a random salt. The network derives the same ID when
//! the `CreateContract` host function runs, so the book can record the
//! address up front.

use crate::address_book::AddressBook;
use crate::config::Config;
use crate::keys::Keypair;
use crate::rpc::Client;
use crate::{tx, Result};
use rand::Rng;
use sha2::{Digest, Sha256};
use stellar_xdr::curr::{
    ContractExecutable, ContractIdPreimage, ContractIdPreimageFromAddress, CreateContractArgs,
    Hash, HashIdPreimage, HashIdPreimageContractId, HostFunction, InvokeHostFunctionOp, Limits,
    Operation, OperationBody, ScAddress, Uint256, VecM, WriteXdr,
};
use tracing::info;

/// Preimage for a contract deployed by `address` with `salt`.
pub fn address_preimage(address: ScAddress, salt: [u8; 32]) -> ContractIdPreimage {
    ContractIdPreimage::Address(ContractIdPreimageFromAddress {
        address,
        salt: Uint256(salt),
    })
}

/// Derive the `C...` contract ID `preimage` will produce on `network_id`.
pub fn derive_contract_id(network_id: &[u8; 32], preimage: &ContractIdPreimage) -> Result<String> {
    let hash_preimage = HashIdPreimage::ContractId(HashIdPreimageContractId {
        network_id: Hash(*network_id),
        contract_id_preimage: preimage.clone(),
    });
    let digest: [u8; 32] = Sha256::digest(hash_preimage.to_xdr(Limits::none())?).into();
    Ok(stellar_strkey::Contract(digest).to_string())
}

fn create_contract_op(preimage: ContractIdPreimage, wasm_hash: [u8; 32]) -> Operation {
    Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::CreateContract(CreateContractArgs {
                contract_id_preimage: preimage,
                executable: ContractExecutable::Wasm(Hash(wasm_hash)),
            }),
            auth: VecM::default(),
        }),
    }
}

/// Create the contract instance for `contract_key` from the bytecode
/// recorded under `wasm_key`, recording the new ID in the book first.
#[tracing::instrument(skip_all, fields(key = contract_key))]
pub async fn deploy_contract(
    rpc: &Client,
    config: &Config,
    book: &mut AddressBook,
    source: &Keypair,
    contract_key: &str,
    wasm_key: &str,
) -> Result<String> {
    let salt: [u8; 32] = rand::thread_rng().gen();
    let preimage = address_preimage(source.sc_address(), salt);
    let contract_id = derive_contract_id(&config.network_id(), &preimage)?;
    info!(wasm = wasm_key, id = %contract_id, "deploying contract");

    book.set_contract_id(contract_key, &contract_id);
    let wasm_hash = book.wasm_hash(wasm_key)?;
    book.save()?;

    tx::submit_operation(rpc, config, source, create_contract_op(preimage, wasm_hash)).await?;
    Ok(contract_id)
}

/// Create a fresh token contract instance and return its ID without touching
/// the book.
#[tracing::instrument(skip_all, fields(wasm = wasm_key))]
pub async fn deploy_token(
    rpc: &Client,
    config: &Config,
    book: &AddressBook,
    source: &Keypair,
    wasm_key: &str,
) -> Result<String> {
    let salt: [u8; 32] = rand::thread_rng().gen();
    let preimage = address_preimage(source.sc_address(), salt);
    let contract_id = derive_contract_id(&config.network_id(), &preimage)?;
    let wasm_hash = book.wasm_hash(wasm_key)?;
    info!(id = %contract_id, "deploying token contract");

    tx::submit_operation(rpc, config, source, create_contract_op(preimage, wasm_hash)).await?;
    Ok(contract_id)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Keypair;

    #[test]
    fn derivation_is_deterministic() {
        let deployer = Keypair::random();
        let network_id = [1u8; 32];
        let preimage = address_preimage(deployer.sc_address(), [2u8; 32]);

        let a = derive_contract_id(&network_id, &preimage).unwrap();
        let b = derive_contract_id(&network_id, &preimage).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with('C'));
        assert_eq!(a.len(), 56);
    }

    #[test]
    fn derivation_commits_to_salt_and_network() {
        let deployer = Keypair::random();
        let network_id = [1u8; 32];

        let with_salt_a = address_preimage(deployer.sc_address(), [2u8; 32]);
        let with_salt_b = address_preimage(deployer.sc_address(), [3u8; 32]);
        assert_ne!(
            derive_contract_id(&network_id, &with_salt_a).unwrap(),
            derive_contract_id(&network_id, &with_salt_b).unwrap()
        );

        assert_ne!(
            derive_contract_id(&[1u8; 32], &with_salt_a).unwrap(),
            derive_contract_id(&[4u8; 32], &with_salt_a).unwrap()
        );
    }

    #[test]
    fn derivation_commits_to_deployer() {
        let network_id = [1u8; 32];
        let salt = [2u8; 32];
        let a = address_preimage(Keypair::random().sc_address(), salt);
        let b = address_preimage(Keypair::random().sc_address(), salt);
        assert_ne!(
            derive_contract_id(&network_id, &a).unwrap(),
            derive_contract_id(&network_id, &b).unwrap()
        );
    }

    #[test]
    fn derived_id_round_trips_through_strkey() {
        let preimage = address_preimage(Keypair::random().sc_address(), [0u8; 32]);
        let id = derive_contract_id(&[0u8; 32], &preimage).unwrap();
        assert!(stellar_strkey::Contract::from_string(&id).is_ok());
    }
}
