//! TTL extension for contract instance and code ledger entries.
//!
//! Both bumps build the footprint by hand: a single read-only ledger key
//! (the contract instance, or the uploaded code by hash) with zeroed
//! resources, then an `ExtendFootprintTtl` operation. Simulation prices the
//! transaction but does not replace the footprint.

use crate::address_book::AddressBook;
use crate::config::Config;
use crate::keys::Keypair;
use crate::rpc::Client;
use crate::{scval, tx, Result};
use stellar_xdr::curr::{
    ContractDataDurability, ExtendFootprintTtlOp, ExtensionPoint, Hash, LedgerFootprint,
    LedgerKey, LedgerKeyContractCode, LedgerKeyContractData, Operation, OperationBody, ScVal,
    SorobanResources, SorobanTransactionData, TransactionExt, VecM,
};
use tracing::info;

/// One year of ledgers at the 5 second close cadence.
const EXTEND_TO_LEDGERS: u32 = 535_670;

fn extend_op() -> Operation {
    Operation {
        source_account: None,
        body: OperationBody::ExtendFootprintTtl(ExtendFootprintTtlOp {
            ext: ExtensionPoint::V0,
            extend_to: EXTEND_TO_LEDGERS,
        }),
    }
}

fn ttl_transaction_data(key: LedgerKey) -> Result<SorobanTransactionData> {
    Ok(SorobanTransactionData {
        ext: ExtensionPoint::V0,
        resources: SorobanResources {
            footprint: LedgerFootprint {
                read_only: vec![key].try_into()?,
                read_write: VecM::default(),
            },
            instructions: 0,
            read_bytes: 0,
            write_bytes: 0,
        },
        resource_fee: 0,
    })
}

async fn bump(
    rpc: &Client,
    config: &Config,
    source: &Keypair,
    key: LedgerKey,
) -> Result<()> {
    let seq = rpc.account_sequence(&source.account_id()).await?;
    let mut tx = tx::build_transaction(source, seq, extend_op())?;
    tx.ext = TransactionExt::V1(ttl_transaction_data(key)?);
    tx::submit_transaction(rpc, config, source, tx).await?;
    Ok(())
}

/// Extend the TTL of the contract instance recorded under `contract_key`.
#[tracing::instrument(skip_all, fields(key = contract_key))]
pub async fn bump_contract_instance(
    rpc: &Client,
    config: &Config,
    book: &AddressBook,
    source: &Keypair,
    contract_key: &str,
) -> Result<()> {
    let contract_id = book.contract_id(contract_key)?;
    info!(id = contract_id, "bumping contract instance");
    let key = LedgerKey::ContractData(LedgerKeyContractData {
        contract: scval::parse_address(contract_id)?,
        key: ScVal::LedgerKeyContractInstance,
        durability: ContractDataDurability::Persistent,
    });
    bump(rpc, config, source, key).await
}

/// Extend the TTL of the uploaded code recorded under `wasm_key`.
#[tracing::instrument(skip_all, fields(key = wasm_key))]
pub async fn bump_contract_code(
    rpc: &Client,
    config: &Config,
    book: &AddressBook,
    source: &Keypair,
    wasm_key: &str,
) -> Result<()> {
    let wasm_hash = book.wasm_hash(wasm_key)?;
    info!(hash = %hex::encode(wasm_hash), "bumping contract code");
    let key = LedgerKey::ContractCode(LedgerKeyContractCode {
        hash: Hash(wasm_hash),
    });
    bump(rpc, config, source, key).await
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_op_targets_a_year_of_ledgers() {
        let op = extend_op();
        let OperationBody::ExtendFootprintTtl(body) = op.body else {
            panic!("expected extend footprint ttl");
        };
        assert_eq!(body.extend_to, 535_670);
    }

    #[test]
    fn footprint_is_read_only_with_zero_resources() {
        let key = LedgerKey::ContractCode(LedgerKeyContractCode { hash: Hash([1; 32]) });
        let data = ttl_transaction_data(key.clone()).unwrap();
        assert_eq!(data.resources.footprint.read_only.as_slice(), &[key]);
        assert!(data.resources.footprint.read_write.is_empty());
        assert_eq!(data.resources.instructions, 0);
        assert_eq!(data.resource_fee, 0);
    }
}
