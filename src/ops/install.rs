//! Upload compiled contract bytecode on-chain.

use crate::address_book::AddressBook;
use crate::config::Config;
use crate::keys::Keypair;
use crate::rpc::Client;
use crate::wasm::{self, ArtifactDir};
use crate::{tx, Result};
use stellar_xdr::curr::{HostFunction, InvokeHostFunctionOp, Operation, OperationBody, VecM};
use tracing::info;

/// Read the artifact for `wasm_key`, record its hash in the book and upload
/// the bytecode with an `UploadContractWasm` host function.
///
/// The hash is written to the book before submission; a failed upload leaves
/// it recorded and a re-run uploads the same bytes again (uploads are
/// idempotent on-chain).
#[tracing::instrument(skip_all, fields(key = wasm_key))]
pub async fn install_contract(
    rpc: &Client,
    config: &Config,
    book: &mut AddressBook,
    artifacts: &ArtifactDir,
    source: &Keypair,
    wasm_key: &str,
) -> Result<()> {
    let bytes = artifacts.read(wasm_key)?;
    let hash = wasm::wasm_hash(&bytes);
    info!(hash = %hex::encode(hash), size = bytes.len(), "installing contract code");

    book.set_wasm_hash(wasm_key, &hash);
    book.save()?;

    let op = Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::UploadContractWasm(bytes.try_into()?),
            auth: VecM::default(),
        }),
    };
    tx::submit_operation(rpc, config, source, op).await?;
    Ok(())
}
