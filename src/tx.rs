//! Transaction assembly, signing and submission.
//!
//! The flow for every operation is the same: build a single-operation
//! transaction, let the RPC node simulate it to price Soroban resources,
//! fold the simulation back into the envelope, sign it and send it, then
//! poll until the network reports a terminal status. Operations that carry a
//! hand-built footprint (the TTL bumps) keep it; simulation then only
//! contributes the resource fee.

use crate::config::Config;
use crate::keys::Keypair;
use crate::rpc::{Client, SimulateResponse};
use crate::{DeployerError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use stellar_xdr::curr::{
    Hash, Limits, Memo, Operation, OperationBody, Preconditions, ReadXdr, SequenceNumber,
    SorobanAuthorizationEntry, SorobanTransactionData, TimeBounds, TimePoint, Transaction,
    TransactionEnvelope, TransactionExt, TransactionSignaturePayload,
    TransactionSignaturePayloadTaggedTransaction, TransactionV1Envelope, VecM, WriteXdr,
};
use tracing::{debug, info, warn};

/// Classic (non-resource) fee attached to every transaction, in stroops.
pub const BASE_FEE: u32 = 10_000;

/// Transactions stay valid for this long after being built.
const TX_TIMEOUT_SECS: u64 = 300;

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const POLL_ATTEMPTS: u32 = 30;

/// Outcome of a successfully applied transaction.
#[derive(Debug)]
pub struct TxOutcome {
    /// Hex-encoded transaction hash.
    pub hash: String,
    /// Base64 `TransactionResult`, when the node returned one.
    pub result_xdr: Option<String>,
}

/// Build an unsigned single-operation transaction for `source`.
///
/// `seq` is the account's current sequence number; the transaction consumes
/// `seq + 1`.
pub fn build_transaction(source: &Keypair, seq: i64, op: Operation) -> Result<Transaction> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| DeployerError::Transaction(format!("system clock error: {}", e)))?
        .as_secs();
    Ok(Transaction {
        source_account: source.muxed_account(),
        fee: BASE_FEE,
        seq_num: SequenceNumber(seq + 1),
        cond: Preconditions::Time(TimeBounds {
            min_time: TimePoint(0),
            max_time: TimePoint(now + TX_TIMEOUT_SECS),
        }),
        memo: Memo::None,
        operations: vec![op].try_into()?,
        ext: TransactionExt::V0,
    })
}

/// Fold a successful simulation into `tx`.
///
/// Sets the Soroban transaction data (unless the transaction already carries
/// its own), lifts the resource fee on top of the classic fee, and attaches
/// any authorization entries the simulation produced to the host function
/// operation.
pub fn apply_simulation(tx: &mut Transaction, sim: &SimulateResponse) -> Result<()> {
    let min_fee: u32 = sim
        .min_resource_fee
        .as_deref()
        .unwrap_or("0")
        .parse()
        .map_err(|_| {
            DeployerError::Simulation("minResourceFee is not a valid integer".to_string())
        })?;

    match &mut tx.ext {
        TransactionExt::V0 => {
            let data_b64 = sim.transaction_data.as_deref().ok_or_else(|| {
                DeployerError::Simulation("simulation returned no transaction data".to_string())
            })?;
            let mut data = SorobanTransactionData::from_xdr_base64(data_b64, Limits::none())?;
            data.resource_fee = i64::from(min_fee);
            tx.ext = TransactionExt::V1(data);
        }
        // Hand-built footprint (TTL bumps): keep it, just price it.
        TransactionExt::V1(data) => data.resource_fee = i64::from(min_fee),
    }
    tx.fee = tx.fee.saturating_add(min_fee);

    let auth = match sim.results.first() {
        Some(result) if !result.auth.is_empty() => result
            .auth
            .iter()
            .map(|entry| SorobanAuthorizationEntry::from_xdr_base64(entry, Limits::none()))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        _ => return Ok(()),
    };
    let mut operations = tx.operations.to_vec();
    if let Some(Operation {
        body: OperationBody::InvokeHostFunction(op),
        ..
    }) = operations.first_mut()
    {
        op.auth = auth.try_into()?;
    }
    tx.operations = operations.try_into()?;
    Ok(())
}

/// Hash and sign `tx` for `network_id`, producing a submittable envelope and
/// the transaction hash.
pub fn sign_transaction(
    tx: Transaction,
    network_id: &[u8; 32],
    source: &Keypair,
) -> Result<(TransactionEnvelope, Hash)> {
    let payload = TransactionSignaturePayload {
        network_id: Hash(*network_id),
        tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(tx.clone()),
    };
    let hash: [u8; 32] = Sha256::digest(payload.to_xdr(Limits::none())?).into();
    let signature = source.sign_decorated(&hash)?;
    let envelope = TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: vec![signature].try_into()?,
    });
    Ok((envelope, Hash(hash)))
}

/// Wrap `op` in a fresh transaction for `source` and drive it to completion.
pub async fn submit_operation(
    rpc: &Client,
    config: &Config,
    source: &Keypair,
    op: Operation,
) -> Result<TxOutcome> {
    let seq = rpc.account_sequence(&source.account_id()).await?;
    let tx = build_transaction(source, seq, op)?;
    submit_transaction(rpc, config, source, tx).await
}

/// Simulate, assemble, sign, send and poll an already-built transaction.
pub async fn submit_transaction(
    rpc: &Client,
    config: &Config,
    source: &Keypair,
    mut tx: Transaction,
) -> Result<TxOutcome> {
    let unsigned = TransactionEnvelope::Tx(TransactionV1Envelope {
        tx: tx.clone(),
        signatures: VecM::default(),
    });
    let sim = rpc
        .simulate_transaction(&unsigned.to_xdr_base64(Limits::none())?)
        .await?;
    if let Some(err) = &sim.error {
        return Err(DeployerError::Simulation(err.clone()).into());
    }
    apply_simulation(&mut tx, &sim)?;

    let (envelope, hash) = sign_transaction(tx, &config.network_id(), source)?;
    let hash_hex = hex::encode(hash.0);
    debug!(hash = %hash_hex, "transaction signed");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    spinner.set_message(format!("Submitting transaction {}...", hash_hex));
    spinner.enable_steady_tick(Duration::from_millis(100));

    // RAII guard: spinner is always cleared, even on early return.
    struct SpinnerGuard(ProgressBar);
    impl Drop for SpinnerGuard {
        fn drop(&mut self) {
            self.0.finish_and_clear();
        }
    }
    let _guard = SpinnerGuard(spinner);

    let send = rpc
        .send_transaction(&envelope.to_xdr_base64(Limits::none())?)
        .await?;
    match send.status.as_str() {
        "ERROR" => {
            return Err(DeployerError::Transaction(format!(
                "submission rejected: {}",
                send.error_result_xdr.as_deref().unwrap_or("no result xdr")
            ))
            .into());
        }
        "PENDING" | "DUPLICATE" => {}
        other => warn!(status = other, "unexpected send status, polling anyway"),
    }

    for _ in 0..POLL_ATTEMPTS {
        tokio::time::sleep(POLL_INTERVAL).await;
        let status = rpc.get_transaction(&hash_hex).await?;
        match status.status.as_str() {
            "SUCCESS" => {
                info!(hash = %hash_hex, ledger = ?status.ledger, "transaction applied");
                return Ok(TxOutcome {
                    hash: hash_hex,
                    result_xdr: status.result_xdr,
                });
            }
            "FAILED" => {
                return Err(DeployerError::Transaction(format!(
                    "transaction {} failed: {}",
                    hash_hex,
                    status.result_xdr.as_deref().unwrap_or("no result xdr")
                ))
                .into());
            }
            _ => continue,
        }
    }
    Err(DeployerError::Transaction(format!(
        "timed out waiting for transaction {}",
        hash_hex
    ))
    .into())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::SimulateResult;
    use stellar_xdr::curr::{
        ExtensionPoint, HostFunction, InvokeHostFunctionOp, LedgerFootprint, SorobanResources,
    };

    fn upload_op() -> Operation {
        Operation {
            source_account: None,
            body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
                host_function: HostFunction::UploadContractWasm(
                    b"\0asm\x01\x00\x00\x00".to_vec().try_into().unwrap(),
                ),
                auth: VecM::default(),
            }),
        }
    }

    fn soroban_data() -> SorobanTransactionData {
        SorobanTransactionData {
            ext: ExtensionPoint::V0,
            resources: SorobanResources {
                footprint: LedgerFootprint {
                    read_only: VecM::default(),
                    read_write: VecM::default(),
                },
                instructions: 1000,
                read_bytes: 200,
                write_bytes: 100,
            },
            resource_fee: 0,
        }
    }

    #[test]
    fn build_uses_next_sequence_and_base_fee() {
        let source = Keypair::random();
        let tx = build_transaction(&source, 41, upload_op()).unwrap();
        assert_eq!(tx.seq_num.0, 42);
        assert_eq!(tx.fee, BASE_FEE);
        assert_eq!(tx.operations.len(), 1);
        assert!(matches!(tx.ext, TransactionExt::V0));
        let Preconditions::Time(bounds) = &tx.cond else {
            panic!("expected time bounds");
        };
        assert_eq!(bounds.min_time.0, 0);
        assert!(bounds.max_time.0 > 0);
    }

    #[test]
    fn simulation_sets_soroban_data_and_lifts_fee() {
        let source = Keypair::random();
        let mut tx = build_transaction(&source, 0, upload_op()).unwrap();

        let sim = SimulateResponse {
            transaction_data: Some(soroban_data().to_xdr_base64(Limits::none()).unwrap()),
            min_resource_fee: Some("5000".to_string()),
            results: vec![SimulateResult::default()],
            ..Default::default()
        };
        apply_simulation(&mut tx, &sim).unwrap();

        assert_eq!(tx.fee, BASE_FEE + 5000);
        let TransactionExt::V1(data) = &tx.ext else {
            panic!("expected soroban data");
        };
        assert_eq!(data.resource_fee, 5000);
        assert_eq!(data.resources.instructions, 1000);
    }

    #[test]
    fn simulation_keeps_hand_built_footprint() {
        let source = Keypair::random();
        let mut tx = build_transaction(&source, 0, upload_op()).unwrap();
        let mut data = soroban_data();
        data.resources.instructions = 0;
        tx.ext = TransactionExt::V1(data);

        let sim = SimulateResponse {
            // Different data from the node; the transaction's own wins.
            transaction_data: Some(soroban_data().to_xdr_base64(Limits::none()).unwrap()),
            min_resource_fee: Some("77".to_string()),
            ..Default::default()
        };
        apply_simulation(&mut tx, &sim).unwrap();

        let TransactionExt::V1(data) = &tx.ext else {
            panic!("expected soroban data");
        };
        assert_eq!(data.resources.instructions, 0);
        assert_eq!(data.resource_fee, 77);
        assert_eq!(tx.fee, BASE_FEE + 77);
    }

    #[test]
    fn simulation_without_data_is_an_error() {
        let source = Keypair::random();
        let mut tx = build_transaction(&source, 0, upload_op()).unwrap();
        let sim = SimulateResponse::default();
        assert!(apply_simulation(&mut tx, &sim).is_err());
    }

    #[test]
    fn signing_produces_one_hinted_signature() {
        let source = Keypair::random();
        let tx = build_transaction(&source, 7, upload_op()).unwrap();
        let network_id = [9u8; 32];

        let (envelope, hash) = sign_transaction(tx.clone(), &network_id, &source).unwrap();
        let TransactionEnvelope::Tx(v1) = envelope else {
            panic!("expected v1 envelope");
        };
        assert_eq!(v1.signatures.len(), 1);
        assert_eq!(v1.tx, tx);

        // The hash commits to the network: a different passphrase, a
        // different hash.
        let (_, other_hash) = sign_transaction(tx, &[8u8; 32], &source).unwrap();
        assert_ne!(hash, other_hash);
    }
}
