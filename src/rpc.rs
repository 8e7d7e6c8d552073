//! Thin JSON-RPC client for a Soroban RPC endpoint.
//!
//! Only the handful of methods the deployer needs: ledger entry lookup for
//! account sequences, transaction simulation, submission and status polling,
//! plus the friendbot HTTP endpoint for test-network funding. XDR payloads
//! travel base64-encoded in both directions; decoding happens at the caller
//! where the concrete type is known, except for the account-sequence helper
//! which owns its whole round trip.

use crate::{DeployerError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use stellar_xdr::curr::{
    AccountId, LedgerEntryData, LedgerKey, LedgerKeyAccount, Limits, ReadXdr, WriteXdr,
};
use tracing::debug;

pub struct Client {
    http: reqwest::Client,
    rpc_url: String,
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestLedger {
    pub id: String,
    pub protocol_version: u32,
    pub sequence: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntries {
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    pub latest_ledger: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub key: String,
    pub xdr: String,
    pub last_modified_ledger_seq: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub transaction_data: Option<String>,
    pub min_resource_fee: Option<String>,
    #[serde(default)]
    pub results: Vec<SimulateResult>,
    pub latest_ledger: Option<u32>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResult {
    #[serde(default)]
    pub auth: Vec<String>,
    pub xdr: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub status: String,
    pub hash: String,
    pub error_result_xdr: Option<String>,
    pub latest_ledger: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionResponse {
    pub status: String,
    pub result_xdr: Option<String>,
    pub result_meta_xdr: Option<String>,
    pub ledger: Option<u32>,
}

impl Client {
    pub fn new(rpc_url: &str) -> Self {
        Client {
            http: reqwest::Client::new(),
            rpc_url: rpc_url.to_string(),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        debug!(method, "rpc request");
        let response: JsonRpcResponse<T> = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if let Some(err) = response.error {
            return Err(DeployerError::Rpc(format!(
                "{} failed: {} (code {})",
                method, err.message, err.code
            ))
            .into());
        }
        response
            .result
            .ok_or_else(|| DeployerError::Rpc(format!("{} returned no result", method)).into())
    }

    pub async fn get_latest_ledger(&self) -> Result<LatestLedger> {
        self.call("getLatestLedger", json!({})).await
    }

    pub async fn get_ledger_entries(&self, keys: &[String]) -> Result<LedgerEntries> {
        self.call("getLedgerEntries", json!({ "keys": keys })).await
    }

    /// Current sequence number of `account`.
    pub async fn account_sequence(&self, account: &AccountId) -> Result<i64> {
        let key = LedgerKey::Account(LedgerKeyAccount {
            account_id: account.clone(),
        });
        let encoded = key.to_xdr_base64(Limits::none())?;
        let response = self.get_ledger_entries(&[encoded]).await?;
        let entry = response.entries.first().ok_or_else(|| {
            DeployerError::Rpc("account not found on this network; fund it first".to_string())
        })?;
        match LedgerEntryData::from_xdr_base64(&entry.xdr, Limits::none())? {
            LedgerEntryData::Account(account) => Ok(account.seq_num.0),
            other => Err(DeployerError::Rpc(format!(
                "expected an account entry, got {:?}",
                other.discriminant()
            ))
            .into()),
        }
    }

    /// Simulate a base64-encoded transaction envelope.
    pub async fn simulate_transaction(&self, envelope: &str) -> Result<SimulateResponse> {
        self.call("simulateTransaction", json!({ "transaction": envelope }))
            .await
    }

    /// Submit a signed, base64-encoded transaction envelope.
    pub async fn send_transaction(&self, envelope: &str) -> Result<SendResponse> {
        self.call("sendTransaction", json!({ "transaction": envelope }))
            .await
    }

    /// Look up a previously submitted transaction by its hex hash.
    pub async fn get_transaction(&self, hash: &str) -> Result<GetTransactionResponse> {
        self.call("getTransaction", json!({ "hash": hash })).await
    }

    /// Ask friendbot to create and fund `account`.
    ///
    /// Friendbot answers with a client error when the account already
    /// exists; that surfaces here as an `Err` the airdrop operation treats
    /// as benign.
    pub async fn fund_account(&self, friendbot_url: &str, account: &str) -> Result<()> {
        debug!(account, "friendbot request");
        self.http
            .get(friendbot_url)
            .query(&[("addr", account)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
