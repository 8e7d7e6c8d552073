//! CLI JSON to `ScVal` argument conversion.
//!
//! Accepts the raw `--args` JSON string from the CLI and produces the typed
//! XDR values a contract invocation needs. Each argument is either a
//! typed-annotation envelope (`{"type": "...", "value": ...}`) or a bare
//! JSON value with inference rules:
//! - booleans map to `Bool`
//! - integers map to `I128`
//! - 56-character `G...`/`C...` strings map to `Address`
//! - other strings map to `Symbol`
//! - `null` maps to `Void`, arrays map to `Vec`
//!
//! Anything ambiguous (bytes, explicit widths, strings that look like
//! symbols) should be spelled with the envelope.

use crate::{DeployerError, Result};
use serde_json::Value as JsonValue;
use stellar_xdr::curr::{
    Hash, Int128Parts, ScAddress, ScBytes, ScString, ScSymbol, ScVal, ScVec, UInt128Parts,
};

/// Parse a raw JSON argument string (a JSON array) into `ScVal`s.
pub fn parse_args(args_json: &str) -> Result<Vec<ScVal>> {
    let value: JsonValue = serde_json::from_str(args_json)
        .map_err(|e| DeployerError::InvalidArguments(format!("invalid JSON in --args: {}", e)))?;
    let JsonValue::Array(items) = value else {
        return Err(
            DeployerError::InvalidArguments("--args must be a JSON array".to_string()).into(),
        );
    };
    items.iter().map(parse_value).collect()
}

/// Convert one JSON value to an `ScVal`.
pub fn parse_value(value: &JsonValue) -> Result<ScVal> {
    if let Some((type_name, inner)) = typed_annotation(value) {
        return typed(type_name, inner);
    }
    infer(value)
}

/// Parse a `G...` or `C...` strkey into an `ScAddress`.
pub fn parse_address(address: &str) -> Result<ScAddress> {
    if let Ok(account) = stellar_strkey::ed25519::PublicKey::from_string(address) {
        return Ok(ScAddress::Account(stellar_xdr::curr::AccountId(
            stellar_xdr::curr::PublicKey::PublicKeyTypeEd25519(stellar_xdr::curr::Uint256(
                account.0,
            )),
        )));
    }
    if let Ok(contract) = stellar_strkey::Contract::from_string(address) {
        return Ok(ScAddress::Contract(Hash(contract.0)));
    }
    Err(DeployerError::InvalidArguments(format!("'{}' is not a valid address", address)).into())
}

fn typed(type_name: &str, value: &JsonValue) -> Result<ScVal> {
    match type_name {
        "bool" => Ok(ScVal::Bool(expect_bool(type_name, value)?)),
        "u32" => Ok(ScVal::U32(expect_int(type_name, value)?.try_into().map_err(
            |_| DeployerError::InvalidArguments("u32 value out of range".to_string()),
        )?)),
        "i32" => Ok(ScVal::I32(expect_int(type_name, value)?.try_into().map_err(
            |_| DeployerError::InvalidArguments("i32 value out of range".to_string()),
        )?)),
        "u64" => Ok(ScVal::U64(expect_int(type_name, value)?.try_into().map_err(
            |_| DeployerError::InvalidArguments("u64 value out of range".to_string()),
        )?)),
        "i64" => Ok(ScVal::I64(expect_int(type_name, value)?)),
        "u128" => {
            let parsed: u128 = expect_wide_int(type_name, value)?.try_into().map_err(|_| {
                DeployerError::InvalidArguments("u128 value out of range".to_string())
            })?;
            Ok(ScVal::U128(UInt128Parts {
                hi: (parsed >> 64) as u64,
                lo: parsed as u64,
            }))
        }
        "i128" => {
            let parsed = expect_wide_int(type_name, value)?;
            Ok(i128_val(parsed))
        }
        "symbol" => {
            let s = expect_str(type_name, value)?;
            Ok(ScVal::Symbol(ScSymbol(s.try_into().map_err(|_| {
                DeployerError::InvalidArguments(format!("'{}' is not a valid symbol", s))
            })?)))
        }
        "string" => {
            let s = expect_str(type_name, value)?;
            Ok(ScVal::String(ScString(s.try_into().map_err(|_| {
                DeployerError::InvalidArguments("string value too long".to_string())
            })?)))
        }
        "bytes" => {
            let s = expect_str(type_name, value)?;
            let bytes = hex::decode(s).map_err(|_| {
                DeployerError::InvalidArguments("bytes value must be hex".to_string())
            })?;
            Ok(ScVal::Bytes(ScBytes(bytes.try_into()?)))
        }
        "address" => Ok(ScVal::Address(parse_address(expect_str(type_name, value)?)?)),
        "void" | "null" => Ok(ScVal::Void),
        "vec" => {
            let JsonValue::Array(items) = value else {
                return Err(DeployerError::InvalidArguments(
                    "vec value must be a JSON array".to_string(),
                )
                .into());
            };
            let vals = items.iter().map(parse_value).collect::<Result<Vec<_>>>()?;
            Ok(ScVal::Vec(Some(ScVec(vals.try_into()?))))
        }
        other => Err(DeployerError::InvalidArguments(format!(
            "unsupported argument type '{}'",
            other
        ))
        .into()),
    }
}

fn infer(value: &JsonValue) -> Result<ScVal> {
    match value {
        JsonValue::Null => Ok(ScVal::Void),
        JsonValue::Bool(b) => Ok(ScVal::Bool(*b)),
        JsonValue::Number(n) => {
            let parsed = n.as_i64().map(i128::from).ok_or_else(|| {
                DeployerError::InvalidArguments(format!(
                    "'{}' is not an integer; non-integral numbers are not supported",
                    n
                ))
            })?;
            Ok(i128_val(parsed))
        }
        JsonValue::String(s) => {
            if s.len() == 56 && (s.starts_with('G') || s.starts_with('C')) {
                return Ok(ScVal::Address(parse_address(s)?));
            }
            typed("symbol", value)
        }
        JsonValue::Array(_) => typed("vec", value),
        JsonValue::Object(_) => Err(DeployerError::InvalidArguments(
            "objects must use the {\"type\": ..., \"value\": ...} envelope".to_string(),
        )
        .into()),
    }
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn typed_annotation(value: &JsonValue) -> Option<(&str, &JsonValue)> {
    let obj = value.as_object()?;
    let type_name = obj.get("type")?.as_str()?;
    let inner = obj.get("value")?;
    Some((type_name, inner))
}

fn i128_val(value: i128) -> ScVal {
    ScVal::I128(Int128Parts {
        hi: (value >> 64) as i64,
        lo: value as u64,
    })
}

fn expect_bool(type_name: &str, value: &JsonValue) -> Result<bool> {
    value.as_bool().ok_or_else(|| type_mismatch(type_name, value))
}

fn expect_int(type_name: &str, value: &JsonValue) -> Result<i64> {
    value.as_i64().ok_or_else(|| type_mismatch(type_name, value))
}

/// 128-bit values do not fit in a JSON number, so they are also accepted as
/// decimal strings.
fn expect_wide_int(type_name: &str, value: &JsonValue) -> Result<i128> {
    if let Some(n) = value.as_i64() {
        return Ok(i128::from(n));
    }
    if let Some(n) = value.as_u64() {
        return Ok(i128::from(n));
    }
    if let Some(s) = value.as_str() {
        return s
            .parse::<i128>()
            .map_err(|_| type_mismatch(type_name, value));
    }
    Err(type_mismatch(type_name, value))
}

fn expect_str<'a>(type_name: &str, value: &'a JsonValue) -> Result<&'a str> {
    value.as_str().ok_or_else(|| type_mismatch(type_name, value))
}

fn type_mismatch(type_name: &str, value: &JsonValue) -> anyhow::Error {
    DeployerError::InvalidArguments(format!(
        "argument of type '{}' got incompatible value {}",
        type_name, value
    ))
    .into()
}

// ── tests ─────────────────────────────────────────────────────────────────────
