//! Contract method invocation.

use crate::address_book::AddressBook;
use crate::config::Config;
use crate::keys::Keypair;
use crate::rpc::Client;
use crate::tx::TxOutcome;
use crate::{scval, tx, DeployerError, Result};
use stellar_xdr::curr::{
    HostFunction, InvokeContractArgs, InvokeHostFunctionOp, Operation, OperationBody, ScAddress,
    ScSymbol, ScVal, VecM,
};
use tracing::info;

/// Build an `InvokeContract` host function operation.
pub fn invoke_op(contract: ScAddress, method: &str, args: Vec<ScVal>) -> Result<Operation> {
    Ok(Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(InvokeContractArgs {
                contract_address: contract,
                function_name: ScSymbol(method.try_into().map_err(|_| {
                    DeployerError::InvalidArguments(format!(
                        "'{}' is not a valid method name",
                        method
                    ))
                })?),
                args: args.try_into()?,
            }),
            auth: VecM::default(),
        }),
    })
}

/// Invoke `method` on the contract recorded under `contract_key`.
#[tracing::instrument(skip_all, fields(key = contract_key, method = method))]
pub async fn invoke_contract(
    rpc: &Client,
    config: &Config,
    book: &AddressBook,
    source: &Keypair,
    contract_key: &str,
    method: &str,
    args: Vec<ScVal>,
) -> Result<TxOutcome> {
    let contract_id = book.contract_id(contract_key)?;
    info!(id = contract_id, "invoking contract");
    let op = invoke_op(scval::parse_address(contract_id)?, method, args)?;
    tx::submit_operation(rpc, config, source, op).await
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_carries_method_and_args() {
        let contract = ScAddress::Contract(stellar_xdr::curr::Hash([5; 32]));
        let op = invoke_op(contract, "initialize", vec![ScVal::U32(1), ScVal::Void]).unwrap();
        let OperationBody::InvokeHostFunction(body) = op.body else {
            panic!("expected invoke host function");
        };
        let HostFunction::InvokeContract(invoke) = body.host_function else {
            panic!("expected invoke contract");
        };
        assert_eq!(invoke.function_name.0.to_utf8_string_lossy(), "initialize");
        assert_eq!(invoke.args.len(), 2);
        assert!(body.auth.is_empty());
    }

    #[test]
    fn overlong_method_names_are_rejected() {
        let contract = ScAddress::Contract(stellar_xdr::curr::Hash([5; 32]));
        let long = "a".repeat(33);
        assert!(invoke_op(contract, &long, vec![]).is_err());
    }
}
