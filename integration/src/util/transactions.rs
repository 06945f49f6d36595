//! Utilities for sending and waiting on transactions

use alloy::{
    contract::{CallBuilder, CallDecoder, Error as ContractError},
    network::Ethereum,
    rpc::types::TransactionReceipt,
    transports::TransportError,
};
use eyre::Result;
use scripts::utils::GovernorProvider;
use test_helpers::assert_eq_result;

/// The call builder type for the tests
pub type TestCallBuilder<'a, C> = CallBuilder<&'a GovernorProvider, C, Ethereum>;

// ----------------
// | Transactions |
// ----------------

/// Wait for a transaction receipt and ensure it was successful
pub async fn wait_for_tx_success<C: CallDecoder>(
    tx: TestCallBuilder<'_, C>,
) -> Result<TransactionReceipt> {
    let receipt = send_tx(tx).await?;
    assert_eq_result!(receipt.status(), true)?;
    Ok(receipt)
}

/// Send a transaction and wait for it to succeed or fail
pub async fn send_tx<C: CallDecoder>(tx: TestCallBuilder<'_, C>) -> Result<TransactionReceipt> {
    let pending_tx = match tx.send().await {
        Ok(pending_tx) => pending_tx,
        Err(ContractError::TransportError(TransportError::ErrorResp(err_payload))) => {
            let msg = err_payload.message;
            let data = err_payload.data.map(|d| d.to_string()).unwrap_or_default();
            eyre::bail!("pending tx error: {msg} (data = {data})");
        }
        Err(err) => eyre::bail!("pending tx error: {err:?}"),
    };

    let receipt = pending_tx.get_receipt().await?;
    Ok(receipt)
}

/// Send a call and return the result
pub async fn call_helper<C: CallDecoder + Unpin>(
    call: TestCallBuilder<'_, C>,
) -> Result<C::CallOutput> {
    let res = call.call().await?;
    Ok(res)
}
