//! The build/sign/submit/wait round trip behind every facade operation.

use crate::address::Address;
use crate::error::{Error, Result};
use crate::network::Receipt;
use crate::session::Context;
use crate::transactions::Transaction;
use bytes::Bytes;
use ethereum_types::{H256, U256};
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound on the receipt wait, per submission.
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

fn ensure_executed(receipt: Receipt) -> Result<(H256, Receipt)> {
    // Included-but-reverted is not submission failure: the nonce is consumed
    // and the transaction must not be resubmitted as-is.
    if receipt.status == 0 {
        Err(Error::ChainExecution {
            tx_hash: receipt.transaction_hash,
        })
    } else {
        Ok((receipt.transaction_hash, receipt))
    }
}

pub fn build_and_send(
    ctx: &Context,
    to: Address,
    data: Bytes,
    gas_limit: u64,
    value: U256,
) -> Result<(H256, Receipt)> {
    //! Assemble a transaction around the prepared call data, sign it
    //! locally, submit it and block until a receipt is available.
    //!
    //! On success the account's next nonce is irreversibly consumed; so it
    //! is on [`Error::ChainExecution`], which reports a transaction that was
    //! included but reverted.
    //!
    //! Nonce acquisition and submission are not atomic: concurrent calls on
    //! one context race on the nonce and must be serialized by the caller.
    //! This crate itself only ever issues sequential round trips.

    // Configuration first, so a missing or malformed GAS_PRICE surfaces
    // before any network call.
    let gas_price = ctx.gas_price()?;
    // Fresh read every time; a reused nonce is rejected on submission.
    let nonce = ctx.node.transaction_count(ctx.address)?;
    debug!(nonce, %gas_price, gas_limit, "assembled transaction descriptor");

    let tx = Transaction {
        nonce,
        gas_price,
        gas: gas_limit,
        to: Some(to),
        value,
        data,
        chain_id: ctx.chain_id,
        signature: None,
    }
    .sign(ctx.private_key());
    let raw = tx
        .to_broadcastable_bytes()
        .map_err(|e| Error::Submission(e.to_string()))?;

    let tx_hash = ctx.node.send_raw_transaction(&raw)?;
    info!(%tx_hash, "transaction submitted, waiting for receipt");
    let receipt = ctx.node.wait_for_receipt(tx_hash, RECEIPT_TIMEOUT)?;
    ensure_executed(receipt)
}
