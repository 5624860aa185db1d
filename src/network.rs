//! Module for interacting with an Ethereum node over JSON-RPC.

use crate::address::Address;
use crate::error::{Error, Result};
use crate::utils::unhex;
use bytes::Bytes;
use ethereum_types::H256;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// How often a pending transaction is polled for a receipt.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// A simple JSON-RPC client for an Ethereum node.
///
/// All calls are synchronous and block the calling thread until the node
/// responds.
#[derive(Clone, Debug)]
pub struct EthereumNode {
    /// JSON-RPC endpoint url.
    pub base_url: Url,
    client: Client,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    #[serde(default = "Option::default")]
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Network-confirmed record of a transaction's inclusion.
#[serde_with::serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the included transaction.
    #[serde(rename = "transactionHash")]
    pub transaction_hash: H256,
    /// Execution status: 1 for success, 0 when execution reverted.
    #[serde_as(as = "unhex::Quantity")]
    pub status: u64,
    /// Amount of gas consumed by this transaction.
    #[serde(rename = "gasUsed")]
    #[serde_as(as = "unhex::Quantity")]
    pub gas_used: u64,
    /// Deployed contract address, for plain deployment transactions.
    #[serde(rename = "contractAddress")]
    pub contract_address: Option<Address>,
    /// Emitted contract events.
    pub logs: Vec<LogEntry>,
}

/// Single emitted contract event, undecoded.
#[serde_with::serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// The address of the contract which produced the event.
    pub address: Address,
    /// Event topics; the first one identifies the event type.
    pub topics: Vec<H256>,
    /// Non-indexed event data.
    #[serde_as(as = "unhex::Hex")]
    pub data: Bytes,
}

pub fn infura_url(project_id: &str, network: &str) -> String {
    //! Compose the RPC endpoint for a public network served by Infura.
    format!("https://{network}.infura.io/v3/{project_id}")
}

fn parse_quantity(text: &str) -> Result<u64> {
    u64::from_str_radix(text.strip_prefix("0x").unwrap_or(text), 16)
        .map_err(|e| Error::Submission(format!("malformed quantity {text}: {e}")))
}

impl EthereumNode {
    pub fn connect(url: &str) -> Result<Self> {
        //! Create a client for the given endpoint.
        //!
        //! No request is made: a connection is established lazily on the
        //! first call.
        let base_url = url
            .parse()
            .map_err(|e| Error::Configuration(format!("invalid RPC url {url}: {e}")))?;
        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Option<R>> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };
        let response: RpcResponse<R> = self
            .client
            .post(self.base_url.clone())
            .json(&request)
            .send()
            .map_err(|e| Error::Submission(e.to_string()))?
            .json()
            .map_err(|e| Error::Submission(e.to_string()))?;
        if let Some(err) = response.error {
            return Err(Error::Submission(format!(
                "{} (code {})",
                err.message.strip_suffix('\n').unwrap_or(&err.message),
                err.code
            )));
        }
        Ok(response.result)
    }

    fn call_required<R: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<R> {
        self.call(method, params)?
            .ok_or_else(|| Error::Submission(format!("node returned no result for {method}")))
    }

    pub fn transaction_count(&self, address: Address) -> Result<u64> {
        //! Query the current transaction count (nonce) of an account.
        //!
        //! Always a fresh read: nonces must never be cached or reused.
        let raw: String =
            self.call_required("eth_getTransactionCount", serde_json::json!([address, "latest"]))?;
        parse_quantity(&raw)
    }

    pub fn send_raw_transaction(&self, raw: &Bytes) -> Result<H256> {
        //! Submit a signed raw transaction, returning its hash.
        let body: String = rustc_hex::ToHex::to_hex(raw.as_ref());
        debug!(bytes = raw.len(), "submitting raw transaction");
        self.call_required("eth_sendRawTransaction", serde_json::json!([format!("0x{body}")]))
    }

    pub fn transaction_receipt(&self, tx_hash: H256) -> Result<Option<Receipt>> {
        //! Retrieve the receipt of a transaction.
        //!
        //! Returns [`None`] while the transaction is not yet included.
        self.call("eth_getTransactionReceipt", serde_json::json!([tx_hash]))
    }

    pub fn wait_for_receipt(&self, tx_hash: H256, timeout: Duration) -> Result<Receipt> {
        //! Block until the transaction is included and return its receipt.
        //!
        //! Polls every [`RECEIPT_POLL_INTERVAL`]; gives up with
        //! [`Error::ReceiptTimeout`] once `timeout` has elapsed. The
        //! transaction is already submitted when this runs, so a node error
        //! mid-poll is retried until the deadline rather than reported as a
        //! submission failure: the nonce is consumed either way. The
        //! transaction may still be included after the timeout.
        let deadline = Instant::now() + timeout;
        loop {
            match self.transaction_receipt(tx_hash) {
                Ok(Some(receipt)) => {
                    debug!(?tx_hash, status = receipt.status, "receipt available");
                    return Ok(receipt);
                }
                Ok(None) => {}
                Err(e) => debug!(?tx_hash, error = %e, "receipt poll failed, retrying"),
            }
            if Instant::now() >= deadline {
                return Err(Error::ReceiptTimeout { tx_hash });
            }
            std::thread::sleep(RECEIPT_POLL_INTERVAL);
        }
    }
}
