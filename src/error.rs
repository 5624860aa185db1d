//! Error types for this crate.
//!
//! Every failure is typed by the phase it belongs to, so callers can tell
//! a local problem (bad configuration, bad key) from a chain-side one and
//! decide whether retrying with a fresh nonce makes sense.

use ethereum_types::H256;

/// Custom result type with [`enum@Error`] error variant.
pub type Result<T> = std::result::Result<T, Error>;

/// Any error raised by this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Configuration source is missing a required value or holds a
    /// malformed one.
    Configuration(String),
    /// The supplied private key cannot be decoded into a valid key.
    KeyDerivation(secp256k1::Error),
    /// The node could not be reached or rejected the request before
    /// inclusion. The nonce is not consumed; retrying is safe.
    Submission(String),
    /// The transaction was included but reverted on-chain. The nonce is
    /// consumed; resubmitting the same transaction will not succeed.
    ChainExecution {
        /// Hash of the reverted transaction.
        tx_hash: H256,
    },
    /// No receipt appeared within the configured wait. The transaction may
    /// still be included later.
    ReceiptTimeout {
        /// Hash of the pending transaction.
        tx_hash: H256,
    },
    /// A receipt log could not be decoded against the loaded ABI.
    EventDecoding(String),
    /// The operation is a recognized part of the interface that has no
    /// implementation yet.
    NotImplemented(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(message) => write!(f, "Configuration error: {message}"),
            Self::KeyDerivation(source) => write!(f, "Cannot decode private key: {source}"),
            Self::Submission(message) => write!(f, "Submission failed: {message}"),
            Self::ChainExecution { tx_hash } => {
                write!(f, "Transaction {tx_hash:#x} was included but reverted on-chain")
            }
            Self::ReceiptTimeout { tx_hash } => {
                write!(f, "No receipt for transaction {tx_hash:#x} within the timeout")
            }
            Self::EventDecoding(message) => write!(f, "Cannot decode event: {message}"),
            Self::NotImplemented(what) => write!(f, "Not implemented: {what}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::KeyDerivation(source) => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_names_the_phase() {
        let err = Error::Configuration("key GAS_PRICE not found".to_string());
        assert!(err.to_string().starts_with("Configuration error"));
        let err = Error::ChainExecution {
            tx_hash: H256::repeat_byte(0xab),
        };
        assert!(err.to_string().contains("reverted"));
        let err = Error::NotImplemented("data asset download");
        assert!(err.to_string().contains("data asset download"));
    }
}
