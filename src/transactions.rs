//! Legacy Ethereum transactions: RLP encoding and local signing.
//!
//! The signing payload follows EIP-155: the chain id and two zero
//! placeholders are appended to the six transaction fields, and the
//! resulting recovery byte is `chain_id * 2 + 35 + recovery_id`. The
//! private key is only ever used to produce the signature; it is never
//! part of any encoded payload.

use crate::address::{Address, AddressConvertible, PrivateKey};
use crate::utils::keccak;
use bytes::Bytes;
use ethereum_types::U256;
use open_fastrlp::{Encodable, Header};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, Secp256k1};

/// Represents a single Ethereum legacy transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Per-account transaction counter, read fresh from the chain.
    pub nonce: u64,
    /// Price paid per gas unit, in wei.
    pub gas_price: U256,
    /// Maximal amount of gas to spend for this transaction.
    pub gas: u64,
    /// Recipient; `None` deploys a contract.
    pub to: Option<Address>,
    /// Amount of funds to transfer, in wei.
    pub value: U256,
    /// ABI-encoded call data or contract code.
    pub data: Bytes,
    /// Chain the transaction is bound to (EIP-155 replay protection).
    pub chain_id: u64,
    /// Signature. Set to None before signing.
    pub signature: Option<Signature>,
}

/// A recoverable ECDSA signature in transaction-field form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Recovery byte, offset by the chain id.
    pub v: u64,
    /// First half of the compact signature.
    pub r: U256,
    /// Second half of the compact signature.
    pub s: U256,
}

fn wrap_list(payload: Vec<u8>) -> Vec<u8> {
    let mut out = vec![];
    Header {
        list: true,
        payload_length: payload.len(),
    }
    .encode(&mut out);
    out.extend_from_slice(&payload);
    out
}

impl Transaction {
    fn encode_body(&self, out: &mut dyn open_fastrlp::BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas.encode(out);
        if let Some(address) = self.to.as_ref() {
            address.encode(out)
        } else {
            Bytes::new().encode(out);
        }
        self.value.encode(out);
        self.data.encode(out);
    }

    pub fn signing_payload(&self) -> Vec<u8> {
        //! RLP payload that gets hashed and signed.
        let mut body = vec![];
        self.encode_body(&mut body);
        self.chain_id.encode(&mut body);
        0u8.encode(&mut body);
        0u8.encode(&mut body);
        wrap_list(body)
    }

    pub fn get_signing_hash(&self) -> [u8; 32] {
        //! Compute the keccak-256 hash the signature commits to.
        keccak(self.signing_payload())
    }

    #[must_use]
    pub fn sign(mut self, private_key: &PrivateKey) -> Self {
        //! Sign the transaction locally and return the signed copy.
        let signature = Self::sign_hash(self.get_signing_hash(), private_key, self.chain_id);
        self.signature = Some(signature);
        self
    }

    pub fn sign_hash(hash: [u8; 32], private_key: &PrivateKey, chain_id: u64) -> Signature {
        //! Sign a 32-byte hash, producing transaction-field components.
        let secp = Secp256k1::signing_only();
        let message = Message::from_slice(&hash).expect("Preset slice length");
        let (recovery_id, compact) = secp
            .sign_ecdsa_recoverable(&message, private_key)
            .serialize_compact();
        Signature {
            v: chain_id * 2 + 35 + recovery_id.to_i32() as u64,
            r: U256::from_big_endian(&compact[..32]),
            s: U256::from_big_endian(&compact[32..]),
        }
    }

    pub fn to_broadcastable_bytes(&self) -> Result<Bytes, secp256k1::Error> {
        //! Encode the signed transaction for `eth_sendRawTransaction`.
        //!
        //! Fails for unsigned transactions.
        let signature = self
            .signature
            .as_ref()
            .ok_or(secp256k1::Error::IncorrectSignature)?;
        let mut body = vec![];
        self.encode_body(&mut body);
        signature.v.encode(&mut body);
        signature.r.encode(&mut body);
        signature.s.encode(&mut body);
        Ok(wrap_list(body).into())
    }

    pub fn origin(&self) -> Result<Address, secp256k1::Error> {
        //! Recover the signer's address from the signature.
        let signature = self
            .signature
            .as_ref()
            .ok_or(secp256k1::Error::IncorrectSignature)?;
        let recovery_id = signature
            .v
            .checked_sub(self.chain_id * 2 + 35)
            .ok_or(secp256k1::Error::InvalidRecoveryId)?;
        let recovery_id = RecoveryId::from_i32(recovery_id as i32)?;
        let mut compact = [0u8; 64];
        signature.r.to_big_endian(&mut compact[..32]);
        signature.s.to_big_endian(&mut compact[32..]);
        let recoverable = RecoverableSignature::from_compact(&compact, recovery_id)?;
        let message =
            Message::from_slice(&self.get_signing_hash()).expect("Preset slice length");
        let public_key = Secp256k1::new().recover_ecdsa(&message, &recoverable)?;
        Ok(public_key.address())
    }

    pub fn has_valid_signature(&self) -> bool {
        //! Check that the signature is present and recoverable.
        self.origin().is_ok()
    }
}
