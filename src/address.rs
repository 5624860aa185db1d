//! Ethereum account addresses and their derivation from secp256k1 keys.

use crate::error::{Error, Result};
use crate::utils::keccak;
use ethereum_types::H160 as WrappedAddress;
use open_fastrlp::Encodable;
pub use secp256k1::{PublicKey, SecretKey as PrivateKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    ops::{Deref, DerefMut},
    str::FromStr,
};

/// Ethereum address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address(WrappedAddress);

impl DerefMut for Address {
    fn deref_mut(&mut self) -> &mut WrappedAddress {
        &mut self.0
    }
}
impl Deref for Address {
    type Target = WrappedAddress;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl Encodable for Address {
    fn encode(&self, out: &mut dyn open_fastrlp::BufMut) {
        // Transaction fields encode addresses as fixed 20-byte strings,
        // never left-stripped.
        self.0.encode(out)
    }
}
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        WrappedAddress::deserialize(deserializer).map(Self)
    }
}
impl FromStr for Address {
    type Err = rustc_hex::FromHexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let body = s.strip_prefix("0x").unwrap_or(s);
        Ok(Self(WrappedAddress::from_str(body)?))
    }
}
impl<T: Into<WrappedAddress>> From<T> for Address {
    fn from(s: T) -> Self {
        Self(s.into())
    }
}
impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Address {
    /// Size of underlying array in bytes.
    pub const WIDTH: usize = 20;

    pub fn to_hex(&self) -> String {
        //! Encode as a lowercase hex string with `0x` prefix.
        let body: String = rustc_hex::ToHex::to_hex(self.0.as_bytes());
        format!("0x{body}")
    }

    pub fn to_checksum_address(&self) -> String {
        //! Create an EIP-55 checksum address.
        let body = self.to_hex();
        let hash = keccak(&body[2..42]);

        "0x".chars()
            .chain(
                body.chars()
                    .skip(2)
                    .zip(itertools::interleave(
                        hash.iter().map(|x| x >> 4),
                        hash.iter().map(|x| x & 15),
                    ))
                    .map(|(ch, h)| if h >= 8 { ch.to_ascii_uppercase() } else { ch }),
            )
            .collect()
    }
}

/// A trait for objects that can produce an on-chain account address.
pub trait AddressConvertible {
    /// Derive the account address.
    fn address(&self) -> Address;
}

impl AddressConvertible for secp256k1::PublicKey {
    fn address(&self) -> Address {
        //! Derive the address from a public key.
        // Skip the 0x04 marker byte of the uncompressed encoding.
        let hash = keccak(&self.serialize_uncompressed()[1..]);
        // Last 20 bytes of the 32-byte hash.
        let suffix: [u8; 20] = hash[12..32].try_into().expect("Preset slice length");
        Address(WrappedAddress::from_slice(&suffix))
    }
}

impl AddressConvertible for PrivateKey {
    fn address(&self) -> Address {
        //! Derive the address of the account controlled by this key.
        //!
        //! Deterministic: the same key always yields the same address.
        let secp = secp256k1::Secp256k1::signing_only();
        PublicKey::from_secret_key(&secp, self).address()
    }
}

pub fn decode_private_key(source: &str) -> Result<PrivateKey> {
    //! Parse a hex-encoded private key, with or without a `0x` prefix.
    let body = source.strip_prefix("0x").unwrap_or(source);
    PrivateKey::from_str(body).map_err(Error::KeyDerivation)
}
