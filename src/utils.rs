use tiny_keccak::{Hasher, Keccak};

pub fn keccak<S: AsRef<[u8]>>(bytes: S) -> [u8; 32] {
    //! Compute a keccak-256 hash with a 32-byte digest.
    let mut hasher = Keccak::v256();
    hasher.update(bytes.as_ref());
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Serde adapters for the `0x`-prefixed hex encodings used by the
/// Ethereum JSON-RPC API.
pub(crate) mod unhex {
    use bytes::Bytes;
    use rustc_hex::{FromHex, ToHex};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_with::{DeserializeAs, SerializeAs};

    fn strip(source: &str) -> &str {
        source.strip_prefix("0x").unwrap_or(source)
    }

    /// Variable-length byte strings: `"0x60606040"`, `"0x"` for empty.
    pub struct Hex;

    impl SerializeAs<Bytes> for Hex {
        fn serialize_as<S: Serializer>(source: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
            let body: String = source.as_ref().to_hex();
            serializer.serialize_str(&format!("0x{body}"))
        }
    }

    impl<'de> DeserializeAs<'de, Bytes> for Hex {
        fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
            let text = String::deserialize(deserializer)?;
            let raw: Vec<u8> = strip(&text).from_hex().map_err(serde::de::Error::custom)?;
            Ok(raw.into())
        }
    }

    /// Numeric quantities in minimal hex form: `"0x0"`, `"0x4e1f"`.
    pub struct Quantity;

    impl SerializeAs<u64> for Quantity {
        fn serialize_as<S: Serializer>(source: &u64, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&format!("0x{source:x}"))
        }
    }

    impl<'de> DeserializeAs<'de, u64> for Quantity {
        fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
            let text = String::deserialize(deserializer)?;
            u64::from_str_radix(strip(&text), 16).map_err(serde::de::Error::custom)
        }
    }
}
