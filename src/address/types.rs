//! Address pipeline types: PublicKey, EthereumAddress.

use crate::codec::{bytes_to_hex, hex_to_bytes, strip_hex_prefix};
use crate::error::{ErrorCode, OracleResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Length of an uncompressed secp256k1 public key without its 0x04 prefix.
pub const PUBLIC_KEY_LEN: usize = 64;

/// Length of a raw Ethereum address.
pub const ADDRESS_LEN: usize = 20;

/// An uncompressed public key as `X || Y`, 32 bytes each, no prefix byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Validate a raw key buffer.
    ///
    /// Anything other than exactly 64 bytes, including the 65-byte
    /// `0x04`-prefixed SEC1 form, fails with `E200_InvalidKeySize`.
    pub fn from_slice(bytes: &[u8]) -> OracleResult<Self> {
        let arr: [u8; PUBLIC_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| ErrorCode::E200_InvalidKeySize(bytes.len() as u64))?;
        Ok(Self(arr))
    }

    /// Parse 128 hex characters, case-insensitive, `0x` tolerated.
    pub fn from_hex(text: &str) -> OracleResult<Self> {
        let bytes = hex_to_bytes(strip_hex_prefix(text))?;
        Self::from_slice(&bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Lowercase hex, no prefix.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }
}

impl From<[u8; PUBLIC_KEY_LEN]> for PublicKey {
    fn from(arr: [u8; PUBLIC_KEY_LEN]) -> Self {
        PublicKey(arr)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = ErrorCode;

    fn try_from(bytes: &[u8]) -> OracleResult<Self> {
        Self::from_slice(bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A derived Ethereum address: the raw 20 bytes plus the EIP-55 text form.
///
/// Only the address deriver builds these, so the text always matches the
/// bytes and carries the correct checksum casing.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EthereumAddress {
    bytes: [u8; ADDRESS_LEN],
    checksummed: String,
}

impl EthereumAddress {
    pub(crate) fn new(bytes: [u8; ADDRESS_LEN], checksummed: String) -> Self {
        Self { bytes, checksummed }
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.bytes
    }

    /// 42-character `0x`-prefixed EIP-55 form.
    pub fn as_str(&self) -> &str {
        &self.checksummed
    }

    /// `0x`-prefixed all-lowercase form.
    pub fn to_lowercase_hex(&self) -> String {
        format!("0x{}", bytes_to_hex(&self.bytes))
    }
}

impl fmt::Display for EthereumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksummed)
    }
}

impl fmt::Debug for EthereumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthereumAddress({})", self.checksummed)
    }
}

impl Serialize for EthereumAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.checksummed)
    }
}
