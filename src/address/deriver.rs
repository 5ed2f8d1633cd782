//! Public key to Ethereum address.

use super::eip55::checksum_with;
use super::types::{EthereumAddress, PublicKey, ADDRESS_LEN};
use crate::codec::bytes_to_hex;
use crate::error::OracleResult;
use crate::keccak::{HashVariant, Sponge};

/// Derives addresses with one reusable Keccak-256 sponge.
///
/// The sponge is reset for every hash, so a single deriver serves any number
/// of keys. It is not shared: a batch worker owns its own deriver.
#[derive(Debug, Clone)]
pub struct AddressDeriver {
    sponge: Sponge,
}

impl AddressDeriver {
    /// Create a deriver with a fresh Keccak-256 sponge.
    pub fn new() -> Self {
        Self {
            sponge: Sponge::new(HashVariant::KECCAK_256),
        }
    }

    /// Derive the checksummed address for `key`.
    ///
    /// Keccak-256 of the 64 key bytes; the last 20 bytes of that digest are
    /// the address, whose lowercase hex is then cased by EIP-55.
    pub fn derive(&mut self, key: &PublicKey) -> EthereumAddress {
        self.sponge.reset();
        self.sponge.absorb(key.as_bytes());
        let mut digest = [0u8; 32];
        self.sponge.squeeze(&mut digest);

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[32 - ADDRESS_LEN..]);

        let lower = bytes_to_hex(&bytes);
        let text = checksum_with(&mut self.sponge, lower.as_bytes());
        EthereumAddress::new(bytes, text)
    }

    /// Validate a raw key buffer and derive its address.
    pub fn derive_slice(&mut self, key: &[u8]) -> OracleResult<EthereumAddress> {
        let key = PublicKey::from_slice(key)?;
        Ok(self.derive(&key))
    }
}

impl Default for AddressDeriver {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the address of a raw 64-byte `X || Y` public key.
///
/// Fails with `E200_InvalidKeySize` for any other length.
pub fn derive_address(key: &[u8]) -> OracleResult<EthereumAddress> {
    AddressDeriver::new().derive_slice(key)
}
