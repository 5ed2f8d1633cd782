//! Ethereum address derivation.
//!
//! A 64-byte uncompressed public key (`X || Y`, no `0x04` prefix) is hashed
//! with legacy Keccak-256; the trailing 20 bytes of the digest form the
//! address, rendered as `0x` plus 40 hex characters in EIP-55 checksum case.

mod deriver;
mod eip55;
mod types;

pub use deriver::{derive_address, AddressDeriver};
pub use eip55::{is_checksum_valid, to_checksum_address, ADDRESS_HEX_LEN};
pub use types::{EthereumAddress, PublicKey, ADDRESS_LEN, PUBLIC_KEY_LEN};
