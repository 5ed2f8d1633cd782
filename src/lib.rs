//! Keccak Oracle - Keccak-f[1600], the SHA3/SHAKE family, and Ethereum
//! address derivation.
//!
//! # Architecture
//!
//! - [`keccak`] - the permutation, the sponge, and the named hash variants
//! - [`codec`] - hex encoding at the textual edges
//! - [`address`] - public key to EIP-55 checksummed address
//! - [`batch`] - parallel address derivation over a scoped worker pool
//! - [`conformance`] - vector corpus runner and differential testing
//! - [`error`] - numbered error codes
//!
//! Legacy Keccak-256 (padding byte 0x01) and SHA3-256 (0x06) share rate and
//! digest size but never produce the same digest; Ethereum uses the former.
//!
//! ```
//! use keccak_oracle::{derive_address, keccak256, sha3_256};
//!
//! assert_ne!(keccak256(b""), sha3_256(b""));
//! assert!(derive_address(&[0u8; 63]).is_err());
//! ```

// Library code must avoid unwrap/expect/panic.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod address;
pub mod batch;
pub mod codec;
pub mod conformance;
pub mod error;
pub mod keccak;

// Re-export commonly used types
pub use address::{
    derive_address, is_checksum_valid, to_checksum_address, AddressDeriver, EthereumAddress,
    PublicKey,
};
pub use batch::{BatchConfig, BatchDeriver};
pub use conformance::{DiffResult, DiffTestHarness};
pub use error::{ErrorCode, OracleResult};
pub use keccak::{
    hash_with_len, keccak256, permute, sha3_224, sha3_256, sha3_384, sha3_512, shake128, shake256,
    HashVariant, KeccakState, Sponge,
};
