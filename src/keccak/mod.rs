//! Keccak-f[1600] and the sponge-based SHA3/SHAKE family.
//!
//! The permutation state is 25 little-endian 64-bit lanes, lane `(x, y)` at
//! index `x + 5 * y`. The sponge absorbs into and squeezes from the first
//! `rate` bytes of that state. Each hash in the family is a [`HashVariant`]
//! value (rate, padding byte, output policy) handed to the same [`Sponge`].
//!
//! The step constants are derived by `build.rs` from the LFSR and the rho
//! walk in FIPS 202, then pinned by tests against the published tables.

mod family;
mod permute;
mod sponge;
mod variant;

pub use family::{
    digest, hash_with_len, keccak256, sha3_224, sha3_256, sha3_384, sha3_512, shake128, shake256,
    xof, MAX_XOF_OUTPUT,
};
pub use permute::{permute, permute_with_trace, KeccakState};
pub use sponge::Sponge;
pub use variant::{HashVariant, OutputLength, Padding};

/// Number of 64-bit lanes in the state.
pub const LANES: usize = 25;

/// Number of rounds in Keccak-f[1600].
pub const ROUNDS: usize = 24;

/// State width in bytes (1600 bits).
pub const STATE_BYTES: usize = 200;

// ROUND_CONSTANTS and RHO_OFFSETS
include!(concat!(env!("OUT_DIR"), "/keccak_constants.rs"));
