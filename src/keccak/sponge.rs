//! Sponge construction over Keccak-f[1600].
//!
//! Implements absorb / pad / squeeze for any [`HashVariant`].

use super::permute::{permute, KeccakState};
use super::variant::HashVariant;
use super::LANES;

/// Sponge operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Absorbing input bytes
    Absorbing,
    /// Squeezing output bytes
    Squeezing,
}

/// Sponge state for incremental hashing.
///
/// A sponge is exclusively owned by one thread at a time; the state carries
/// absorption-in-progress bytes and cannot be interleaved between users.
#[derive(Debug, Clone)]
pub struct Sponge {
    /// Permutation state
    state: KeccakState,
    /// Variant parameters
    variant: HashVariant,
    /// Current byte position in the rate portion
    pos: usize,
    /// Current mode
    mode: Mode,
}

impl Sponge {
    /// Create a sponge in the all-zero absorbing state.
    pub fn new(variant: HashVariant) -> Self {
        Self {
            state: [0u64; LANES],
            variant,
            pos: 0,
            mode: Mode::Absorbing,
        }
    }

    /// The variant this sponge was built for.
    pub fn variant(&self) -> HashVariant {
        self.variant
    }

    /// Return to the all-zero absorbing state, keeping the variant.
    pub fn reset(&mut self) {
        self.state = [0u64; LANES];
        self.pos = 0;
        self.mode = Mode::Absorbing;
    }

    /// Absorb input bytes.
    ///
    /// Bytes are XORed into the rate portion; the state is permuted each time
    /// the rate fills. Absorbing after squeezing has started permutes the
    /// current state and opens a new absorb phase, which is padded again on
    /// the next squeeze.
    pub fn absorb(&mut self, mut data: &[u8]) {
        if self.mode == Mode::Squeezing {
            permute(&mut self.state);
            self.mode = Mode::Absorbing;
            self.pos = 0;
        }

        let rate = self.variant.rate();
        while !data.is_empty() {
            let take = (rate - self.pos).min(data.len());
            let (chunk, rest) = data.split_at(take);
            xor_bytes(&mut self.state, self.pos, chunk);
            self.pos += take;
            data = rest;

            if self.pos == rate {
                permute(&mut self.state);
                self.pos = 0;
            }
        }
    }

    /// Apply the variant's padding and permute, switching to squeeze mode.
    ///
    /// The pad byte lands at the current position and the top bit of the last
    /// rate byte is set; when both fall on the same byte they combine.
    fn finalize(&mut self) {
        if self.mode == Mode::Absorbing {
            let rate = self.variant.rate();
            xor_byte(&mut self.state, self.pos, self.variant.padding().domain_byte());
            xor_byte(&mut self.state, rate - 1, 0x80);
            permute(&mut self.state);
            self.mode = Mode::Squeezing;
            self.pos = 0;
        }
    }

    /// Fill `out` with output bytes.
    ///
    /// The first call pads and finalizes absorption. Successive calls continue
    /// the same output stream, permuting whenever the rate is exhausted.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.finalize();

        let rate = self.variant.rate();
        let mut written = 0;
        while written < out.len() {
            if self.pos == rate {
                permute(&mut self.state);
                self.pos = 0;
            }
            let take = (rate - self.pos).min(out.len() - written);
            extract_bytes(&self.state, self.pos, &mut out[written..written + take]);
            self.pos += take;
            written += take;
        }
    }

    /// Squeeze `len` bytes into a new vector.
    pub fn squeeze_vec(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.squeeze(&mut out);
        out
    }
}

#[inline]
fn xor_byte(state: &mut KeccakState, index: usize, byte: u8) {
    state[index / 8] ^= (byte as u64) << (8 * (index % 8));
}

/// XOR `bytes` into the state starting at byte `offset` (lanes little-endian).
fn xor_bytes(state: &mut KeccakState, offset: usize, bytes: &[u8]) {
    let mut i = 0;
    // Unaligned head
    while i < bytes.len() && (offset + i) % 8 != 0 {
        xor_byte(state, offset + i, bytes[i]);
        i += 1;
    }
    // Whole lanes
    while i + 8 <= bytes.len() {
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[i..i + 8]);
        state[(offset + i) / 8] ^= u64::from_le_bytes(word);
        i += 8;
    }
    // Tail
    while i < bytes.len() {
        xor_byte(state, offset + i, bytes[i]);
        i += 1;
    }
}

/// Copy state bytes `[offset, offset + out.len())` into `out`.
fn extract_bytes(state: &KeccakState, offset: usize, out: &mut [u8]) {
    for (i, byte) in out.iter_mut().enumerate() {
        let index = offset + i;
        *byte = (state[index / 8] >> (8 * (index % 8))) as u8;
    }
}
