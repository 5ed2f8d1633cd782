//! Hash-variant descriptors.
//!
//! SHA3, SHAKE and legacy Keccak differ only in rate, padding byte and output
//! policy, so each one is a plain [`HashVariant`] value rather than a type.

use super::STATE_BYTES;
use crate::error::{ErrorCode, OracleResult};
use std::fmt;

/// Domain-separation padding rule.
///
/// The first pad byte differs per family; every rule then zero-fills and sets
/// the top bit of the last rate byte (multi-rate padding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Padding {
    /// Pre-standardization Keccak, as used by Ethereum (0x01).
    Keccak,
    /// FIPS 202 SHA3 hashes (0x06).
    Sha3,
    /// FIPS 202 SHAKE extendable-output functions (0x1F).
    Shake,
}

impl Padding {
    /// First pad byte XORed in after the message.
    pub const fn domain_byte(self) -> u8 {
        match self {
            Padding::Keccak => 0x01,
            Padding::Sha3 => 0x06,
            Padding::Shake => 0x1F,
        }
    }
}

/// Output length policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputLength {
    /// Digest length fixed by the variant, in bytes.
    Fixed(usize),
    /// Caller chooses the length (XOF).
    Extendable,
}

/// A sponge configuration: `rate + capacity = 200` bytes always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashVariant {
    name: &'static str,
    rate: usize,
    padding: Padding,
    output: OutputLength,
}

impl HashVariant {
    /// SHA3-224.
    pub const SHA3_224: HashVariant = HashVariant::new_unchecked(
        "sha3-224",
        144,
        Padding::Sha3,
        OutputLength::Fixed(28),
    );
    /// SHA3-256.
    pub const SHA3_256: HashVariant = HashVariant::new_unchecked(
        "sha3-256",
        136,
        Padding::Sha3,
        OutputLength::Fixed(32),
    );
    /// SHA3-384.
    pub const SHA3_384: HashVariant = HashVariant::new_unchecked(
        "sha3-384",
        104,
        Padding::Sha3,
        OutputLength::Fixed(48),
    );
    /// SHA3-512.
    pub const SHA3_512: HashVariant = HashVariant::new_unchecked(
        "sha3-512",
        72,
        Padding::Sha3,
        OutputLength::Fixed(64),
    );
    /// SHAKE128.
    pub const SHAKE128: HashVariant = HashVariant::new_unchecked(
        "shake128",
        168,
        Padding::Shake,
        OutputLength::Extendable,
    );
    /// SHAKE256.
    pub const SHAKE256: HashVariant = HashVariant::new_unchecked(
        "shake256",
        136,
        Padding::Shake,
        OutputLength::Extendable,
    );
    /// Legacy Keccak-256 (Ethereum).
    pub const KECCAK_256: HashVariant = HashVariant::new_unchecked(
        "keccak-256",
        136,
        Padding::Keccak,
        OutputLength::Fixed(32),
    );

    /// Every named variant.
    pub const ALL: [HashVariant; 7] = [
        Self::SHA3_224,
        Self::SHA3_256,
        Self::SHA3_384,
        Self::SHA3_512,
        Self::SHAKE128,
        Self::SHAKE256,
        Self::KECCAK_256,
    ];

    const fn new_unchecked(
        name: &'static str,
        rate: usize,
        padding: Padding,
        output: OutputLength,
    ) -> Self {
        Self {
            name,
            rate,
            padding,
            output,
        }
    }

    /// Build a non-standard variant.
    ///
    /// Rate must lie in `[1, 200)`; a zero rate could absorb nothing and a
    /// full-width rate would leave no capacity.
    pub fn custom(rate: usize, padding: Padding, output: OutputLength) -> OracleResult<Self> {
        if rate == 0 || rate >= STATE_BYTES {
            return Err(ErrorCode::E400_ConfigurationError(format!(
                "rate {} outside [1, {})",
                rate, STATE_BYTES
            )));
        }
        Ok(Self::new_unchecked("custom", rate, padding, output))
    }

    /// Look up a named variant, case-insensitively.
    ///
    /// Accepts the canonical names (`sha3-256`, `shake128`, `keccak-256`, ...)
    /// with or without the dash, and `keccak256` / `keccak` for Keccak-256.
    pub fn from_name(name: &str) -> OracleResult<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "sha3224" => Ok(Self::SHA3_224),
            "sha3256" => Ok(Self::SHA3_256),
            "sha3384" => Ok(Self::SHA3_384),
            "sha3512" => Ok(Self::SHA3_512),
            "shake128" => Ok(Self::SHAKE128),
            "shake256" => Ok(Self::SHAKE256),
            "keccak256" | "keccak" => Ok(Self::KECCAK_256),
            _ => Err(ErrorCode::E400_ConfigurationError(format!(
                "unknown hash variant '{}'",
                name
            ))),
        }
    }

    /// Canonical name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Bytes absorbed or squeezed per permutation call.
    pub const fn rate(&self) -> usize {
        self.rate
    }

    /// Bytes of state never exposed to input or output.
    pub const fn capacity(&self) -> usize {
        STATE_BYTES - self.rate
    }

    /// Padding rule.
    pub const fn padding(&self) -> Padding {
        self.padding
    }

    /// Output length policy.
    pub const fn output(&self) -> OutputLength {
        self.output
    }

    /// Fixed digest length, or `None` for extendable-output variants.
    pub const fn digest_len(&self) -> Option<usize> {
        match self.output {
            OutputLength::Fixed(n) => Some(n),
            OutputLength::Extendable => None,
        }
    }

    /// True for SHAKE-style variants.
    pub const fn is_extendable(&self) -> bool {
        matches!(self.output, OutputLength::Extendable)
    }
}

impl fmt::Display for HashVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
