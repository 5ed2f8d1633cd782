//! Hash runners for differential testing.

use super::ConformanceResult;
use crate::codec::bytes_to_hex;
use crate::keccak::{hash_with_len, HashVariant};
use serde::Serialize;

/// Result from one hash computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleOutput {
    /// Digest as lowercase hex.
    Ok(String),
    /// Error code name.
    Err(String),
}

impl OracleOutput {
    /// Check if this is an Ok result.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Check if this is an Err result.
    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Get the value as a string (either hex digest or error name).
    pub fn as_string(&self) -> &str {
        match self {
            Self::Ok(s) => s,
            Self::Err(s) => s,
        }
    }
}

/// Something that can hash a byte string under a named variant.
pub trait OracleRunner {
    /// Hash `input`; `output_len` follows [`hash_with_len`] rules.
    fn hash(
        &self,
        variant: HashVariant,
        input: &[u8],
        output_len: Option<usize>,
    ) -> ConformanceResult<OracleOutput>;

    /// Get the runner name for reporting.
    fn name(&self) -> &str;
}

/// The crate's own sponge.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeRunner;

impl NativeRunner {
    /// Create a new native runner.
    pub fn new() -> Self {
        Self
    }
}

impl OracleRunner for NativeRunner {
    fn hash(
        &self,
        variant: HashVariant,
        input: &[u8],
        output_len: Option<usize>,
    ) -> ConformanceResult<OracleOutput> {
        Ok(match hash_with_len(variant, input, output_len) {
            Ok(digest) => OracleOutput::Ok(bytes_to_hex(&digest)),
            Err(e) => OracleOutput::Err(e.name().to_string()),
        })
    }

    fn name(&self) -> &str {
        "native"
    }
}

#[cfg(feature = "reference")]
pub use reference::ReferenceRunner;

#[cfg(feature = "reference")]
mod reference {
    use super::{OracleOutput, OracleRunner};
    use crate::codec::bytes_to_hex;
    use crate::conformance::{ConformanceError, ConformanceResult};
    use crate::error::ErrorCode;
    use crate::keccak::{HashVariant, OutputLength, MAX_XOF_OUTPUT};
    use tiny_keccak::{Hasher, Keccak, Sha3, Shake};

    /// `tiny-keccak` as an independent reference.
    ///
    /// Only the seven named variants are covered; custom rates are reported as
    /// [`ConformanceError::ReferenceUnavailable`].
    #[derive(Debug, Default, Clone, Copy)]
    pub struct ReferenceRunner;

    impl ReferenceRunner {
        /// Create a new reference runner.
        pub fn new() -> Self {
            Self
        }

        /// True when the reference implements `variant`.
        pub fn supports(&self, variant: HashVariant) -> bool {
            HashVariant::ALL.contains(&variant)
        }
    }

    fn run<H: Hasher>(mut hasher: H, input: &[u8], len: usize) -> Vec<u8> {
        hasher.update(input);
        let mut out = vec![0u8; len];
        hasher.finalize(&mut out);
        out
    }

    impl OracleRunner for ReferenceRunner {
        fn hash(
            &self,
            variant: HashVariant,
            input: &[u8],
            output_len: Option<usize>,
        ) -> ConformanceResult<OracleOutput> {
            if !self.supports(variant) {
                return Err(ConformanceError::ReferenceUnavailable(format!(
                    "no reference for {} (rate {})",
                    variant,
                    variant.rate()
                )));
            }

            // Same length policy as the native dispatcher.
            let len = match (variant.output(), output_len) {
                (OutputLength::Fixed(n), None) => n,
                (OutputLength::Fixed(n), Some(requested)) if requested == n => n,
                (OutputLength::Extendable, Some(requested)) if requested <= MAX_XOF_OUTPUT => {
                    requested
                }
                _ => {
                    let err = ErrorCode::E400_ConfigurationError(String::new());
                    return Ok(OracleOutput::Err(err.name().to_string()));
                }
            };

            let digest = if variant == HashVariant::KECCAK_256 {
                run(Keccak::v256(), input, len)
            } else if variant == HashVariant::SHA3_224 {
                run(Sha3::v224(), input, len)
            } else if variant == HashVariant::SHA3_256 {
                run(Sha3::v256(), input, len)
            } else if variant == HashVariant::SHA3_384 {
                run(Sha3::v384(), input, len)
            } else if variant == HashVariant::SHA3_512 {
                run(Sha3::v512(), input, len)
            } else if variant == HashVariant::SHAKE128 {
                run(Shake::v128(), input, len)
            } else {
                run(Shake::v256(), input, len)
            };
            Ok(OracleOutput::Ok(bytes_to_hex(&digest)))
        }

        fn name(&self) -> &str {
            "tiny-keccak"
        }
    }
}
