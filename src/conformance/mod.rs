//! Conformance checking for the hash family and address pipeline.
//!
//! Two independent checks:
//!
//! - [`CorpusRunner`] replays the JSON vector corpus (`corpus/vectors.json`)
//!   against the library and compares expected and actual results.
//! - [`DiffTestHarness`] hashes the same input with the native sponge and a
//!   reference Keccak implementation and compares raw output bytes, emitting a
//!   [`ReproBundle`] on any mismatch.

pub mod corpus;
mod harness;
mod repro;
mod runner;

pub use corpus::{Corpus, CorpusManifest, CorpusResults, CorpusRunner, TestResult, TestVector};
pub use harness::{boundary_lengths, BatchResult, DiffResult, DiffTestHarness, HashCase};
pub use repro::ReproBundle;
#[cfg(feature = "reference")]
pub use runner::ReferenceRunner;
pub use runner::{NativeRunner, OracleOutput, OracleRunner};

/// Result type for conformance operations.
pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors that can occur during conformance testing.
#[derive(Debug)]
pub enum ConformanceError {
    /// No reference implementation for this variant
    ReferenceUnavailable(String),
    /// Corpus file could not be read
    IoError(String),
    /// Corpus JSON did not match the expected layout
    CorpusParseError(String),
    /// Native and reference outputs differ
    Mismatch {
        /// Input description
        input: String,
        /// Native result
        native_result: String,
        /// Reference result
        reference_result: String,
        /// First differing byte index (if applicable)
        first_diff: Option<usize>,
    },
}

impl std::fmt::Display for ConformanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReferenceUnavailable(msg) => write!(f, "Reference not available: {}", msg),
            Self::IoError(msg) => write!(f, "I/O error: {}", msg),
            Self::CorpusParseError(msg) => write!(f, "Failed to parse corpus: {}", msg),
            Self::Mismatch {
                input,
                native_result,
                reference_result,
                first_diff,
            } => {
                write!(
                    f,
                    "Mismatch for input '{}': native='{}', reference='{}'",
                    input, native_result, reference_result
                )?;
                if let Some(idx) = first_diff {
                    write!(f, " (first diff at byte {})", idx)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConformanceError {}

/// Index of the first differing byte, or the shorter length when one is a
/// prefix of the other.
pub(crate) fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}
