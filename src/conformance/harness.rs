//! Differential test harness: native sponge vs reference Keccak.

use super::repro::ReproBundle;
use super::runner::{NativeRunner, OracleOutput, OracleRunner};
use super::{first_difference, ConformanceError, ConformanceResult};
use crate::codec::bytes_to_hex;
use crate::keccak::HashVariant;
use tracing::warn;

/// Result of a differential test.
#[derive(Debug)]
pub enum DiffResult {
    /// Both implementations produced the same output.
    Match {
        /// The matching output value.
        value: String,
    },
    /// Implementations produced different outputs.
    Mismatch {
        /// Native output.
        native: OracleOutput,
        /// Reference output.
        reference: OracleOutput,
        /// Repro bundle for debugging.
        repro: ReproBundle,
    },
    /// No reference runner configured.
    ReferenceUnavailable,
}

impl DiffResult {
    /// Check if the result is a match.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    /// Check if the result is a mismatch.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }
}

/// One hash invocation to compare.
#[derive(Debug, Clone)]
pub struct HashCase {
    /// Name used in reports.
    pub name: String,
    /// Variant under test.
    pub variant: HashVariant,
    /// Message bytes.
    pub input: Vec<u8>,
    /// Requested output length.
    pub output_len: Option<usize>,
}

impl HashCase {
    /// A case that uses the variant's default length (64 bytes for XOFs).
    pub fn new(name: impl Into<String>, variant: HashVariant, input: Vec<u8>) -> Self {
        let output_len = if variant.is_extendable() { Some(64) } else { None };
        Self {
            name: name.into(),
            variant,
            input,
            output_len,
        }
    }

    /// Override the requested output length.
    pub fn with_output_len(mut self, len: usize) -> Self {
        self.output_len = Some(len);
        self
    }
}

/// Message lengths that land on and around every padding edge for `variant`:
/// empty, one byte, and `k * rate - 1`, `k * rate`, `k * rate + 1` for
/// `k = 1..=blocks`.
pub fn boundary_lengths(variant: HashVariant, blocks: usize) -> Vec<usize> {
    let rate = variant.rate();
    let mut lengths = vec![0, 1];
    for k in 1..=blocks {
        let edge = k * rate;
        lengths.extend([edge - 1, edge, edge + 1]);
    }
    lengths.sort_unstable();
    lengths.dedup();
    lengths
}

/// Compares the native sponge against a reference implementation.
pub struct DiffTestHarness {
    native: NativeRunner,
    reference: Option<Box<dyn OracleRunner>>,
}

impl DiffTestHarness {
    /// Harness with the built-in reference (`tiny-keccak`) when the
    /// `reference` feature is enabled.
    pub fn new() -> Self {
        #[cfg(feature = "reference")]
        let reference: Option<Box<dyn OracleRunner>> =
            Some(Box::new(super::runner::ReferenceRunner::new()));
        #[cfg(not(feature = "reference"))]
        let reference: Option<Box<dyn OracleRunner>> = None;

        Self {
            native: NativeRunner::new(),
            reference,
        }
    }

    /// Harness with only the native runner.
    pub fn native_only() -> Self {
        Self {
            native: NativeRunner::new(),
            reference: None,
        }
    }

    /// Harness against an arbitrary reference runner.
    pub fn with_reference(reference: Box<dyn OracleRunner>) -> Self {
        Self {
            native: NativeRunner::new(),
            reference: Some(reference),
        }
    }

    /// Check if a reference runner is configured.
    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Hash one case with both runners and compare the outputs.
    pub fn compare_hash(&self, case: &HashCase) -> ConformanceResult<DiffResult> {
        let native = self.native.hash(case.variant, &case.input, case.output_len)?;

        let reference_runner = match &self.reference {
            Some(r) => r,
            None => return Ok(DiffResult::ReferenceUnavailable),
        };
        let reference = reference_runner.hash(case.variant, &case.input, case.output_len)?;

        if native == reference {
            return Ok(DiffResult::Match {
                value: native.as_string().to_string(),
            });
        }

        let first_diff = match (&native, &reference) {
            (OracleOutput::Ok(a), OracleOutput::Ok(b)) => {
                first_difference(a.as_bytes(), b.as_bytes()).map(|i| i / 2)
            }
            _ => None,
        };
        let repro = ReproBundle {
            test_name: case.name.clone(),
            variant: case.variant.name().to_string(),
            input_hex: bytes_to_hex(&case.input),
            output_len: case.output_len,
            native_output: native.clone(),
            reference_output: reference.clone(),
            first_diff,
        };
        warn!(
            test = %case.name,
            variant = %case.variant,
            runner = reference_runner.name(),
            "native output differs from reference"
        );
        Ok(DiffResult::Mismatch {
            native,
            reference,
            repro,
        })
    }

    /// Like [`compare_hash`](Self::compare_hash) but turns a mismatch into an
    /// error. A missing reference counts as success.
    pub fn check_hash(&self, case: &HashCase) -> ConformanceResult<()> {
        match self.compare_hash(case)? {
            DiffResult::Match { .. } | DiffResult::ReferenceUnavailable => Ok(()),
            DiffResult::Mismatch {
                native,
                reference,
                repro,
            } => Err(ConformanceError::Mismatch {
                input: format!("{} {}", case.variant, repro.input_hex),
                native_result: native.as_string().to_string(),
                reference_result: reference.as_string().to_string(),
                first_diff: repro.first_diff,
            }),
        }
    }

    /// Run a batch of differential tests.
    pub fn run_batch<'a>(&self, cases: impl IntoIterator<Item = &'a HashCase>) -> BatchResult {
        let mut results = BatchResult::new();

        for case in cases {
            match self.compare_hash(case) {
                Ok(DiffResult::Match { .. }) => results.record_pass(),
                Ok(DiffResult::Mismatch { repro, .. }) => results.record_fail(repro),
                Ok(DiffResult::ReferenceUnavailable) => results.record_skip(),
                Err(e) => results.record_error(&case.name, e),
            }
        }

        results
    }

    /// Compare every named variant over the padding-boundary lengths.
    pub fn sweep_all_variants(&self, blocks: usize) -> BatchResult {
        let cases: Vec<HashCase> = HashVariant::ALL
            .iter()
            .flat_map(|&variant| {
                boundary_lengths(variant, blocks).into_iter().map(move |len| {
                    let input = (0..len).map(|i| (i * 31 + 7) as u8).collect();
                    HashCase::new(format!("{}_len{}", variant, len), variant, input)
                })
            })
            .collect();
        self.run_batch(&cases)
    }
}

impl Default for DiffTestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Results from running a batch of differential tests.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Number of tests that passed.
    pub passed: usize,
    /// Number of tests that failed.
    pub failed: usize,
    /// Number of tests that were skipped.
    pub skipped: usize,
    /// Number of tests that errored.
    pub errors: usize,
    /// Repro bundles for each failure.
    pub failures: Vec<ReproBundle>,
    /// Test name and error for each errored case.
    pub error_details: Vec<(String, ConformanceError)>,
}

impl BatchResult {
    /// Create a new empty batch result.
    pub fn new() -> Self {
        Self::default()
    }

    fn record_pass(&mut self) {
        self.passed += 1;
    }

    fn record_fail(&mut self, repro: ReproBundle) {
        self.failed += 1;
        self.failures.push(repro);
    }

    fn record_skip(&mut self) {
        self.skipped += 1;
    }

    fn record_error(&mut self, name: &str, error: ConformanceError) {
        self.errors += 1;
        self.error_details.push((name.to_string(), error));
    }

    /// Check if all tests passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Get total number of tests run.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.errors
    }

    /// Format a summary string.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped, {} errors (total: {})",
            self.passed,
            self.failed,
            self.skipped,
            self.errors,
            self.total()
        )
    }
}
