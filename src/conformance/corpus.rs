//! Corpus-based conformance testing.
//!
//! Loads JSON test vectors and replays them against the library. Each vector
//! names an operation, its input fields, and either an `ok` value or an `err`
//! object carrying the expected numeric code:
//!
//! ```json
//! {"id": "keccak256_empty", "op": "hash",
//!  "input": {"variant": "keccak-256", "data": ""},
//!  "expected": {"ok": "c5d2...a470"}}
//! ```
//!
//! Supported operations: `hash`, `derive_address`, `checksum`, `hex_decode`.

use super::{ConformanceError, ConformanceResult};
use crate::address::{derive_address, to_checksum_address};
use crate::codec::{bytes_to_hex, hex_to_bytes};
use crate::error::OracleResult;
use crate::keccak::{hash_with_len, HashVariant};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Corpus manifest with metadata.
#[derive(Debug, Deserialize)]
pub struct CorpusManifest {
    /// Format version of the corpus file.
    pub format_version: String,
    /// Corpus version.
    pub version: String,
    /// Where the expected values come from.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// A corpus containing test vectors.
#[derive(Debug, Deserialize)]
pub struct Corpus {
    /// Corpus metadata.
    pub manifest: CorpusManifest,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// A single test vector.
#[derive(Debug, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the test.
    pub id: String,
    /// Operation to test (e.g., "hash", "derive_address").
    pub op: String,
    /// Input parameters for the operation.
    pub input: Value,
    /// Expected result (success or error).
    pub expected: Value,
}

/// Result of running a single test vector.
#[derive(Debug)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with mismatch.
    Fail {
        /// Expected result from the corpus.
        expected: String,
        /// Actual result from the library.
        actual: String,
    },
    /// Test was skipped (operation not implemented).
    Skip {
        /// Reason for skipping.
        reason: String,
    },
    /// The vector itself is malformed.
    Error {
        /// Error message.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Results from running the corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Number of tests that passed.
    pub passed: usize,
    /// Number of tests that failed.
    pub failed: usize,
    /// Number of tests that were skipped.
    pub skipped: usize,
    /// Number of tests that errored.
    pub errors: usize,
    /// Detailed results for each test.
    pub details: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        match &result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Skip { .. } => self.skipped += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.details.push((id.to_string(), result));
    }

    /// Get total number of tests run.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.errors
    }

    /// Returns true if all tests passed (no failures or errors).
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Get a summary string of the results.
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

    /// Get failures only.
    pub fn failures(&self) -> Vec<&(String, TestResult)> {
        self.details.iter().filter(|(_, r)| r.is_fail()).collect()
    }
}

/// Corpus runner that executes test vectors.
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Load corpus from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> ConformanceResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ConformanceError::IoError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse a corpus from JSON text.
    pub fn from_json(content: &str) -> ConformanceResult<Self> {
        let corpus: Corpus = serde_json::from_str(content)
            .map_err(|e| ConformanceError::CorpusParseError(e.to_string()))?;
        debug!(
            vectors = corpus.vectors.len(),
            version = %corpus.manifest.version,
            "loaded corpus"
        );
        Ok(Self { corpus })
    }

    /// Get the corpus manifest.
    pub fn manifest(&self) -> &CorpusManifest {
        &self.corpus.manifest
    }

    /// Get the number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run all test vectors and return results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::new();
        for vector in &self.corpus.vectors {
            results.record(&vector.id, run_vector(vector));
        }
        results
    }
}

/// Run a single test vector.
pub fn run_vector(vector: &TestVector) -> TestResult {
    let actual = match vector.op.as_str() {
        "hash" => run_hash(&vector.input),
        "derive_address" => run_derive_address(&vector.input),
        "checksum" => run_checksum(&vector.input),
        "hex_decode" => run_hex_decode(&vector.input),
        _ => {
            warn!(id = %vector.id, op = %vector.op, "skipping unknown corpus operation");
            return TestResult::Skip {
                reason: format!("Unknown operation: {}", vector.op),
            };
        }
    };
    match actual {
        Ok(actual) => compare(&vector.expected, actual),
        Err(result) => result,
    }
}

/// Read a required string field; a missing field makes the vector malformed.
fn str_field<'a>(input: &'a Value, key: &str) -> Result<&'a str, TestResult> {
    input
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| TestResult::error(format!("Missing '{}' in input", key)))
}

fn run_hash(input: &Value) -> Result<OracleResult<String>, TestResult> {
    let variant = str_field(input, "variant")?;
    let data = str_field(input, "data")?;
    let output_len = match input.get("output_len") {
        None | Some(Value::Null) => None,
        Some(v) => {
            let len = v
                .as_u64()
                .ok_or_else(|| TestResult::error("'output_len' must be a non-negative integer"))?;
            let len = usize::try_from(len).map_err(|_| {
                TestResult::error(format!("'output_len' {} does not fit in usize", len))
            })?;
            Some(len)
        }
    };
    Ok(HashVariant::from_name(variant).and_then(|variant| {
        let bytes = hex_to_bytes(data)?;
        hash_with_len(variant, &bytes, output_len).map(|d| bytes_to_hex(&d))
    }))
}

fn run_derive_address(input: &Value) -> Result<OracleResult<String>, TestResult> {
    let key = str_field(input, "public_key")?;
    Ok(hex_to_bytes(key)
        .and_then(|bytes| derive_address(&bytes))
        .map(|addr| addr.to_string()))
}

fn run_checksum(input: &Value) -> Result<OracleResult<String>, TestResult> {
    let address = str_field(input, "address")?;
    Ok(to_checksum_address(address))
}

fn run_hex_decode(input: &Value) -> Result<OracleResult<String>, TestResult> {
    let text = str_field(input, "hex")?;
    Ok(hex_to_bytes(text).map(|b| bytes_to_hex(&b)))
}

/// Compare an actual result against `{"ok": "..."}` or `{"err": {"code": n}}`.
fn compare(expected: &Value, actual: OracleResult<String>) -> TestResult {
    if let Some(ok) = expected.get("ok") {
        let Some(ok) = ok.as_str() else {
            return TestResult::error("'ok' must be a string");
        };
        match actual {
            Ok(value) if value == ok => TestResult::Pass,
            Ok(value) => TestResult::Fail {
                expected: ok.to_string(),
                actual: value,
            },
            Err(e) => TestResult::Fail {
                expected: format!("ok: {}", ok),
                actual: format!("err: {}", e),
            },
        }
    } else if let Some(err) = expected.get("err") {
        let Some(expected_code) = err.get("code").and_then(Value::as_u64) else {
            return TestResult::error("'err' must carry a numeric 'code'");
        };
        match actual {
            Ok(value) => TestResult::Fail {
                expected: format!("E{}", expected_code),
                actual: format!("ok: {}", value),
            },
            Err(e) if u64::from(e.code()) == expected_code => TestResult::Pass,
            Err(e) => TestResult::Fail {
                expected: format!("E{}", expected_code),
                actual: e.name().to_string(),
            },
        }
    } else {
        TestResult::error("Invalid expected format")
    }
}
