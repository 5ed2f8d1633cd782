//! Reproduction bundle for debugging conformance mismatches.

use super::runner::OracleOutput;
use serde::Serialize;
use std::path::Path;

/// Everything needed to replay one native/reference mismatch.
#[derive(Debug, Clone, Serialize)]
pub struct ReproBundle {
    /// Test name that failed.
    pub test_name: String,
    /// Hash variant name (e.g. "sha3-256").
    pub variant: String,
    /// Input bytes as lowercase hex.
    pub input_hex: String,
    /// Requested output length, if any.
    pub output_len: Option<usize>,
    /// Native output.
    pub native_output: OracleOutput,
    /// Reference output.
    pub reference_output: OracleOutput,
    /// First differing byte of the two digests, when both succeeded.
    pub first_diff: Option<usize>,
}

impl ReproBundle {
    /// Format as a human-readable report.
    pub fn to_report(&self) -> String {
        format!(
            r#"=== Conformance Mismatch Report ===
Test: {}
Variant: {}
Input: {} ({} bytes)
Output length: {}
First diff: {}

Native Output:    {:?}
Reference Output: {:?}

To reproduce:
  echo '{}' | keccak-oracle hash
"#,
            self.test_name,
            self.variant,
            self.input_hex,
            self.input_hex.len() / 2,
            self.output_len
                .map_or_else(|| "default".to_string(), |n| n.to_string()),
            self.first_diff
                .map_or_else(|| "n/a".to_string(), |n| format!("byte {}", n)),
            self.native_output,
            self.reference_output,
            self.cli_request(),
        )
    }

    /// The stdin request for the `hash` CLI subcommand.
    pub fn cli_request(&self) -> String {
        serde_json::json!({
            "variant": self.variant,
            "input": self.input_hex,
            "output_len": self.output_len,
        })
        .to_string()
    }

    /// Save the report to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        std::fs::write(path, self.to_report())
    }

    /// Format as JSON for machine parsing.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
