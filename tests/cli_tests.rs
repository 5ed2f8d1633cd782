//! CLI integration tests.
//!
//! Tests the oracle CLI commands by invoking the binary as a subprocess.

use std::io::Write;
use std::process::{Command, Stdio};

fn run_command(args: &[&str], input: &str) -> (i32, String, String) {
    let oracle = env!("CARGO_BIN_EXE_keccak-oracle");
    let mut child = Command::new(oracle)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to spawn oracle at {:?}: {}", oracle, e));

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn run_json(cmd: &str, input: &str) -> (i32, serde_json::Value) {
    let (code, stdout, stderr) = run_command(&[cmd], input);
    let value = serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {:?} / {}", e, stdout, stderr));
    (code, value)
}

const G_KEY: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

// ============================================================================
// Derive Command Tests
// ============================================================================

#[test]
fn cli_derive_single_key() {
    let (code, out) = run_json("derive", &format!(r#"{{"public_key":"{}"}}"#, G_KEY));
    assert_eq!(code, 0, "Expected success exit code: {}", out);
    assert_eq!(
        out["ok"]["address"],
        "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
    );
    assert_eq!(
        out["ok"]["lowercase"],
        "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
    );
}

#[test]
fn cli_derive_prefixed_key() {
    let (code, out) = run_json("derive", &format!(r#"{{"public_key":"0x{}"}}"#, G_KEY));
    assert_eq!(code, 0);
    assert_eq!(
        out["ok"]["address"],
        "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
    );
}

#[test]
fn cli_derive_batch() {
    let input = format!(
        r#"{{"public_keys":["{}","{}"],"workers":2}}"#,
        G_KEY,
        "00".repeat(64)
    );
    let (code, out) = run_json("derive", &input);
    assert_eq!(code, 0, "{}", out);
    let addrs = out["ok"]["addresses"].as_array().unwrap();
    assert_eq!(addrs.len(), 2);
    assert_eq!(addrs[0], "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
}

#[test]
fn cli_derive_wrong_key_size() {
    let input = format!(r#"{{"public_key":"04{}"}}"#, G_KEY);
    let (code, out) = run_json("derive", &input);
    assert_eq!(code, 1, "Expected failure exit code");
    assert_eq!(out["err"]["code"], 200);
    assert_eq!(out["err"]["name"], "E200_InvalidKeySize");
}

#[test]
fn cli_derive_bad_hex() {
    let (code, out) = run_json("derive", r#"{"public_key":"xyz"}"#);
    assert_eq!(code, 1);
    assert_eq!(out["err"]["code"], 100);
}

#[test]
fn cli_derive_needs_exactly_one_field() {
    let (code, out) = run_json("derive", "{}");
    assert_eq!(code, 1);
    assert_eq!(out["err"]["code"], 400);
}

#[test]
fn cli_derive_invalid_json() {
    let (code, out) = run_json("derive", "not valid json");
    assert_eq!(code, 1, "Expected failure exit code");
    assert_eq!(out["err"]["code"], 100);
}

// ============================================================================
// Checksum Command Tests
// ============================================================================

#[test]
fn cli_checksum_recases_lowercase() {
    let (code, out) = run_json(
        "checksum",
        r#"{"address":"0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"}"#,
    );
    assert_eq!(code, 0);
    assert_eq!(
        out["ok"]["address"],
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
    );
    assert_eq!(out["ok"]["valid"], false);
}

#[test]
fn cli_checksum_reports_valid() {
    let (code, out) = run_json(
        "checksum",
        r#"{"address":"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"}"#,
    );
    assert_eq!(code, 0);
    assert_eq!(out["ok"]["valid"], true);
}

#[test]
fn cli_checksum_invalid_address() {
    let (code, out) = run_json("checksum", r#"{"address":"0x1234"}"#);
    assert_eq!(code, 1);
    assert_eq!(out["err"]["name"], "E101_InvalidAddress");
}

// ============================================================================
// Hash Command Tests
// ============================================================================

#[test]
fn cli_hash_keccak_empty() {
    let (code, out) = run_json("hash", r#"{"variant":"keccak-256","input":""}"#);
    assert_eq!(code, 0);
    assert_eq!(out["ok"]["variant"], "keccak-256");
    assert_eq!(
        out["ok"]["digest"],
        "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
    );
}

#[test]
fn cli_hash_sha3_abc() {
    let (code, out) = run_json("hash", r#"{"variant":"SHA3-256","input":"0x616263"}"#);
    assert_eq!(code, 0);
    assert_eq!(
        out["ok"]["digest"],
        "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
    );
}

#[test]
fn cli_hash_shake_with_length() {
    let (code, out) = run_json(
        "hash",
        r#"{"variant":"shake128","input":"","output_len":32}"#,
    );
    assert_eq!(code, 0);
    assert_eq!(
        out["ok"]["digest"],
        "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
    );
}

#[test]
fn cli_hash_oversized_output_len() {
    let (code, out) = run_json(
        "hash",
        r#"{"variant":"shake128","input":"","output_len":18446744073709551615}"#,
    );
    assert_eq!(code, 1, "Expected failure exit code: {}", out);
    assert_eq!(out["err"]["code"], 400);
    assert_eq!(out["err"]["name"], "E400_ConfigurationError");
}

#[test]
fn cli_hash_unknown_variant() {
    let (code, out) = run_json("hash", r#"{"variant":"md5","input":""}"#);
    assert_eq!(code, 1);
    assert_eq!(out["err"]["code"], 400);
}

#[test]
fn cli_hash_unknown_field_rejected() {
    let (code, out) = run_json("hash", r#"{"variant":"sha3-256","input":"","extra":1}"#);
    assert_eq!(code, 1);
    assert_eq!(out["err"]["code"], 100);
}

// ============================================================================
// Other Commands
// ============================================================================

#[test]
fn cli_version() {
    let (code, stdout, _) = run_command(&["version"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("Keccak Oracle v"));
}

#[test]
fn cli_corpus_runs_bundled_vectors() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/corpus/vectors.json");
    let (code, stdout, stderr) = run_command(&["corpus", path], "");
    assert_eq!(code, 0, "{}{}", stdout, stderr);
    assert!(stdout.contains("0 failed"));
}

#[test]
fn cli_corpus_missing_file() {
    let (code, _, stderr) = run_command(&["corpus", "/nonexistent/vectors.json"], "");
    assert_eq!(code, 1);
    assert!(stderr.contains("I/O error"));
}

#[cfg(feature = "reference")]
#[test]
fn cli_selftest_passes() {
    let (code, stdout, stderr) = run_command(&["selftest"], "");
    assert_eq!(code, 0, "{}{}", stdout, stderr);
    assert!(stdout.contains("0 failed"));
}
