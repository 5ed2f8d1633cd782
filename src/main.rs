//! Keccak Oracle CLI.
//!
//! Each subcommand reads one JSON request from stdin and writes one JSON line
//! to stdout: `{"ok": ...}` with exit code 0, or
//! `{"err": {"code", "name", "message"}}` with exit code 1. Logs go to stderr
//! and are controlled by `RUST_LOG`.

use clap::{Parser, Subcommand};
use keccak_oracle::batch::{BatchConfig, BatchDeriver};
use keccak_oracle::conformance::{CorpusRunner, DiffTestHarness};
use keccak_oracle::{
    codec, derive_address, hash_with_len, is_checksum_valid, to_checksum_address, ErrorCode,
    HashVariant, OracleResult, PublicKey,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "keccak-oracle")]
#[command(about = "Keccak / SHA3 hashing and Ethereum address derivation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Derive checksummed addresses: {"public_key": hex} or {"public_keys": [hex, ...]}
    Derive,

    /// Re-case an address: {"address": text}
    Checksum,

    /// Hash hex input: {"variant": name, "input": hex, "output_len"?: n}
    Hash,

    /// Run a JSON vector corpus file
    Corpus {
        /// Path to the corpus file
        path: PathBuf,
    },

    /// Compare every variant against the reference implementation
    Selftest,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DeriveRequest {
    public_key: Option<String>,
    public_keys: Option<Vec<String>>,
    workers: Option<usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ChecksumRequest {
    address: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct HashRequest {
    variant: String,
    input: String,
    output_len: Option<usize>,
}

fn setup_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy();
    let _ = Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn read_request<T: for<'de> Deserialize<'de>>() -> OracleResult<T> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| ErrorCode::E100_InvalidEncoding(format!("stdin: {}", e)))?;
    serde_json::from_str(&input)
        .map_err(|e| ErrorCode::E100_InvalidEncoding(format!("invalid request JSON: {}", e)))
}

fn run_derive() -> OracleResult<Value> {
    let req: DeriveRequest = read_request()?;
    match (req.public_key, req.public_keys) {
        (Some(key), None) => {
            let key = PublicKey::from_hex(&key)?;
            let addr = derive_address(key.as_bytes())?;
            Ok(json!({ "address": addr, "lowercase": addr.to_lowercase_hex() }))
        }
        (None, Some(keys)) => {
            let keys = keys
                .iter()
                .map(|k| PublicKey::from_hex(k))
                .collect::<OracleResult<Vec<_>>>()?;
            let config = req
                .workers
                .map_or_else(BatchConfig::hardware, BatchConfig::with_workers);
            let addresses = BatchDeriver::new(config).derive_all(&keys)?;
            info!(count = addresses.len(), "derived batch");
            Ok(json!({ "addresses": addresses }))
        }
        _ => Err(ErrorCode::E400_ConfigurationError(
            "exactly one of public_key or public_keys is required".to_string(),
        )),
    }
}

fn run_checksum() -> OracleResult<Value> {
    let req: ChecksumRequest = read_request()?;
    let address = to_checksum_address(&req.address)?;
    Ok(json!({ "address": address, "valid": is_checksum_valid(&req.address) }))
}

fn run_hash() -> OracleResult<Value> {
    let req: HashRequest = read_request()?;
    let variant = HashVariant::from_name(&req.variant)?;
    let input = codec::hex_to_bytes(codec::strip_hex_prefix(&req.input))?;
    let digest = hash_with_len(variant, &input, req.output_len)?;
    Ok(json!({ "variant": variant.name(), "digest": codec::bytes_to_hex(&digest) }))
}

fn emit(result: OracleResult<Value>) -> ExitCode {
    match result {
        Ok(value) => {
            println!("{}", json!({ "ok": value }));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!(
                "{}",
                json!({ "err": { "code": e.code(), "name": e.name(), "message": e.to_string() } })
            );
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) | None => {
            println!("Keccak Oracle v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(Commands::Derive) => emit(run_derive()),
        Some(Commands::Checksum) => emit(run_checksum()),
        Some(Commands::Hash) => emit(run_hash()),
        Some(Commands::Corpus { path }) => match CorpusRunner::load(&path) {
            Ok(runner) => {
                let results = runner.run_all();
                for (id, result) in &results.details {
                    if !result.is_pass() {
                        eprintln!("{}: {:?}", id, result);
                    }
                }
                println!("{}", results.summary());
                if results.all_passed() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
        Some(Commands::Selftest) => {
            let harness = DiffTestHarness::new();
            if !harness.has_reference() {
                eprintln!("built without the `reference` feature");
                return ExitCode::FAILURE;
            }
            let results = harness.sweep_all_variants(2);
            for repro in &results.failures {
                eprintln!("{}", repro.to_report());
            }
            println!("{}", results.summary());
            if results.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
