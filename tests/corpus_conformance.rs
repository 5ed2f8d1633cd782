//! Corpus-based conformance tests.
//!
//! Runs every vector in `corpus/vectors.json` against the library.

use keccak_oracle::conformance::{CorpusResults, CorpusRunner, TestResult};
use std::path::{Path, PathBuf};

/// Path to the corpus file relative to the crate root.
const CORPUS_PATH: &str = "corpus/vectors.json";

fn corpus_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(CORPUS_PATH)
}

fn run_corpus() -> CorpusResults {
    CorpusRunner::load(corpus_path())
        .expect("Failed to load corpus")
        .run_all()
}

/// Assert every vector whose id starts with `prefix` passed; returns how many ran.
fn assert_group_passes(results: &CorpusResults, prefix: &str) -> usize {
    let group: Vec<_> = results
        .details
        .iter()
        .filter(|(id, _)| id.starts_with(prefix))
        .collect();
    for (id, result) in &group {
        if !result.is_pass() {
            panic!("{} did not pass: {:?}", id, result);
        }
    }
    group.len()
}

/// Load and run the full corpus.
#[test]
fn test_full_corpus() {
    let runner = CorpusRunner::load(corpus_path()).expect("Failed to load corpus");
    println!("Loaded corpus with {} vectors", runner.vector_count());

    let results = runner.run_all();
    println!("\n=== Corpus Conformance Results ===");
    println!("{}", results.summary());

    if !results.failures().is_empty() {
        println!("\nFailures:");
        for (id, result) in results.failures() {
            if let TestResult::Fail { expected, actual } = result {
                println!("  {} - expected: {}, actual: {}", id, expected, actual);
            }
        }
    }

    assert!(
        results.all_passed(),
        "Corpus conformance failed: {}",
        results.summary()
    );
    assert_eq!(results.skipped, 0, "corpus uses only supported operations");
}

#[test]
fn test_corpus_manifest() {
    let runner = CorpusRunner::load(corpus_path()).expect("Failed to load corpus");
    let manifest = runner.manifest();
    assert_eq!(manifest.format_version, "1");
    assert!(!manifest.sources.is_empty());
}

#[test]
fn test_corpus_hash_vectors() {
    let results = run_corpus();
    let n = assert_group_passes(&results, "sha3_")
        + assert_group_passes(&results, "shake")
        + assert_group_passes(&results, "keccak256_");
    assert!(n >= 12, "expected the full hash family, ran {}", n);
}

#[test]
fn test_corpus_address_vectors() {
    let results = run_corpus();
    assert!(assert_group_passes(&results, "derive_") >= 3);
    assert!(assert_group_passes(&results, "checksum_") >= 6);
}

#[test]
fn test_corpus_hex_vectors() {
    let results = run_corpus();
    assert!(assert_group_passes(&results, "hex_") >= 4);
}

#[test]
fn test_missing_corpus_file() {
    assert!(CorpusRunner::load(corpus_path().with_extension("missing")).is_err());
}
