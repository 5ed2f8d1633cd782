//! Byte/hex conversion used at the textual edges of the pipeline.
//!
//! Encoding is always lowercase; decoding accepts either case. A leading
//! `0x`/`0X` is not part of the hex alphabet; callers that accept prefixed
//! text strip it with [`strip_hex_prefix`] first.

use crate::error::{ErrorCode, OracleResult};
use hex::FromHexError;

/// Encode bytes as lowercase hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode hex text (either case) into bytes.
///
/// Fails with [`ErrorCode::E100_InvalidEncoding`] on odd length or on any
/// character outside `[0-9a-fA-F]`.
pub fn hex_to_bytes(text: &str) -> OracleResult<Vec<u8>> {
    hex::decode(text).map_err(encoding_error)
}

/// Decode hex text into a fixed-width array.
pub fn hex_to_array<const N: usize>(text: &str) -> OracleResult<[u8; N]> {
    let bytes = hex_to_bytes(text)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ErrorCode::E102_WrongLength(N as u64, bytes.len() as u64))
}

/// Remove one leading `0x` or `0X`, if present.
pub fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Check whether `text` looks like a Keccak-256 digest: optional `0x`/`0X`
/// prefix followed by exactly 64 hex characters.
pub fn is_keccak256_hex(text: &str) -> bool {
    let digits = strip_hex_prefix(text);
    digits.len() == 64 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

fn encoding_error(err: FromHexError) -> ErrorCode {
    let reason = match err {
        FromHexError::OddLength => "odd length".to_string(),
        FromHexError::InvalidHexCharacter { c, index } => {
            format!("invalid character {:?} at position {}", c, index)
        }
        FromHexError::InvalidStringLength => "invalid length".to_string(),
    };
    ErrorCode::E100_InvalidEncoding(reason)
}
