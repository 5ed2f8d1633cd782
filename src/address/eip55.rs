//! EIP-55 mixed-case checksum encoding.
//!
//! The checksum hash is Keccak-256 over the 40 lowercase ASCII hex characters
//! (the text, not the raw bytes). Character `i` is uppercased when nibble `i`
//! of that hash is 8 or more; digits consume a nibble but have no case.

use super::types::ADDRESS_LEN;
use crate::codec::strip_hex_prefix;
use crate::error::{ErrorCode, OracleResult};
use crate::keccak::{HashVariant, Sponge};

/// Hex characters in an address body.
pub const ADDRESS_HEX_LEN: usize = ADDRESS_LEN * 2;

/// Apply checksum casing to a 40-char lowercase hex body, returning `0x` +
/// the cased body.
///
/// `sponge` must be a Keccak-256 sponge; it is reset before use so callers can
/// keep one per worker.
pub(crate) fn checksum_with(sponge: &mut Sponge, lower: &[u8]) -> String {
    debug_assert_eq!(lower.len(), ADDRESS_HEX_LEN);
    sponge.reset();
    sponge.absorb(lower);
    let mut hash = [0u8; 32];
    sponge.squeeze(&mut hash);

    let mut out = String::with_capacity(2 + ADDRESS_HEX_LEN);
    out.push_str("0x");
    for (i, &c) in lower.iter().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        let c = if nibble >= 8 { c.to_ascii_uppercase() } else { c };
        out.push(c as char);
    }
    out
}

/// Validate address text and return its lowercase 40-char body.
fn parse_body(text: &str) -> OracleResult<[u8; ADDRESS_HEX_LEN]> {
    let body = strip_hex_prefix(text).as_bytes();
    if body.len() != ADDRESS_HEX_LEN {
        return Err(ErrorCode::E101_InvalidAddress(format!(
            "expected {} hex characters, got {}",
            ADDRESS_HEX_LEN,
            body.len()
        )));
    }
    let mut lower = [0u8; ADDRESS_HEX_LEN];
    for (i, (dst, &c)) in lower.iter_mut().zip(body).enumerate() {
        if !c.is_ascii_hexdigit() {
            return Err(ErrorCode::E101_InvalidAddress(format!(
                "invalid character {:?} at position {}",
                c as char, i
            )));
        }
        *dst = c.to_ascii_lowercase();
    }
    Ok(lower)
}

/// Re-case an address into its EIP-55 form.
///
/// Accepts 40 hex characters in any casing, with or without a `0x`/`0X`
/// prefix. Fails with `E101_InvalidAddress` on anything else.
pub fn to_checksum_address(text: &str) -> OracleResult<String> {
    let lower = parse_body(text)?;
    let mut sponge = Sponge::new(HashVariant::KECCAK_256);
    Ok(checksum_with(&mut sponge, &lower))
}

/// True when `text` is `0x`-prefixed and already carries EIP-55 casing.
///
/// Malformed text is simply not valid.
pub fn is_checksum_valid(text: &str) -> bool {
    if !text.starts_with("0x") {
        return false;
    }
    match to_checksum_address(text) {
        Ok(expected) => expected == text,
        Err(_) => false,
    }
}
