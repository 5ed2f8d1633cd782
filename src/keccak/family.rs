//! One-shot hash functions for the named variants.

use super::sponge::Sponge;
use super::variant::{HashVariant, OutputLength};
use crate::error::{ErrorCode, OracleResult};

/// Largest output [`xof`] and [`hash_with_len`] will produce (16 MiB).
pub const MAX_XOF_OUTPUT: usize = 1 << 24;

fn fixed<const N: usize>(variant: HashVariant, data: &[u8]) -> [u8; N] {
    let mut sponge = Sponge::new(variant);
    sponge.absorb(data);
    let mut out = [0u8; N];
    sponge.squeeze(&mut out);
    out
}

fn extendable(variant: HashVariant, data: &[u8], len: usize) -> Vec<u8> {
    let mut sponge = Sponge::new(variant);
    sponge.absorb(data);
    sponge.squeeze_vec(len)
}

/// Legacy Keccak-256 (0x01 padding), the Ethereum hash.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    fixed(HashVariant::KECCAK_256, data)
}

/// SHA3-224.
pub fn sha3_224(data: &[u8]) -> [u8; 28] {
    fixed(HashVariant::SHA3_224, data)
}

/// SHA3-256.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    fixed(HashVariant::SHA3_256, data)
}

/// SHA3-384.
pub fn sha3_384(data: &[u8]) -> [u8; 48] {
    fixed(HashVariant::SHA3_384, data)
}

/// SHA3-512.
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    fixed(HashVariant::SHA3_512, data)
}

/// SHAKE128 with `len` output bytes.
pub fn shake128(data: &[u8], len: usize) -> Vec<u8> {
    extendable(HashVariant::SHAKE128, data, len)
}

/// SHAKE256 with `len` output bytes.
pub fn shake256(data: &[u8], len: usize) -> Vec<u8> {
    extendable(HashVariant::SHAKE256, data, len)
}

/// Hash with a fixed-output variant.
///
/// Extendable variants need a length; use [`xof`] for those.
pub fn digest(variant: HashVariant, data: &[u8]) -> OracleResult<Vec<u8>> {
    match variant.output() {
        OutputLength::Fixed(n) => Ok(extendable(variant, data, n)),
        OutputLength::Extendable => Err(ErrorCode::E400_ConfigurationError(format!(
            "{} requires an output length",
            variant
        ))),
    }
}

/// Hash with an extendable-output variant, producing `len` bytes.
///
/// `len` above [`MAX_XOF_OUTPUT`] is `E400_ConfigurationError`.
pub fn xof(variant: HashVariant, data: &[u8], len: usize) -> OracleResult<Vec<u8>> {
    match variant.output() {
        OutputLength::Extendable if len > MAX_XOF_OUTPUT => {
            Err(ErrorCode::E400_ConfigurationError(format!(
                "output length {} exceeds maximum {}",
                len, MAX_XOF_OUTPUT
            )))
        }
        OutputLength::Extendable => Ok(extendable(variant, data, len)),
        OutputLength::Fixed(_) => Err(ErrorCode::E400_ConfigurationError(format!(
            "{} has a fixed output length",
            variant
        ))),
    }
}

/// Dispatch on the variant's output policy.
///
/// Fixed variants accept `len` only when it is absent or equal to their
/// digest length; extendable variants require it.
pub fn hash_with_len(
    variant: HashVariant,
    data: &[u8],
    len: Option<usize>,
) -> OracleResult<Vec<u8>> {
    match (variant.output(), len) {
        (OutputLength::Fixed(n), Some(requested)) if requested != n => {
            Err(ErrorCode::E400_ConfigurationError(format!(
                "{} produces {} bytes, not {}",
                variant, n, requested
            )))
        }
        (OutputLength::Fixed(_), _) => digest(variant, data),
        (OutputLength::Extendable, Some(requested)) => xof(variant, data, requested),
        (OutputLength::Extendable, None) => digest(variant, data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_sha3_256_empty() {
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_shake128_empty() {
        assert_eq!(
            hex::encode(shake128(b"", 32)),
            "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
        );
    }

    #[test]
    fn test_digest_rejects_xof() {
        assert_eq!(digest(HashVariant::SHAKE128, b"").unwrap_err().code(), 400);
        assert_eq!(xof(HashVariant::SHA3_256, b"", 32).unwrap_err().code(), 400);
    }

    #[test]
    fn test_hash_with_len() {
        let d = hash_with_len(HashVariant::SHA3_512, b"abc", None).unwrap();
        assert_eq!(d, sha3_512(b"abc").to_vec());
        assert!(hash_with_len(HashVariant::SHA3_512, b"abc", Some(64)).is_ok());
        assert!(hash_with_len(HashVariant::SHA3_512, b"abc", Some(32)).is_err());
        assert_eq!(
            hash_with_len(HashVariant::SHAKE256, b"abc", Some(300)).unwrap().len(),
            300
        );
        assert!(hash_with_len(HashVariant::SHAKE256, b"abc", None).is_err());
    }

    #[test]
    fn test_xof_output_limit() {
        assert_eq!(
            xof(HashVariant::SHAKE128, b"", MAX_XOF_OUTPUT).unwrap().len(),
            MAX_XOF_OUTPUT
        );
        for len in [MAX_XOF_OUTPUT + 1, usize::MAX] {
            let err = hash_with_len(HashVariant::SHAKE128, b"", Some(len)).unwrap_err();
            assert_eq!(err.name(), "E400_ConfigurationError");
        }
        // Fixed variants report the length mismatch, not the cap.
        assert_eq!(
            hash_with_len(HashVariant::SHA3_256, b"", Some(usize::MAX)).unwrap_err().code(),
            400
        );
    }
}
