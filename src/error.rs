//! Error codes for the Keccak oracle.
//!
//! Every fallible operation in the crate reports one of these codes. All of
//! them are synchronous and deterministic: the operations are pure functions
//! of their inputs, so the same input always yields the same error and
//! nothing is retried internally.

use thiserror::Error;

/// All error codes surfaced by the library.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    /// Hex text has odd length or a non-hex character (code 100)
    #[error("E100_InvalidEncoding({0})")]
    E100_InvalidEncoding(/* reason */ String),

    /// Address text is not `0x` followed by 40 hex characters (code 101)
    #[error("E101_InvalidAddress({0})")]
    E101_InvalidAddress(/* reason */ String),

    /// Fixed-width hex decoded to the wrong number of bytes (code 102)
    #[error("E102_WrongLength({0}, {1})")]
    E102_WrongLength(/* expected */ u64, /* got */ u64),

    /// Public key is not exactly 64 bytes (code 200)
    #[error("E200_InvalidKeySize({0})")]
    E200_InvalidKeySize(/* got */ u64),

    /// Batch input count differs from the output slot count (code 300)
    #[error("E300_CountMismatch({0}, {1})")]
    E300_CountMismatch(/* inputs */ u64, /* slots */ u64),

    /// Invalid hash-variant descriptor or sponge misuse (code 400)
    #[error("E400_ConfigurationError({0})")]
    E400_ConfigurationError(/* reason */ String),
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::E100_InvalidEncoding(_) => 100,
            ErrorCode::E101_InvalidAddress(_) => 101,
            ErrorCode::E102_WrongLength(_, _) => 102,
            ErrorCode::E200_InvalidKeySize(_) => 200,
            ErrorCode::E300_CountMismatch(_, _) => 300,
            ErrorCode::E400_ConfigurationError(_) => 400,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E100_InvalidEncoding(_) => "E100_InvalidEncoding",
            ErrorCode::E101_InvalidAddress(_) => "E101_InvalidAddress",
            ErrorCode::E102_WrongLength(_, _) => "E102_WrongLength",
            ErrorCode::E200_InvalidKeySize(_) => "E200_InvalidKeySize",
            ErrorCode::E300_CountMismatch(_, _) => "E300_CountMismatch",
            ErrorCode::E400_ConfigurationError(_) => "E400_ConfigurationError",
        }
    }
}

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, ErrorCode>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_names_agree() {
        let all = [
            ErrorCode::E100_InvalidEncoding(String::new()),
            ErrorCode::E101_InvalidAddress(String::new()),
            ErrorCode::E102_WrongLength(32, 31),
            ErrorCode::E200_InvalidKeySize(63),
            ErrorCode::E300_CountMismatch(3, 2),
            ErrorCode::E400_ConfigurationError(String::new()),
        ];
        for e in &all {
            assert!(e.name().starts_with(&format!("E{}_", e.code())));
        }
    }

    #[test]
    fn test_display_carries_context() {
        let e = ErrorCode::E300_CountMismatch(3, 2);
        assert_eq!(e.to_string(), "E300_CountMismatch(3, 2)");
    }
}
