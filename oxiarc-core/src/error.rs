//! Error types for entropy coding operations.
//!
//! This module provides a single error type covering all three failure
//! kinds a coding can raise: caller-side argument errors, bit-stream I/O
//! failures, and structural violations found while decoding.

use std::io;
use thiserror::Error;

/// The main error type for entropy coding operations.
#[derive(Debug, Error)]
pub enum OxiArcError {
    /// I/O error from the underlying bit-stream reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Caller-side precondition violation: negative value, out-of-range
    /// alphabet index, NaN/infinite float, or a Unary value above its cap.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the violated precondition.
        message: String,
    },

    /// The stream ran out of bits before a complete code word was read.
    #[error("unexpected end of stream: expected {expected} more bits")]
    UnexpectedEof {
        /// Number of bits that were expected but not available.
        expected: u32,
    },

    /// A decoded value does not fit the requested width (Fixed/Wide).
    #[error("value too large for requested width: {bits} bits needed, {max_bits} available")]
    ValueTooLarge {
        /// Bits the decoded value actually needs.
        bits: u32,
        /// Bits the requested width provides.
        max_bits: u32,
    },

    /// A Huffman code word was assembled that does not exist in the
    /// canonical table, or the dictionary itself is not canonical.
    #[error("invalid prefix code at bit position {bit_position}")]
    InvalidPrefix {
        /// Bit position where decoding failed.
        bit_position: u64,
    },

    /// A Huffman dictionary failed a structural invariant (Kraft sum,
    /// non-decreasing lengths, length/correspondence size mismatch).
    #[error("invalid Huffman dictionary: {message}")]
    InvalidDictionary {
        /// Description of the violated invariant.
        message: String,
    },

    /// A Truncated-Binary value decoded from the wire is `>= N`.
    #[error("truncated-binary value {value} out of range for alphabet size {alphabet_size}")]
    OutOfRange {
        /// The out-of-range value.
        value: u64,
        /// The alphabet size it was checked against.
        alphabet_size: u64,
    },
}

/// Result type alias for entropy coding operations.
pub type Result<T> = std::result::Result<T, OxiArcError>;

impl OxiArcError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unexpected-EOF error.
    pub fn unexpected_eof(expected: u32) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create a value-too-large error.
    pub fn value_too_large(bits: u32, max_bits: u32) -> Self {
        Self::ValueTooLarge { bits, max_bits }
    }

    /// Create an invalid-prefix error.
    pub fn invalid_prefix(bit_position: u64) -> Self {
        Self::InvalidPrefix { bit_position }
    }

    /// Create an invalid-dictionary error.
    pub fn invalid_dictionary(message: impl Into<String>) -> Self {
        Self::InvalidDictionary {
            message: message.into(),
        }
    }

    /// Create an out-of-range error.
    pub fn out_of_range(value: u64, alphabet_size: u64) -> Self {
        Self::OutOfRange {
            value,
            alphabet_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiArcError::invalid_argument("negative value");
        assert!(err.to_string().contains("negative value"));

        let err = OxiArcError::out_of_range(9, 5);
        assert!(err.to_string().contains("9"));
        assert!(err.to_string().contains("5"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        let err: OxiArcError = io_err.into();
        assert!(matches!(err, OxiArcError::Io(_)));
    }
}
