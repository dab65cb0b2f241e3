//! Small shared helpers: bit-length and argument validation.

use num_bigint::BigInt;
use num_traits::Signed;
use oxiarc_core::error::{OxiArcError, Result};

/// Number of bits needed to represent `x` (0 for `x == 0`), i.e. `floor(log2(x)) + 1`.
pub fn bit_length_u32(x: u32) -> u32 {
    32 - x.leading_zeros()
}

/// Number of bits needed to represent `x` (0 for `x == 0`).
pub fn bit_length_u64(x: u64) -> u32 {
    64 - x.leading_zeros()
}

/// Reject a negative signed value, converting it to `u32` on success.
pub fn require_non_negative_i32(value: i32) -> Result<u32> {
    if value < 0 {
        return Err(OxiArcError::invalid_argument(
            "value must be non-negative",
        ));
    }
    Ok(value as u32)
}

/// Reject a negative signed value, converting it to `u64` on success.
pub fn require_non_negative_i64(value: i64) -> Result<u64> {
    if value < 0 {
        return Err(OxiArcError::invalid_argument(
            "value must be non-negative",
        ));
    }
    Ok(value as u64)
}

/// Reject a negative big integer, converting it to `BigUint` on success.
pub fn require_non_negative_big(value: &BigInt) -> Result<num_bigint::BigUint> {
    if value.is_negative() {
        return Err(OxiArcError::invalid_argument(
            "value must be non-negative",
        ));
    }
    Ok(value.magnitude().clone())
}
