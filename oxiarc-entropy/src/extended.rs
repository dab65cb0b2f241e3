//! ExtendedCoding (component J): signed integers, IEEE-754 floats, and
//! arbitrary-precision decimals layered on top of any [`UniversalCoding`].

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, ToPrimitive, Zero};
use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::{OxiArcError, Result};
use std::io::{Read, Write};

use crate::coding::{Coding, UniversalCoding};

const FLOAT_EXPONENT_BITS: u8 = 8;
const FLOAT_MANTISSA_BITS: u8 = 23;
const DOUBLE_EXPONENT_BITS: u8 = 11;
const DOUBLE_MANTISSA_BITS: u8 = 52;

fn zigzag_encode_i64(v: i64) -> u64 {
    if v >= 0 {
        // 2v - 1 would underflow for v == 0; the 0 -> 0 case is handled
        // by the caller's >= 0 branch producing 2v (shifted by the -1
        // below only for v > 0).
        if v == 0 {
            0
        } else {
            (v as u64).wrapping_mul(2).wrapping_sub(1)
        }
    } else {
        (v as i128).unsigned_abs() as u64 * 2
    }
}

fn zigzag_decode_u64(u: u64) -> i64 {
    if u & 1 == 1 {
        ((u >> 1) + 1) as i64
    } else {
        -((u >> 1) as i64)
    }
}

fn zigzag_encode_big(v: &BigInt) -> BigUint {
    if v.is_negative() {
        (-v * 2u32).magnitude().clone()
    } else if v.is_zero() {
        BigUint::zero()
    } else {
        (v * 2u32 - BigInt::from(1)).magnitude().clone()
    }
}

fn zigzag_decode_big(u: &BigUint) -> BigInt {
    if u.is_zero() {
        return BigInt::from(0);
    }
    if u % 2u32 == BigUint::from(1u32) {
        BigInt::from((u >> 1u32) + BigUint::from(1u32))
    } else {
        -BigInt::from(u >> 1u32)
    }
}

/// Layered wrapper providing signed integer, float/double, and
/// `BigDecimal` codecs atop a wrapped [`UniversalCoding`] (spec.md §4.8).
#[derive(Debug, Clone, Copy)]
pub struct ExtendedCoding<C> {
    inner: C,
}

impl<C: UniversalCoding> ExtendedCoding<C> {
    /// Wrap `inner` to provide the extended (signed/float/decimal) codecs.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// The wrapped universal coding.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Encode a signed 32-bit integer via zig-zag mapping.
    pub fn encode_int<W: Write>(&self, writer: &mut BitWriter<W>, value: i32) -> Result<u32> {
        let u = zigzag_encode_i64(value as i64);
        self.inner.encode_positive_wide(writer, u as i64)
    }

    /// Decode a signed 32-bit integer.
    pub fn decode_int<R: Read>(&self, reader: &mut BitReader<R>) -> Result<i32> {
        let u = self.inner.decode_positive_wide(reader)?;
        let v = zigzag_decode_u64(u);
        i32::try_from(v).map_err(|_| OxiArcError::value_too_large(64, 32))
    }

    /// Encode a signed 64-bit integer via zig-zag mapping.
    ///
    /// Routed through the Unbounded width: `zigzag(i64::MIN)` is `2^64`,
    /// one past `u64::MAX`, so a plain `u64` zig-zag can overflow at the
    /// extreme boundary.
    pub fn encode_long<W: Write>(&self, writer: &mut BitWriter<W>, value: i64) -> Result<u64> {
        let u = zigzag_encode_big(&BigInt::from(value));
        self.inner
            .encode_positive_unbounded(writer, &BigInt::from(u))
    }

    /// Decode a signed 64-bit integer.
    pub fn decode_long<R: Read>(&self, reader: &mut BitReader<R>) -> Result<i64> {
        let u = self.inner.decode_positive_unbounded(reader)?;
        let v = zigzag_decode_big(&u);
        v.to_i64()
            .ok_or_else(|| OxiArcError::value_too_large(128, 64))
    }

    /// Encode an arbitrary-precision signed integer via zig-zag mapping.
    pub fn encode_big<W: Write>(&self, writer: &mut BitWriter<W>, value: &BigInt) -> Result<u64> {
        let u = zigzag_encode_big(value);
        self.inner
            .encode_positive_unbounded(writer, &BigInt::from(u))
    }

    /// Decode an arbitrary-precision signed integer.
    pub fn decode_big<R: Read>(&self, reader: &mut BitReader<R>) -> Result<BigInt> {
        let u = self.inner.decode_positive_unbounded(reader)?;
        Ok(zigzag_decode_big(&u))
    }

    /// Encode an `f32`. Rejects NaN and infinities with an argument error.
    ///
    /// Transmits the IEEE-754 sign, biased exponent, and mantissa fields
    /// as three plain non-negative integers through the wrapped coding —
    /// a dedicated single-precision path, not routed through the double
    /// encoder. Preserves subnormals and signed zero losslessly.
    pub fn encode_float<W: Write>(&self, writer: &mut BitWriter<W>, value: f32) -> Result<u32> {
        if value.is_nan() || value.is_infinite() {
            return Err(OxiArcError::invalid_argument(
                "cannot encode NaN or infinite float",
            ));
        }
        let bits = value.to_bits();
        let sign = bits >> 31;
        let exponent = (bits >> FLOAT_MANTISSA_BITS) & ((1 << FLOAT_EXPONENT_BITS) - 1);
        let mantissa = bits & ((1 << FLOAT_MANTISSA_BITS) - 1);
        writer.write_bit(sign != 0)?;
        let mut total = 1u32;
        total += self
            .inner
            .encode_positive_fixed(writer, exponent as i32)?;
        total += self
            .inner
            .encode_positive_fixed(writer, mantissa as i32)?;
        Ok(total)
    }

    /// Decode an `f32` written by [`Self::encode_float`].
    pub fn decode_float<R: Read>(&self, reader: &mut BitReader<R>) -> Result<f32> {
        let sign = reader.read_bit()? as u32;
        let exponent = self.inner.decode_positive_fixed(reader)?;
        let mantissa = self.inner.decode_positive_fixed(reader)?;
        if exponent >= 1 << FLOAT_EXPONENT_BITS || mantissa >= 1 << FLOAT_MANTISSA_BITS {
            return Err(OxiArcError::invalid_argument(
                "decoded float exponent or mantissa out of range",
            ));
        }
        let bits = (sign << 31) | (exponent << FLOAT_MANTISSA_BITS) | mantissa;
        Ok(f32::from_bits(bits))
    }

    /// Encode an `f64`. Rejects NaN and infinities with an argument error.
    pub fn encode_double<W: Write>(&self, writer: &mut BitWriter<W>, value: f64) -> Result<u32> {
        if value.is_nan() || value.is_infinite() {
            return Err(OxiArcError::invalid_argument(
                "cannot encode NaN or infinite double",
            ));
        }
        let bits = value.to_bits();
        let sign = bits >> 63;
        let exponent = (bits >> DOUBLE_MANTISSA_BITS) & ((1 << DOUBLE_EXPONENT_BITS) - 1);
        let mantissa = bits & ((1u64 << DOUBLE_MANTISSA_BITS) - 1);
        writer.write_bit(sign != 0)?;
        let mut total = 1u32;
        total += self
            .inner
            .encode_positive_fixed(writer, exponent as i32)?;
        total += self
            .inner
            .encode_positive_wide(writer, mantissa as i64)?;
        Ok(total)
    }

    /// Decode an `f64` written by [`Self::encode_double`].
    pub fn decode_double<R: Read>(&self, reader: &mut BitReader<R>) -> Result<f64> {
        let sign = reader.read_bit()? as u64;
        let exponent = self.inner.decode_positive_fixed(reader)? as u64;
        let mantissa = self.inner.decode_positive_wide(reader)?;
        if exponent >= 1 << DOUBLE_EXPONENT_BITS || mantissa >= 1 << DOUBLE_MANTISSA_BITS {
            return Err(OxiArcError::invalid_argument(
                "decoded double exponent or mantissa out of range",
            ));
        }
        let bits = (sign << 63) | (exponent << DOUBLE_MANTISSA_BITS) | mantissa;
        Ok(f64::from_bits(bits))
    }

    /// Encode a `BigDecimal`-shaped value as `(scale, unscaled)`.
    pub fn encode_decimal<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        scale: i64,
        unscaled: &BigInt,
    ) -> Result<u64> {
        let mut bits = self.encode_long(writer, scale)? as u64;
        bits += self.encode_big(writer, unscaled)?;
        Ok(bits)
    }

    /// Decode a `(scale, unscaled)` pair written by [`Self::encode_decimal`].
    pub fn decode_decimal<R: Read>(&self, reader: &mut BitReader<R>) -> Result<(i64, BigInt)> {
        let scale = self.decode_long(reader)?;
        let unscaled = self.decode_big(reader)?;
        Ok((scale, unscaled))
    }
}
