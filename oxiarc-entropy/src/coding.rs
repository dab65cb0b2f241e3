//! The `Coding` contract (component B) and the `UniversalCoding`
//! validation gate in front of it (component C).
//!
//! Every coding implements [`Coding`]: six methods pairing
//! encode/decode across three widths — Fixed (a machine word, ≤31 bits
//! of magnitude), Wide (a 64-bit word, ≤63 bits of magnitude), and
//! Unbounded (arbitrary precision via [`BigUint`]/[`BigInt`]).
//!
//! [`UniversalCoding`] is the template-method base every coding that
//! accepts *every* non-negative integer implements instead of `Coding`
//! directly: its blanket `impl<T: UniversalCoding> Coding for T` runs the
//! non-negativity check once and forwards to the `unsafe_*` hooks the
//! coding itself supplies. Non-universal codings (`TruncatedBinaryCoding`,
//! `HuffmanCoding`) implement `Coding` directly because their own
//! alphabet-bound checks replace the "reject negative" gate.

use num_bigint::{BigInt, BigUint};
use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::Result;
use std::io::{Read, Write};

use crate::util::{require_non_negative_big, require_non_negative_i32, require_non_negative_i64};

/// Encodes/decodes a single non-negative integer to/from a bit stream, in
/// three widths. Returns the number of bits the operation consumed
/// (decoders report this implicitly via the cursor; encoders return it
/// directly so callers can measure encoded length without a second pass).
pub trait Coding {
    /// Encode `value` using the Fixed width (machine word, ≤31 bits of
    /// magnitude). `value` is taken as a signed integer so that a
    /// negative argument is rejected rather than silently reinterpreted.
    fn encode_positive_fixed<W: Write>(&self, writer: &mut BitWriter<W>, value: i32) -> Result<u32>;

    /// Encode `value` using the Wide width (64-bit word, ≤63 bits of
    /// magnitude).
    fn encode_positive_wide<W: Write>(&self, writer: &mut BitWriter<W>, value: i64) -> Result<u32>;

    /// Encode `value` using the Unbounded width (arbitrary precision).
    fn encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &BigInt,
    ) -> Result<u64>;

    /// Decode the next value using the Fixed width.
    fn decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32>;

    /// Decode the next value using the Wide width.
    fn decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64>;

    /// Decode the next value using the Unbounded width.
    fn decode_positive_unbounded<R: Read>(&self, reader: &mut BitReader<R>) -> Result<BigUint>;
}

/// A [`Coding`] that accepts every non-negative integer (modulo the
/// Unary value cap documented on [`crate::unary::UnaryCoding`]).
///
/// Implementors supply `unsafe_*` hooks that assume the precondition
/// (`value >= 0`) already holds; the blanket [`Coding`] impl below
/// performs that check exactly once.
pub trait UniversalCoding {
    /// Encode `value`, which the caller has already validated as `>= 0`.
    fn unsafe_encode_positive_fixed<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u32,
    ) -> Result<u32>;

    /// Encode `value`, which the caller has already validated as `>= 0`.
    fn unsafe_encode_positive_wide<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u64,
    ) -> Result<u32>;

    /// Encode `value`, which the caller has already validated as `>= 0`.
    fn unsafe_encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &BigUint,
    ) -> Result<u64>;

    /// Decode the next value using the Fixed width.
    fn unsafe_decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32>;

    /// Decode the next value using the Wide width.
    fn unsafe_decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64>;

    /// Decode the next value using the Unbounded width.
    fn unsafe_decode_positive_unbounded<R: Read>(
        &self,
        reader: &mut BitReader<R>,
    ) -> Result<BigUint>;
}

impl<T: UniversalCoding> Coding for T {
    fn encode_positive_fixed<W: Write>(&self, writer: &mut BitWriter<W>, value: i32) -> Result<u32> {
        let value = require_non_negative_i32(value)?;
        self.unsafe_encode_positive_fixed(writer, value)
    }

    fn encode_positive_wide<W: Write>(&self, writer: &mut BitWriter<W>, value: i64) -> Result<u32> {
        let value = require_non_negative_i64(value)?;
        self.unsafe_encode_positive_wide(writer, value)
    }

    fn encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &BigInt,
    ) -> Result<u64> {
        let value = require_non_negative_big(value)?;
        self.unsafe_encode_positive_unbounded(writer, &value)
    }

    fn decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        self.unsafe_decode_positive_fixed(reader)
    }

    fn decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64> {
        self.unsafe_decode_positive_wide(reader)
    }

    fn decode_positive_unbounded<R: Read>(&self, reader: &mut BitReader<R>) -> Result<BigUint> {
        self.unsafe_decode_positive_unbounded(reader)
    }
}
