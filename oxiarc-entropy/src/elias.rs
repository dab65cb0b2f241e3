//! Elias-delta (component D) and Elias-omega (component E): universal
//! codings built from a length-prefixed binary representation of `v + 1`.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::{OxiArcError, Result};
use std::io::{Read, Write};

use crate::coding::UniversalCoding;
use crate::util::{bit_length_u32, bit_length_u64};

/// γ-length-prefixed binary universal coding (spec.md §4.2).
///
/// Encodes `x = v + 1` as `L2 - 1` zeros, then the bit-length `L` of `x`
/// in `L2 = ⌊log2 L⌋ + 1` bits, then the low `L - 1` bits of `x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EliasDeltaCoding;

impl EliasDeltaCoding {
    /// Create a new Elias-delta coding.
    pub fn new() -> Self {
        Self
    }

    fn encode_u64<W: Write>(writer: &mut BitWriter<W>, value: u64) -> Result<u32> {
        let x = value + 1;
        let l = bit_length_u64(x);
        let l2 = bit_length_u32(l);
        let mut bits = 0u32;
        bits += writer.write_booleans(false, l2 - 1)?;
        writer.write_long(l as u64, l2 as u8)?;
        bits += l2;
        let low_bits = l - 1;
        writer.write_long(x, low_bits as u8)?;
        bits += low_bits;
        Ok(bits)
    }

    fn decode_u64<R: Read>(reader: &mut BitReader<R>, max_bits: u32) -> Result<u64> {
        let z = reader.read_until(true)?;
        if z == 0 {
            return Ok(0);
        }
        if z > 31 {
            return Err(OxiArcError::value_too_large(z as u32, max_bits));
        }
        let rest = reader.read(z as u8)?;
        let l = (1u32 << z) | rest;
        let low_bits = l - 1;
        if low_bits > max_bits {
            return Err(OxiArcError::value_too_large(low_bits, max_bits));
        }
        let x = if low_bits == 0 {
            1u64
        } else {
            (1u64 << low_bits) | reader.read_long(low_bits as u8)?
        };
        Ok(x - 1)
    }
}

impl UniversalCoding for EliasDeltaCoding {
    fn unsafe_encode_positive_fixed<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u32,
    ) -> Result<u32> {
        Self::encode_u64(writer, value as u64)
    }

    fn unsafe_encode_positive_wide<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u64,
    ) -> Result<u32> {
        Self::encode_u64(writer, value)
    }

    fn unsafe_encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &BigUint,
    ) -> Result<u64> {
        let x = value + BigUint::one();
        let l = x.bits();
        let l2 = bit_length_u64(l) as u64;
        let mut bits = 0u64;
        bits += writer.write_booleans(false, (l2 - 1) as u32)? as u64;
        writer.write_big(&BigUint::from(l), l2 as u32)?;
        bits += l2;
        let low_bits = l - 1;
        writer.write_big(&x, low_bits as u32)?;
        bits += low_bits;
        Ok(bits)
    }

    fn unsafe_decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        Self::decode_u64(reader, 31).map(|v| v as u32)
    }

    fn unsafe_decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64> {
        Self::decode_u64(reader, 63)
    }

    fn unsafe_decode_positive_unbounded<R: Read>(
        &self,
        reader: &mut BitReader<R>,
    ) -> Result<BigUint> {
        let z = reader.read_until(true)?;
        if z == 0 {
            return Ok(BigUint::zero());
        }
        let rest = reader.read_big(z as u32)?;
        let l = (BigUint::from(1u32) << z) | rest;
        let l_val = l.to_u64_digits().first().copied().unwrap_or(0);
        let low_bits = l_val - 1;
        let x = if low_bits == 0 {
            BigUint::one()
        } else {
            (BigUint::from(1u32) << low_bits) | reader.read_big(low_bits as u32)?
        };
        Ok(x - BigUint::one())
    }
}

/// Recursive length-prefixed binary universal coding (spec.md §4.3).
///
/// Encodes `x = v + 1` recursively: while `x != 1`, prepend the `⌊log2 x⌋ + 1`-bit
/// encoding of `x` and continue with `x = ⌊log2 x⌋`, finally terminated by a `0` bit.
#[derive(Debug, Clone, Copy, Default)]
pub struct EliasOmegaCoding;

impl EliasOmegaCoding {
    /// Create a new Elias-omega coding.
    pub fn new() -> Self {
        Self
    }

    fn encode_u64<W: Write>(writer: &mut BitWriter<W>, value: u64) -> Result<u32> {
        let mut x = value + 1;
        let mut groups = Vec::new();
        while x != 1 {
            let len = bit_length_u64(x);
            groups.push((x, len));
            x = (len - 1) as u64;
        }
        let mut bits = 0u32;
        for (group_value, len) in groups.into_iter().rev() {
            writer.write_long(group_value, len as u8)?;
            bits += len;
        }
        writer.write_bit(false)?;
        bits += 1;
        Ok(bits)
    }

    fn decode_u64<R: Read>(reader: &mut BitReader<R>, max_bits: u32) -> Result<u64> {
        let mut x = 1u64;
        loop {
            if !reader.read_bit()? {
                if bit_length_u64(x - 1) > max_bits {
                    return Err(OxiArcError::value_too_large(bit_length_u64(x - 1), max_bits));
                }
                return Ok(x - 1);
            }
            if x > 63 {
                return Err(OxiArcError::value_too_large(x as u32, max_bits));
            }
            let extra = reader.read_long(x as u8)?;
            x = (1u64 << x) | extra;
        }
    }
}

impl UniversalCoding for EliasOmegaCoding {
    fn unsafe_encode_positive_fixed<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u32,
    ) -> Result<u32> {
        Self::encode_u64(writer, value as u64)
    }

    fn unsafe_encode_positive_wide<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u64,
    ) -> Result<u32> {
        Self::encode_u64(writer, value)
    }

    fn unsafe_encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &BigUint,
    ) -> Result<u64> {
        let mut x = value + BigUint::one();
        let one = BigUint::one();
        let mut groups: Vec<(BigUint, u64)> = Vec::new();
        while x != one {
            let len = x.bits();
            groups.push((x.clone(), len));
            x = BigUint::from(len - 1);
        }
        let mut bits = 0u64;
        for (group_value, len) in groups.into_iter().rev() {
            writer.write_big(&group_value, len as u32)?;
            bits += len;
        }
        writer.write_bit(false)?;
        bits += 1;
        Ok(bits)
    }

    fn unsafe_decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        Self::decode_u64(reader, 31).map(|v| v as u32)
    }

    fn unsafe_decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64> {
        Self::decode_u64(reader, 63)
    }

    fn unsafe_decode_positive_unbounded<R: Read>(
        &self,
        reader: &mut BitReader<R>,
    ) -> Result<BigUint> {
        let mut x = BigUint::one();
        loop {
            if !reader.read_bit()? {
                return Ok(x - BigUint::one());
            }
            let shift = x.to_u64_digits().first().copied().unwrap_or(0);
            let extra = reader.read_big(shift as u32)?;
            x = (BigUint::from(1u32) << shift) | extra;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::Coding;
    use std::io::Cursor;

    fn roundtrip_fixed(coding: &impl Coding, values: &[i32]) -> Vec<u8> {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            for &v in values {
                coding.encode_positive_fixed(&mut writer, v).unwrap();
            }
            writer.flush().unwrap();
        }
        let mut reader = BitReader::new(Cursor::new(&output));
        for &v in values {
            assert_eq!(coding.decode_positive_fixed(&mut reader).unwrap(), v as u32);
        }
        output
    }

    #[test]
    fn test_elias_delta_s1_table() {
        let coding = EliasDeltaCoding::new();
        let output = roundtrip_fixed(&coding, &[0, 1, 2, 3, 4]);
        // "1 0100 0101 01100 01101" = 1_0100_0101_0110_0011_01 padded
        let mut expected_bits = String::new();
        expected_bits.push_str("1");
        expected_bits.push_str("0100");
        expected_bits.push_str("0101");
        expected_bits.push_str("01100");
        expected_bits.push_str("01101");
        while expected_bits.len() % 8 != 0 {
            expected_bits.push('0');
        }
        let expected_bytes: Vec<u8> = expected_bits
            .as_bytes()
            .chunks(8)
            .map(|chunk| u8::from_str_radix(std::str::from_utf8(chunk).unwrap(), 2).unwrap())
            .collect();
        assert_eq!(output, expected_bytes);
    }

    #[test]
    fn test_elias_delta_roundtrip_wide_and_unbounded() {
        let coding = EliasDeltaCoding::new();
        for &v in &[0u64, 1, 2, 1000, u32::MAX as u64, (1u64 << 62) - 1] {
            let mut output = Vec::new();
            {
                let mut writer = BitWriter::new(&mut output);
                coding.encode_positive_wide(&mut writer, v as i64).unwrap();
                writer.flush().unwrap();
            }
            let mut reader = BitReader::new(Cursor::new(&output));
            assert_eq!(coding.decode_positive_wide(&mut reader).unwrap(), v);
        }

        for v in [0u32, 1, 255, 1_000_000] {
            let big = num_bigint::BigInt::from(v);
            let mut output = Vec::new();
            {
                let mut writer = BitWriter::new(&mut output);
                coding
                    .encode_positive_unbounded(&mut writer, &big)
                    .unwrap();
                writer.flush().unwrap();
            }
            let mut reader = BitReader::new(Cursor::new(&output));
            let decoded = coding.decode_positive_unbounded(&mut reader).unwrap();
            assert_eq!(decoded, BigUint::from(v));
        }
    }

    #[test]
    fn test_elias_omega_s1_style_table() {
        let coding = EliasOmegaCoding::new();
        roundtrip_fixed(&coding, &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_elias_omega_monotone_length() {
        let coding = EliasOmegaCoding::new();
        let mut last_len = 0u32;
        for v in 0..64 {
            let mut output = Vec::new();
            {
                let mut writer = BitWriter::new(&mut output);
                let bits = coding.encode_positive_fixed(&mut writer, v).unwrap();
                assert!(bits >= last_len);
                last_len = bits;
                writer.flush().unwrap();
            }
        }
    }

    #[test]
    fn test_negative_rejected() {
        let coding = EliasDeltaCoding::new();
        let mut output = Vec::new();
        let mut writer = BitWriter::new(&mut output);
        assert!(coding.encode_positive_fixed(&mut writer, -1).is_err());
    }
}
