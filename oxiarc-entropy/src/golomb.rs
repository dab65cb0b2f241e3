//! Golomb and Rice coding (component I): unary quotient plus
//! truncated-binary remainder.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::ToPrimitive;
use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::{OxiArcError, Result};
use std::io::{Read, Write};

use crate::coding::{Coding, UniversalCoding};
use crate::truncated_binary::TruncatedBinaryCoding;
use crate::unary::UnaryCoding;

/// `q = ⌊v / m⌋` in zero-terminated unary, then `r = v − q·m` in
/// truncated-binary over `[0, m)` (spec.md §4.7).
#[derive(Debug, Clone)]
pub struct GolombCoding {
    divisor: u64,
    remainder: TruncatedBinaryCoding,
    quotient: UnaryCoding,
}

impl GolombCoding {
    /// Create a Golomb coding with divisor `m >= 1`.
    pub fn new(divisor: u64) -> Result<Self> {
        if divisor == 0 {
            return Err(OxiArcError::invalid_argument("golomb divisor must be >= 1"));
        }
        Ok(Self {
            divisor,
            remainder: TruncatedBinaryCoding::new(divisor)?,
            quotient: UnaryCoding::new(false),
        })
    }

    /// The divisor `m` this coding was constructed with.
    pub fn divisor(&self) -> u64 {
        self.divisor
    }
}

impl UniversalCoding for GolombCoding {
    fn unsafe_encode_positive_fixed<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u32,
    ) -> Result<u32> {
        let value = value as u64;
        let q = value / self.divisor;
        let r = value - q * self.divisor;
        let mut bits = self.quotient.unsafe_encode_positive_wide(writer, q)?;
        bits += self.remainder.encode_positive_fixed(writer, r as i32)?;
        Ok(bits)
    }

    fn unsafe_encode_positive_wide<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u64,
    ) -> Result<u32> {
        let q = value / self.divisor;
        let r = value - q * self.divisor;
        let mut bits = self.quotient.unsafe_encode_positive_wide(writer, q)?;
        bits += self.remainder.encode_positive_wide(writer, r as i64)?;
        Ok(bits)
    }

    fn unsafe_encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &BigUint,
    ) -> Result<u64> {
        let divisor = BigUint::from(self.divisor);
        let (q, r) = value.div_mod_floor(&divisor);
        let q = q.to_u64().ok_or_else(|| {
            OxiArcError::invalid_argument("golomb quotient exceeds the unary cap")
        })?;
        let mut bits = self.quotient.unsafe_encode_positive_wide(writer, q)? as u64;
        bits += self
            .remainder
            .encode_positive_wide(writer, r.to_u64().unwrap_or(0) as i64)? as u64;
        Ok(bits)
    }

    fn unsafe_decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        let q = self.quotient.unsafe_decode_positive_wide(reader)?;
        let r = self.remainder.decode_positive_fixed(reader)? as u64;
        Ok((q * self.divisor + r) as u32)
    }

    fn unsafe_decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64> {
        let q = self.quotient.unsafe_decode_positive_wide(reader)?;
        let r = self.remainder.decode_positive_wide(reader)?;
        Ok(q * self.divisor + r)
    }

    fn unsafe_decode_positive_unbounded<R: Read>(
        &self,
        reader: &mut BitReader<R>,
    ) -> Result<BigUint> {
        let q = self.quotient.unsafe_decode_positive_wide(reader)?;
        let r = self.remainder.decode_positive_wide(reader)?;
        Ok(BigUint::from(q) * BigUint::from(self.divisor) + BigUint::from(r))
    }
}

/// `GolombCoding` specialized to a power-of-two divisor `m = 2^k`: the
/// truncated-binary remainder collapses to a fixed `k`-bit field, so
/// encode/decode use a direct bit-shift instead of going through
/// [`TruncatedBinaryCoding`]. Produces bit-identical output to
/// `GolombCoding::new(1 << k)` (spec.md §8 property 11).
#[derive(Debug, Clone, Copy)]
pub struct RiceCoding {
    k: u32,
    quotient: UnaryCoding,
}

impl RiceCoding {
    /// Create a Rice coding with divisor `2^k`.
    pub fn new(k: u32) -> Self {
        Self {
            k,
            quotient: UnaryCoding::new(false),
        }
    }

    /// The exponent `k` (divisor is `2^k`).
    pub fn k(&self) -> u32 {
        self.k
    }
}

impl UniversalCoding for RiceCoding {
    fn unsafe_encode_positive_fixed<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u32,
    ) -> Result<u32> {
        let q = value >> self.k;
        let r = value & ((1u32 << self.k) - 1);
        let mut bits = self.quotient.unsafe_encode_positive_wide(writer, q as u64)?;
        writer.write(r, self.k as u8)?;
        bits += self.k;
        Ok(bits)
    }

    fn unsafe_encode_positive_wide<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u64,
    ) -> Result<u32> {
        let q = value >> self.k;
        let r = value & ((1u64 << self.k) - 1);
        let mut bits = self.quotient.unsafe_encode_positive_wide(writer, q)?;
        writer.write_long(r, self.k as u8)?;
        bits += self.k;
        Ok(bits)
    }

    fn unsafe_encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &BigUint,
    ) -> Result<u64> {
        let q = value >> self.k;
        let r = value - (&q << self.k);
        let q = q
            .to_u64()
            .ok_or_else(|| OxiArcError::invalid_argument("rice quotient exceeds the unary cap"))?;
        let mut bits = self.quotient.unsafe_encode_positive_wide(writer, q)? as u64;
        writer.write_big(&r, self.k)?;
        bits += self.k as u64;
        Ok(bits)
    }

    fn unsafe_decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        let q = self.quotient.unsafe_decode_positive_wide(reader)?;
        let r = reader.read(self.k as u8)?;
        Ok(((q as u32) << self.k) | r)
    }

    fn unsafe_decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64> {
        let q = self.quotient.unsafe_decode_positive_wide(reader)?;
        let r = reader.read_long(self.k as u8)?;
        Ok((q << self.k) | r)
    }

    fn unsafe_decode_positive_unbounded<R: Read>(
        &self,
        reader: &mut BitReader<R>,
    ) -> Result<BigUint> {
        let q = self.quotient.unsafe_decode_positive_wide(reader)?;
        let r = reader.read_big(self.k)?;
        Ok((BigUint::from(q) << self.k) | r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::Coding;
    use std::io::Cursor;

    #[test]
    fn test_golomb_divisor_four_roundtrip() {
        let coding = GolombCoding::new(4).unwrap();
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            for v in 0..40 {
                coding.encode_positive_fixed(&mut writer, v).unwrap();
            }
            writer.flush().unwrap();
        }
        let mut reader = BitReader::new(Cursor::new(&output));
        for v in 0..40 {
            assert_eq!(coding.decode_positive_fixed(&mut reader).unwrap(), v as u32);
        }
    }

    #[test]
    fn test_golomb_divisor_four_known_codes() {
        // Computed directly from the §4.7 definition: q = v/4 in
        // zero-terminated unary, r = v%4 in 2-bit truncated binary.
        let coding = GolombCoding::new(4).unwrap();
        for (v, expected) in [(0u32, "000"), (1, "001"), (2, "010"), (3, "011"), (4, "1000")] {
            let mut output = Vec::new();
            let bits = {
                let mut writer = BitWriter::new(&mut output);
                let bits = coding.encode_positive_fixed(&mut writer, v as i32).unwrap();
                writer.flush().unwrap();
                bits
            };
            let actual: String = output
                .iter()
                .map(|b| format!("{:08b}", b))
                .collect::<Vec<_>>()
                .join("");
            assert!(actual.starts_with(expected), "v={v} bits={bits}");
        }
    }

    #[test]
    fn test_golomb_rice_equivalence() {
        let golomb = GolombCoding::new(8).unwrap(); // 2^3
        let rice = RiceCoding::new(3);
        for v in 0..200u32 {
            let mut golomb_out = Vec::new();
            let mut rice_out = Vec::new();
            {
                let mut w = BitWriter::new(&mut golomb_out);
                golomb.encode_positive_fixed(&mut w, v as i32).unwrap();
                w.flush().unwrap();
            }
            {
                let mut w = BitWriter::new(&mut rice_out);
                rice.encode_positive_fixed(&mut w, v as i32).unwrap();
                w.flush().unwrap();
            }
            assert_eq!(golomb_out, rice_out, "mismatch at v={v}");
        }
    }

    #[test]
    fn test_rice_roundtrip_wide_and_unbounded() {
        let rice = RiceCoding::new(5);
        for &v in &[0u64, 1, 31, 32, 1_000_000, (1u64 << 40) + 7] {
            let mut output = Vec::new();
            {
                let mut writer = BitWriter::new(&mut output);
                rice.encode_positive_wide(&mut writer, v as i64).unwrap();
                writer.flush().unwrap();
            }
            let mut reader = BitReader::new(Cursor::new(&output));
            assert_eq!(rice.decode_positive_wide(&mut reader).unwrap(), v);
        }
    }
}
