//! Truncated-Binary coding (component H): the optimal prefix code over a
//! known finite alphabet.
//!
//! Unlike the universal codings, `TruncatedBinaryCoding` implements
//! [`Coding`] directly — its own alphabet-bound check (`v < N`) replaces
//! the "reject negative" gate `UniversalCoding` provides.

use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::{OxiArcError, Result};
use std::io::{Read, Write};

use crate::coding::Coding;
use crate::util::bit_length_u64;

/// Optimal prefix code over `[0, alphabet_size)` (spec.md §4.6).
///
/// `b = ⌊log₂ N⌋`; `cutoff = 2^(b+1) - N`. Values below `cutoff` are
/// written in `b` bits; the remainder are written in `b + 1` bits,
/// offset by `cutoff` so the two regions occupy disjoint prefixes.
#[derive(Debug, Clone, Copy)]
pub struct TruncatedBinaryCoding {
    alphabet_size: u64,
    b: u32,
    cutoff: u64,
}

impl TruncatedBinaryCoding {
    /// Create a coding over `[0, alphabet_size)`. `alphabet_size` must be `>= 1`.
    pub fn new(alphabet_size: u64) -> Result<Self> {
        if alphabet_size == 0 {
            return Err(OxiArcError::invalid_argument(
                "truncated-binary alphabet size must be >= 1",
            ));
        }
        let b = bit_length_u64(alphabet_size) - 1;
        let cutoff = (1u64 << (b + 1)) - alphabet_size;
        Ok(Self {
            alphabet_size,
            b,
            cutoff,
        })
    }

    /// The alphabet size `N` this coding was constructed with.
    pub fn alphabet_size(&self) -> u64 {
        self.alphabet_size
    }

    /// `⌊log₂ N⌋`.
    pub fn b(&self) -> u32 {
        self.b
    }

    /// `2^(b+1) - N`.
    pub fn cutoff(&self) -> u64 {
        self.cutoff
    }

    fn check_range(&self, value: u64) -> Result<()> {
        if value >= self.alphabet_size {
            return Err(OxiArcError::out_of_range(value, self.alphabet_size));
        }
        Ok(())
    }

    fn encode_u64<W: Write>(&self, writer: &mut BitWriter<W>, value: u64) -> Result<u32> {
        self.check_range(value)?;
        if value < self.cutoff {
            writer.write_long(value, self.b as u8)?;
            Ok(self.b)
        } else {
            writer.write_long(value + self.cutoff, (self.b + 1) as u8)?;
            Ok(self.b + 1)
        }
    }

    fn decode_u64<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64> {
        let y = reader.read_long(self.b as u8)?;
        if y < self.cutoff {
            return Ok(y);
        }
        let bit = reader.read_bit()? as u64;
        Ok((y << 1 | bit) - self.cutoff)
    }
}

impl Coding for TruncatedBinaryCoding {
    fn encode_positive_fixed<W: Write>(&self, writer: &mut BitWriter<W>, value: i32) -> Result<u32> {
        if value < 0 {
            return Err(OxiArcError::invalid_argument("value must be non-negative"));
        }
        self.encode_u64(writer, value as u64)
    }

    fn encode_positive_wide<W: Write>(&self, writer: &mut BitWriter<W>, value: i64) -> Result<u32> {
        if value < 0 {
            return Err(OxiArcError::invalid_argument("value must be non-negative"));
        }
        self.encode_u64(writer, value as u64)
    }

    fn encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &BigInt,
    ) -> Result<u64> {
        let value = value
            .to_u64()
            .ok_or_else(|| OxiArcError::out_of_range(u64::MAX, self.alphabet_size))?;
        self.encode_u64(writer, value).map(|bits| bits as u64)
    }

    fn decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        self.decode_u64(reader).map(|v| v as u32)
    }

    fn decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64> {
        self.decode_u64(reader)
    }

    fn decode_positive_unbounded<R: Read>(&self, reader: &mut BitReader<R>) -> Result<BigUint> {
        self.decode_u64(reader).map(BigUint::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_alphabet_five_table() {
        let coding = TruncatedBinaryCoding::new(5).unwrap();
        assert_eq!(coding.b(), 2);
        assert_eq!(coding.cutoff(), 3);

        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            for v in 0..5 {
                coding.encode_positive_fixed(&mut writer, v).unwrap();
            }
            writer.flush().unwrap();
        }
        let bits: String = output
            .iter()
            .map(|b| format!("{:08b}", b))
            .collect::<Vec<_>>()
            .join("");
        assert!(bits.starts_with("000110110111"));

        let mut reader = BitReader::new(Cursor::new(&output));
        for v in 0..5 {
            assert_eq!(coding.decode_positive_fixed(&mut reader).unwrap(), v as u32);
        }
    }

    #[test]
    fn test_power_of_two_alphabet_is_plain_binary() {
        let coding = TruncatedBinaryCoding::new(8).unwrap();
        assert_eq!(coding.b(), 3);
        assert_eq!(coding.cutoff(), 0);
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            let bits = coding.encode_positive_fixed(&mut writer, 5).unwrap();
            assert_eq!(bits, 3);
            writer.flush().unwrap();
        }
        assert_eq!(output[0] & 0b1110_0000, 0b1010_0000);
    }

    #[test]
    fn test_rejects_value_at_or_above_n() {
        let coding = TruncatedBinaryCoding::new(5).unwrap();
        let mut output = Vec::new();
        let mut writer = BitWriter::new(&mut output);
        assert!(coding.encode_positive_fixed(&mut writer, 5).is_err());
    }

    #[test]
    fn test_rejects_zero_alphabet() {
        assert!(TruncatedBinaryCoding::new(0).is_err());
    }
}
