//! Unary coding (component G): a run of one bit value terminated by its
//! complement.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::{OxiArcError, Result};
use std::io::{Read, Write};

use crate::coding::UniversalCoding;

/// Largest value Unary accepts: the bit count of any larger value would
/// not fit the `u32` a `Coding` operation returns.
pub const UNARY_MAX_VALUE: u64 = (1u64 << 31) - 2;

/// Run-length coding terminated by a fixed bit (spec.md §4.5).
///
/// Encodes `v` as `v` copies of `!terminator` followed by one
/// `terminator` bit. Values above [`UNARY_MAX_VALUE`] are rejected.
#[derive(Debug, Clone, Copy)]
pub struct UnaryCoding {
    terminator: bool,
}

impl UnaryCoding {
    /// Create a Unary coding that terminates runs with `terminator`.
    pub fn new(terminator: bool) -> Self {
        Self { terminator }
    }

    fn check_cap(value: u64) -> Result<()> {
        if value > UNARY_MAX_VALUE {
            return Err(OxiArcError::invalid_argument(format!(
                "unary value {value} exceeds the {UNARY_MAX_VALUE} cap"
            )));
        }
        Ok(())
    }
}

impl Default for UnaryCoding {
    fn default() -> Self {
        Self::new(false)
    }
}

impl UniversalCoding for UnaryCoding {
    fn unsafe_encode_positive_fixed<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u32,
    ) -> Result<u32> {
        Self::check_cap(value as u64)?;
        writer.write_booleans(!self.terminator, value)?;
        writer.write_bit(self.terminator)?;
        Ok(value + 1)
    }

    fn unsafe_encode_positive_wide<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u64,
    ) -> Result<u32> {
        Self::check_cap(value)?;
        writer.write_booleans(!self.terminator, value as u32)?;
        writer.write_bit(self.terminator)?;
        Ok(value as u32 + 1)
    }

    fn unsafe_encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &BigUint,
    ) -> Result<u64> {
        let value = value.to_u64().ok_or_else(|| {
            OxiArcError::invalid_argument(format!(
                "unary value exceeds the {UNARY_MAX_VALUE} cap"
            ))
        })?;
        Self::check_cap(value)?;
        writer.write_booleans(!self.terminator, value as u32)?;
        writer.write_bit(self.terminator)?;
        Ok(value + 1)
    }

    fn unsafe_decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        let distance = reader.read_until(self.terminator)?;
        if distance > UNARY_MAX_VALUE {
            return Err(OxiArcError::value_too_large(distance as u32, 31));
        }
        Ok(distance as u32)
    }

    fn unsafe_decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64> {
        let distance = reader.read_until(self.terminator)?;
        if distance > UNARY_MAX_VALUE {
            return Err(OxiArcError::value_too_large(distance as u32, 63));
        }
        Ok(distance)
    }

    fn unsafe_decode_positive_unbounded<R: Read>(
        &self,
        reader: &mut BitReader<R>,
    ) -> Result<BigUint> {
        let distance = reader.read_until(self.terminator)?;
        if distance > UNARY_MAX_VALUE {
            return Err(OxiArcError::value_too_large(distance as u32, 31));
        }
        if distance == 0 {
            return Ok(BigUint::zero());
        }
        Ok(BigUint::from(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::Coding;
    use std::io::Cursor;

    #[test]
    fn test_unary_zero_terminated_table() {
        let coding = UnaryCoding::new(false);
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            for v in [0, 1, 2, 3, 4] {
                coding.encode_positive_fixed(&mut writer, v).unwrap();
            }
            writer.flush().unwrap();
        }
        let mut reader = BitReader::new(Cursor::new(&output));
        for v in [0, 1, 2, 3, 4] {
            assert_eq!(coding.decode_positive_fixed(&mut reader).unwrap(), v as u32);
        }
    }

    #[test]
    fn test_unary_one_terminated() {
        let coding = UnaryCoding::new(true);
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            coding.encode_positive_fixed(&mut writer, 3).unwrap();
            writer.flush().unwrap();
        }
        // "000" + "1" = 0001, padded
        assert_eq!(output[0] & 0b1111_0000, 0b0001_0000);
    }

    #[test]
    fn test_unary_rejects_over_cap() {
        let coding = UnaryCoding::new(false);
        let mut output = Vec::new();
        let mut writer = BitWriter::new(&mut output);
        let over = (UNARY_MAX_VALUE + 1) as i64;
        assert!(coding.encode_positive_wide(&mut writer, over).is_err());
    }

    #[test]
    fn test_unary_monotone_length() {
        let coding = UnaryCoding::new(false);
        let mut last_len = 0u32;
        for v in 0..128 {
            let mut output = Vec::new();
            let mut writer = BitWriter::new(&mut output);
            let bits = coding.encode_positive_fixed(&mut writer, v).unwrap();
            assert!(bits >= last_len);
            last_len = bits;
        }
    }
}
