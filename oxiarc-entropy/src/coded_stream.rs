//! CodedReader / CodedWriter (component M): thin pairing of a bit
//! cursor with an [`ExtendedCoding`].

use num_bigint::{BigInt, BigUint};
use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::Result;
use std::io::{Read, Write};

use crate::coding::{Coding, UniversalCoding};
use crate::extended::ExtendedCoding;

/// Pairs a [`BitWriter`] with an [`ExtendedCoding`] so callers write
/// values without threading the coding through every call (spec.md §4.11).
pub struct CodedWriter<W: Write, C: UniversalCoding> {
    writer: BitWriter<W>,
    coding: ExtendedCoding<C>,
}

impl<W: Write, C: UniversalCoding> CodedWriter<W, C> {
    /// Pair a bit writer with an extended coding.
    pub fn new(writer: BitWriter<W>, coding: ExtendedCoding<C>) -> Self {
        Self { writer, coding }
    }

    /// Release the underlying bit writer.
    pub fn into_inner(self) -> BitWriter<W> {
        self.writer
    }

    /// Write a non-negative `i32` through the wrapped universal coding.
    pub fn write_positive_fixed(&mut self, value: i32) -> Result<u32> {
        self.coding.inner().encode_positive_fixed(&mut self.writer, value)
    }

    /// Write a non-negative `i64`.
    pub fn write_positive_wide(&mut self, value: i64) -> Result<u32> {
        self.coding.inner().encode_positive_wide(&mut self.writer, value)
    }

    /// Write a non-negative arbitrary-precision integer.
    pub fn write_positive_unbounded(&mut self, value: &BigInt) -> Result<u64> {
        self.coding.inner().encode_positive_unbounded(&mut self.writer, value)
    }

    /// Write a signed `i32`.
    pub fn write_fixed(&mut self, value: i32) -> Result<u32> {
        self.coding.encode_int(&mut self.writer, value)
    }

    /// Write a signed `i64`.
    pub fn write_wide(&mut self, value: i64) -> Result<u64> {
        self.coding.encode_long(&mut self.writer, value)
    }

    /// Write a signed arbitrary-precision integer.
    pub fn write_unbounded(&mut self, value: &BigInt) -> Result<u64> {
        self.coding.encode_big(&mut self.writer, value)
    }

    /// Write an `f32`.
    pub fn write_float(&mut self, value: f32) -> Result<u32> {
        self.coding.encode_float(&mut self.writer, value)
    }

    /// Write an `f64`.
    pub fn write_double(&mut self, value: f64) -> Result<u32> {
        self.coding.encode_double(&mut self.writer, value)
    }

    /// Write a `(scale, unscaled)` decimal pair.
    pub fn write_decimal(&mut self, scale: i64, unscaled: &BigInt) -> Result<u64> {
        self.coding.encode_decimal(&mut self.writer, scale, unscaled)
    }

    /// Flush any buffered bits, padding the final byte with zeros.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}

/// Mirror of [`CodedWriter`] for reading (spec.md §4.11).
pub struct CodedReader<R: Read, C: UniversalCoding> {
    reader: BitReader<R>,
    coding: ExtendedCoding<C>,
}

impl<R: Read, C: UniversalCoding> CodedReader<R, C> {
    /// Pair a bit reader with an extended coding.
    pub fn new(reader: BitReader<R>, coding: ExtendedCoding<C>) -> Self {
        Self { reader, coding }
    }

    /// Release the underlying bit reader.
    pub fn into_inner(self) -> BitReader<R> {
        self.reader
    }

    /// Read a non-negative `i32`.
    pub fn read_positive_fixed(&mut self) -> Result<u32> {
        self.coding.inner().decode_positive_fixed(&mut self.reader)
    }

    /// Read a non-negative `i64`.
    pub fn read_positive_wide(&mut self) -> Result<u64> {
        self.coding.inner().decode_positive_wide(&mut self.reader)
    }

    /// Read a non-negative arbitrary-precision integer.
    pub fn read_positive_unbounded(&mut self) -> Result<BigUint> {
        self.coding.inner().decode_positive_unbounded(&mut self.reader)
    }

    /// Read a signed `i32`.
    pub fn read_fixed(&mut self) -> Result<i32> {
        self.coding.decode_int(&mut self.reader)
    }

    /// Read a signed `i64`.
    pub fn read_wide(&mut self) -> Result<i64> {
        self.coding.decode_long(&mut self.reader)
    }

    /// Read a signed arbitrary-precision integer.
    pub fn read_unbounded(&mut self) -> Result<BigInt> {
        self.coding.decode_big(&mut self.reader)
    }

    /// Read an `f32`.
    pub fn read_float(&mut self) -> Result<f32> {
        self.coding.decode_float(&mut self.reader)
    }

    /// Read an `f64`.
    pub fn read_double(&mut self) -> Result<f64> {
        self.coding.decode_double(&mut self.reader)
    }

    /// Read a `(scale, unscaled)` decimal pair.
    pub fn read_decimal(&mut self) -> Result<(i64, BigInt)> {
        self.coding.decode_decimal(&mut self.reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elias::EliasDeltaCoding;
    use std::io::Cursor;

    #[test]
    fn test_coded_stream_mixed_values_roundtrip() {
        let mut output = Vec::new();
        {
            let mut writer =
                CodedWriter::new(BitWriter::new(&mut output), ExtendedCoding::new(EliasDeltaCoding::new()));
            writer.write_positive_fixed(7).unwrap();
            writer.write_fixed(-42).unwrap();
            writer.write_float(3.5).unwrap();
            writer.write_decimal(2, &BigInt::from(12345)).unwrap();
            writer.flush().unwrap();
        }

        let mut reader = CodedReader::new(
            BitReader::new(Cursor::new(&output)),
            ExtendedCoding::new(EliasDeltaCoding::new()),
        );
        assert_eq!(reader.read_positive_fixed().unwrap(), 7);
        assert_eq!(reader.read_fixed().unwrap(), -42);
        assert_eq!(reader.read_float().unwrap(), 3.5);
        assert_eq!(reader.read_decimal().unwrap(), (2, BigInt::from(12345)));
    }
}
