//! CodedStreams (component N): strings, primitive arrays, enum lists,
//! and scoped file helpers built from the lower-level coding layers.

use oxiarc_core::error::{OxiArcError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::coded_stream::{CodedReader, CodedWriter};
use crate::coding::UniversalCoding;
use crate::extended::ExtendedCoding;

/// Write `s` as a positive length (UTF-16 code units) followed by each
/// unit as a positive 16-bit integer.
pub fn write_string<W: Write, C: UniversalCoding>(
    writer: &mut CodedWriter<W, C>,
    s: &str,
) -> Result<u64> {
    let units: Vec<u16> = s.encode_utf16().collect();
    let mut bits = writer.write_positive_wide(units.len() as i64)? as u64;
    for unit in units {
        bits += writer.write_positive_fixed(unit as i32)? as u64;
    }
    Ok(bits)
}

/// Read a string written by [`write_string`].
pub fn read_string<R: Read, C: UniversalCoding>(reader: &mut CodedReader<R, C>) -> Result<String> {
    let len = reader.read_positive_wide()?;
    let mut units = Vec::with_capacity(len as usize);
    for _ in 0..len {
        units.push(reader.read_positive_fixed()? as u16);
    }
    String::from_utf16(&units)
        .map_err(|_| OxiArcError::invalid_argument("invalid UTF-16 code unit sequence"))
}

macro_rules! primitive_array_codec {
    ($write_fn:ident, $read_fn:ident, $elem:ty, $write_elem:expr, $read_elem:expr) => {
        /// Write `positive length` then each element.
        pub fn $write_fn<W: Write, C: UniversalCoding>(
            writer: &mut CodedWriter<W, C>,
            values: &[$elem],
        ) -> Result<u64> {
            let mut bits = writer.write_positive_wide(values.len() as i64)? as u64;
            let write_elem: fn(&mut CodedWriter<W, C>, $elem) -> Result<u64> = $write_elem;
            for &v in values {
                bits += write_elem(writer, v)?;
            }
            Ok(bits)
        }

        /// Read an array written by the matching writer.
        pub fn $read_fn<R: Read, C: UniversalCoding>(
            reader: &mut CodedReader<R, C>,
        ) -> Result<Vec<$elem>> {
            let len = reader.read_positive_wide()?;
            let mut values = Vec::with_capacity(len as usize);
            let read_elem: fn(&mut CodedReader<R, C>) -> Result<$elem> = $read_elem;
            for _ in 0..len {
                values.push(read_elem(reader)?);
            }
            Ok(values)
        }
    };
}

primitive_array_codec!(
    write_bool_array,
    read_bool_array,
    bool,
    |w, v: bool| w.write_positive_fixed(v as i32).map(|b| b as u64),
    |r| Ok(r.read_positive_fixed()? != 0)
);
primitive_array_codec!(
    write_byte_array,
    read_byte_array,
    i8,
    |w, v: i8| w.write_fixed(v as i32).map(|b| b as u64),
    |r| Ok(r.read_fixed()? as i8)
);
primitive_array_codec!(
    write_short_array,
    read_short_array,
    i16,
    |w, v: i16| w.write_fixed(v as i32).map(|b| b as u64),
    |r| Ok(r.read_fixed()? as i16)
);
primitive_array_codec!(
    write_char_array,
    read_char_array,
    u16,
    |w, v: u16| w.write_positive_fixed(v as i32).map(|b| b as u64),
    |r| Ok(r.read_positive_fixed()? as u16)
);
primitive_array_codec!(
    write_int_array,
    read_int_array,
    i32,
    |w, v: i32| w.write_fixed(v).map(|b| b as u64),
    |r| r.read_fixed()
);
primitive_array_codec!(
    write_long_array,
    read_long_array,
    i64,
    |w, v: i64| w.write_wide(v),
    |r| r.read_wide()
);
primitive_array_codec!(
    write_float_array,
    read_float_array,
    f32,
    |w, v: f32| w.write_float(v).map(|b| b as u64),
    |r| r.read_float()
);
primitive_array_codec!(
    write_double_array,
    read_double_array,
    f64,
    |w, v: f64| w.write_double(v).map(|b| b as u64),
    |r| r.read_double()
);

/// Write `values.len()` ordinals (zero-based, no offset) followed by
/// each ordinal produced by `to_ordinal`.
pub fn write_enum_list<T, W: Write, C: UniversalCoding>(
    writer: &mut CodedWriter<W, C>,
    values: &[T],
    to_ordinal: impl Fn(&T) -> u32,
) -> Result<u64> {
    let mut bits = writer.write_positive_wide(values.len() as i64)? as u64;
    for value in values {
        bits += writer.write_positive_fixed(to_ordinal(value) as i32)? as u64;
    }
    Ok(bits)
}

/// Read an enum list written by [`write_enum_list`]. `from_ordinal`
/// resolves each decoded zero-based ordinal back to a variant.
pub fn read_enum_list<T, R: Read, C: UniversalCoding>(
    reader: &mut CodedReader<R, C>,
    from_ordinal: impl Fn(u32) -> Result<T>,
) -> Result<Vec<T>> {
    let len = reader.read_positive_wide()?;
    let mut values = Vec::with_capacity(len as usize);
    for _ in 0..len {
        let ordinal = reader.read_positive_fixed()?;
        values.push(from_ordinal(ordinal)?);
    }
    Ok(values)
}

/// Open `path` for writing, pair a buffered byte stream with `coding`,
/// run `task`, and guarantee the file is flushed and closed even if
/// `task` fails.
pub fn write_to_file<C: UniversalCoding>(
    path: impl AsRef<Path>,
    coding: ExtendedCoding<C>,
    task: impl FnOnce(&mut CodedWriter<BufWriter<File>, C>) -> Result<()>,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = CodedWriter::new(
        oxiarc_core::bitstream::BitWriter::new(BufWriter::new(file)),
        coding,
    );
    let result = task(&mut writer);
    writer.flush()?;
    result
}

/// Open `path` for reading, pair a buffered byte stream with `coding`,
/// and run `task`.
pub fn read_from_file<C: UniversalCoding, T>(
    path: impl AsRef<Path>,
    coding: ExtendedCoding<C>,
    task: impl FnOnce(&mut CodedReader<BufReader<File>, C>) -> Result<T>,
) -> Result<T> {
    let file = File::open(path)?;
    let mut reader = CodedReader::new(
        oxiarc_core::bitstream::BitReader::new(BufReader::new(file)),
        coding,
    );
    task(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elias::EliasDeltaCoding;
    use oxiarc_core::bitstream::{BitReader, BitWriter};
    use std::io::Cursor;

    fn writer_over(buf: &mut Vec<u8>) -> CodedWriter<&mut Vec<u8>, EliasDeltaCoding> {
        CodedWriter::new(BitWriter::new(buf), ExtendedCoding::new(EliasDeltaCoding::new()))
    }

    fn reader_over(buf: &[u8]) -> CodedReader<Cursor<&[u8]>, EliasDeltaCoding> {
        CodedReader::new(
            BitReader::new(Cursor::new(buf)),
            ExtendedCoding::new(EliasDeltaCoding::new()),
        )
    }

    #[test]
    fn test_string_roundtrip() {
        let mut output = Vec::new();
        {
            let mut writer = writer_over(&mut output);
            write_string(&mut writer, "hello, oxiarc").unwrap();
            writer.flush().unwrap();
        }
        let mut reader = reader_over(&output);
        assert_eq!(read_string(&mut reader).unwrap(), "hello, oxiarc");
    }

    #[test]
    fn test_int_array_roundtrip() {
        let values = vec![0, -1, 1, i32::MIN, i32::MAX];
        let mut output = Vec::new();
        {
            let mut writer = writer_over(&mut output);
            write_int_array(&mut writer, &values).unwrap();
            writer.flush().unwrap();
        }
        let mut reader = reader_over(&output);
        assert_eq!(read_int_array(&mut reader).unwrap(), values);
    }

    #[test]
    fn test_bool_array_roundtrip() {
        let values = vec![true, false, false, true];
        let mut output = Vec::new();
        {
            let mut writer = writer_over(&mut output);
            write_bool_array(&mut writer, &values).unwrap();
            writer.flush().unwrap();
        }
        let mut reader = reader_over(&output);
        assert_eq!(read_bool_array(&mut reader).unwrap(), values);
    }

    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    enum Suit {
        Clubs,
        Diamonds,
        Hearts,
        Spades,
    }

    fn suit_ordinal(s: &Suit) -> u32 {
        *s as u32
    }

    fn suit_from_ordinal(ordinal: u32) -> Result<Suit> {
        match ordinal {
            0 => Ok(Suit::Clubs),
            1 => Ok(Suit::Diamonds),
            2 => Ok(Suit::Hearts),
            3 => Ok(Suit::Spades),
            _ => Err(OxiArcError::out_of_range(ordinal as u64, 4)),
        }
    }

    #[test]
    fn test_enum_list_no_offset_roundtrip() {
        let values = vec![Suit::Spades, Suit::Clubs, Suit::Hearts];
        let mut output = Vec::new();
        {
            let mut writer = writer_over(&mut output);
            write_enum_list(&mut writer, &values, suit_ordinal).unwrap();
            writer.flush().unwrap();
        }
        let mut reader = reader_over(&output);
        let decoded = read_enum_list(&mut reader, suit_from_ordinal).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("oxiarc_entropy_test_{:p}.bin", &dir));
        let coding = ExtendedCoding::new(EliasDeltaCoding::new());

        write_to_file(&path, coding, |writer| {
            writer.write_fixed(-7)?;
            write_string(writer, "scoped")?;
            Ok(())
        })
        .unwrap();

        let (value, text) = read_from_file(&path, coding, |reader| {
            let value = reader.read_fixed()?;
            let text = read_string(reader)?;
            Ok((value, text))
        })
        .unwrap();

        assert_eq!(value, -7);
        assert_eq!(text, "scoped");
        let _ = std::fs::remove_file(&path);
    }
}
