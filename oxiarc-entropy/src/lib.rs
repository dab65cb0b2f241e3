//! # OxiArc Entropy
//!
//! Universal and non-universal entropy codings on top of `oxiarc-core`'s
//! bit cursor:
//!
//! - [`coding`]: the `Coding`/`UniversalCoding` trait pair every coding
//!   implements.
//! - [`elias`]: Elias-delta and Elias-omega.
//! - [`fibonacci`]: Zeckendorf/Fibonacci coding.
//! - [`unary`]: zero- or one-terminated unary coding.
//! - [`truncated_binary`]: the non-universal minimal-binary coding for a
//!   fixed alphabet size.
//! - [`golomb`]: Golomb and its power-of-two specialization, Rice.
//! - [`extended`]: signed integers, floats/doubles, and `BigDecimal`-shaped
//!   values layered on any universal coding.
//! - [`frequencies`]: frequency tables and zero-order entropy.
//! - [`huffman`]: canonical Huffman coding built from a frequency table or
//!   a serialized dictionary.
//! - [`coded_stream`]: `CodedWriter`/`CodedReader`, pairing a bit cursor
//!   with an [`extended::ExtendedCoding`].
//! - [`streams`]: strings, primitive arrays, enum lists, and scoped file
//!   helpers built on [`coded_stream`].
//!
//! ## Example
//!
//! ```rust
//! use oxiarc_core::bitstream::{BitReader, BitWriter};
//! use oxiarc_entropy::{Coding, EliasDeltaCoding};
//! use std::io::Cursor;
//!
//! let coding = EliasDeltaCoding::new();
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     coding.encode_positive_fixed(&mut writer, 41).unwrap();
//! }
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(coding.decode_positive_fixed(&mut reader).unwrap(), 41);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod coded_stream;
pub mod coding;
pub mod elias;
pub mod extended;
pub mod fibonacci;
pub mod frequencies;
pub mod golomb;
pub mod huffman;
pub mod streams;
pub mod truncated_binary;
pub mod unary;
mod util;

pub use coded_stream::{CodedReader, CodedWriter};
pub use coding::{Coding, UniversalCoding};
pub use elias::{EliasDeltaCoding, EliasOmegaCoding};
pub use extended::ExtendedCoding;
pub use fibonacci::FibonacciCoding;
pub use frequencies::CodingFrequencies;
pub use golomb::{GolombCoding, RiceCoding};
pub use huffman::{Dictionary, HuffmanCoding, HuffmanFrequencies};
pub use truncated_binary::TruncatedBinaryCoding;
pub use unary::UnaryCoding;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::coded_stream::{CodedReader, CodedWriter};
    pub use crate::coding::{Coding, UniversalCoding};
    pub use crate::elias::{EliasDeltaCoding, EliasOmegaCoding};
    pub use crate::extended::ExtendedCoding;
    pub use crate::fibonacci::FibonacciCoding;
    pub use crate::frequencies::CodingFrequencies;
    pub use crate::golomb::{GolombCoding, RiceCoding};
    pub use crate::huffman::{Dictionary, HuffmanCoding, HuffmanFrequencies};
    pub use crate::streams::{
        read_bool_array, read_byte_array, read_char_array, read_double_array, read_enum_list,
        read_float_array, read_from_file, read_int_array, read_long_array, read_short_array,
        read_string, write_bool_array, write_byte_array, write_char_array, write_double_array,
        write_enum_list, write_float_array, write_int_array, write_long_array, write_short_array,
        write_string, write_to_file,
    };
    pub use crate::truncated_binary::TruncatedBinaryCoding;
    pub use crate::unary::UnaryCoding;
    pub use oxiarc_core::error::{OxiArcError, Result};
}
