//! # OxiArc Core
//!
//! The bit-cursor layer underneath `oxiarc-entropy`.
//!
//! - [`bitstream`]: MSB-first bit-level I/O (`BitReader`/`BitWriter`) in
//!   three widths — a machine word, a 64-bit word, and an arbitrary-precision
//!   [`num_bigint::BigUint`] word.
//! - [`error`]: the single error type entropy codings raise.
//!
//! ## Example
//!
//! ```rust
//! use oxiarc_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write(0b1010, 4).unwrap();
//! }
//!
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read(4).unwrap(), 0b1010);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiArcError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{OxiArcError, Result};
}
