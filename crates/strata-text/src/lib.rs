//! Text on top of Strata arenas.
//!
//! - [`encoding`]: the [`Encoding`] policy trait with [`Utf8`] and
//!   [`Ascii`] implementations.
//! - [`buffer`]: [`StringBuffer`], a fixed-capacity, stream-like text
//!   buffer whose bytes live in one arena region.
//! - [`path`]: path normalisation and interning through dual-arena
//!   scratch space.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod encoding;
pub mod error;
pub mod path;

pub use buffer::{Chars, StringBuffer, MAX_FLOAT_PRECISION};
pub use encoding::{Ascii, Encoding, Utf8};
pub use error::TextError;
pub use path::{asset_id, intern_path, to_platform_path, MAX_PATH_LENGTH};
