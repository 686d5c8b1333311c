//! Interned string identifiers for Strata.
//!
//! A [`StringId`] is the CRC-32 of a piece of text: stable across runs,
//! builds and processes, and cheap to compare and store. The global
//! table optionally remembers the text behind each id so ids can be
//! turned back into readable names while debugging.
//!
//! # Instrumentation
//!
//! Whether text is recorded is decided once, when the global table is
//! created:
//!
//! - explicitly, by calling [`init`] at startup with a [`SidConfig`];
//! - otherwise on first use, from [`SidConfig::from_env`]: enabled in
//!   debug builds and disabled in release builds, overridable through
//!   the `STRATA_SID_INSTRUMENTATION` environment variable.
//!
//! Forward hashing ([`intern`], [`StringId::of`]) behaves identically in
//! both modes; only [`resolve`] differs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod global;
pub mod hash;
pub mod id;
pub mod table;

pub use config::{Instrumentation, SidConfig, INSTRUMENTATION_ENV};
pub use error::SidError;
pub use global::{init, instrumentation, intern, resolve};
pub use hash::crc32;
pub use id::StringId;
pub use table::StringTable;
