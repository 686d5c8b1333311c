//! Test fixtures and helpers for Strata development.
//!
//! Shared by the integration tests under `crates/*/tests/` and by the
//! criterion benchmarks. Typed slot helpers read and write `i32` values
//! through any [`StackAllocator`], and [`fixtures`] builds the standard
//! arena layouts the scenario tests start from.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use strata_core::{Region, StackAllocator};

/// Size of one `i32` slot in bytes.
pub const I32_SLOT: u32 = 4;

/// Store `value` in a 4-byte region, native endian.
pub fn write_i32<A: StackAllocator + ?Sized>(alloc: &mut A, region: Region, value: i32) {
    alloc.slice_mut(region).copy_from_slice(&value.to_ne_bytes());
}

/// Load the `i32` stored in a 4-byte region.
///
/// Panics if the region is not exactly 4 bytes long.
pub fn read_i32<A: StackAllocator + ?Sized>(alloc: &A, region: Region) -> i32 {
    let bytes: [u8; 4] = alloc
        .slice(region)
        .try_into()
        .expect("i32 slot must be 4 bytes");
    i32::from_ne_bytes(bytes)
}

/// Allocate a slot and store `value` in it.
pub fn push_i32<A: StackAllocator + ?Sized>(alloc: &mut A, value: i32) -> Option<Region> {
    let region = alloc.alloc(I32_SLOT)?;
    write_i32(alloc, region, value);
    Some(region)
}

/// Strings whose interned ids are known to be pairwise distinct.
pub const SID_FIXTURES: [&str; 3] = ["my string", "brudda", "was geht ab?"];

/// Number of repetitions used by the interning stability checks.
pub const SID_REPEATS: usize = 100;
