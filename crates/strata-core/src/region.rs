//! Allocation regions.
//!
//! A [`Region`] encodes the physical location of one allocation within an
//! arena's backing buffer. It is the only way user code addresses arena
//! memory: arenas hand out regions, and resolve them back to byte slices
//! through range-checked accessors.

use std::fmt;
use std::ops::Range;

use crate::id::ArenaId;

/// Location of one allocation in an arena's backing buffer.
///
/// Regions are `Copy` handles, not borrows. After the arena rewinds past a
/// region its bytes still lie inside the buffer, but the next allocation
/// may hand them out again: a region must not be relied on after the
/// marker or guard that owned it has been released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    arena: ArenaId,
    offset: u32,
    len: u32,
}

impl Region {
    /// Create a new region.
    ///
    /// Arena implementations call this after reserving `[offset, offset + len)`.
    pub fn new(arena: ArenaId, offset: u32, len: u32) -> Self {
        Self { arena, offset, len }
    }

    /// The arena this region belongs to.
    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    /// Byte offset of the first byte.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte.
    pub fn end(&self) -> u32 {
        self.offset + self.len
    }

    /// Byte range within the backing buffer.
    pub fn range(&self) -> Range<usize> {
        self.offset as usize..self.end() as usize
    }

    /// Whether two regions share at least one byte.
    ///
    /// Zero-length regions never overlap anything.
    pub fn overlaps(&self, other: &Region) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.offset < other.end() && other.offset < self.end()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region(arena={}, off={}, len={})",
            self.arena, self.offset, self.len
        )
    }
}
