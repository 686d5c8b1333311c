//! The stack-allocator policy trait.

use crate::id::Marker;
use crate::region::Region;

/// LIFO allocation policy shared by every Strata arena.
///
/// Implemented by `Arena` and by `DualArena`, whose implementation
/// dispatches to the currently active side. Code that only needs "an"
/// arena (string buffers, path scratch) is written against this trait.
pub trait StackAllocator {
    /// Reserve `size` bytes.
    ///
    /// Returns `None` without mutating anything if the request does not
    /// fit. The returned bytes are not cleared.
    fn alloc(&mut self, size: u32) -> Option<Region>;

    /// Snapshot of the current cursor.
    fn marker(&self) -> Marker;

    /// Rewind to `marker`. Never grows the cursor.
    fn free_to_marker(&mut self, marker: Marker);

    /// Release every allocation.
    fn clear(&mut self);

    /// Bytes still available to `alloc`.
    fn remaining(&self) -> u32;

    /// Shared access to the bytes of `region`.
    fn slice(&self, region: Region) -> &[u8];

    /// Mutable access to the bytes of `region`.
    fn slice_mut(&mut self, region: Region) -> &mut [u8];
}
