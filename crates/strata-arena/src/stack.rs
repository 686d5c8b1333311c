//! Single-direction stack arena.
//!
//! [`Arena`] is a fixed-capacity byte buffer with one bump cursor. The
//! cursor only moves forward on allocation and can be rewound to any
//! previously observed [`Marker`]. The buffer is acquired once and never
//! resized, so allocation and rewind are both O(1).

use strata_core::{ArenaId, Marker, Region, Side, StackAllocator};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::storage;

/// Fixed-capacity bump allocator with marker rollback.
///
/// Allocations are disjoint and all lie within `[0, used())`. Memory is
/// released only in LIFO order, by rewinding to a marker taken earlier.
///
/// # Example
///
/// ```
/// use strata_arena::Arena;
///
/// let mut arena = Arena::new(12);
/// let first = arena.alloc(4).unwrap();
/// let marker = arena.marker();
/// let _second = arena.alloc(4).unwrap();
///
/// arena.free_to_marker(marker);
/// let reused = arena.alloc(4).unwrap();
/// assert_eq!(reused.offset(), marker.offset());
/// assert_eq!(first.offset(), 0);
/// ```
pub struct Arena {
    id: ArenaId,
    /// Backing storage. Allocated to full capacity at creation.
    data: Box<[u8]>,
    /// Bump pointer: next free byte.
    cursor: u32,
}

impl Arena {
    /// Create an arena with `capacity_bytes` of storage.
    ///
    /// # Panics
    ///
    /// Panics if the system allocator cannot provide the buffer. Use
    /// [`Arena::with_config`] to handle that case.
    pub fn new(capacity_bytes: u32) -> Self {
        match Self::with_config(&ArenaConfig::new(capacity_bytes)) {
            Ok(arena) => arena,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create an arena from a config, reporting storage failure.
    pub fn with_config(config: &ArenaConfig) -> Result<Self, ArenaError> {
        let data = storage::acquire(config.capacity())?;
        let id = ArenaId::next();
        tracing::debug!(arena = %id, capacity = config.capacity_bytes, "arena created");
        Ok(Self {
            id,
            data,
            cursor: 0,
        })
    }

    /// Bump-allocate `size` bytes.
    ///
    /// Returns `None` if `used() + size` would exceed the capacity; the
    /// cursor is left untouched in that case. The returned bytes keep
    /// whatever the buffer held before.
    pub fn alloc(&mut self, size: u32) -> Option<Region> {
        let end = match self.cursor.checked_add(size) {
            Some(end) if end <= self.capacity() => end,
            _ => {
                tracing::trace!(arena = %self.id, requested = size, remaining = self.remaining(), "alloc failed");
                return None;
            }
        };
        let region = Region::new(self.id, self.cursor, size);
        self.cursor = end;
        Some(region)
    }

    /// Like [`Arena::alloc`], but reports exhaustion as an error.
    pub fn try_alloc(&mut self, size: u32) -> Result<Region, ArenaError> {
        let remaining = self.remaining();
        self.alloc(size).ok_or(ArenaError::CapacityExceeded {
            side: Side::Front,
            requested: size,
            remaining,
        })
    }

    /// Allocate `bytes.len()` bytes and copy `bytes` into them.
    ///
    /// Returns `None` if the copy does not fit (or is longer than `u32::MAX`).
    pub fn alloc_copy(&mut self, bytes: &[u8]) -> Option<Region> {
        let len = u32::try_from(bytes.len()).ok()?;
        let region = self.alloc(len)?;
        self.slice_mut(region).copy_from_slice(bytes);
        Some(region)
    }

    /// Snapshot of the current cursor.
    pub fn marker(&self) -> Marker {
        Marker::new(self.id, Side::Front, self.cursor)
    }

    /// Rewind the cursor to `marker`.
    ///
    /// A marker at or beyond the current cursor is ignored: rewinding
    /// never grows the cursor, so a stale marker cannot resurrect freed
    /// bytes as allocated.
    pub fn free_to_marker(&mut self, marker: Marker) {
        debug_assert_eq!(marker.arena(), self.id, "marker from a different arena");
        debug_assert_eq!(marker.side(), Side::Front, "back marker on a single arena");
        if marker.offset() < self.cursor {
            self.cursor = marker.offset();
        }
    }

    /// Release every allocation.
    pub fn clear(&mut self) {
        self.cursor = 0;
    }

    /// Free the backing storage.
    ///
    /// Equivalent to dropping the arena; consuming `self` makes a second
    /// release impossible.
    pub fn release(self) {
        tracing::debug!(arena = %self.id, used = self.cursor, "arena released");
    }

    /// Shared access to the bytes of `region`.
    ///
    /// # Panics
    ///
    /// Panics if `region` extends past the capacity, which can only
    /// happen for a region from another arena.
    pub fn slice(&self, region: Region) -> &[u8] {
        debug_assert_eq!(region.arena(), self.id, "region from a different arena");
        &self.data[region.range()]
    }

    /// Mutable access to the bytes of `region`.
    ///
    /// # Panics
    ///
    /// Panics if `region` extends past the capacity, which can only
    /// happen for a region from another arena.
    pub fn slice_mut(&mut self, region: Region) -> &mut [u8] {
        debug_assert_eq!(region.arena(), self.id, "region from a different arena");
        &mut self.data[region.range()]
    }

    /// Identity of this arena.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> u32 {
        // Length came from a u32 config.
        self.data.len() as u32
    }

    /// Number of bytes currently allocated.
    pub fn used(&self) -> u32 {
        self.cursor
    }

    /// Remaining free capacity in bytes.
    pub fn remaining(&self) -> u32 {
        self.capacity() - self.cursor
    }
}

impl StackAllocator for Arena {
    fn alloc(&mut self, size: u32) -> Option<Region> {
        Arena::alloc(self, size)
    }

    fn marker(&self) -> Marker {
        Arena::marker(self)
    }

    fn free_to_marker(&mut self, marker: Marker) {
        Arena::free_to_marker(self, marker)
    }

    fn clear(&mut self) {
        Arena::clear(self)
    }

    fn remaining(&self) -> u32 {
        Arena::remaining(self)
    }

    fn slice(&self, region: Region) -> &[u8] {
        Arena::slice(self, region)
    }

    fn slice_mut(&mut self, region: Region) -> &mut [u8] {
        Arena::slice_mut(self, region)
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("capacity", &self.capacity())
            .field("cursor", &self.cursor)
            .finish()
    }
}
