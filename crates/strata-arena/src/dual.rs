//! Double-ended stack arena.
//!
//! A [`DualArena`] shares one backing buffer between two stacks: the
//! front grows upward from offset 0, the back grows downward from the
//! capacity. The two cursors can never cross, so front and back
//! allocations never overlap. Generic operations (`alloc`, `marker`,
//! `free_to_marker`, `clear`) act on the *active side*, a toggle that
//! survives until [`DualArena::swap_buffers`] is called.
//!
//! The usual split is a long-lived front allocator for session data and
//! a short-lived back allocator for scratch work, with a
//! [`RollbackGuard`] bounding each unit of scratch work.

use strata_core::{ArenaId, Marker, Region, Side, StackAllocator};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::guard::RollbackGuard;
use crate::storage;

/// Two stack allocators growing toward each other in one buffer.
///
/// Invariant: `front <= back` at all times. The live regions are
/// `[0, front)` and `[back, capacity)`.
pub struct DualArena {
    id: ArenaId,
    data: Box<[u8]>,
    front: u32,
    back: u32,
    active: Side,
}

impl DualArena {
    /// Create a dual arena with `capacity_bytes` of shared storage.
    ///
    /// The front side starts active.
    ///
    /// # Panics
    ///
    /// Panics if the system allocator cannot provide the buffer. Use
    /// [`DualArena::with_config`] to handle that case.
    pub fn new(capacity_bytes: u32) -> Self {
        match Self::with_config(&ArenaConfig::new(capacity_bytes)) {
            Ok(arena) => arena,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a dual arena from a config, reporting storage failure.
    pub fn with_config(config: &ArenaConfig) -> Result<Self, ArenaError> {
        let data = storage::acquire(config.capacity())?;
        let id = ArenaId::next();
        tracing::debug!(arena = %id, capacity = config.capacity_bytes, "dual arena created");
        Ok(Self {
            id,
            data,
            front: 0,
            back: config.capacity_bytes,
            active: Side::Front,
        })
    }

    // ── Side-specific allocation ────────────────────────────────

    /// Allocate `size` bytes from the front, regardless of the active side.
    ///
    /// Returns `None` if the front cursor would pass the back cursor.
    pub fn alloc_front(&mut self, size: u32) -> Option<Region> {
        if size > self.remaining() {
            tracing::trace!(arena = %self.id, side = %Side::Front, requested = size, remaining = self.remaining(), "alloc failed");
            return None;
        }
        let region = Region::new(self.id, self.front, size);
        self.front += size;
        Some(region)
    }

    /// Allocate `size` bytes from the back, regardless of the active side.
    ///
    /// The back cursor moves down first; the region starts at the new
    /// cursor. Returns `None` if the back cursor would pass the front.
    pub fn alloc_back(&mut self, size: u32) -> Option<Region> {
        if size > self.remaining() {
            tracing::trace!(arena = %self.id, side = %Side::Back, requested = size, remaining = self.remaining(), "alloc failed");
            return None;
        }
        self.back -= size;
        Some(Region::new(self.id, self.back, size))
    }

    /// Like [`DualArena::alloc_front`], reporting exhaustion as an error.
    pub fn try_alloc_front(&mut self, size: u32) -> Result<Region, ArenaError> {
        let remaining = self.remaining();
        self.alloc_front(size)
            .ok_or(ArenaError::CapacityExceeded {
                side: Side::Front,
                requested: size,
                remaining,
            })
    }

    /// Like [`DualArena::alloc_back`], reporting exhaustion as an error.
    pub fn try_alloc_back(&mut self, size: u32) -> Result<Region, ArenaError> {
        let remaining = self.remaining();
        self.alloc_back(size).ok_or(ArenaError::CapacityExceeded {
            side: Side::Back,
            requested: size,
            remaining,
        })
    }

    // ── Markers ─────────────────────────────────────────────────

    /// Snapshot of the front cursor.
    pub fn marker_front(&self) -> Marker {
        Marker::new(self.id, Side::Front, self.front)
    }

    /// Snapshot of the back cursor.
    pub fn marker_back(&self) -> Marker {
        Marker::new(self.id, Side::Back, self.back)
    }

    /// Rewind the front cursor. Only ever shrinks the front.
    pub fn free_to_marker_front(&mut self, marker: Marker) {
        debug_assert_eq!(marker.arena(), self.id, "marker from a different arena");
        debug_assert_eq!(marker.side(), Side::Front, "back marker passed to front");
        if marker.offset() < self.front {
            self.front = marker.offset();
        }
    }

    /// Rewind the back cursor. Only ever moves the back upward, and never
    /// past the capacity.
    pub fn free_to_marker_back(&mut self, marker: Marker) {
        debug_assert_eq!(marker.arena(), self.id, "marker from a different arena");
        debug_assert_eq!(marker.side(), Side::Back, "front marker passed to back");
        if marker.offset() <= self.capacity() && self.back < marker.offset() {
            self.back = marker.offset();
        }
    }

    /// Release every front allocation.
    pub fn clear_front(&mut self) {
        self.front = 0;
    }

    /// Release every back allocation.
    pub fn clear_back(&mut self) {
        self.back = self.capacity();
    }

    // ── Active side ─────────────────────────────────────────────

    /// Toggle the active side. No cursor moves.
    pub fn swap_buffers(&mut self) {
        self.active = self.active.flip();
    }

    /// Whether generic operations currently target the front.
    pub fn buffer_is_front(&self) -> bool {
        self.active.is_front()
    }

    /// The side generic operations currently target.
    pub fn active_side(&self) -> Side {
        self.active
    }

    // ── Generic (active-side) operations ────────────────────────

    /// Allocate from the active side.
    pub fn alloc(&mut self, size: u32) -> Option<Region> {
        match self.active {
            Side::Front => self.alloc_front(size),
            Side::Back => self.alloc_back(size),
        }
    }

    /// Snapshot of the active side's cursor.
    pub fn marker(&self) -> Marker {
        match self.active {
            Side::Front => self.marker_front(),
            Side::Back => self.marker_back(),
        }
    }

    /// Rewind the active side's cursor.
    pub fn free_to_marker(&mut self, marker: Marker) {
        match self.active {
            Side::Front => self.free_to_marker_front(marker),
            Side::Back => self.free_to_marker_back(marker),
        }
    }

    /// Release every allocation on the active side.
    pub fn clear(&mut self) {
        match self.active {
            Side::Front => self.clear_front(),
            Side::Back => self.clear_back(),
        }
    }

    // ── Scopes ──────────────────────────────────────────────────

    /// Open a rollback scope.
    ///
    /// Everything allocated through the returned guard, on either side,
    /// is released when it drops, and the active side is restored.
    pub fn scope(&mut self) -> RollbackGuard<'_> {
        RollbackGuard::new(self)
    }

    /// Run `f` inside a rollback scope.
    ///
    /// `f` works through the guard. The scope ends when `f` returns or
    /// unwinds. Regions allocated by `f` must not escape it.
    ///
    /// ```
    /// use strata_arena::DualArena;
    ///
    /// let mut arena = DualArena::new(64);
    /// let len = arena.scoped(|scratch| {
    ///     let r = scratch.alloc_back(16).unwrap();
    ///     scratch.slice(r).len()
    /// });
    /// assert_eq!(len, 16);
    /// assert_eq!(arena.used_back(), 0);
    /// ```
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut RollbackGuard<'_>) -> R) -> R {
        let mut guard = self.scope();
        f(&mut guard)
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Shared access to the bytes of `region`.
    ///
    /// # Panics
    ///
    /// Panics if `region` extends past the capacity.
    pub fn slice(&self, region: Region) -> &[u8] {
        debug_assert_eq!(region.arena(), self.id, "region from a different arena");
        &self.data[region.range()]
    }

    /// Mutable access to the bytes of `region`.
    ///
    /// # Panics
    ///
    /// Panics if `region` extends past the capacity.
    pub fn slice_mut(&mut self, region: Region) -> &mut [u8] {
        debug_assert_eq!(region.arena(), self.id, "region from a different arena");
        &mut self.data[region.range()]
    }

    /// Free the backing storage.
    pub fn release(self) {
        tracing::debug!(
            arena = %self.id,
            front = self.used_front(),
            back = self.used_back(),
            "dual arena released"
        );
    }

    /// Identity of this arena.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Total capacity in bytes, shared by both sides.
    pub fn capacity(&self) -> u32 {
        self.data.len() as u32
    }

    /// Free bytes between the two cursors.
    pub fn remaining(&self) -> u32 {
        self.back - self.front
    }

    /// Bytes allocated on the front.
    pub fn used_front(&self) -> u32 {
        self.front
    }

    /// Bytes allocated on the back.
    pub fn used_back(&self) -> u32 {
        self.capacity() - self.back
    }
}

impl StackAllocator for DualArena {
    fn alloc(&mut self, size: u32) -> Option<Region> {
        DualArena::alloc(self, size)
    }

    fn marker(&self) -> Marker {
        DualArena::marker(self)
    }

    fn free_to_marker(&mut self, marker: Marker) {
        DualArena::free_to_marker(self, marker)
    }

    fn clear(&mut self) {
        DualArena::clear(self)
    }

    fn remaining(&self) -> u32 {
        DualArena::remaining(self)
    }

    fn slice(&self, region: Region) -> &[u8] {
        DualArena::slice(self, region)
    }

    fn slice_mut(&mut self, region: Region) -> &mut [u8] {
        DualArena::slice_mut(self, region)
    }
}

impl std::fmt::Debug for DualArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualArena")
            .field("id", &self.id)
            .field("capacity", &self.capacity())
            .field("front", &self.front)
            .field("back", &self.back)
            .field("active", &self.active)
            .finish()
    }
}
