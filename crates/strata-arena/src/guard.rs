//! Scoped rollback over a [`DualArena`].
//!
//! [`RollbackGuard`] captures both cursors and the active side when it is
//! created and puts all three back when it drops. Everything allocated
//! through the guard during its lifetime, front or back, is released on
//! every exit path, including `?` early returns and panic unwinding.
//!
//! The guard never hands out `&mut DualArena`, so the arena behind it
//! cannot be replaced or swapped out while the scope is open. Mutating
//! operations are forwarded one by one; read-only ones are reached
//! through `Deref`.

use std::ops::Deref;

use strata_core::{Marker, Region, StackAllocator};

use crate::dual::DualArena;
use crate::error::ArenaError;

/// Guard that rewinds a [`DualArena`] to its state at construction.
///
/// Dereferences (shared only) to the arena. Nested scopes are opened
/// with [`RollbackGuard::scope`].
///
/// ```
/// use strata_arena::{DualArena, RollbackGuard};
///
/// let mut arena = DualArena::new(64);
/// arena.alloc_front(8).unwrap();
/// {
///     let mut scratch = RollbackGuard::new(&mut arena);
///     scratch.alloc_back(32).unwrap();
///     scratch.swap_buffers();
/// }
/// assert_eq!(arena.used_front(), 8);
/// assert_eq!(arena.used_back(), 0);
/// assert!(arena.buffer_is_front());
/// ```
///
/// The guarded arena cannot be replaced from inside the scope:
///
/// ```compile_fail
/// use strata_arena::DualArena;
///
/// let mut arena = DualArena::new(16);
/// let mut guard = arena.scope();
/// *guard = DualArena::new(16);
/// ```
///
/// ```compile_fail
/// use strata_arena::DualArena;
///
/// let mut arena = DualArena::new(16);
/// let mut other = DualArena::new(16);
/// let mut guard = arena.scope();
/// guard.alloc_front(8).unwrap();
/// std::mem::swap(&mut *guard, &mut other);
/// ```
#[must_use = "the arena is rolled back as soon as the guard is dropped"]
pub struct RollbackGuard<'a> {
    arena: &'a mut DualArena,
    front: Marker,
    back: Marker,
    was_front: bool,
}

impl<'a> RollbackGuard<'a> {
    /// Capture `arena`'s state and open a scope on its front side.
    ///
    /// If the back side was active it is swapped to the front; the
    /// starting side is restored on drop.
    pub fn new(arena: &'a mut DualArena) -> Self {
        let front = arena.marker_front();
        let back = arena.marker_back();
        let was_front = arena.buffer_is_front();
        if !was_front {
            arena.swap_buffers();
        }
        Self {
            arena,
            front,
            back,
            was_front,
        }
    }

    /// Open a nested scope. It rolls back to the current state when it
    /// drops, leaving this guard's own rollback point untouched.
    pub fn scope(&mut self) -> RollbackGuard<'_> {
        RollbackGuard::new(self.arena)
    }

    /// Front cursor captured at construction.
    pub fn front_marker(&self) -> Marker {
        self.front
    }

    /// Back cursor captured at construction.
    pub fn back_marker(&self) -> Marker {
        self.back
    }

    /// Whether the front side was active at construction.
    pub fn was_front(&self) -> bool {
        self.was_front
    }

    // ── Forwarded arena operations ──────────────────────────────

    /// See [`DualArena::alloc_front`].
    pub fn alloc_front(&mut self, size: u32) -> Option<Region> {
        self.arena.alloc_front(size)
    }

    /// See [`DualArena::alloc_back`].
    pub fn alloc_back(&mut self, size: u32) -> Option<Region> {
        self.arena.alloc_back(size)
    }

    /// See [`DualArena::try_alloc_front`].
    pub fn try_alloc_front(&mut self, size: u32) -> Result<Region, ArenaError> {
        self.arena.try_alloc_front(size)
    }

    /// See [`DualArena::try_alloc_back`].
    pub fn try_alloc_back(&mut self, size: u32) -> Result<Region, ArenaError> {
        self.arena.try_alloc_back(size)
    }

    /// Allocate from the active side.
    pub fn alloc(&mut self, size: u32) -> Option<Region> {
        self.arena.alloc(size)
    }

    /// See [`DualArena::free_to_marker_front`].
    pub fn free_to_marker_front(&mut self, marker: Marker) {
        self.arena.free_to_marker_front(marker);
    }

    /// See [`DualArena::free_to_marker_back`].
    pub fn free_to_marker_back(&mut self, marker: Marker) {
        self.arena.free_to_marker_back(marker);
    }

    /// Rewind the active side's cursor.
    pub fn free_to_marker(&mut self, marker: Marker) {
        self.arena.free_to_marker(marker);
    }

    /// See [`DualArena::clear_front`].
    pub fn clear_front(&mut self) {
        self.arena.clear_front();
    }

    /// See [`DualArena::clear_back`].
    pub fn clear_back(&mut self) {
        self.arena.clear_back();
    }

    /// Release every allocation on the active side.
    pub fn clear(&mut self) {
        self.arena.clear();
    }

    /// Toggle the active side. Undone when the guard drops.
    pub fn swap_buffers(&mut self) {
        self.arena.swap_buffers();
    }

    /// Mutable access to the bytes of `region`.
    pub fn slice_mut(&mut self, region: Region) -> &mut [u8] {
        self.arena.slice_mut(region)
    }
}

impl Deref for RollbackGuard<'_> {
    type Target = DualArena;

    fn deref(&self) -> &DualArena {
        self.arena
    }
}

impl StackAllocator for RollbackGuard<'_> {
    fn alloc(&mut self, size: u32) -> Option<Region> {
        self.arena.alloc(size)
    }

    fn marker(&self) -> Marker {
        self.arena.marker()
    }

    fn free_to_marker(&mut self, marker: Marker) {
        self.arena.free_to_marker(marker);
    }

    fn clear(&mut self) {
        self.arena.clear();
    }

    fn remaining(&self) -> u32 {
        self.arena.remaining()
    }

    fn slice(&self, region: Region) -> &[u8] {
        self.arena.slice(region)
    }

    fn slice_mut(&mut self, region: Region) -> &mut [u8] {
        self.arena.slice_mut(region)
    }
}

impl Drop for RollbackGuard<'_> {
    fn drop(&mut self) {
        tracing::trace!(
            arena = %self.arena.id(),
            front_freed = self.arena.used_front().saturating_sub(self.front.offset()),
            back_freed = self.back.offset().saturating_sub(self.arena.marker_back().offset()),
            "rollback"
        );
        self.arena.free_to_marker_front(self.front);
        self.arena.free_to_marker_back(self.back);
        if self.arena.buffer_is_front() != self.was_front {
            self.arena.swap_buffers();
        }
    }
}

impl std::fmt::Debug for RollbackGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollbackGuard")
            .field("arena", &self.arena.id())
            .field("front", &self.front.offset())
            .field("back", &self.back.offset())
            .field("was_front", &self.was_front)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn snapshot(arena: &DualArena) -> (Marker, Marker, bool) {
        (arena.marker_front(), arena.marker_back(), arena.buffer_is_front())
    }

    #[test]
    fn drop_restores_both_cursors() {
        let mut arena = DualArena::new(64);
        arena.alloc_front(4).unwrap();
        arena.alloc_back(4).unwrap();
        let before = snapshot(&arena);
        {
            let mut guard = arena.scope();
            guard.alloc_front(10).unwrap();
            guard.alloc_back(10).unwrap();
            guard.alloc(3).unwrap();
        }
        assert_eq!(snapshot(&arena), before);
    }

    #[test]
    fn guard_starts_on_front_and_restores_back() {
        let mut arena = DualArena::new(32);
        arena.swap_buffers();
        {
            let guard = RollbackGuard::new(&mut arena);
            assert!(guard.buffer_is_front());
            assert!(!guard.was_front());
        }
        assert!(!arena.buffer_is_front());
    }

    #[test]
    fn inner_swap_is_undone() {
        let mut arena = DualArena::new(32);
        {
            let mut guard = arena.scope();
            guard.swap_buffers();
            guard.alloc(8).unwrap();
            assert_eq!(guard.used_back(), 8);
        }
        assert!(arena.buffer_is_front());
        assert_eq!(arena.used_back(), 0);
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut arena = DualArena::new(64);
        let mut outer = arena.scope();
        outer.alloc_front(4).unwrap();
        let mid = (outer.marker_front(), outer.marker_back());
        {
            let mut inner = outer.scope();
            inner.alloc_front(8).unwrap();
            inner.alloc_back(8).unwrap();
        }
        assert_eq!((outer.marker_front(), outer.marker_back()), mid);
        drop(outer);
        assert_eq!(arena.used_front(), 0);
    }

    #[test]
    fn guard_allocates_through_stack_allocator() {
        fn fill<A: StackAllocator + ?Sized>(alloc: &mut A, n: u32) -> u32 {
            let mut total = 0;
            while let Some(r) = alloc.alloc(n) {
                alloc.slice_mut(r).fill(0x5A);
                total += n;
            }
            total
        }

        let mut arena = DualArena::new(32);
        arena.alloc_front(8).unwrap();
        {
            let mut guard = arena.scope();
            guard.swap_buffers();
            assert_eq!(fill(&mut guard, 4), 24);
            assert_eq!(StackAllocator::remaining(&guard), 0);
        }
        assert_eq!(arena.used_front(), 8);
        assert_eq!(arena.used_back(), 0);
    }

    #[test]
    fn nested_scope_keeps_outer_rollback_point() {
        let mut arena = DualArena::new(64);
        {
            let mut outer = arena.scope();
            outer.alloc_back(4).unwrap();
            {
                let mut inner = outer.scope();
                inner.alloc_back(16).unwrap();
                assert_eq!(inner.back_marker().offset(), 60);
            }
            assert_eq!(outer.used_back(), 4);
            assert_eq!(outer.back_marker().offset(), 64);
        }
        assert_eq!(arena.used_back(), 0);
    }

    #[test]
    fn markers_match_construction_state() {
        let mut arena = DualArena::new(16);
        arena.alloc_front(2).unwrap();
        let front = arena.marker_front();
        let back = arena.marker_back();
        let guard = arena.scope();
        assert_eq!(guard.front_marker(), front);
        assert_eq!(guard.back_marker(), back);
    }

    #[test]
    fn rollback_runs_on_early_return() {
        fn work(arena: &mut DualArena) -> Result<(), &'static str> {
            let mut guard = arena.scope();
            guard.alloc_back(12).ok_or("full")?;
            guard.alloc_back(12).ok_or("full")?;
            Ok(())
        }

        let mut arena = DualArena::new(16);
        assert_eq!(work(&mut arena), Err("full"));
        assert_eq!(arena.used_back(), 0);
    }

    #[test]
    fn rollback_runs_on_panic() {
        let mut arena = DualArena::new(32);
        arena.swap_buffers();
        let before = snapshot(&arena);
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut guard = arena.scope();
            guard.alloc_front(8).unwrap();
            guard.alloc_back(8).unwrap();
            guard.swap_buffers();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(snapshot(&arena), before);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_sequence_inside_scope_is_undone(
                pre_front in 0u32..16,
                pre_back in 0u32..16,
                start_back in any::<bool>(),
                ops in proptest::collection::vec((0u8..4, 0u32..16), 0..32),
            ) {
                let mut arena = DualArena::new(128);
                arena.alloc_front(pre_front).unwrap();
                arena.alloc_back(pre_back).unwrap();
                if start_back {
                    arena.swap_buffers();
                }
                let before = snapshot(&arena);
                {
                    let mut guard = arena.scope();
                    for (kind, size) in ops {
                        match kind {
                            0 => { let _ = guard.alloc_front(size); }
                            1 => { let _ = guard.alloc_back(size); }
                            2 => { let _ = guard.alloc(size); }
                            _ => guard.swap_buffers(),
                        }
                    }
                }
                prop_assert_eq!(snapshot(&arena), before);
            }
        }
    }
}
