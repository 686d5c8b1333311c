//! Standard arena layouts for scenario tests.

use strata_arena::{Arena, DualArena, Marker, Region};

use crate::push_i32;

/// A 12-byte arena holding three `i32` slots.
pub struct ThreeSlotArena {
    pub arena: Arena,
    pub slots: [Region; 3],
    /// Marker taken after the first slot.
    pub after_first: Marker,
}

impl ThreeSlotArena {
    /// Slot values written at construction.
    pub const VALUES: [i32; 3] = [42, 13, -17];

    /// Build the arena: `42`, marker, `13`, `-17`.
    pub fn new() -> Self {
        let mut arena = Arena::new(12);
        let first = push_i32(&mut arena, Self::VALUES[0]).expect("slot fits");
        let after_first = arena.marker();
        let second = push_i32(&mut arena, Self::VALUES[1]).expect("slot fits");
        let third = push_i32(&mut arena, Self::VALUES[2]).expect("slot fits");
        Self {
            arena,
            slots: [first, second, third],
            after_first,
        }
    }
}

impl Default for ThreeSlotArena {
    fn default() -> Self {
        Self::new()
    }
}

/// A dual arena with `front` bytes taken on the front and `back` bytes on
/// the back. Panics if they do not fit in `capacity`.
pub fn dual_with_usage(capacity: u32, front: u32, back: u32) -> DualArena {
    let mut arena = DualArena::new(capacity);
    arena.alloc_front(front).expect("front usage fits");
    arena.alloc_back(back).expect("back usage fits");
    arena
}
