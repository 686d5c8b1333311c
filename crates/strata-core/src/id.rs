//! Arena identities and cursor markers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ArenaId`] allocation.
static ARENA_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for an arena.
///
/// Allocated from a monotonic atomic counter via [`ArenaId::next`]. Two
/// distinct arenas always have different IDs, even if they have the same
/// capacity. Markers and regions carry the ID of the arena that produced
/// them so a debug build can catch a marker being replayed against the
/// wrong arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaId(u64);

impl ArenaId {
    /// Allocate a fresh, unique arena ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(ARENA_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two regions of a dual arena.
///
/// The front region grows upward from offset 0, the back region grows
/// downward from the capacity. Single-direction arenas only ever use
/// [`Side::Front`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Low end of the buffer, cursor grows upward.
    Front,
    /// High end of the buffer, cursor grows downward.
    Back,
}

impl Side {
    /// The other side.
    pub fn flip(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    /// Whether this is [`Side::Front`].
    pub fn is_front(self) -> bool {
        self == Self::Front
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
        }
    }
}

/// A saved cursor position.
///
/// Markers are snapshots, not borrows: they stay valid for the whole life
/// of the arena, but are only meaningful against the arena and side that
/// produced them. Rewinding to a marker never grows a cursor, so replaying
/// a stale marker from a nested scope is harmless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Marker {
    arena: ArenaId,
    side: Side,
    offset: u32,
}

impl Marker {
    /// Create a marker for `offset` on `side` of `arena`.
    ///
    /// Arena implementations call this; user code obtains markers from
    /// an arena's `marker*()` accessors.
    pub fn new(arena: ArenaId, side: Side, offset: u32) -> Self {
        Self {
            arena,
            side,
            offset,
        }
    }

    /// The arena this marker was taken from.
    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    /// The side whose cursor this marker records.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Cursor value in bytes from the start of the backing buffer.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Marker(arena={}, {}@{})", self.arena, self.side, self.offset)
    }
}
