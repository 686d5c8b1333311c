//! Arena configuration parameters.

/// Configuration for a stack arena.
///
/// Controls the size of the single backing buffer. Validated at
/// construction; the capacity is immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing buffer in bytes.
    ///
    /// Default: 1_048_576 (1 MiB). For a dual arena this is shared
    /// between the front and back regions.
    pub capacity_bytes: u32,
}

impl ArenaConfig {
    /// Default capacity: 1 MiB.
    pub const DEFAULT_CAPACITY_BYTES: u32 = 1024 * 1024;

    /// Create a config for the given capacity.
    pub fn new(capacity_bytes: u32) -> Self {
        Self { capacity_bytes }
    }

    /// Capacity as a `usize` for buffer allocation.
    pub fn capacity(&self) -> usize {
        self.capacity_bytes as usize
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY_BYTES)
    }
}
