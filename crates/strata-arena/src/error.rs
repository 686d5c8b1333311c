//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use strata_core::Side;

/// Errors that can occur during arena operations.
///
/// Plain `alloc*` calls report exhaustion as `None`; the `try_alloc*`
/// variants and the fallible constructor report through this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The request does not fit in the space left on the given side.
    CapacityExceeded {
        /// Side the request was made against.
        side: Side,
        /// Number of bytes requested.
        requested: u32,
        /// Number of bytes still free on that side.
        remaining: u32,
    },
    /// The system allocator refused the backing buffer.
    StorageUnavailable {
        /// Size of the buffer that could not be acquired.
        requested: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                side,
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena capacity exceeded on {side} side: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::StorageUnavailable { requested } => {
                write!(f, "could not acquire {requested} bytes of arena storage")
            }
        }
    }
}

impl Error for ArenaError {}
