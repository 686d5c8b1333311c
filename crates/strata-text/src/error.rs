//! Text and path error types.

use std::error::Error;
use std::fmt;

use strata_arena::ArenaError;
use strata_sid::StringId;

/// Errors from string buffers and path helpers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextError {
    /// Not enough arena space for a string buffer of the requested size.
    OutOfSpace {
        /// Requested buffer capacity in bytes.
        requested: u32,
        /// Bytes still free in the allocator.
        remaining: u32,
    },
    /// A path is longer than [`MAX_PATH_LENGTH`](crate::MAX_PATH_LENGTH).
    PathTooLong {
        /// Length of the path in bytes.
        len: usize,
        /// The limit.
        max: u32,
    },
    /// The scratch side of the arena cannot hold the path.
    ScratchExhausted {
        /// Bytes needed.
        requested: u32,
        /// Bytes free between the two cursors.
        remaining: u32,
    },
    /// The asset root is longer than the path, or splits a character.
    RootOutsidePath {
        /// Byte length of the root.
        root_len: usize,
        /// Byte length of the full path.
        path_len: usize,
    },
    /// The id has no recorded text (unknown, or instrumentation disabled).
    UnknownId(StringId),
    /// The buffer does not hold valid UTF-8.
    InvalidUtf8,
    /// Arena failure other than exhaustion.
    Arena(ArenaError),
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSpace {
                requested,
                remaining,
            } => write!(
                f,
                "no room for a {requested} byte string buffer ({remaining} bytes free)"
            ),
            Self::PathTooLong { len, max } => {
                write!(f, "path of {len} bytes exceeds the {max} byte limit")
            }
            Self::ScratchExhausted {
                requested,
                remaining,
            } => write!(
                f,
                "asset path too long for scratch buffer: need {requested} bytes, {remaining} free"
            ),
            Self::RootOutsidePath { root_len, path_len } => write!(
                f,
                "asset root of {root_len} bytes does not fit path of {path_len} bytes"
            ),
            Self::UnknownId(id) => write!(f, "no text recorded for {id}"),
            Self::InvalidUtf8 => write!(f, "buffer contents are not valid UTF-8"),
            Self::Arena(e) => write!(f, "arena error: {e}"),
        }
    }
}

impl Error for TextError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for TextError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::CapacityExceeded {
                requested,
                remaining,
                ..
            } => Self::ScratchExhausted {
                requested,
                remaining,
            },
            other => Self::Arena(other),
        }
    }
}
