//! The [`StringId`] identifier type.

use std::fmt;

use crate::hash::crc32;

/// Compact identifier standing in for a piece of text.
///
/// The value is the CRC-32 of the text's UTF-8 bytes. Byte-identical text
/// always yields the same id, in every process and every build. Distinct
/// texts that happen to share a hash share an id: there is no collision
/// detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(pub u32);

impl StringId {
    /// Id of `text`, without touching the interning table.
    ///
    /// Equal to [`intern(text)`](crate::intern), but computable in `const`
    /// context:
    ///
    /// ```
    /// use strata_sid::StringId;
    ///
    /// const PLAYER: StringId = StringId::of("player");
    /// assert_eq!(PLAYER, strata_sid::intern("player"));
    /// ```
    pub const fn of(text: &str) -> Self {
        Self(crc32(text.as_bytes()))
    }

    /// The raw hash value.
    pub const fn hash(self) -> u32 {
        self.0
    }
}

impl From<u32> for StringId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl fmt::Display for StringId {
    /// `"{text} ({hash})"` when the global table resolves the id,
    /// `"sid_{hash}"` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::resolve(*self) {
            Some(text) => write!(f, "{text} ({})", self.0),
            None => write!(f, "sid_{}", self.0),
        }
    }
}
