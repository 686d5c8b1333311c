//! Path identifiers.
//!
//! Paths are stored as [`StringId`]s of their normalised form: forward
//! slashes only, relative to the asset root. Normalisation runs in
//! back-side scratch of a [`DualArena`] inside a rollback scope, so the
//! arena is left exactly as it was found.

use std::path::MAIN_SEPARATOR;

use strata_arena::DualArena;
use strata_core::StackAllocator;
use strata_sid::StringId;

use crate::buffer::StringBuffer;
use crate::error::TextError;

/// Longest path, in bytes, the helpers accept.
pub const MAX_PATH_LENGTH: u32 = 4096;

fn checked_len(path: &str) -> Result<u32, TextError> {
    u32::try_from(path.len())
        .ok()
        .filter(|&len| len <= MAX_PATH_LENGTH)
        .ok_or(TextError::PathTooLong {
            len: path.len(),
            max: MAX_PATH_LENGTH,
        })
}

/// Intern `path` with every `\` replaced by `/`.
///
/// ```
/// use strata_arena::DualArena;
/// use strata_text::intern_path;
///
/// let mut arena = DualArena::new(8192);
/// let id = intern_path(&mut arena, r"textures\grass.png").unwrap();
/// assert_eq!(id, strata_sid::intern("textures/grass.png"));
/// assert_eq!(arena.used_back(), 0);
/// ```
pub fn intern_path(arena: &mut DualArena, path: &str) -> Result<StringId, TextError> {
    let len = checked_len(path)?;
    arena.scoped(|scratch| -> Result<StringId, TextError> {
        let region = scratch.try_alloc_back(len)?;
        let bytes = scratch.slice_mut(region);
        for (dst, &src) in bytes.iter_mut().zip(path.as_bytes()) {
            *dst = if src == b'\\' { b'/' } else { src };
        }
        let normalised =
            std::str::from_utf8(scratch.slice(region)).map_err(|_| TextError::InvalidUtf8)?;
        let id = strata_sid::intern(normalised);
        tracing::trace!(target: "strata::path", sid = id.hash(), len, "path interned");
        Ok(id)
    })
}

/// Id of an asset given its full path and the byte length of the asset
/// root prefix.
///
/// The root and one following separator are stripped, and the rest is
/// interned as with [`intern_path`].
pub fn asset_id(
    arena: &mut DualArena,
    full_path: &str,
    root_len: usize,
) -> Result<StringId, TextError> {
    let relative = full_path
        .get(root_len..)
        .ok_or(TextError::RootOutsidePath {
            root_len,
            path_len: full_path.len(),
        })?;
    let relative = relative
        .strip_prefix(['/', '\\'])
        .unwrap_or(relative);
    intern_path(arena, relative)
}

/// Write the text of `id` into a new buffer, with `/` replaced by the
/// platform separator.
///
/// Needs the id's text to be recorded, so fails with
/// [`TextError::UnknownId`] when instrumentation is disabled.
pub fn to_platform_path<'a, A: StackAllocator + ?Sized>(
    alloc: &'a mut A,
    id: StringId,
) -> Result<StringBuffer<'a, A>, TextError> {
    let text = strata_sid::resolve(id).ok_or(TextError::UnknownId(id))?;
    let len = checked_len(text)?;
    let mut buffer = StringBuffer::new(alloc, len)?;
    for ch in text.chars() {
        buffer.put_char(if ch == '/' { MAIN_SEPARATOR } else { ch });
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_arena::Arena;

    #[test]
    fn backslashes_are_normalised() {
        let mut arena = DualArena::new(MAX_PATH_LENGTH);
        let id = intern_path(&mut arena, r"a\b\c").unwrap();
        assert_eq!(id, StringId::of("a/b/c"));
        assert_eq!(intern_path(&mut arena, "a/b/c").unwrap(), id);
    }

    #[test]
    fn arena_is_unchanged_after_interning() {
        let mut arena = DualArena::new(64);
        arena.alloc_front(8).unwrap();
        arena.swap_buffers();
        let before = (arena.marker_front(), arena.marker_back(), arena.buffer_is_front());
        intern_path(&mut arena, r"dir\file.txt").unwrap();
        let after = (arena.marker_front(), arena.marker_back(), arena.buffer_is_front());
        assert_eq!(before, after);
    }

    #[test]
    fn path_over_limit_is_rejected() {
        let mut arena = DualArena::new(8192);
        let long = "x".repeat(MAX_PATH_LENGTH as usize + 1);
        assert_eq!(
            intern_path(&mut arena, &long),
            Err(TextError::PathTooLong {
                len: MAX_PATH_LENGTH as usize + 1,
                max: MAX_PATH_LENGTH
            })
        );
        let exact = "x".repeat(MAX_PATH_LENGTH as usize);
        assert!(intern_path(&mut arena, &exact).is_ok());
    }

    #[test]
    fn small_arena_reports_scratch_exhausted() {
        let mut arena = DualArena::new(8);
        arena.alloc_front(4).unwrap();
        let err = intern_path(&mut arena, "abcdef").unwrap_err();
        assert_eq!(
            err,
            TextError::ScratchExhausted {
                requested: 6,
                remaining: 4
            }
        );
        assert_eq!(arena.used_front(), 4);
    }

    #[test]
    fn asset_id_strips_root_and_separator() {
        let mut arena = DualArena::new(256);
        let root = r"C:\game\assets";
        let full = r"C:\game\assets\textures\grass.png";
        let id = asset_id(&mut arena, full, root.len()).unwrap();
        assert_eq!(id, StringId::of("textures/grass.png"));

        let unix = asset_id(&mut arena, "/srv/assets/textures/grass.png", "/srv/assets".len())
            .unwrap();
        assert_eq!(unix, id);
    }

    #[test]
    fn asset_root_longer_than_path_is_rejected() {
        let mut arena = DualArena::new(64);
        assert_eq!(
            asset_id(&mut arena, "short", 10),
            Err(TextError::RootOutsidePath {
                root_len: 10,
                path_len: 5
            })
        );
    }

    #[test]
    fn platform_path_of_unknown_id_fails() {
        let mut arena = Arena::new(16);
        let id = StringId::of("path/never/interned/anywhere");
        assert_eq!(
            to_platform_path(&mut arena, id).unwrap_err(),
            TextError::UnknownId(id)
        );
    }
}
