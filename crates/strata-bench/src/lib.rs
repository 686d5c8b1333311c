//! Benchmark profiles for the Strata arena and interning subsystem.
//!
//! - [`session_arena`]: a dual arena sized like an asset-compiler run
//! - [`asset_paths`]: deterministic Windows-style asset paths under [`ASSET_ROOT`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_arena::{ArenaConfig, DualArena};

/// Asset root shared by every generated path.
pub const ASSET_ROOT: &str = r"D:\projects\game\assets";

const FOLDERS: [&str; 4] = ["textures", "meshes", "shaders", "levels"];
const EXTENSIONS: [&str; 4] = ["png", "mesh", "frag", "lvl"];

/// Dual arena with the default 1 MiB capacity.
pub fn session_arena() -> DualArena {
    match DualArena::with_config(&ArenaConfig::default()) {
        Ok(arena) => arena,
        Err(err) => panic!("benchmark arena: {err}"),
    }
}

/// `count` distinct asset paths below [`ASSET_ROOT`].
///
/// Paths are derived from the index only, so every run sees the same set.
pub fn asset_paths(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let kind = i % FOLDERS.len();
            format!(
                r"{ASSET_ROOT}\{}\group_{}\asset_{i}.{}",
                FOLDERS[kind],
                i / 64,
                EXTENSIONS[kind]
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_paths_are_distinct_and_rooted() {
        let paths = asset_paths(200);
        let unique: std::collections::HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), 200);
        assert!(paths.iter().all(|p| p.starts_with(ASSET_ROOT)));
    }

    #[test]
    fn session_arena_is_default_sized() {
        assert_eq!(session_arena().capacity(), ArenaConfig::DEFAULT_CAPACITY_BYTES);
    }
}
