//! Strata: stack arenas with marker rollback and interned string identifiers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Strata sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! strata::logging::init_logging();
//!
//! // Long-lived data on the front, scratch on the back.
//! let mut arena = DualArena::new(16 * 1024);
//! let session = arena.alloc_front(64).unwrap();
//!
//! let id = intern_path(&mut arena, r"textures\grass.png").unwrap();
//! assert_eq!(id, StringId::of("textures/grass.png"));
//!
//! arena.scoped(|scratch| {
//!     let mut name: StringBuffer<'_, RollbackGuard<'_>> = StringBuffer::new(scratch, 32).unwrap();
//!     name.put_str("hp=").format_i32(-17);
//!     assert_eq!(name.as_str().unwrap(), "hp=-17");
//! });
//!
//! assert_eq!(arena.used_front(), session.len());
//! assert_eq!(arena.used_back(), 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | `ArenaId`, `Marker`, `Region`, `Side`, the `StackAllocator` trait |
//! | [`arena`] | `strata-arena` | `Arena`, `DualArena`, `RollbackGuard`, config and errors |
//! | [`sid`] | `strata-sid` | `StringId`, CRC-32, the interning table |
//! | [`text`] | `strata-text` | Encodings, `StringBuffer`, path ids |
//! | [`logging`] | | `tracing` subscriber setup |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod logging;

/// Core identifiers and the allocator trait (`strata-core`).
pub use strata_core as types;

/// Stack arenas and rollback guards (`strata-arena`).
pub use strata_arena as arena;

/// Interned string identifiers (`strata-sid`).
///
/// Call [`sid::init`] at startup to pick the instrumentation mode
/// explicitly; otherwise it is chosen on first use.
pub use strata_sid as sid;

/// Text buffers, encodings and path ids (`strata-text`).
pub use strata_text as text;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Arenas
    pub use strata_arena::{Arena, ArenaConfig, DualArena, RollbackGuard};

    // Core types and traits
    pub use strata_core::{Marker, Region, Side, StackAllocator};

    // Interning
    pub use strata_sid::{intern, resolve, Instrumentation, SidConfig, StringId};

    // Text
    pub use strata_text::{intern_path, Encoding, StringBuffer, Utf8, MAX_PATH_LENGTH};

    // Errors
    pub use strata_arena::ArenaError;
    pub use strata_sid::SidError;
    pub use strata_text::TextError;
}
