//! Fixed-capacity stack arenas with marker rollback.
//!
//! Two allocator variants share the same policy: O(1) bump allocation
//! out of a buffer acquired once at construction, and LIFO release by
//! rewinding a cursor to a previously taken [`Marker`].
//!
//! # Architecture
//!
//! ```text
//! Arena          [ allocated ....cursor→         free          ]
//!
//! DualArena      [ front ..→front     free     back←.. back    ]
//!                  └ active side selects the target of alloc()/marker()/…
//!
//! RollbackGuard  &mut DualArena + (front marker, back marker, side)
//!                  └ restored on drop
//! ```
//!
//! Allocation results are [`Region`] handles. Bytes are reached only
//! through the arena's range-checked `slice`/`slice_mut` accessors; the
//! crate contains no `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dual;
pub mod error;
pub mod guard;
pub mod stack;
mod storage;

// Public re-exports for the primary API surface.
pub use config::ArenaConfig;
pub use dual::DualArena;
pub use error::ArenaError;
pub use guard::RollbackGuard;
pub use stack::Arena;
pub use strata_core::{Marker, Region, Side, StackAllocator};
