//! Core types and traits for the Strata memory subsystem.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every allocator in the workspace: arena
//! identities, cursor markers, allocation regions, and the
//! [`StackAllocator`] policy trait that lets string and path code run
//! against any of the arena variants.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod region;
pub mod traits;

pub use id::{ArenaId, Marker, Side};
pub use region::Region;
pub use traits::StackAllocator;
