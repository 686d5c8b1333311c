//! The process-wide interning table.
//!
//! One [`StringTable`] behind a [`Mutex`] inside a [`OnceLock`]. The table
//! is created either explicitly by [`init`] or on first use with
//! [`SidConfig::from_env`], and its mode never changes afterwards. The
//! lock covers the whole check-then-insert of [`intern`].

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use crate::config::{Instrumentation, SidConfig};
use crate::error::SidError;
use crate::id::StringId;
use crate::table::StringTable;

static TABLE: OnceLock<Mutex<StringTable>> = OnceLock::new();

fn table() -> &'static Mutex<StringTable> {
    TABLE.get_or_init(|| Mutex::new(StringTable::new(SidConfig::from_env().instrumentation)))
}

/// Lock the table. The table is append-only and every update is a single
/// map insert, so a poisoned lock still guards a consistent table.
///
/// Nothing may log while the guard is alive: a subscriber that displays a
/// [`StringId`] calls back into [`resolve`].
fn lock() -> MutexGuard<'static, StringTable> {
    table().lock().unwrap_or_else(PoisonError::into_inner)
}

/// Create the global table with `config`.
///
/// Must run before any other call in this module; returns
/// [`SidError::AlreadyInitialized`] if the table already exists.
pub fn init(config: SidConfig) -> Result<(), SidError> {
    let mut created = false;
    TABLE.get_or_init(|| {
        created = true;
        Mutex::new(StringTable::new(config.instrumentation))
    });
    if created {
        tracing::info!(target: "strata::sid", instrumentation = %config.instrumentation, "string table initialised");
        Ok(())
    } else {
        Err(SidError::AlreadyInitialized {
            active: instrumentation(),
        })
    }
}

/// Id of `text`, recording the text when instrumented.
///
/// ```
/// let a = strata_sid::intern("was geht ab?");
/// let b = strata_sid::intern("was geht ab?");
/// assert_eq!(a, b);
/// ```
pub fn intern(text: &str) -> StringId {
    let (id, inserted) = lock().insert(text);
    if inserted {
        tracing::debug!(target: "strata::sid", sid = id.0, text, "interned");
    }
    id
}

/// Text recorded for `id`.
///
/// Always `None` when instrumentation is disabled.
pub fn resolve(id: StringId) -> Option<&'static str> {
    lock().resolve(id)
}

/// Mode of the global table, creating it if needed.
pub fn instrumentation() -> Instrumentation {
    lock().instrumentation()
}

/// Number of recorded entries in the global table.
pub fn len() -> usize {
    lock().len()
}
