//! The interning table value type.
//!
//! [`StringTable`] is the non-global form of the table: two states, one
//! per reverse-lookup mode. The process-wide table in [`crate::global`]
//! is one of these behind a mutex.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::config::Instrumentation;
use crate::id::StringId;

/// Mapping from [`StringId`] to the text it was computed from.
///
/// Entries are never removed. Stored text is leaked on first insert so
/// lookups can hand out `&'static str`; the table only ever grows by one
/// copy per distinct id.
#[derive(Debug)]
pub enum StringTable {
    /// Instrumented: first-seen text per id, in first-seen order.
    Recording(IndexMap<StringId, &'static str>),
    /// Uninstrumented: ids are computed, nothing is stored.
    HashOnly,
}

impl StringTable {
    /// Empty table in the given mode.
    pub fn new(instrumentation: Instrumentation) -> Self {
        match instrumentation {
            Instrumentation::Enabled => Self::Recording(IndexMap::new()),
            Instrumentation::Disabled => Self::HashOnly,
        }
    }

    /// Hash `text` and, when recording, store it under its id.
    ///
    /// If the id is already present the stored text is kept, even if it
    /// differs from `text` (a hash collision).
    pub fn intern(&mut self, text: &str) -> StringId {
        self.insert(text).0
    }

    /// Like [`StringTable::intern`], also reporting whether this call
    /// stored new text. Always `false` when not recording.
    pub fn insert(&mut self, text: &str) -> (StringId, bool) {
        let id = StringId::of(text);
        match self {
            Self::Recording(map) => match map.entry(id) {
                Entry::Vacant(slot) => {
                    slot.insert(Box::leak(Box::<str>::from(text)));
                    (id, true)
                }
                Entry::Occupied(_) => (id, false),
            },
            Self::HashOnly => (id, false),
        }
    }

    /// Text stored for `id`, or `None` if absent or not recording.
    pub fn resolve(&self, id: StringId) -> Option<&'static str> {
        match self {
            Self::Recording(map) => map.get(&id).copied(),
            Self::HashOnly => None,
        }
    }

    /// Whether `id` has stored text.
    pub fn contains(&self, id: StringId) -> bool {
        match self {
            Self::Recording(map) => map.contains_key(&id),
            Self::HashOnly => false,
        }
    }

    /// Number of stored entries. Always 0 when not recording.
    pub fn len(&self) -> usize {
        match self {
            Self::Recording(map) => map.len(),
            Self::HashOnly => 0,
        }
    }

    /// Whether no text is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The mode this table was created in.
    pub fn instrumentation(&self) -> Instrumentation {
        match self {
            Self::Recording(_) => Instrumentation::Enabled,
            Self::HashOnly => Instrumentation::Disabled,
        }
    }

    /// Stored `(id, text)` pairs in first-interned order.
    pub fn iter(&self) -> impl Iterator<Item = (StringId, &'static str)> + '_ {
        let entries = match self {
            Self::Recording(map) => Some(map.iter().map(|(id, text)| (*id, *text))),
            Self::HashOnly => None,
        };
        entries.into_iter().flatten()
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new(Instrumentation::default_for_build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURES: [&str; 3] = ["my string", "brudda", "was geht ab?"];

    #[test]
    fn fixture_ids_are_distinct() {
        let mut table = StringTable::new(Instrumentation::Enabled);
        let ids: Vec<_> = FIXTURES.iter().map(|s| table.intern(s)).collect();
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
    }

    #[test]
    fn repeated_intern_is_stable_and_stores_once() {
        let mut table = StringTable::new(Instrumentation::Enabled);
        let first = table.intern("my string");
        for _ in 0..100 {
            assert_eq!(table.intern("my string"), first);
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn recording_resolves_text() {
        let mut table = StringTable::new(Instrumentation::Enabled);
        let id = table.intern("brudda");
        assert!(table.contains(id));
        assert_eq!(table.resolve(id), Some("brudda"));
        assert_eq!(table.resolve(StringId::of("never interned")), None);
    }

    #[test]
    fn hash_only_never_resolves() {
        let mut table = StringTable::new(Instrumentation::Disabled);
        let id = table.intern("was geht ab?");
        assert_eq!(id, StringId::of("was geht ab?"));
        assert_eq!(table.resolve(id), None);
        assert!(!table.contains(id));
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn insert_reports_first_store_only() {
        let mut table = StringTable::new(Instrumentation::Enabled);
        let (id, inserted) = table.insert("brudda");
        assert!(inserted);
        assert_eq!(table.insert("brudda"), (id, false));

        let mut hash_only = StringTable::new(Instrumentation::Disabled);
        assert_eq!(hash_only.insert("brudda"), (id, false));
    }

    #[test]
    fn mode_round_trips() {
        assert_eq!(
            StringTable::new(Instrumentation::Enabled).instrumentation(),
            Instrumentation::Enabled
        );
        assert_eq!(
            StringTable::new(Instrumentation::Disabled).instrumentation(),
            Instrumentation::Disabled
        );
    }

    #[test]
    fn iter_keeps_first_interned_order() {
        let mut table = StringTable::new(Instrumentation::Enabled);
        for s in FIXTURES {
            table.intern(s);
        }
        table.intern("my string");
        let texts: Vec<_> = table.iter().map(|(_, text)| text).collect();
        assert_eq!(texts, FIXTURES);
    }

    #[test]
    fn empty_string_has_id_zero() {
        let mut table = StringTable::new(Instrumentation::Enabled);
        let id = table.intern("");
        assert_eq!(id, StringId(0));
        assert_eq!(table.resolve(id), Some(""));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolve_returns_interned_text(texts in proptest::collection::vec(".{0,24}", 1..16)) {
                let mut table = StringTable::new(Instrumentation::Enabled);
                for text in &texts {
                    let id = table.intern(text);
                    prop_assert_eq!(id, StringId::of(text));
                    // First-seen text wins on collision.
                    let stored = table.resolve(id).unwrap();
                    prop_assert_eq!(StringId::of(stored), id);
                }
            }
        }
    }
}
