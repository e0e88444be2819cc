//! The gid-keyed objects table.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::reference::PBXObjectReference;

/// The flat objects table of a project file, keyed and ordered by gid.
///
/// The table is immutable once built and cheap to clone; every decode session shares the same
/// underlying entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PBXObjects {
    entries: Arc<BTreeMap<String, PBXObjectReference>>,
}

impl PBXObjects {
    /// Creates an empty table builder.
    #[must_use]
    pub fn builder() -> PBXObjectsBuilder {
        PBXObjectsBuilder::default()
    }

    /// Looks up an entry by its gid.
    #[must_use]
    pub fn get_by_id(&self, global_id: &str) -> Option<&PBXObjectReference> {
        self.entries.get(global_id)
    }

    /// Returns true if an entry with `global_id` exists.
    #[must_use]
    pub fn contains(&self, global_id: &str) -> bool {
        self.entries.contains_key(global_id)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates all entries in gid order.
    pub fn iter(&self) -> impl Iterator<Item = &PBXObjectReference> {
        self.entries.values()
    }

    /// Iterates all gids in order.
    pub fn gids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates the entries whose `isa` equals `isa`.
    pub fn of_isa<'a>(&'a self, isa: &'a str) -> impl Iterator<Item = &'a PBXObjectReference> {
        self.iter().filter(move |entry| entry.isa() == Some(isa))
    }
}

impl<'a> IntoIterator for &'a PBXObjects {
    type Item = &'a PBXObjectReference;
    type IntoIter = std::collections::btree_map::Values<'a, String, PBXObjectReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl FromIterator<PBXObjectReference> for PBXObjects {
    fn from_iter<T: IntoIterator<Item = PBXObjectReference>>(iter: T) -> Self {
        let mut builder = PBXObjects::builder();
        for entry in iter {
            builder.add(entry);
        }
        builder.build()
    }
}

/// Accumulates entries for a [`PBXObjects`] table.
#[derive(Debug, Default)]
pub struct PBXObjectsBuilder {
    entries: BTreeMap<String, PBXObjectReference>,
}

impl PBXObjectsBuilder {
    /// Adds an entry, replacing any previous entry with the same gid.
    pub fn add(&mut self, entry: PBXObjectReference) -> &mut Self {
        self.entries.insert(entry.global_id().to_string(), entry);
        self
    }

    /// Returns true if an entry with `global_id` was already added.
    #[must_use]
    pub fn contains(&self, global_id: &str) -> bool {
        self.entries.contains_key(global_id)
    }

    /// Number of entries added so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the table.
    #[must_use]
    pub fn build(self) -> PBXObjects {
        PBXObjects {
            entries: Arc::new(self.entries),
        }
    }
}
