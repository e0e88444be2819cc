//! Raw objects-table entries.

use std::sync::Arc;

use crate::model::value::{Dictionary, Value};

/// One entry of the flat objects table: a gid and the raw field map of the object it names.
///
/// The field map is shared, so handing an entry to a lazily decoded object is O(1) regardless of
/// how many fields it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PBXObjectReference {
    global_id: String,
    fields: Arc<Dictionary>,
}

impl PBXObjectReference {
    /// Creates a new table entry.
    pub fn new(global_id: impl Into<String>, fields: Dictionary) -> Self {
        PBXObjectReference {
            global_id: global_id.into(),
            fields: Arc::new(fields),
        }
    }

    /// Creates a table entry by populating a fresh field map.
    ///
    /// ```rust
    /// use pbxcodec::PBXObjectReference;
    ///
    /// let group = PBXObjectReference::of("A1B2C3", |fields| {
    ///     fields.insert("isa".into(), "PBXGroup".into());
    ///     fields.insert("name".into(), "Sources".into());
    /// });
    /// assert_eq!(group.isa(), Some("PBXGroup"));
    /// ```
    pub fn of(global_id: impl Into<String>, populate: impl FnOnce(&mut Dictionary)) -> Self {
        let mut fields = Dictionary::new();
        populate(&mut fields);
        Self::new(global_id, fields)
    }

    /// The gid of this entry
    #[must_use]
    pub fn global_id(&self) -> &str {
        &self.global_id
    }

    /// The `isa` discriminant, if present and a string
    #[must_use]
    pub fn isa(&self) -> Option<&str> {
        self.fields.get("isa").and_then(Value::as_str)
    }

    /// Raw value of one field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The complete raw field map
    #[must_use]
    pub fn fields(&self) -> &Dictionary {
        &self.fields
    }

    pub(crate) fn shared_fields(&self) -> Arc<Dictionary> {
        self.fields.clone()
    }
}
