//! The keyed-object contract and its in-memory implementation.
//!
//! A [`KeyedObject`] is an untyped, queryable property bag: it can answer "what is the value of
//! this field", name its kind and gid, and report its fields to an [`EncodeContext`]. Typed views
//! in [`crate::objects`] are thin wrappers over one.
//!
//! Objects built in memory are [`DefaultKeyedObject`]s, created through a
//! [`KeyedObjectBuilder`]. Objects decoded from a table are provided by
//! [`crate::archive::PBXObjectReferenceKeyedObject`], usually behind a
//! [`crate::coding::CachingKeyedObject`].

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::coding::{CodingKey, EncodeContext, FieldValue, ObjectKind};
use crate::model::{Dictionary, PBXObjects, Value};
use crate::objects::CodeableObject;
use crate::{Error, Result};

/// Opaque identifier of one decode session.
///
/// Every object decoded by one top-level decode call carries the same stamp, letting downstream
/// caches recognize objects that belong together. No ordering or freshness semantics are
/// attached to it beyond equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionStamp(u64);

impl SessionStamp {
    /// Allocates a stamp never handed out before in this process.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        SessionStamp(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Capability contract shared by every object representation.
pub trait KeyedObject: fmt::Debug + Send + Sync {
    /// The `isa` discriminant, `None` for inline-only kinds.
    fn isa(&self) -> Option<&str>;

    /// The gid carried over from a decoded table, `None` for freshly built objects.
    fn global_id(&self) -> Option<&str>;

    /// Decodes the value of `key`. Absent fields yield `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`Error::MissingCoder`] if `key` has no coder, or any error the coder raises for a
    /// malformed or dangling value.
    fn try_decode(&self, key: CodingKey) -> Result<Option<FieldValue>>;

    /// Reports the fields of this object to `context`.
    ///
    /// # Errors
    /// Propagates any error raised by `context` or while decoding fields to report.
    fn encode(&self, context: &mut dyn EncodeContext) -> Result<()>;

    /// The decode session this object belongs to, `None` for freshly built objects.
    fn age(&self) -> Option<SessionStamp>;

    /// The object this one was derived from by overriding some of its fields.
    fn parent(&self) -> Option<&KeyedObjectRc> {
        None
    }

    /// Returns true if `key` has a value.
    ///
    /// # Errors
    /// See [`KeyedObject::try_decode`].
    fn has(&self, key: CodingKey) -> Result<bool> {
        Ok(self.try_decode(key)?.is_some())
    }
}

/// Shared handle to any [`KeyedObject`]
pub type KeyedObjectRc = Arc<dyn KeyedObject>;

/// In-memory keyed object holding already-typed values.
///
/// An optional *parent* supplies every field not set here, along with its gid. This is how a
/// decoded object is modified: the result keeps the parent's identity and re-encodes the parent's
/// remaining fields unchanged.
#[derive(Debug, Clone)]
pub struct DefaultKeyedObject {
    kind: ObjectKind,
    parent: Option<KeyedObjectRc>,
    values: BTreeMap<CodingKey, FieldValue>,
}

impl DefaultKeyedObject {
    /// The kind of this object
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The values set directly on this object, excluding the parent's
    #[must_use]
    pub fn values(&self) -> &BTreeMap<CodingKey, FieldValue> {
        &self.values
    }
}

impl KeyedObject for DefaultKeyedObject {
    fn isa(&self) -> Option<&str> {
        self.kind.isa()
    }

    fn global_id(&self) -> Option<&str> {
        self.parent.as_ref().and_then(|parent| parent.global_id())
    }

    fn try_decode(&self, key: CodingKey) -> Result<Option<FieldValue>> {
        if key == CodingKey::ISA {
            return Ok(self.kind.isa().map(FieldValue::from));
        }
        match (self.values.get(&key), &self.parent) {
            (Some(value), _) => Ok(Some(value.clone())),
            (None, Some(parent)) => parent.try_decode(key),
            (None, None) => Ok(None),
        }
    }

    fn encode(&self, context: &mut dyn EncodeContext) -> Result<()> {
        if let Some(parent) = &self.parent {
            let overridden = self.values.keys().map(CodingKey::name).collect();
            parent.encode(&mut Overriding {
                inner: context,
                overridden,
            })?;
        }
        for (key, value) in &self.values {
            context.encode_field(*key, value)?;
        }
        Ok(())
    }

    fn age(&self) -> Option<SessionStamp> {
        None
    }

    fn parent(&self) -> Option<&KeyedObjectRc> {
        self.parent.as_ref()
    }
}

/// Forwards a parent's fields, dropping those the child overrides.
struct Overriding<'a> {
    inner: &'a mut dyn EncodeContext,
    overridden: HashSet<&'static str>,
}

impl EncodeContext for Overriding<'_> {
    fn encode_field(&mut self, key: CodingKey, value: &FieldValue) -> Result<()> {
        if self.overridden.contains(key.name()) {
            return Ok(());
        }
        self.inner.encode_field(key, value)
    }

    fn encode_raw(&mut self, field: &str, value: &Value, source: &PBXObjects) -> Result<()> {
        if self.overridden.contains(field) {
            return Ok(());
        }
        self.inner.encode_raw(field, value, source)
    }

    fn encode_global_id(&mut self, global_id: &str) -> Result<()> {
        self.inner.encode_global_id(global_id)
    }

    fn encode_reference(&mut self, object: &CodeableObject) -> Result<String> {
        self.inner.encode_reference(object)
    }

    fn encode_inline(&mut self, object: &CodeableObject) -> Result<Dictionary> {
        self.inner.encode_inline(object)
    }

    fn skips(&self, field: &str) -> bool {
        self.overridden.contains(field) || self.inner.skips(field)
    }
}

/// Builder for [`DefaultKeyedObject`]
///
/// ```rust
/// use pbxcodec::coding::{KeyedObject, KeyedObjectBuilder, ObjectKind};
///
/// let object = KeyedObjectBuilder::new(ObjectKind::XCBuildConfiguration)
///     .put("name", "Debug")
///     .requires("name")
///     .build()?;
///
/// assert_eq!(object.isa(), Some("XCBuildConfiguration"));
/// # Ok::<(), pbxcodec::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct KeyedObjectBuilder {
    kind: ObjectKind,
    parent: Option<KeyedObjectRc>,
    values: BTreeMap<CodingKey, FieldValue>,
    defaults: Vec<(CodingKey, FieldValue)>,
    required: Vec<&'static str>,
    lenient: bool,
}

impl KeyedObjectBuilder {
    /// Creates an empty builder for an object of `kind`.
    #[must_use]
    pub fn new(kind: ObjectKind) -> Self {
        KeyedObjectBuilder {
            kind,
            parent: None,
            values: BTreeMap::new(),
            defaults: Vec::new(),
            required: Vec::new(),
            lenient: false,
        }
    }

    /// The kind being built
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Falls back to `parent` for every field not set on this builder.
    #[must_use]
    pub fn parent(mut self, parent: KeyedObjectRc) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets field `name`.
    #[must_use]
    pub fn put(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets field `name` if `value` is present.
    #[must_use]
    pub fn put_opt<V: Into<FieldValue>>(mut self, name: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    /// Sets field `name` in place.
    pub fn set(&mut self, name: &'static str, value: impl Into<FieldValue>) {
        self.values.insert(self.kind.key(name), value.into());
    }

    /// Appends `element` to the list field `name`, creating the list if needed.
    ///
    /// A field previously set to a non-list value is replaced by a one-element list.
    pub fn add(&mut self, name: &'static str, element: impl Into<FieldValue>) {
        let key = self.kind.key(name);
        let element = element.into();
        match self.values.get_mut(&key) {
            Some(FieldValue::List(values)) => values.push(element),
            _ => {
                self.values.insert(key, FieldValue::List(vec![element]));
            }
        }
    }

    /// Uses `value` for field `name` unless it is set on the builder or the parent at build time.
    #[must_use]
    pub fn if_absent(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.defaults.push((self.kind.key(name), value.into()));
        self
    }

    /// Fails the build when field `name` ends up absent.
    #[must_use]
    pub fn requires(mut self, name: &'static str) -> Self {
        self.required.push(name);
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Returns true if field `name` is set on the builder itself.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.values.keys().any(|key| key.name() == name)
    }

    /// Returns the value set for field `name`, if any.
    #[must_use]
    pub fn get(&self, name: &'static str) -> Option<&FieldValue> {
        self.values.get(&self.kind.key(name))
    }

    /// Removes and returns the value set for field `name`.
    pub fn take(&mut self, name: &'static str) -> Option<FieldValue> {
        self.values.remove(&self.kind.key(name))
    }

    fn parent_has(&self, key: CodingKey) -> Result<bool> {
        match &self.parent {
            Some(parent) => parent.has(key),
            None => Ok(false),
        }
    }

    /// Builds the object.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] if a required field is absent and the builder is not
    /// lenient.
    pub fn build(mut self) -> Result<DefaultKeyedObject> {
        for (key, value) in std::mem::take(&mut self.defaults) {
            if !self.values.contains_key(&key) && !self.parent_has(key)? {
                self.values.insert(key, value);
            }
        }

        if !self.lenient {
            for field in &self.required {
                let key = self.kind.key(field);
                if !self.values.contains_key(&key) && !self.parent_has(key)? {
                    return Err(Error::MissingField {
                        kind: self.kind,
                        field,
                    });
                }
            }
        }

        Ok(DefaultKeyedObject {
            kind: self.kind,
            parent: self.parent,
            values: self.values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration(name: &'static str) -> KeyedObjectBuilder {
        KeyedObjectBuilder::new(ObjectKind::XCBuildConfiguration).put("name", name)
    }

    #[test]
    fn test_try_decode() -> Result<()> {
        let object = configuration("Debug").build()?;
        let name = ObjectKind::XCBuildConfiguration.key("name");
        let settings = ObjectKind::XCBuildConfiguration.key("buildSettings");

        assert_eq!(object.try_decode(name)?, Some(FieldValue::from("Debug")));
        assert_eq!(object.try_decode(settings)?, None);
        assert_eq!(
            object.try_decode(CodingKey::ISA)?,
            Some(FieldValue::from("XCBuildConfiguration"))
        );
        assert_eq!(object.global_id(), None);
        assert_eq!(object.age(), None);
        Ok(())
    }

    #[test]
    fn test_defaults_and_requirements() -> Result<()> {
        let object = KeyedObjectBuilder::new(ObjectKind::PBXShellScriptBuildPhase)
            .put("shellPath", "/bin/zsh")
            .if_absent("shellPath", "/bin/sh")
            .if_absent("shellScript", "")
            .build()?;
        let key = |name| ObjectKind::PBXShellScriptBuildPhase.key(name);

        assert_eq!(object.try_decode(key("shellPath"))?, Some(FieldValue::from("/bin/zsh")));
        assert_eq!(object.try_decode(key("shellScript"))?, Some(FieldValue::from("")));

        let missing = KeyedObjectBuilder::new(ObjectKind::PBXNativeTarget)
            .requires("name")
            .build();
        assert!(matches!(
            missing,
            Err(Error::MissingField {
                kind: ObjectKind::PBXNativeTarget,
                field: "name"
            })
        ));

        let lenient = KeyedObjectBuilder::new(ObjectKind::PBXNativeTarget)
            .requires("name")
            .lenient()
            .build();
        assert!(lenient.is_ok());
        Ok(())
    }

    #[test]
    fn test_add_appends() -> Result<()> {
        let mut builder = KeyedObjectBuilder::new(ObjectKind::PBXShellScriptBuildPhase);
        builder.add("inputPaths", "a");
        builder.add("inputPaths", "b");
        let object = builder.build()?;

        assert_eq!(
            object.try_decode(ObjectKind::PBXShellScriptBuildPhase.key("inputPaths"))?,
            Some(FieldValue::from(vec!["a", "b"]))
        );
        Ok(())
    }

    #[test]
    fn test_parent_fallback() -> Result<()> {
        let parent: KeyedObjectRc = Arc::new(
            configuration("Debug")
                .put("buildSettings", Dictionary::new())
                .build()?,
        );
        let child = KeyedObjectBuilder::new(ObjectKind::XCBuildConfiguration)
            .parent(parent)
            .put("name", "Release")
            .if_absent("buildSettings", {
                let mut settings = Dictionary::new();
                settings.insert("A".into(), Value::from("B"));
                settings
            })
            .requires("buildSettings")
            .build()?;
        let key = |name| ObjectKind::XCBuildConfiguration.key(name);

        assert_eq!(child.try_decode(key("name"))?, Some(FieldValue::from("Release")));
        assert_eq!(
            child.try_decode(key("buildSettings"))?,
            Some(FieldValue::Dictionary(Dictionary::new()))
        );
        Ok(())
    }

    #[test]
    fn test_session_stamps_are_unique() {
        let first = SessionStamp::next();
        let second = SessionStamp::next();
        assert_ne!(first, second);
        assert!(second.value() > first.value());
    }
}
