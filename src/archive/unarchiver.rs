use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::coding::{
    coders::discriminate, CachingKeyedObject, CoderRegistry, CodingKey, DecodeContext,
    EncodeContext, FieldValue, KeyedObject, ObjectKind, SessionStamp, ValueCoder,
};
use crate::model::{Dictionary, PBXObjects, PBXProj};
use crate::objects::{Codeable, CodeableObject, PBXProject};
use crate::{Error, Result};

/// Receives instrumentation events of a decode session.
///
/// Both callbacks default to doing nothing. Implementations must be cheap: they run on every
/// wrapped object and every decoded field.
pub trait DecodeObserver: Send + Sync {
    /// Called whenever a table entry or inline map is wrapped into an object.
    fn object_wrapped(&self, _kind: ObjectKind, _global_id: Option<&str>) {}

    /// Called whenever a coder decodes the raw value of `key`.
    fn coder_invoked(&self, _key: CodingKey) {}
}

/// Shared state of one top-level decode call
struct DecodeSession {
    objects: PBXObjects,
    stamp: SessionStamp,
    observer: Option<Arc<dyn DecodeObserver>>,
}

impl DecodeSession {
    fn wrap(
        self: &Arc<Self>,
        kind: ObjectKind,
        global_id: Option<&str>,
        fields: Arc<Dictionary>,
    ) -> CodeableObject {
        trace!("Wrapping {} {}", kind, global_id.unwrap_or("<inline>"));
        if let Some(observer) = &self.observer {
            observer.object_wrapped(kind, global_id);
        }
        let object = PBXObjectReferenceKeyedObject {
            session: self.clone(),
            kind,
            global_id: global_id.map(str::to_string),
            fields,
        };
        CodeableObject::new(kind, Arc::new(CachingKeyedObject::new(object)))
    }
}

/// A keyed object answering field queries straight from a raw field map.
///
/// The map is either a table entry or an inline map nested in another object. Fields are
/// interpreted through the coder registry on every access, so this type is normally used behind
/// a [`CachingKeyedObject`]. Referenced objects are resolved in the table of the decode session
/// the object belongs to, and carry the same [`SessionStamp`].
pub struct PBXObjectReferenceKeyedObject {
    session: Arc<DecodeSession>,
    kind: ObjectKind,
    global_id: Option<String>,
    fields: Arc<Dictionary>,
}

impl PBXObjectReferenceKeyedObject {
    /// The kind this object was discriminated as
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The raw field map
    #[must_use]
    pub fn fields(&self) -> &Dictionary {
        &self.fields
    }
}

impl fmt::Debug for PBXObjectReferenceKeyedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PBXObjectReferenceKeyedObject")
            .field("kind", &self.kind)
            .field("global_id", &self.global_id)
            .field("age", &self.session.stamp)
            .finish_non_exhaustive()
    }
}

impl KeyedObject for PBXObjectReferenceKeyedObject {
    fn isa(&self) -> Option<&str> {
        self.kind.isa()
    }

    fn global_id(&self) -> Option<&str> {
        self.global_id.as_deref()
    }

    fn try_decode(&self, key: CodingKey) -> Result<Option<FieldValue>> {
        if key == CodingKey::ISA {
            return Ok(self.kind.isa().map(FieldValue::from));
        }
        let coder = CoderRegistry::global().get(key)?;
        let Some(raw) = self.fields.get(key.name()) else {
            return Ok(None);
        };

        if let Some(observer) = &self.session.observer {
            observer.coder_invoked(key);
        }
        coder.decode(key, raw, self).map(Some)
    }

    fn encode(&self, context: &mut dyn EncodeContext) -> Result<()> {
        if let Some(global_id) = &self.global_id {
            context.encode_global_id(global_id)?;
        }

        let registry = CoderRegistry::global();
        for (field, raw) in self.fields.iter() {
            // Fields replaced by an override are never decoded
            if field == CodingKey::ISA.name() || context.skips(field) {
                continue;
            }
            match registry.key_for(self.kind, field) {
                Some(key) => {
                    if let Some(value) = self.try_decode(key)? {
                        context.encode_field(key, &value)?;
                    }
                }
                None => context.encode_raw(field, raw, &self.session.objects)?,
            }
        }
        Ok(())
    }

    fn age(&self) -> Option<SessionStamp> {
        Some(self.session.stamp)
    }
}

impl DecodeContext for PBXObjectReferenceKeyedObject {
    fn resolve_reference(
        &self,
        key: CodingKey,
        gid: &str,
        kinds: &'static [ObjectKind],
    ) -> Result<CodeableObject> {
        let entry = self
            .session
            .objects
            .get_by_id(gid)
            .ok_or_else(|| Error::DanglingReference {
                gid: gid.to_string(),
                field: key.to_string(),
            })?;
        let kind = discriminate(key, entry.fields(), kinds)?;
        Ok(self.session.wrap(kind, Some(gid), entry.shared_fields()))
    }

    fn wrap_inline(
        &self,
        key: CodingKey,
        fields: &Dictionary,
        kinds: &'static [ObjectKind],
    ) -> Result<CodeableObject> {
        let kind = discriminate(key, fields, kinds)?;
        Ok(self.session.wrap(kind, None, Arc::new(fields.clone())))
    }
}

/// Wraps [`PBXProj`] tables into lazily decoded object graphs.
///
/// Decoding is O(1) in the size of the table: only the requested root is wrapped. Every field is
/// decoded on first access and memoized, and referenced objects are wrapped when the field
/// holding them is read. All objects of one decode call share a fresh [`SessionStamp`].
#[derive(Clone, Default)]
pub struct PBXObjectUnarchiver {
    observer: Option<Arc<dyn DecodeObserver>>,
}

impl fmt::Debug for PBXObjectUnarchiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PBXObjectUnarchiver")
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl PBXObjectUnarchiver {
    /// Creates an unarchiver without instrumentation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unarchiver reporting to `observer`.
    #[must_use]
    pub fn with_observer(observer: Arc<dyn DecodeObserver>) -> Self {
        PBXObjectUnarchiver {
            observer: Some(observer),
        }
    }

    /// Decodes the root project of `proj`.
    ///
    /// # Errors
    /// Returns [`Error::DanglingReference`] if the root gid is not in the table and
    /// [`Error::KindMismatch`] if the root is not a project.
    pub fn decode(&self, proj: &PBXProj) -> Result<PBXProject> {
        self.decode_object(proj, proj.root_object())
    }

    /// Decodes the object `gid` of `proj` as a `T`.
    ///
    /// # Errors
    /// Returns [`Error::DanglingReference`] if `gid` is not in the table and
    /// [`Error::KindMismatch`] if the object is not one of `T`'s kinds.
    pub fn decode_object<T: Codeable>(&self, proj: &PBXProj, gid: &str) -> Result<T> {
        let session = Arc::new(DecodeSession {
            objects: proj.objects().clone(),
            stamp: SessionStamp::next(),
            observer: self.observer.clone(),
        });
        debug!(
            "Decoding {} of {} objects in session {}",
            gid,
            proj.objects().len(),
            session.stamp.value()
        );

        let entry = proj
            .objects()
            .get_by_id(gid)
            .ok_or_else(|| Error::DanglingReference {
                gid: gid.to_string(),
                field: "rootObject".to_string(),
            })?;
        let kind = discriminate(CodingKey::ISA, entry.fields(), T::KINDS)?;
        T::from_object(session.wrap(kind, Some(gid), entry.shared_fields()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::model::{PBXObjectReference, Value};
    use crate::objects::{PBXGroup, PBXTarget};

    #[derive(Default)]
    struct Counter {
        wrapped: AtomicUsize,
        decoded: AtomicUsize,
    }

    impl DecodeObserver for Counter {
        fn object_wrapped(&self, _kind: ObjectKind, _global_id: Option<&str>) {
            self.wrapped.fetch_add(1, Ordering::Relaxed);
        }

        fn coder_invoked(&self, _key: CodingKey) {
            self.decoded.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn table(entries: Vec<PBXObjectReference>) -> PBXProj {
        PBXProj::new("ROOT", entries.into_iter().collect())
    }

    fn project(fields: &[(&str, Value)]) -> PBXObjectReference {
        PBXObjectReference::of("ROOT", |map| {
            map.insert("isa".into(), "PBXProject".into());
            for (name, value) in fields {
                map.insert((*name).to_string(), value.clone());
            }
        })
    }

    fn group(gid: &str, name: &str) -> PBXObjectReference {
        PBXObjectReference::of(gid, |map| {
            map.insert("isa".into(), "PBXGroup".into());
            map.insert("name".into(), name.into());
        })
    }

    #[test]
    fn test_fields_are_decoded_on_demand() -> Result<()> {
        let proj = table(vec![
            project(&[("mainGroup", "MAIN".into()), ("developmentRegion", "en".into())]),
            group("MAIN", "Main"),
        ]);
        let counter = Arc::new(Counter::default());
        let decoded = PBXObjectUnarchiver::with_observer(counter.clone()).decode(&proj)?;

        assert_eq!(counter.wrapped.load(Ordering::Relaxed), 1);
        assert_eq!(counter.decoded.load(Ordering::Relaxed), 0);

        assert_eq!(decoded.development_region()?.as_deref(), Some("en"));
        assert_eq!(decoded.development_region()?.as_deref(), Some("en"));
        assert_eq!(counter.decoded.load(Ordering::Relaxed), 1);

        let main = decoded.main_group()?;
        assert_eq!(main.name()?.as_deref(), Some("Main"));
        assert_eq!(counter.wrapped.load(Ordering::Relaxed), 2);
        assert_eq!(main.global_id(), Some("MAIN"));
        assert_eq!(main.age(), decoded.age());
        assert!(decoded.age().is_some());
        Ok(())
    }

    #[test]
    fn test_memoized_references_keep_identity() -> Result<()> {
        let proj = table(vec![
            project(&[("mainGroup", "MAIN".into())]),
            group("MAIN", "Main"),
        ]);
        let decoded = PBXObjectUnarchiver::new().decode(&proj)?;

        let first = decoded.main_group()?;
        let second = decoded.main_group()?;
        assert_eq!(first.as_object().instance(), second.as_object().instance());
        Ok(())
    }

    #[test]
    fn test_dangling_reference() -> Result<()> {
        let proj = table(vec![project(&[("mainGroup", "GONE".into())])]);
        let decoded = PBXObjectUnarchiver::new().decode(&proj)?;

        match decoded.main_group() {
            Err(Error::DanglingReference { gid, field }) => {
                assert_eq!(gid, "GONE");
                assert_eq!(field, "PBXProject.mainGroup");
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(matches!(
            PBXObjectUnarchiver::new().decode_object::<PBXGroup>(&proj, "NOPE"),
            Err(Error::DanglingReference { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_kind_mismatch() -> Result<()> {
        let proj = table(vec![
            project(&[("targets", Value::Array(vec!["MAIN".into()]))]),
            group("MAIN", "Main"),
        ]);
        let decoded = PBXObjectUnarchiver::new().decode(&proj)?;

        match decoded.targets() {
            Err(Error::KindMismatch { found, expected }) => {
                assert_eq!(found, "PBXGroup");
                assert_eq!(expected, PBXTarget::KINDS.to_vec());
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(matches!(
            PBXObjectUnarchiver::new().decode_object::<PBXTarget>(&proj, "ROOT"),
            Err(Error::KindMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_malformed_field_does_not_poison_siblings() -> Result<()> {
        let proj = table(vec![project(&[
            ("hasScannedForEncodings", "maybe".into()),
            ("developmentRegion", "en".into()),
        ])]);
        let decoded = PBXObjectUnarchiver::new().decode(&proj)?;

        assert!(matches!(
            decoded.has_scanned_for_encodings(),
            Err(Error::MalformedValue { .. })
        ));
        assert_eq!(decoded.development_region()?.as_deref(), Some("en"));
        assert!(matches!(
            decoded.has_scanned_for_encodings(),
            Err(Error::MalformedValue { .. })
        ));
        Ok(())
    }
}
