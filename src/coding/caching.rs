//! Per-key memoization for decoded objects.

use dashmap::DashMap;

use crate::coding::{CodingKey, EncodeContext, FieldValue, KeyedObject, KeyedObjectRc, SessionStamp};
use crate::Result;

/// Memoizing decorator over a [`KeyedObject`].
///
/// The first successful decode of a key is cached, absent results included, and every later
/// access returns the cached value. Nested objects therefore come back as the same handle on
/// every access, which gives decoded graphs stable identity. Failed decodes are not cached: the
/// error surfaces again on the next access and sibling fields are unaffected.
///
/// The cache is a [`DashMap`], so one decoded graph may be navigated from several threads.
#[derive(Debug)]
pub struct CachingKeyedObject<K> {
    delegate: K,
    cache: DashMap<CodingKey, Option<FieldValue>>,
}

impl<K: KeyedObject> CachingKeyedObject<K> {
    /// Wraps `delegate` with an empty cache.
    pub fn new(delegate: K) -> Self {
        CachingKeyedObject {
            delegate,
            cache: DashMap::new(),
        }
    }

    /// The wrapped object
    pub fn delegate(&self) -> &K {
        &self.delegate
    }

    /// Number of keys decoded so far
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl<K: KeyedObject> KeyedObject for CachingKeyedObject<K> {
    fn isa(&self) -> Option<&str> {
        self.delegate.isa()
    }

    fn global_id(&self) -> Option<&str> {
        self.delegate.global_id()
    }

    fn try_decode(&self, key: CodingKey) -> Result<Option<FieldValue>> {
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.value().clone());
        }

        // Decode without holding a shard lock; a racing thread may have stored the value first
        let decoded = self.delegate.try_decode(key)?;
        let stored = self.cache.entry(key).or_insert(decoded);
        Ok(stored.value().clone())
    }

    fn encode(&self, context: &mut dyn EncodeContext) -> Result<()> {
        self.delegate.encode(context)
    }

    fn age(&self) -> Option<SessionStamp> {
        self.delegate.age()
    }

    fn parent(&self) -> Option<&KeyedObjectRc> {
        self.delegate.parent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::ObjectKind;
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts decode invocations and fails on `path`
    #[derive(Debug, Default)]
    struct Counting {
        decodes: AtomicUsize,
    }

    impl KeyedObject for Counting {
        fn isa(&self) -> Option<&str> {
            Some("PBXGroup")
        }

        fn global_id(&self) -> Option<&str> {
            Some("GROUP")
        }

        fn try_decode(&self, key: CodingKey) -> Result<Option<FieldValue>> {
            self.decodes.fetch_add(1, Ordering::SeqCst);
            match key.name() {
                "name" => Ok(Some(FieldValue::from("Sources"))),
                "path" => Err(malformed_value!(key, "broken")),
                _ => Ok(None),
            }
        }

        fn encode(&self, _: &mut dyn EncodeContext) -> Result<()> {
            Ok(())
        }

        fn age(&self) -> Option<SessionStamp> {
            None
        }
    }

    #[test]
    fn test_repeated_access_decodes_once() -> Result<()> {
        let object = CachingKeyedObject::new(Counting::default());
        let name = ObjectKind::PBXGroup.key("name");
        let source_tree = ObjectKind::PBXGroup.key("sourceTree");

        for _ in 0..3 {
            assert_eq!(object.try_decode(name)?, Some(FieldValue::from("Sources")));
            assert_eq!(object.try_decode(source_tree)?, None);
        }

        assert_eq!(object.delegate().decodes.load(Ordering::SeqCst), 2);
        assert_eq!(object.cached(), 2);
        Ok(())
    }

    #[test]
    fn test_failures_are_not_cached_and_do_not_poison_siblings() -> Result<()> {
        let object = CachingKeyedObject::new(Counting::default());
        let name = ObjectKind::PBXGroup.key("name");
        let path = ObjectKind::PBXGroup.key("path");

        assert!(object.try_decode(name)?.is_some());
        assert!(matches!(object.try_decode(path), Err(Error::MalformedValue { .. })));
        assert!(matches!(object.try_decode(path), Err(Error::MalformedValue { .. })));
        assert_eq!(object.try_decode(name)?, Some(FieldValue::from("Sources")));

        assert_eq!(object.delegate().decodes.load(Ordering::SeqCst), 3);
        assert_eq!(object.global_id(), Some("GROUP"));
        Ok(())
    }
}
