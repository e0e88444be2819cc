use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, trace};

use crate::coding::{CoderRegistry, CodingKey, EncodeContext, FieldValue, KeyedObjectRc, ValueCoder};
use crate::config::CodecConfig;
use crate::model::{
    Dictionary, GidGenerator, PBXObjectReference, PBXObjects, PBXObjectsBuilder, PBXProj, Value,
};
use crate::objects::{identity::stable_hash, Codeable, CodeableObject};
use crate::{Error, Result};

/// Flattens typed object graphs into [`PBXProj`] tables.
///
/// The archiver itself is immutable: every [`PBXObjectArchiver::encode`] call starts from a
/// private copy of the seed gid generator and owns its identity map, so repeated encodes of the
/// same graph produce the same table and separate graphs can be encoded from several threads.
///
/// Objects decoded from an existing table keep their gid. Freshly built objects get one from the
/// generator, derived from their kind and identity fields. When a decoded graph is modified and
/// written back, seed the archiver from the original table with
/// [`PBXObjectArchiver::for_rewrite`] so that new objects never receive a gid that is already
/// taken by an object decoded later in the same run.
///
/// A modified copy made with `to_builder` keeps the gid of its original, and its fields replace
/// the original's entry no matter which of the two the encoder reaches first. Unknown fields of
/// decoded objects are passed through together with the table entries they name.
#[derive(Debug, Clone, Default)]
pub struct PBXObjectArchiver {
    config: CodecConfig,
    generator: GidGenerator,
}

impl PBXObjectArchiver {
    /// Creates an archiver with the default configuration and no pre-existing gids.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an archiver with the given configuration.
    #[must_use]
    pub fn with_config(config: CodecConfig) -> Self {
        PBXObjectArchiver {
            config,
            generator: GidGenerator::new(),
        }
    }

    /// Creates an archiver for writing back a graph decoded from `proj`.
    ///
    /// The gids of `proj` are reserved and its header versions are kept.
    #[must_use]
    pub fn for_rewrite(proj: &PBXProj) -> Self {
        PBXObjectArchiver {
            config: CodecConfig::default()
                .with_versions(proj.archive_version(), proj.object_version()),
            generator: GidGenerator::seeded(proj.objects().gids()),
        }
    }

    /// The configuration used by this archiver
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encodes the graph reachable from `root`. The gid of `root` becomes the `rootObject`.
    ///
    /// # Errors
    /// Returns [`Error::MissingCoder`] if an object reports a field without coder,
    /// [`Error::GidConflict`] if a carried-over gid was already issued to a fresh object in this
    /// run or is carried by two objects neither of which is a modified copy of the other,
    /// [`Error::Malformed`] if `root` is an inline-only kind, or any error raised while
    /// decoding lazily loaded fields.
    pub fn encode<T: Codeable>(&self, root: &T) -> Result<PBXProj> {
        let mut session = ArchiveSession::new(&self.config, self.generator.clone());
        let root_object = session.encode_reference(root.as_object())?;
        let objects = session.table.build();

        debug!(
            "Encoded {} objects with root {} ({} gids generated)",
            objects.len(),
            root_object,
            session.generated.len()
        );
        Ok(PBXProj::with_config(root_object, objects, &self.config))
    }
}

/// State of one encode call.
struct ArchiveSession<'a> {
    config: &'a CodecConfig,
    generator: GidGenerator,
    table: PBXObjectsBuilder,
    /// Object instance to the gid it was encoded under
    identity: HashMap<usize, String>,
    /// Carried-over gid to the object whose fields fill its entry
    holders: HashMap<String, CodeableObject>,
    /// Gids of entries copied verbatim from a decode table
    copied: HashSet<String>,
    /// Gids issued by the generator
    generated: HashSet<String>,
    /// Keeps every visited object alive, so instance addresses stay unique for the whole run
    retained: Vec<CodeableObject>,
}

impl<'a> ArchiveSession<'a> {
    fn new(config: &'a CodecConfig, generator: GidGenerator) -> Self {
        ArchiveSession {
            config,
            generator,
            table: PBXObjectsBuilder::default(),
            identity: HashMap::new(),
            holders: HashMap::new(),
            copied: HashSet::new(),
            generated: HashSet::new(),
            retained: Vec::new(),
        }
    }

    fn remember(&mut self, object: &CodeableObject, gid: &str) {
        self.identity.insert(object.instance(), gid.to_string());
        self.retained.push(object.clone());
    }

    /// Reserves a carried-over gid for `object`. Returns false if the gid is already held by an
    /// equal object or by a modified copy of `object`, in which case `object` is not encoded.
    ///
    /// A modified copy takes the gid over from the object it was derived from. Two objects
    /// carrying the same gid with neither derived from the other are a conflict.
    fn claim(&mut self, object: &CodeableObject, gid: &str) -> Result<bool> {
        if self.generated.contains(gid) {
            return Err(Error::GidConflict(gid.to_string()));
        }
        let fresh = match self.holders.get(gid) {
            None => true,
            Some(holder) => {
                let (holder, candidate) = (holder.delegate(), object.delegate());
                if derives_from(candidate, holder) {
                    debug!("Entry {} is replaced by a modified copy", gid);
                    true
                } else if same_entry(candidate, holder) || derives_from(holder, candidate) {
                    false
                } else {
                    return Err(Error::GidConflict(gid.to_string()));
                }
            }
        };
        if fresh {
            self.holders.insert(gid.to_string(), object.clone());
        }
        self.generator.mark_used(gid);
        self.remember(object, gid);
        Ok(fresh)
    }

    fn holds(&self, gid: &str, object: &CodeableObject) -> bool {
        self.holders
            .get(gid)
            .map_or(true, |holder| holder.instance() == object.instance())
    }

    fn encode_reference(&mut self, object: &CodeableObject) -> Result<String> {
        if let Some(gid) = self.identity.get(&object.instance()) {
            return Ok(gid.clone());
        }

        let kind = object.kind();
        let isa = kind
            .isa()
            .ok_or_else(|| malformed_error!("{} objects are stored inline and have no gid", kind))?;

        // Claimed before visiting the fields, so reference cycles of decoded graphs terminate
        let carried = object.global_id().map(str::to_string);
        if let Some(gid) = &carried {
            if !self.claim(object, gid)? {
                return Ok(gid.clone());
            }
        }

        let mut collector = FieldCollector::new(self, false);
        object.encode(&mut collector)?;
        let FieldCollector {
            mut fields,
            global_id: reported,
            ..
        } = collector;

        let gid = match (reported, carried) {
            (Some(reported), carried) => {
                let claimed = carried.as_deref() == Some(reported.as_str());
                if !claimed && !self.claim(object, &reported)? {
                    return Ok(reported);
                }
                reported
            }
            (None, Some(carried)) => carried,
            (None, None) => {
                let gid = self.generator.generate(isa, stable_hash(object)?);
                self.generated.insert(gid.clone());
                self.remember(object, &gid);
                gid
            }
        };

        // A modified copy reached while this object was being encoded already wrote the entry
        if !self.holds(&gid, object) {
            trace!("Entry {} was superseded while encoding", gid);
            return Ok(gid);
        }

        fields.insert(CodingKey::ISA.name().to_string(), Value::from(isa));
        trace!("Encoded {} as {}", isa, gid);
        self.table.add(PBXObjectReference::new(gid.clone(), fields));
        Ok(gid)
    }

    fn encode_inline(&mut self, object: &CodeableObject) -> Result<Dictionary> {
        let mut collector = FieldCollector::new(self, true);
        object.encode(&mut collector)?;
        let mut fields = collector.fields;
        if let Some(isa) = object.kind().isa() {
            fields.insert(CodingKey::ISA.name().to_string(), Value::from(isa));
        }
        Ok(fields)
    }

    /// Copies the entries of `source` that a passed-through raw value names, along with every
    /// entry those reach in turn. Entries held by an encoded object are left to that object.
    fn copy_referenced(&mut self, value: &Value, source: &PBXObjects) -> Result<()> {
        let mut pending = Vec::new();
        collect_strings(value, &mut pending);

        while let Some(gid) = pending.pop() {
            if self.holders.contains_key(gid) || self.copied.contains(gid) {
                continue;
            }
            let Some(entry) = source.get_by_id(gid) else {
                continue;
            };
            if self.generated.contains(gid) {
                return Err(Error::GidConflict(gid.to_string()));
            }

            trace!("Copying entry {} named by a raw field", gid);
            self.generator.mark_used(gid);
            self.copied.insert(gid.to_string());
            for (field, value) in entry.fields() {
                if field != CodingKey::ISA.name() {
                    collect_strings(value, &mut pending);
                }
            }
            self.table.add(entry.clone());
        }
        Ok(())
    }
}

/// Pushes every string nested in `value`, which includes any gids it holds.
fn collect_strings<'v>(value: &'v Value, out: &mut Vec<&'v str>) {
    match value {
        Value::String(text) => out.push(text),
        Value::Array(items) => items.iter().for_each(|item| collect_strings(item, out)),
        Value::Dictionary(map) => map.values().for_each(|item| collect_strings(item, out)),
        Value::Integer(_) | Value::Boolean(_) => {}
    }
}

/// Returns true if `a` and `b` both stand for the same unmodified table entry.
fn same_entry(a: &KeyedObjectRc, b: &KeyedObjectRc) -> bool {
    if Arc::ptr_eq(a, b) {
        return true;
    }
    a.age().is_some() && a.age() == b.age() && a.global_id() == b.global_id()
}

/// Returns true if `object` was built on top of `base`, directly or through other copies.
fn derives_from(object: &KeyedObjectRc, base: &KeyedObjectRc) -> bool {
    let mut ancestor = object.parent();
    while let Some(current) = ancestor {
        if same_entry(current, base) {
            return true;
        }
        ancestor = current.parent();
    }
    false
}

/// Collects the raw fields of one object.
struct FieldCollector<'s, 'a> {
    session: &'s mut ArchiveSession<'a>,
    fields: Dictionary,
    global_id: Option<String>,
    inline: bool,
}

impl<'s, 'a> FieldCollector<'s, 'a> {
    fn new(session: &'s mut ArchiveSession<'a>, inline: bool) -> Self {
        FieldCollector {
            session,
            fields: Dictionary::new(),
            global_id: None,
            inline,
        }
    }
}

impl EncodeContext for FieldCollector<'_, '_> {
    fn encode_field(&mut self, key: CodingKey, value: &FieldValue) -> Result<()> {
        let coder = CoderRegistry::global().get(key)?;
        let raw = coder.encode(key, value, self)?;
        self.fields.insert(key.name().to_string(), raw);
        Ok(())
    }

    fn encode_raw(&mut self, field: &str, value: &Value, source: &PBXObjects) -> Result<()> {
        if !self.session.config.preserve_unknown_fields {
            trace!("Dropping unknown field {}", field);
            return Ok(());
        }
        trace!("Passing through unknown field {}", field);
        self.session.copy_referenced(value, source)?;
        self.fields.insert(field.to_string(), value.clone());
        Ok(())
    }

    fn encode_global_id(&mut self, global_id: &str) -> Result<()> {
        if self.inline {
            return Err(malformed_error!(
                "Inline object reported gid {}, inline objects never own a table entry",
                global_id
            ));
        }
        self.global_id = Some(global_id.to_string());
        Ok(())
    }

    fn encode_reference(&mut self, object: &CodeableObject) -> Result<String> {
        self.session.encode_reference(object)
    }

    fn encode_inline(&mut self, object: &CodeableObject) -> Result<Dictionary> {
        self.session.encode_inline(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::PBXObjectUnarchiver;
    use crate::objects::{
        PBXBuildFile, PBXFileReference, PBXGroup, PBXNativeTarget, PBXProject,
        PBXSourcesBuildPhase, VersionRequirement, XCRemoteSwiftPackageReference,
    };

    fn sample() -> Result<PBXProject> {
        let main = PBXFileReference::of_group("main.c")?;
        let sources = PBXSourcesBuildPhase::builder()
            .file(PBXBuildFile::builder().file_ref(main.clone()).build()?)
            .build()?;
        let target = PBXNativeTarget::builder()
            .name("App")
            .build_phase(sources)
            .build()?;
        PBXProject::builder().file(main).target(target).build()
    }

    #[test]
    fn test_shared_objects_are_encoded_once() -> Result<()> {
        let proj = PBXObjectArchiver::new().encode(&sample()?)?;
        let objects = proj.objects();

        assert_eq!(objects.of_isa("PBXFileReference").count(), 1);
        assert_eq!(objects.of_isa("PBXProject").count(), 1);
        // one configuration list for the project and one for the target
        assert_eq!(objects.of_isa("XCConfigurationList").count(), 2);

        let root = objects
            .get_by_id(proj.root_object())
            .ok_or_else(|| malformed_error!("root missing"))?;
        assert_eq!(root.isa(), Some("PBXProject"));
        Ok(())
    }

    #[test]
    fn test_encode_is_deterministic() -> Result<()> {
        let project = sample()?;
        let archiver = PBXObjectArchiver::new();

        let first = archiver.encode(&project)?;
        let second = archiver.encode(&project)?;
        assert_eq!(first, second);

        // equal graphs built separately get the same gids
        assert_eq!(archiver.encode(&sample()?)?, first);
        Ok(())
    }

    #[test]
    fn test_gids_are_well_formed_and_unique() -> Result<()> {
        let proj = PBXObjectArchiver::new().encode(&sample()?)?;
        let gids = proj.objects().gids().collect::<HashSet<_>>();

        assert_eq!(gids.len(), proj.objects().len());
        for gid in gids {
            assert_eq!(gid.len(), 24);
            assert!(gid.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
        Ok(())
    }

    #[test]
    fn test_inline_objects_have_no_entry() -> Result<()> {
        let package = XCRemoteSwiftPackageReference::builder()
            .repository_url("https://github.com/apple/swift-log")
            .requirement(VersionRequirement::exact("1.5.0")?)
            .build()?;
        let project = PBXProject::builder().package_reference(package).build()?;
        let proj = PBXObjectArchiver::new().encode(&project)?;

        let entry = proj
            .objects()
            .of_isa("XCRemoteSwiftPackageReference")
            .next()
            .ok_or_else(|| malformed_error!("package missing"))?;
        let requirement = entry
            .get("requirement")
            .and_then(Value::as_dictionary)
            .ok_or_else(|| malformed_error!("requirement not inline"))?;

        assert_eq!(requirement.get("kind"), Some(&Value::from("exactVersion")));
        assert_eq!(requirement.get("version"), Some(&Value::from("1.5.0")));
        assert!(requirement.get("isa").is_none());
        Ok(())
    }

    #[test]
    fn test_gid_conflict_and_rewrite_seed() -> Result<()> {
        let group = || PBXGroup::builder().name("Shared").build();
        let original = PBXObjectArchiver::new().encode(&group()?)?;
        let decoded: PBXGroup =
            PBXObjectUnarchiver::new().decode_object(&original, original.root_object())?;

        // the fresh copy is encoded first and takes the gid the decoded group carries
        let root = PBXGroup::builder()
            .name("Root")
            .child(group()?)
            .child(decoded.clone())
            .build()?;
        assert!(matches!(
            PBXObjectArchiver::new().encode(&root),
            Err(Error::GidConflict(gid)) if gid == original.root_object()
        ));

        let rewritten = PBXObjectArchiver::for_rewrite(&original).encode(&root)?;
        assert_eq!(rewritten.objects().of_isa("PBXGroup").count(), 3);
        assert!(rewritten.objects().contains(original.root_object()));
        Ok(())
    }

    #[test]
    fn test_inline_root_is_rejected() -> Result<()> {
        let requirement = VersionRequirement::branch("main")?;
        assert!(matches!(
            PBXObjectArchiver::new().encode(&requirement),
            Err(Error::Malformed { .. })
        ));
        Ok(())
    }
}
