//! Value coders: paired decode/encode strategies for one field's raw representation.
//!
//! Every coder implements [`ValueCoder`]. The registry stores them as the closed [`Coder`] enum,
//! chosen per field when the registry is built. Object-valued fields use one of two explicit
//! variants: [`ReferenceCoder`] stores the referent's gid and lets the referent own a table entry,
//! while [`InlineCoder`] copies the nested object into its parent's field map.

use std::fmt;

use crate::coding::{CodingKey, DecodeContext, EncodeContext, FieldValue, ObjectKind};
use crate::model::{Dictionary, Value};
use crate::objects::{Codeable, PBXSourceTree, ProductType, ProxyType, RequirementKind, SubFolder};
use crate::{Error, Result};

/// Decode/encode strategy for one field.
pub trait ValueCoder: fmt::Debug + Send + Sync {
    /// Interprets the raw value of field `key`.
    ///
    /// # Errors
    /// Returns [`Error::MalformedValue`] if `raw` has a shape this coder cannot interpret, or any
    /// error raised while resolving nested objects.
    fn decode(
        &self,
        key: CodingKey,
        raw: &Value,
        context: &dyn DecodeContext,
    ) -> Result<FieldValue>;

    /// Produces the raw value of field `key`.
    ///
    /// # Errors
    /// Returns [`Error::MalformedValue`] if `value` is not of the type this coder handles, or any
    /// error raised while encoding nested objects.
    fn encode(
        &self,
        key: CodingKey,
        value: &FieldValue,
        context: &mut dyn EncodeContext,
    ) -> Result<Value>;
}

fn unexpected_raw(key: CodingKey, expected: &str, raw: &Value) -> Error {
    malformed_value!(key, "expected {} but found {} {}", expected, raw.shape(), raw)
}

fn unexpected_value(key: CodingKey, expected: &str, value: &FieldValue) -> Error {
    malformed_value!(key, "cannot encode {} as {}", value.shape(), expected)
}

/// Plain string field
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCoder;

impl ValueCoder for StringCoder {
    fn decode(&self, key: CodingKey, raw: &Value, _: &dyn DecodeContext) -> Result<FieldValue> {
        match raw {
            Value::String(value) => Ok(FieldValue::String(value.clone())),
            other => Err(unexpected_raw(key, "string", other)),
        }
    }

    fn encode(
        &self,
        key: CodingKey,
        value: &FieldValue,
        _: &mut dyn EncodeContext,
    ) -> Result<Value> {
        match value {
            FieldValue::String(value) => Ok(Value::String(value.clone())),
            other => Err(unexpected_value(key, "string", other)),
        }
    }
}

/// Integer field. Decoding also accepts the numeric strings produced by text property lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerCoder;

impl ValueCoder for IntegerCoder {
    fn decode(&self, key: CodingKey, raw: &Value, _: &dyn DecodeContext) -> Result<FieldValue> {
        match raw {
            Value::Integer(value) => Ok(FieldValue::Integer(*value)),
            Value::String(value) => value
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| unexpected_raw(key, "integer", raw)),
            other => Err(unexpected_raw(key, "integer", other)),
        }
    }

    fn encode(
        &self,
        key: CodingKey,
        value: &FieldValue,
        _: &mut dyn EncodeContext,
    ) -> Result<Value> {
        match value {
            FieldValue::Integer(value) => Ok(Value::Integer(*value)),
            other => Err(unexpected_value(key, "integer", other)),
        }
    }
}

/// Canonical spelling a boolean field is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanSpelling {
    /// `1` / `0`
    OneZero,
    /// `YES` / `NO`
    YesNo,
}

impl BooleanSpelling {
    /// Spells `value`.
    #[must_use]
    pub fn spell(self, value: bool) -> &'static str {
        match (self, value) {
            (BooleanSpelling::OneZero, true) => "1",
            (BooleanSpelling::OneZero, false) => "0",
            (BooleanSpelling::YesNo, true) => "YES",
            (BooleanSpelling::YesNo, false) => "NO",
        }
    }
}

/// Boolean field.
///
/// Decoding accepts both `0`/`1` and `NO`/`YES`, whatever the field's canonical spelling is;
/// encoding always writes the configured spelling.
#[derive(Debug, Clone, Copy)]
pub struct BooleanCoder {
    spelling: BooleanSpelling,
}

impl BooleanCoder {
    /// Creates a boolean coder writing `spelling`.
    #[must_use]
    pub fn new(spelling: BooleanSpelling) -> Self {
        BooleanCoder { spelling }
    }

    /// The canonical spelling written by this coder
    #[must_use]
    pub fn spelling(&self) -> BooleanSpelling {
        self.spelling
    }
}

impl ValueCoder for BooleanCoder {
    fn decode(&self, key: CodingKey, raw: &Value, _: &dyn DecodeContext) -> Result<FieldValue> {
        let value = match raw {
            Value::String(text) => match text.as_str() {
                "1" | "YES" => true,
                "0" | "NO" => false,
                _ => {
                    return Err(malformed_value!(
                        key,
                        "'{}' is not a boolean, expected one of 0, 1, NO, YES",
                        text
                    ))
                }
            },
            Value::Integer(1) => true,
            Value::Integer(0) => false,
            Value::Boolean(value) => *value,
            other => return Err(unexpected_raw(key, "boolean", other)),
        };
        Ok(FieldValue::Boolean(value))
    }

    fn encode(
        &self,
        key: CodingKey,
        value: &FieldValue,
        _: &mut dyn EncodeContext,
    ) -> Result<Value> {
        match value {
            FieldValue::Boolean(value) => {
                Ok(Value::String(self.spelling.spell(*value).to_string()))
            }
            other => Err(unexpected_value(key, "boolean", other)),
        }
    }
}

/// Opaque string-keyed dictionary, e.g. build settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryCoder;

impl ValueCoder for DictionaryCoder {
    fn decode(&self, key: CodingKey, raw: &Value, _: &dyn DecodeContext) -> Result<FieldValue> {
        match raw {
            Value::Dictionary(values) => Ok(FieldValue::Dictionary(values.clone())),
            other => Err(unexpected_raw(key, "dictionary", other)),
        }
    }

    fn encode(
        &self,
        key: CodingKey,
        value: &FieldValue,
        _: &mut dyn EncodeContext,
    ) -> Result<Value> {
        match value {
            FieldValue::Dictionary(values) => Ok(Value::Dictionary(values.clone())),
            other => Err(unexpected_value(key, "dictionary", other)),
        }
    }
}

/// Closed enumeration field, stored by name or by integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCoder {
    /// [`PBXSourceTree`] by name
    SourceTree,
    /// [`ProductType`] by identifier
    ProductType,
    /// [`ProxyType`] by integer
    ProxyType,
    /// [`SubFolder`] by integer
    SubFolder,
    /// [`RequirementKind`] by name
    RequirementKind,
}

impl EnumCoder {
    fn name(self) -> &'static str {
        match self {
            EnumCoder::SourceTree => "source tree",
            EnumCoder::ProductType => "product type",
            EnumCoder::ProxyType => "proxy type",
            EnumCoder::SubFolder => "sub folder spec",
            EnumCoder::RequirementKind => "requirement kind",
        }
    }

    fn integer(self, key: CodingKey, raw: &Value) -> Result<u8> {
        let value = match raw {
            Value::Integer(value) => Some(*value),
            Value::String(text) => text.parse::<i64>().ok(),
            _ => None,
        };
        value
            .and_then(|value| u8::try_from(value).ok())
            .ok_or_else(|| unexpected_raw(key, self.name(), raw))
    }

    fn text<'a>(self, key: CodingKey, raw: &'a Value) -> Result<&'a str> {
        raw.as_str().ok_or_else(|| unexpected_raw(key, self.name(), raw))
    }
}

impl ValueCoder for EnumCoder {
    fn decode(&self, key: CodingKey, raw: &Value, _: &dyn DecodeContext) -> Result<FieldValue> {
        let unknown = || malformed_value!(key, "unknown {} {}", self.name(), raw);
        Ok(match self {
            EnumCoder::SourceTree => FieldValue::SourceTree(
                self.text(key, raw)?.parse::<PBXSourceTree>().map_err(|_| unknown())?,
            ),
            EnumCoder::ProductType => FieldValue::ProductType(
                self.text(key, raw)?.parse::<ProductType>().map_err(|_| unknown())?,
            ),
            EnumCoder::RequirementKind => FieldValue::RequirementKind(
                self.text(key, raw)?.parse::<RequirementKind>().map_err(|_| unknown())?,
            ),
            EnumCoder::ProxyType => FieldValue::ProxyType(
                ProxyType::from_repr(self.integer(key, raw)?).ok_or_else(unknown)?,
            ),
            EnumCoder::SubFolder => FieldValue::SubFolder(
                SubFolder::from_repr(self.integer(key, raw)?).ok_or_else(unknown)?,
            ),
        })
    }

    fn encode(
        &self,
        key: CodingKey,
        value: &FieldValue,
        _: &mut dyn EncodeContext,
    ) -> Result<Value> {
        match (self, value) {
            (EnumCoder::SourceTree, FieldValue::SourceTree(value)) => {
                Ok(Value::from(value.as_ref()))
            }
            (EnumCoder::ProductType, FieldValue::ProductType(value)) => {
                Ok(Value::from(value.as_ref()))
            }
            (EnumCoder::RequirementKind, FieldValue::RequirementKind(value)) => {
                Ok(Value::from(value.as_ref()))
            }
            (EnumCoder::ProxyType, FieldValue::ProxyType(value)) => {
                Ok(Value::Integer(i64::from(*value as u8)))
            }
            (EnumCoder::SubFolder, FieldValue::SubFolder(value)) => {
                Ok(Value::Integer(i64::from(*value as u8)))
            }
            (_, other) => Err(unexpected_value(key, self.name(), other)),
        }
    }
}

/// Ordered list of values sharing one element coder. Order is preserved in both directions.
#[derive(Debug, Clone)]
pub struct ListCoder {
    element: Box<Coder>,
}

impl ListCoder {
    /// Creates a list coder over `element`.
    #[must_use]
    pub fn new(element: Coder) -> Self {
        ListCoder {
            element: Box::new(element),
        }
    }
}

impl ValueCoder for ListCoder {
    fn decode(
        &self,
        key: CodingKey,
        raw: &Value,
        context: &dyn DecodeContext,
    ) -> Result<FieldValue> {
        match raw {
            Value::Array(values) => values
                .iter()
                .map(|value| self.element.decode(key, value, context))
                .collect::<Result<Vec<_>>>()
                .map(FieldValue::List),
            other => Err(unexpected_raw(key, "array", other)),
        }
    }

    fn encode(
        &self,
        key: CodingKey,
        value: &FieldValue,
        context: &mut dyn EncodeContext,
    ) -> Result<Value> {
        match value {
            FieldValue::List(values) => values
                .iter()
                .map(|value| self.element.encode(key, value, context))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            other => Err(unexpected_value(key, "list", other)),
        }
    }
}

fn check_kind(kinds: &'static [ObjectKind], value: &FieldValue, key: CodingKey) -> Result<()> {
    match value {
        FieldValue::Object(object) if kinds.contains(&object.kind()) => Ok(()),
        FieldValue::Object(object) => Err(Error::KindMismatch {
            found: object.kind().to_string(),
            expected: kinds.to_vec(),
        }),
        other => Err(unexpected_value(key, "object", other)),
    }
}

/// By-ref object field: the raw value is the gid of a separately tabled object.
///
/// Decoding never materializes the referent's fields; it only wraps the referenced table entry.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCoder {
    kinds: &'static [ObjectKind],
}

impl ReferenceCoder {
    /// Creates a by-ref coder accepting the kinds of `T`.
    #[must_use]
    pub fn of<T: Codeable>() -> Self {
        ReferenceCoder { kinds: T::KINDS }
    }

    /// The accepted referent kinds
    #[must_use]
    pub fn kinds(&self) -> &'static [ObjectKind] {
        self.kinds
    }
}

impl ValueCoder for ReferenceCoder {
    fn decode(
        &self,
        key: CodingKey,
        raw: &Value,
        context: &dyn DecodeContext,
    ) -> Result<FieldValue> {
        match raw {
            Value::String(gid) => context
                .resolve_reference(key, gid, self.kinds)
                .map(FieldValue::Object),
            other => Err(unexpected_raw(key, "object reference", other)),
        }
    }

    fn encode(
        &self,
        key: CodingKey,
        value: &FieldValue,
        context: &mut dyn EncodeContext,
    ) -> Result<Value> {
        check_kind(self.kinds, value, key)?;
        match value {
            FieldValue::Object(object) => context.encode_reference(object).map(Value::String),
            other => Err(unexpected_value(key, "object", other)),
        }
    }
}

/// By-copy object field: the nested object is stored inline and never gets a gid.
#[derive(Debug, Clone, Copy)]
pub struct InlineCoder {
    kinds: &'static [ObjectKind],
}

impl InlineCoder {
    /// Creates a by-copy coder accepting the kinds of `T`.
    #[must_use]
    pub fn of<T: Codeable>() -> Self {
        InlineCoder { kinds: T::KINDS }
    }

    /// The accepted nested kinds
    #[must_use]
    pub fn kinds(&self) -> &'static [ObjectKind] {
        self.kinds
    }
}

impl ValueCoder for InlineCoder {
    fn decode(
        &self,
        key: CodingKey,
        raw: &Value,
        context: &dyn DecodeContext,
    ) -> Result<FieldValue> {
        match raw {
            Value::Dictionary(fields) => context
                .wrap_inline(key, fields, self.kinds)
                .map(FieldValue::Object),
            other => Err(unexpected_raw(key, "inline object", other)),
        }
    }

    fn encode(
        &self,
        key: CodingKey,
        value: &FieldValue,
        context: &mut dyn EncodeContext,
    ) -> Result<Value> {
        check_kind(self.kinds, value, key)?;
        match value {
            FieldValue::Object(object) => context.encode_inline(object).map(Value::Dictionary),
            other => Err(unexpected_value(key, "object", other)),
        }
    }
}

/// A coder as stored in the registry.
#[derive(Debug, Clone)]
pub enum Coder {
    /// See [`StringCoder`]
    String(StringCoder),
    /// See [`IntegerCoder`]
    Integer(IntegerCoder),
    /// See [`BooleanCoder`]
    Boolean(BooleanCoder),
    /// See [`DictionaryCoder`]
    Dictionary(DictionaryCoder),
    /// See [`EnumCoder`]
    Enum(EnumCoder),
    /// See [`ListCoder`]
    List(ListCoder),
    /// See [`ReferenceCoder`]
    Reference(ReferenceCoder),
    /// See [`InlineCoder`]
    Inline(InlineCoder),
}

impl Coder {
    /// String coder
    #[must_use]
    pub fn string() -> Self {
        Coder::String(StringCoder)
    }

    /// Integer coder
    #[must_use]
    pub fn integer() -> Self {
        Coder::Integer(IntegerCoder)
    }

    /// Boolean coder writing `spelling`
    #[must_use]
    pub fn boolean(spelling: BooleanSpelling) -> Self {
        Coder::Boolean(BooleanCoder::new(spelling))
    }

    /// Dictionary coder
    #[must_use]
    pub fn dictionary() -> Self {
        Coder::Dictionary(DictionaryCoder)
    }

    /// Enumeration coder
    #[must_use]
    pub fn enumeration(coder: EnumCoder) -> Self {
        Coder::Enum(coder)
    }

    /// List of `element`
    #[must_use]
    pub fn list(element: Coder) -> Self {
        Coder::List(ListCoder::new(element))
    }

    /// By-ref object of kind `T`
    #[must_use]
    pub fn reference<T: Codeable>() -> Self {
        Coder::Reference(ReferenceCoder::of::<T>())
    }

    /// By-copy object of kind `T`
    #[must_use]
    pub fn inline<T: Codeable>() -> Self {
        Coder::Inline(InlineCoder::of::<T>())
    }

    fn delegate(&self) -> &dyn ValueCoder {
        match self {
            Coder::String(coder) => coder,
            Coder::Integer(coder) => coder,
            Coder::Boolean(coder) => coder,
            Coder::Dictionary(coder) => coder,
            Coder::Enum(coder) => coder,
            Coder::List(coder) => coder,
            Coder::Reference(coder) => coder,
            Coder::Inline(coder) => coder,
        }
    }
}

impl ValueCoder for Coder {
    fn decode(
        &self,
        key: CodingKey,
        raw: &Value,
        context: &dyn DecodeContext,
    ) -> Result<FieldValue> {
        self.delegate().decode(key, raw, context)
    }

    fn encode(
        &self,
        key: CodingKey,
        value: &FieldValue,
        context: &mut dyn EncodeContext,
    ) -> Result<Value> {
        self.delegate().encode(key, value, context)
    }
}

/// Determines the kind of a raw field map among `kinds`.
///
/// Table entries and inline maps carrying an `isa` are resolved through it. Inline version
/// requirements are resolved through their `kind` field. A single inline-only candidate, like a
/// project reference, needs no discriminant.
pub(crate) fn discriminate(
    key: CodingKey,
    fields: &Dictionary,
    kinds: &'static [ObjectKind],
) -> Result<ObjectKind> {
    if let Some(isa) = fields.get("isa") {
        let isa = isa
            .as_str()
            .ok_or_else(|| {
                malformed_value!(key, "'isa' of the referenced object is not a string")
            })?;
        return match ObjectKind::from_isa(isa) {
            Some(kind) if kinds.contains(&kind) => Ok(kind),
            _ => Err(Error::KindMismatch {
                found: isa.to_string(),
                expected: kinds.to_vec(),
            }),
        };
    }

    let discriminated = kinds.iter().any(|kind| kind.requirement_kind().is_some());
    if let (true, Some(found)) = (discriminated, fields.get("kind").and_then(Value::as_str)) {
        return kinds
            .iter()
            .copied()
            .find(|kind| kind.discriminant() == found)
            .ok_or_else(|| Error::KindMismatch {
                found: found.to_string(),
                expected: kinds.to_vec(),
            });
    }

    match kinds {
        [single] if single.isa().is_none() => Ok(*single),
        _ => Err(malformed_value!(key, "object has no 'isa' discriminant")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PBXObjects;
    use crate::objects::{CodeableObject, PBXTarget, VersionRequirement};

    /// Context for coders that never touch nested objects
    struct NoObjects;

    impl DecodeContext for NoObjects {
        fn resolve_reference(
            &self,
            key: CodingKey,
            gid: &str,
            _: &'static [ObjectKind],
        ) -> Result<CodeableObject> {
            Err(Error::DanglingReference {
                gid: gid.to_string(),
                field: key.to_string(),
            })
        }

        fn wrap_inline(
            &self,
            key: CodingKey,
            _: &Dictionary,
            _: &'static [ObjectKind],
        ) -> Result<CodeableObject> {
            Err(malformed_value!(key, "unexpected inline object"))
        }
    }

    impl EncodeContext for NoObjects {
        fn encode_field(&mut self, key: CodingKey, _: &FieldValue) -> Result<()> {
            Err(Error::MissingCoder(key))
        }

        fn encode_raw(&mut self, _: &str, _: &Value, _: &PBXObjects) -> Result<()> {
            Ok(())
        }

        fn encode_global_id(&mut self, _: &str) -> Result<()> {
            Ok(())
        }

        fn encode_reference(&mut self, _: &CodeableObject) -> Result<String> {
            Ok(String::new())
        }

        fn encode_inline(&mut self, _: &CodeableObject) -> Result<Dictionary> {
            Ok(Dictionary::new())
        }
    }

    fn key() -> CodingKey {
        ObjectKind::PBXLegacyTarget.key("passBuildSettingsInEnvironment")
    }

    #[test]
    fn test_boolean_accepts_both_spellings() -> Result<()> {
        for spelling in [BooleanSpelling::OneZero, BooleanSpelling::YesNo] {
            let coder = BooleanCoder::new(spelling);
            for (text, expected) in [("1", true), ("YES", true), ("0", false), ("NO", false)] {
                let decoded = coder.decode(key(), &Value::from(text), &NoObjects)?;
                assert_eq!(decoded, FieldValue::Boolean(expected));
            }
        }
        Ok(())
    }

    #[test]
    fn test_boolean_encodes_canonical_spelling() -> Result<()> {
        let one_zero = BooleanCoder::new(BooleanSpelling::OneZero);
        let yes_no = BooleanCoder::new(BooleanSpelling::YesNo);

        let cases = [
            (&one_zero, true, "1"),
            (&one_zero, false, "0"),
            (&yes_no, true, "YES"),
            (&yes_no, false, "NO"),
        ];
        for (coder, value, spelled) in cases {
            let encoded = coder.encode(key(), &FieldValue::Boolean(value), &mut NoObjects)?;
            assert_eq!(encoded, Value::from(spelled));
        }
        Ok(())
    }

    #[test]
    fn test_boolean_rejects_other_spellings() {
        let coder = BooleanCoder::new(BooleanSpelling::OneZero);
        let result = coder.decode(key(), &Value::from("true"), &NoObjects);
        assert!(matches!(result, Err(Error::MalformedValue { .. })));
    }

    #[test]
    fn test_integer_accepts_numeric_strings() -> Result<()> {
        let key = ObjectKind::PBXFileReference.key("fileEncoding");
        for raw in [Value::from("4"), Value::Integer(4)] {
            assert_eq!(IntegerCoder.decode(key, &raw, &NoObjects)?, FieldValue::Integer(4));
        }
        assert!(IntegerCoder.decode(key, &Value::from("four"), &NoObjects).is_err());
        Ok(())
    }

    #[test]
    fn test_enum_coders() -> Result<()> {
        let key = ObjectKind::PBXCopyFilesBuildPhase.key("dstSubfolderSpec");
        let decoded = EnumCoder::SubFolder.decode(key, &Value::from("10"), &NoObjects)?;
        assert_eq!(decoded, FieldValue::SubFolder(SubFolder::Frameworks));
        assert_eq!(
            EnumCoder::SubFolder.encode(key, &decoded, &mut NoObjects)?,
            Value::Integer(10)
        );
        assert!(EnumCoder::SubFolder.decode(key, &Value::Integer(99), &NoObjects).is_err());

        let key = ObjectKind::PBXFileReference.key("sourceTree");
        let decoded = EnumCoder::SourceTree.decode(key, &Value::from("<group>"), &NoObjects)?;
        assert_eq!(decoded, FieldValue::SourceTree(PBXSourceTree::Group));
        assert_eq!(
            EnumCoder::SourceTree.encode(key, &decoded, &mut NoObjects)?,
            Value::from("<group>")
        );
        Ok(())
    }

    #[test]
    fn test_list_preserves_order() -> Result<()> {
        let key = ObjectKind::PBXShellScriptBuildPhase.key("inputPaths");
        let coder = ListCoder::new(Coder::string());
        let raw = Value::from(vec!["z", "a", "m"]);

        let decoded = coder.decode(key, &raw, &NoObjects)?;
        assert_eq!(decoded, FieldValue::from(vec!["z", "a", "m"]));
        assert_eq!(coder.encode(key, &decoded, &mut NoObjects)?, raw);
        Ok(())
    }

    #[test]
    fn test_malformed_element_fails_whole_field() {
        let key = ObjectKind::PBXShellScriptBuildPhase.key("inputPaths");
        let coder = ListCoder::new(Coder::string());
        let raw = Value::Array(vec![Value::from("a"), Value::Integer(1)]);
        assert!(matches!(
            coder.decode(key, &raw, &NoObjects),
            Err(Error::MalformedValue { .. })
        ));
    }

    #[test]
    fn test_reference_decode_goes_through_context() {
        let key = ObjectKind::PBXTargetDependency.key("target");
        let coder = ReferenceCoder::of::<PBXTarget>();
        let result = coder.decode(key, &Value::from("MISSING"), &NoObjects);

        match result {
            Err(Error::DanglingReference { gid, field }) => {
                assert_eq!(gid, "MISSING");
                assert_eq!(field, "PBXTargetDependency.target");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_discriminate_version_requirement() {
        let key = ObjectKind::XCRemoteSwiftPackageReference.key("requirement");
        let mut fields = Dictionary::new();
        fields.insert("kind".into(), Value::from("branch"));
        fields.insert("branch".into(), Value::from("main"));

        let kind = discriminate(key, &fields, VersionRequirement::KINDS);
        assert_eq!(kind.ok(), Some(ObjectKind::VersionRequirementBranch));

        fields.insert("kind".into(), Value::from("commit"));
        match discriminate(key, &fields, VersionRequirement::KINDS) {
            Err(error @ Error::KindMismatch { .. }) => assert_eq!(
                error.to_string(),
                "Object of kind 'commit' is not supported here. Supported kinds are: revision, branch, exactVersion, versionRange, upToNextMinorVersion, upToNextMajorVersion"
            ),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_discriminate_by_isa() {
        let key = ObjectKind::PBXTargetDependency.key("target");
        let mut fields = Dictionary::new();
        fields.insert("isa".into(), Value::from("PBXGroup"));

        assert!(matches!(
            discriminate(key, &fields, PBXTarget::KINDS),
            Err(Error::KindMismatch { .. })
        ));

        fields.insert("isa".into(), Value::from("PBXAggregateTarget"));
        assert_eq!(
            discriminate(key, &fields, PBXTarget::KINDS).ok(),
            Some(ObjectKind::PBXAggregateTarget)
        );
    }
}
