//! The environments coders decode and encode in.

use crate::coding::{CodingKey, FieldValue, ObjectKind};
use crate::model::{Dictionary, PBXObjects, Value};
use crate::objects::CodeableObject;
use crate::Result;

/// Environment a coder decodes in.
///
/// Implemented by decoded objects, which resolve by-ref gids through the table of the decode
/// session they belong to and wrap by-copy maps under the same session.
pub trait DecodeContext {
    /// Resolves the by-ref field `key` holding `gid` into a lazily decoded object whose kind must
    /// be one of `kinds`.
    ///
    /// # Errors
    /// Returns [`crate::Error::DanglingReference`] if `gid` is not in the table and
    /// [`crate::Error::KindMismatch`] if the referent has an unexpected `isa`.
    fn resolve_reference(
        &self,
        key: CodingKey,
        gid: &str,
        kinds: &'static [ObjectKind],
    ) -> Result<CodeableObject>;

    /// Wraps the inline map of the by-copy field `key` into a lazily decoded object whose kind
    /// must be one of `kinds`.
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] if the map's discriminant is not one of `kinds`.
    fn wrap_inline(
        &self,
        key: CodingKey,
        fields: &Dictionary,
        kinds: &'static [ObjectKind],
    ) -> Result<CodeableObject>;
}

/// Field-collection context an object encodes itself into.
///
/// An object reports its fields through [`EncodeContext::encode_field`] (routed through the
/// registered coder) or [`EncodeContext::encode_raw`] (copied as is). Coders in turn call back
/// into [`EncodeContext::encode_reference`] and [`EncodeContext::encode_inline`] for nested
/// objects.
pub trait EncodeContext {
    /// Encodes one decoded field through the coder registered for `key`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingCoder`] if no coder is bound to `key`, or any error the coder
    /// raises for `value`.
    fn encode_field(&mut self, key: CodingKey, value: &FieldValue) -> Result<()>;

    /// Copies a raw field the codec has no coder for. The field belongs to an object decoded from
    /// `source`, and gids among its values name entries of that table.
    ///
    /// # Errors
    /// Implementations may reject raw fields.
    fn encode_raw(&mut self, field: &str, value: &Value, source: &PBXObjects) -> Result<()>;

    /// Carries over the gid of an object decoded from an existing table.
    ///
    /// # Errors
    /// Returns an error when the object being encoded is inlined, since inline objects never
    /// own a gid.
    fn encode_global_id(&mut self, global_id: &str) -> Result<()>;

    /// Encodes `object` as its own table entry and returns its gid.
    ///
    /// # Errors
    /// Propagates any error raised while encoding `object`.
    fn encode_reference(&mut self, object: &CodeableObject) -> Result<String>;

    /// Encodes `object` into an inline field map.
    ///
    /// # Errors
    /// Propagates any error raised while encoding `object`.
    fn encode_inline(&mut self, object: &CodeableObject) -> Result<Dictionary>;

    /// Returns true if `field` will be replaced by a value encoded later, so the object reporting
    /// it should not decode or report it at all.
    fn skips(&self, _field: &str) -> bool {
        false
    }
}
