//! Typed views over keyed objects, one per object kind.
//!
//! Every kind of the project file format has a read-only view type declared here, e.g.
//! [`PBXNativeTarget`] or [`PBXFileReference`]. A view is a thin wrapper around a
//! [`CodeableObject`], which pairs the object's [`ObjectKind`] with the
//! [`crate::coding::KeyedObject`] answering its field queries. The keyed object is either a
//! freshly built [`crate::coding::DefaultKeyedObject`] or a lazily decoded table entry, and the
//! view behaves the same for both.
//!
//! Polymorphic fields use closed families such as [`PBXTarget`] or [`GroupChild`], enums over the
//! view types accepted by the field.
//!
//! # Building objects
//!
//! Each view has a fluent builder validating required fields and filling in the defaults Xcode
//! expects:
//!
//! ```rust
//! use pbxcodec::objects::{Codeable, PBXNativeTarget, ProductType};
//!
//! let target = PBXNativeTarget::builder()
//!     .name("App")
//!     .product_type(ProductType::Application)
//!     .build()?;
//!
//! assert_eq!(target.name()?, "App");
//! let list = target.build_configuration_list()?;
//! assert_eq!(list.default_configuration_name()?.as_deref(), Some("Default"));
//! assert!(target.global_id().is_none());
//! # Ok::<(), pbxcodec::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::coding::{
    CodingKey, DefaultKeyedObject, EncodeContext, FieldValue, FromFieldValue, KeyedObjectBuilder,
    KeyedObjectRc, ObjectKind, SessionStamp,
};
use crate::{Error, Result};

pub mod buildfile;
pub mod buildphase;
pub mod configuration;
pub mod dependency;
pub mod file;
pub mod filetypes;
pub mod group;
pub mod identity;
pub mod package;
pub mod project;
pub mod target;
pub mod types;

pub use buildfile::{BuildFileReference, PBXBuildFile, PBXBuildFileBuilder};
pub use buildphase::{
    PBXBuildPhase, PBXBuildPhaseBuilder, PBXCopyFilesBuildPhase, PBXCopyFilesBuildPhaseBuilder,
    PBXFrameworksBuildPhase, PBXHeadersBuildPhase, PBXResourcesBuildPhase,
    PBXShellScriptBuildPhase, PBXShellScriptBuildPhaseBuilder, PBXSourcesBuildPhase,
};
pub use configuration::{
    XCBuildConfiguration, XCBuildConfigurationBuilder, XCConfigurationList,
    XCConfigurationListBuilder,
};
pub use dependency::{
    ContainerPortal, PBXContainerItemProxy, PBXContainerItemProxyBuilder, PBXTargetDependency,
    PBXTargetDependencyBuilder,
};
pub use file::{
    PBXFileReference, PBXFileReferenceBuilder, PBXReferenceProxy, PBXReferenceProxyBuilder,
};
pub use filetypes::FileType;
pub use group::{
    GroupChild, PBXGroup, PBXGroupBuilder, PBXVariantGroup, XCVersionGroup, XCVersionGroupBuilder,
};
pub use package::{
    VersionRequirement, VersionRequirementBranch, VersionRequirementExact,
    VersionRequirementRange, VersionRequirementRevision, VersionRequirementUpToNextMajor,
    VersionRequirementUpToNextMinor, XCRemoteSwiftPackageReference,
    XCRemoteSwiftPackageReferenceBuilder, XCSwiftPackageProductDependency,
    XCSwiftPackageProductDependencyBuilder,
};
pub use project::{PBXProject, PBXProjectBuilder, ProjectReference, ProjectReferenceBuilder};
pub use target::{
    PBXAggregateTarget, PBXLegacyTarget, PBXNativeTarget, PBXTarget, PBXTargetBuilder,
};
pub use types::{PBXSourceTree, ProductType, ProxyType, RequirementKind, SubFolder};

/// An object of a known kind, backed by any [`crate::coding::KeyedObject`].
///
/// Cloning is cheap and yields a handle to the same underlying object. Two handles are equal when
/// they share the same keyed object, or when both carry the same gid.
#[derive(Clone)]
pub struct CodeableObject {
    kind: ObjectKind,
    delegate: KeyedObjectRc,
}

impl CodeableObject {
    /// Views `delegate` as an object of `kind`.
    pub fn new(kind: ObjectKind, delegate: KeyedObjectRc) -> Self {
        CodeableObject { kind, delegate }
    }

    /// The kind of this object
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The keyed object answering field queries
    #[must_use]
    pub fn delegate(&self) -> &KeyedObjectRc {
        &self.delegate
    }

    /// The gid carried over from a decoded table, `None` for freshly built objects.
    #[must_use]
    pub fn global_id(&self) -> Option<&str> {
        self.delegate.global_id()
    }

    /// The decode session this object belongs to
    #[must_use]
    pub fn age(&self) -> Option<SessionStamp> {
        self.delegate.age()
    }

    /// The key for field `name` of this object's kind
    #[must_use]
    pub fn key(&self, name: &'static str) -> CodingKey {
        self.kind.key(name)
    }

    /// Decodes field `name`.
    ///
    /// # Errors
    /// See [`crate::coding::KeyedObject::try_decode`].
    pub fn try_decode(&self, name: &'static str) -> Result<Option<FieldValue>> {
        self.delegate.try_decode(self.key(name))
    }

    /// Decodes field `name` as a `T`, `None` if the field is absent.
    ///
    /// # Errors
    /// Returns [`Error::MalformedValue`] if the decoded value is not a `T`, or any decode error.
    pub fn get<T: FromFieldValue>(&self, name: &'static str) -> Result<Option<T>> {
        let key = self.key(name);
        self.delegate
            .try_decode(key)?
            .map(|value| T::from_field_value(key, value))
            .transpose()
    }

    /// Decodes the mandatory field `name` as a `T`.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] if the field is absent, or any error of
    /// [`CodeableObject::get`].
    pub fn require<T: FromFieldValue>(&self, name: &'static str) -> Result<T> {
        self.get(name)?.ok_or(Error::MissingField {
            kind: self.kind,
            field: name,
        })
    }

    /// Decodes the list field `name`. An absent list is empty.
    ///
    /// # Errors
    /// Returns [`Error::MalformedValue`] if the field is not a list of `T`, or any decode error.
    pub fn list<T: FromFieldValue>(&self, name: &'static str) -> Result<Vec<T>> {
        let key = self.key(name);
        match self.delegate.try_decode(key)? {
            None => Ok(Vec::new()),
            Some(FieldValue::List(values)) => values
                .into_iter()
                .map(|value| T::from_field_value(key, value))
                .collect(),
            Some(other) => Err(malformed_value!(
                key,
                "expected a list but found {}",
                other.shape()
            )),
        }
    }

    /// Reports the fields of this object to `context`.
    ///
    /// # Errors
    /// See [`crate::coding::KeyedObject::encode`].
    pub fn encode(&self, context: &mut dyn EncodeContext) -> Result<()> {
        self.delegate.encode(context)
    }

    /// Fails with [`Error::KindMismatch`] unless this object is one of `kinds`.
    ///
    /// # Errors
    /// See above.
    pub fn expect_kind(&self, kinds: &[ObjectKind]) -> Result<()> {
        if kinds.contains(&self.kind) {
            Ok(())
        } else {
            Err(Error::KindMismatch {
                found: self.kind.discriminant().to_string(),
                expected: kinds.to_vec(),
            })
        }
    }

    /// Starts a builder that overrides fields of this object and keeps its gid.
    #[must_use]
    pub fn to_builder(&self) -> KeyedObjectBuilder {
        KeyedObjectBuilder::new(self.kind).parent(self.delegate.clone())
    }

    /// Address of the keyed object, identifying this instance within one process.
    pub(crate) fn instance(&self) -> usize {
        Arc::as_ptr(&self.delegate).cast::<()>() as usize
    }
}

impl From<DefaultKeyedObject> for CodeableObject {
    fn from(object: DefaultKeyedObject) -> Self {
        CodeableObject::new(object.kind(), Arc::new(object))
    }
}

impl PartialEq for CodeableObject {
    fn eq(&self, other: &Self) -> bool {
        if self.instance() == other.instance() {
            return true;
        }
        matches!(
            (self.global_id(), other.global_id()),
            (Some(left), Some(right)) if left == right
        )
    }
}

impl fmt::Debug for CodeableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeableObject")
            .field("kind", &self.kind)
            .field("global_id", &self.global_id())
            .finish_non_exhaustive()
    }
}

/// A typed, read-only view over an object of one of a closed set of kinds.
pub trait Codeable: Clone + fmt::Debug + Sized {
    /// The kinds this view accepts
    const KINDS: &'static [ObjectKind];

    /// Views `object` as `Self`.
    ///
    /// # Errors
    /// Returns [`Error::KindMismatch`] if the object's kind is not one of [`Codeable::KINDS`].
    fn from_object(object: CodeableObject) -> Result<Self>;

    /// The underlying object
    fn as_object(&self) -> &CodeableObject;

    /// Consumes the view, returning the underlying object.
    fn into_object(self) -> CodeableObject {
        self.as_object().clone()
    }

    /// The concrete kind of this object
    fn kind(&self) -> ObjectKind {
        self.as_object().kind()
    }

    /// The gid carried over from a decoded table, `None` for freshly built objects.
    fn global_id(&self) -> Option<&str> {
        self.as_object().global_id()
    }

    /// The decode session this object belongs to, `None` for freshly built objects.
    fn age(&self) -> Option<SessionStamp> {
        self.as_object().age()
    }

    /// Views this object as another type.
    ///
    /// # Errors
    /// Returns [`Error::KindMismatch`] if the object is not one of `T`'s kinds.
    fn cast<T: Codeable>(&self) -> Result<T> {
        T::from_object(self.as_object().clone())
    }
}

/// Wraps a freshly built keyed object into the view `T`.
pub(crate) fn view<T: Codeable>(object: DefaultKeyedObject) -> Result<T> {
    T::from_object(CodeableObject::from(object))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_access() -> Result<()> {
        let object = CodeableObject::from(
            KeyedObjectBuilder::new(ObjectKind::PBXShellScriptBuildPhase)
                .put("name", "Lint")
                .put("inputPaths", vec!["a", "b"])
                .build()?,
        );

        assert_eq!(object.get::<String>("name")?.as_deref(), Some("Lint"));
        assert_eq!(object.list::<String>("inputPaths")?, vec!["a", "b"]);
        assert!(object.list::<String>("outputPaths")?.is_empty());
        assert!(matches!(
            object.require::<String>("shellScript"),
            Err(Error::MissingField { field: "shellScript", .. })
        ));
        assert!(matches!(object.get::<i64>("name"), Err(Error::MalformedValue { .. })));
        Ok(())
    }

    #[test]
    fn test_identity() -> Result<()> {
        let object = CodeableObject::from(KeyedObjectBuilder::new(ObjectKind::PBXGroup).build()?);
        let other = CodeableObject::from(KeyedObjectBuilder::new(ObjectKind::PBXGroup).build()?);

        assert_eq!(object, object.clone());
        assert_ne!(object, other);
        Ok(())
    }

    #[test]
    fn test_cast() -> Result<()> {
        let target = PBXAggregateTarget::builder().name("Prepare").build()?;
        let family: PBXTarget = target.cast()?;
        assert_eq!(family.kind(), ObjectKind::PBXAggregateTarget);

        match target.cast::<PBXNativeTarget>() {
            Err(Error::KindMismatch { found, expected }) => {
                assert_eq!(found, "PBXAggregateTarget");
                assert_eq!(expected, vec![ObjectKind::PBXNativeTarget]);
            }
            other => panic!("unexpected result {other:?}"),
        }
        Ok(())
    }
}
