//! Swift package references and their version requirements.
//!
//! A remote package carries its version requirement inline: the requirement has no gid and is
//! discriminated by its `kind` field instead of an `isa`.

use crate::coding::{FieldValue, KeyedObjectBuilder, ObjectKind};
use crate::objects::{view, Codeable, RequirementKind};
use crate::Result;

codeable! {
    /// A Swift package fetched from a repository.
    XCRemoteSwiftPackageReference => XCRemoteSwiftPackageReference
}

codeable! {
    /// A product vended by a Swift package.
    XCSwiftPackageProductDependency => XCSwiftPackageProductDependency
}

codeable! {
    /// Pins an exact revision.
    VersionRequirementRevision => VersionRequirementRevision
}

codeable! {
    /// Follows a branch.
    VersionRequirementBranch => VersionRequirementBranch
}

codeable! {
    /// Pins an exact version.
    VersionRequirementExact => VersionRequirementExact
}

codeable! {
    /// Accepts any version in a half-open range.
    VersionRequirementRange => VersionRequirementRange
}

codeable! {
    /// Accepts versions up to the next minor version.
    VersionRequirementUpToNextMinor => VersionRequirementUpToNextMinor
}

codeable! {
    /// Accepts versions up to the next major version.
    VersionRequirementUpToNextMajor => VersionRequirementUpToNextMajor
}

codeable_family! {
    /// The version requirement of a remote Swift package.
    VersionRequirement {
        /// `revision`
        Revision(VersionRequirementRevision),
        /// `branch`
        Branch(VersionRequirementBranch),
        /// `exactVersion`
        Exact(VersionRequirementExact),
        /// `versionRange`
        Range(VersionRequirementRange),
        /// `upToNextMinorVersion`
        UpToNextMinor(VersionRequirementUpToNextMinor),
        /// `upToNextMajorVersion`
        UpToNextMajor(VersionRequirementUpToNextMajor),
    }
}

fn requirement(kind: ObjectKind, fields: &[(&'static str, String)]) -> Result<VersionRequirement> {
    let mut builder = KeyedObjectBuilder::new(kind);
    if let Some(requirement_kind) = kind.requirement_kind() {
        builder.set("kind", requirement_kind);
    }
    for (name, value) in fields {
        builder = builder
            .put(*name, FieldValue::String(value.clone()))
            .requires(*name);
    }
    view(builder.build()?)
}

impl VersionRequirement {
    /// Requires exactly `revision`.
    ///
    /// # Errors
    /// Never fails for well-formed input.
    pub fn revision(revision: impl Into<String>) -> Result<Self> {
        requirement(
            ObjectKind::VersionRequirementRevision,
            &[("revision", revision.into())],
        )
    }

    /// Follows `branch`.
    ///
    /// # Errors
    /// Never fails for well-formed input.
    pub fn branch(branch: impl Into<String>) -> Result<Self> {
        requirement(
            ObjectKind::VersionRequirementBranch,
            &[("branch", branch.into())],
        )
    }

    /// Requires exactly `version`.
    ///
    /// # Errors
    /// Never fails for well-formed input.
    pub fn exact(version: impl Into<String>) -> Result<Self> {
        requirement(
            ObjectKind::VersionRequirementExact,
            &[("version", version.into())],
        )
    }

    /// Accepts versions from `minimum` up to, excluding, `maximum`.
    ///
    /// # Errors
    /// Never fails for well-formed input.
    pub fn range(minimum: impl Into<String>, maximum: impl Into<String>) -> Result<Self> {
        requirement(
            ObjectKind::VersionRequirementRange,
            &[
                ("minimumVersion", minimum.into()),
                ("maximumVersion", maximum.into()),
            ],
        )
    }

    /// Accepts versions from `minimum` up to the next minor version.
    ///
    /// # Errors
    /// Never fails for well-formed input.
    pub fn up_to_next_minor(minimum: impl Into<String>) -> Result<Self> {
        requirement(
            ObjectKind::VersionRequirementUpToNextMinor,
            &[("minimumVersion", minimum.into())],
        )
    }

    /// Accepts versions from `minimum` up to the next major version.
    ///
    /// # Errors
    /// Never fails for well-formed input.
    pub fn up_to_next_major(minimum: impl Into<String>) -> Result<Self> {
        requirement(
            ObjectKind::VersionRequirementUpToNextMajor,
            &[("minimumVersion", minimum.into())],
        )
    }

    /// The discriminant of this requirement
    #[must_use]
    pub fn requirement_kind(&self) -> Option<RequirementKind> {
        self.kind().requirement_kind()
    }
}

impl VersionRequirementRevision {
    /// The pinned revision
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the revision is absent.
    pub fn revision(&self) -> Result<String> {
        self.0.require("revision")
    }
}

impl VersionRequirementBranch {
    /// The followed branch
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the branch is absent.
    pub fn branch(&self) -> Result<String> {
        self.0.require("branch")
    }
}

impl VersionRequirementExact {
    /// The pinned version
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the version is absent.
    pub fn version(&self) -> Result<String> {
        self.0.require("version")
    }
}

impl VersionRequirementRange {
    /// The lowest accepted version
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the bound is absent.
    pub fn minimum_version(&self) -> Result<String> {
        self.0.require("minimumVersion")
    }

    /// The first version no longer accepted
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the bound is absent.
    pub fn maximum_version(&self) -> Result<String> {
        self.0.require("maximumVersion")
    }
}

impl VersionRequirementUpToNextMinor {
    /// The lowest accepted version
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the bound is absent.
    pub fn minimum_version(&self) -> Result<String> {
        self.0.require("minimumVersion")
    }
}

impl VersionRequirementUpToNextMajor {
    /// The lowest accepted version
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the bound is absent.
    pub fn minimum_version(&self) -> Result<String> {
        self.0.require("minimumVersion")
    }
}

impl XCRemoteSwiftPackageReference {
    /// Starts building a package reference.
    #[must_use]
    pub fn builder() -> XCRemoteSwiftPackageReferenceBuilder {
        XCRemoteSwiftPackageReferenceBuilder {
            inner: KeyedObjectBuilder::new(ObjectKind::XCRemoteSwiftPackageReference),
        }
    }

    /// Starts a builder overriding fields of this package reference.
    #[must_use]
    pub fn to_builder(&self) -> XCRemoteSwiftPackageReferenceBuilder {
        XCRemoteSwiftPackageReferenceBuilder {
            inner: self.as_object().to_builder(),
        }
    }

    /// URL of the package repository
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the URL is absent, or any decode error.
    pub fn repository_url(&self) -> Result<String> {
        self.0.require("repositoryURL")
    }

    /// The accepted versions
    ///
    /// # Errors
    /// Returns [`crate::Error::KindMismatch`] for an unknown requirement kind, or any decode
    /// error.
    pub fn requirement(&self) -> Result<Option<VersionRequirement>> {
        self.0.get("requirement")
    }
}

/// Builder for [`XCRemoteSwiftPackageReference`]
#[derive(Debug, Clone)]
pub struct XCRemoteSwiftPackageReferenceBuilder {
    inner: KeyedObjectBuilder,
}

impl XCRemoteSwiftPackageReferenceBuilder {
    /// Sets the repository URL.
    #[must_use]
    pub fn repository_url(mut self, url: impl Into<String>) -> Self {
        self.inner.set("repositoryURL", FieldValue::String(url.into()));
        self
    }

    /// Sets the accepted versions.
    #[must_use]
    pub fn requirement(mut self, requirement: VersionRequirement) -> Self {
        self.inner.set("requirement", requirement);
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the package reference.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no repository URL was given.
    pub fn build(self) -> Result<XCRemoteSwiftPackageReference> {
        view(self.inner.requires("repositoryURL").build()?)
    }
}

impl XCSwiftPackageProductDependency {
    /// Starts building a product dependency.
    #[must_use]
    pub fn builder() -> XCSwiftPackageProductDependencyBuilder {
        XCSwiftPackageProductDependencyBuilder {
            inner: KeyedObjectBuilder::new(ObjectKind::XCSwiftPackageProductDependency),
        }
    }

    /// Starts a builder overriding fields of this product dependency.
    #[must_use]
    pub fn to_builder(&self) -> XCSwiftPackageProductDependencyBuilder {
        XCSwiftPackageProductDependencyBuilder {
            inner: self.as_object().to_builder(),
        }
    }

    /// Name of the product
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the name is absent, or any decode error.
    pub fn product_name(&self) -> Result<String> {
        self.0.require("productName")
    }

    /// The package vending the product, absent for local packages
    ///
    /// # Errors
    /// Returns an error if the reference cannot be resolved.
    pub fn package(&self) -> Result<Option<XCRemoteSwiftPackageReference>> {
        self.0.get("package")
    }
}

/// Builder for [`XCSwiftPackageProductDependency`]
#[derive(Debug, Clone)]
pub struct XCSwiftPackageProductDependencyBuilder {
    inner: KeyedObjectBuilder,
}

impl XCSwiftPackageProductDependencyBuilder {
    /// Sets the product name.
    #[must_use]
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.inner.set("productName", FieldValue::String(name.into()));
        self
    }

    /// Sets the package vending the product.
    #[must_use]
    pub fn package(mut self, package: XCRemoteSwiftPackageReference) -> Self {
        self.inner.set("package", package);
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the product dependency.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no product name was given.
    pub fn build(self) -> Result<XCSwiftPackageProductDependency> {
        view(self.inner.requires("productName").build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_constructors() -> Result<()> {
        let range = VersionRequirement::range("1.0.0", "2.0.0")?;
        assert_eq!(range.requirement_kind(), Some(RequirementKind::VersionRange));
        match &range {
            VersionRequirement::Range(range) => {
                assert_eq!(range.minimum_version()?, "1.0.0");
                assert_eq!(range.maximum_version()?, "2.0.0");
            }
            other => panic!("unexpected requirement {other:?}"),
        }

        let branch = VersionRequirement::branch("main")?;
        assert_eq!(
            branch.as_object().get::<RequirementKind>("kind")?,
            Some(RequirementKind::Branch)
        );
        assert!(branch.global_id().is_none());
        Ok(())
    }

    #[test]
    fn test_package_reference() -> Result<()> {
        let package = XCRemoteSwiftPackageReference::builder()
            .repository_url("https://github.com/apple/swift-argument-parser")
            .requirement(VersionRequirement::up_to_next_major("1.2.0")?)
            .build()?;
        let product = XCSwiftPackageProductDependency::builder()
            .product_name("ArgumentParser")
            .package(package.clone())
            .build()?;

        assert_eq!(product.product_name()?, "ArgumentParser");
        assert_eq!(product.package()?, Some(package.clone()));
        match package.requirement()? {
            Some(VersionRequirement::UpToNextMajor(requirement)) => {
                assert_eq!(requirement.minimum_version()?, "1.2.0");
            }
            other => panic!("unexpected requirement {other:?}"),
        }
        Ok(())
    }
}
