//! Object kinds and the field tokens that address them.

use std::fmt;

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::objects::RequirementKind;

/// The closed set of object kinds a project file can contain.
///
/// Most kinds are named by the `isa` discriminant they carry in the objects table. The remaining
/// kinds never get a table entry of their own: [`ObjectKind::ProjectReference`] and the version
/// requirement variants only exist inline, copied into their parent's field map.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum ObjectKind {
    /// The root project
    PBXProject,
    /// A native (compiled) target
    PBXNativeTarget,
    /// A target driven by an external build tool
    PBXLegacyTarget,
    /// A target that only aggregates other targets and phases
    PBXAggregateTarget,
    /// Compile sources phase
    PBXSourcesBuildPhase,
    /// Headers phase
    PBXHeadersBuildPhase,
    /// Link frameworks and libraries phase
    PBXFrameworksBuildPhase,
    /// Copy bundle resources phase
    PBXResourcesBuildPhase,
    /// Copy files phase
    PBXCopyFilesBuildPhase,
    /// Run script phase
    PBXShellScriptBuildPhase,
    /// A file or folder on disk
    PBXFileReference,
    /// A group in the project navigator
    PBXGroup,
    /// A group of localized variants of one file
    PBXVariantGroup,
    /// A versioned group, e.g. a Core Data model
    XCVersionGroup,
    /// A file as a member of a build phase
    PBXBuildFile,
    /// The list of build configurations of a project or target
    XCConfigurationList,
    /// One build configuration
    XCBuildConfiguration,
    /// A dependency of one target on another
    PBXTargetDependency,
    /// A proxy for an object living in this or another project
    PBXContainerItemProxy,
    /// A file produced by a target of another project
    PBXReferenceProxy,
    /// A remote Swift package
    XCRemoteSwiftPackageReference,
    /// A product vended by a Swift package
    XCSwiftPackageProductDependency,
    /// Inline entry of a project's `projectReferences`
    ProjectReference,
    /// Inline requirement pinning an exact revision
    VersionRequirementRevision,
    /// Inline requirement following a branch
    VersionRequirementBranch,
    /// Inline requirement pinning an exact version
    VersionRequirementExact,
    /// Inline requirement on a version range
    VersionRequirementRange,
    /// Inline requirement up to the next minor version
    VersionRequirementUpToNextMinor,
    /// Inline requirement up to the next major version
    VersionRequirementUpToNextMajor,
}

impl ObjectKind {
    /// Resolves a kind from its `isa` discriminant. Inline-only kinds are never returned.
    #[must_use]
    pub fn from_isa(isa: &str) -> Option<ObjectKind> {
        isa.parse::<ObjectKind>().ok().filter(|kind| kind.isa().is_some())
    }

    /// The `isa` discriminant written for this kind, or `None` for inline-only kinds.
    #[must_use]
    pub fn isa(self) -> Option<&'static str> {
        match self {
            ObjectKind::ProjectReference
            | ObjectKind::VersionRequirementRevision
            | ObjectKind::VersionRequirementBranch
            | ObjectKind::VersionRequirementExact
            | ObjectKind::VersionRequirementRange
            | ObjectKind::VersionRequirementUpToNextMinor
            | ObjectKind::VersionRequirementUpToNextMajor => None,
            _ => Some(self.into_str()),
        }
    }

    /// The requirement kind an inline version requirement is discriminated by.
    #[must_use]
    pub fn requirement_kind(self) -> Option<RequirementKind> {
        match self {
            ObjectKind::VersionRequirementRevision => Some(RequirementKind::Revision),
            ObjectKind::VersionRequirementBranch => Some(RequirementKind::Branch),
            ObjectKind::VersionRequirementExact => Some(RequirementKind::ExactVersion),
            ObjectKind::VersionRequirementRange => Some(RequirementKind::VersionRange),
            ObjectKind::VersionRequirementUpToNextMinor => {
                Some(RequirementKind::UpToNextMinorVersion)
            }
            ObjectKind::VersionRequirementUpToNextMajor => {
                Some(RequirementKind::UpToNextMajorVersion)
            }
            _ => None,
        }
    }

    /// The discriminant value identifying this kind in a field map: the `isa` for table kinds,
    /// the requirement `kind` for version requirements.
    #[must_use]
    pub fn discriminant(&self) -> &'static str {
        match self.requirement_kind() {
            Some(requirement) => requirement.into(),
            None => self.into_str(),
        }
    }

    fn into_str(self) -> &'static str {
        self.into()
    }

    /// Returns the key for field `name` on this kind.
    #[must_use]
    pub const fn key(self, name: &'static str) -> CodingKey {
        CodingKey::new(self, name)
    }
}

/// Identity token naming one field slot on one object kind.
///
/// Keys are plain values: two keys are equal when they name the same field of the same kind. The
/// `isa` discriminant is shared by every kind and therefore has no owner, see [`CodingKey::ISA`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodingKey {
    owner: Option<ObjectKind>,
    name: &'static str,
}

impl CodingKey {
    /// The `isa` discriminant common to all table kinds
    pub const ISA: CodingKey = CodingKey {
        owner: None,
        name: "isa",
    };

    /// Creates the key for field `name` of `owner`.
    #[must_use]
    pub const fn new(owner: ObjectKind, name: &'static str) -> Self {
        CodingKey {
            owner: Some(owner),
            name,
        }
    }

    /// The kind declaring this field, `None` for [`CodingKey::ISA`].
    #[must_use]
    pub fn owner(&self) -> Option<ObjectKind> {
        self.owner
    }

    /// The field name as it appears in the raw field map.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for CodingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            Some(owner) => write!(f, "{}.{}", owner, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_from_isa() {
        assert_eq!(
            ObjectKind::from_isa("PBXNativeTarget"),
            Some(ObjectKind::PBXNativeTarget)
        );
        assert_eq!(ObjectKind::from_isa("ProjectReference"), None);
        assert_eq!(ObjectKind::from_isa("PBXUnknownThing"), None);
    }

    #[test]
    fn test_isa_round_trips_through_from_isa() {
        for kind in ObjectKind::iter() {
            if let Some(isa) = kind.isa() {
                assert_eq!(ObjectKind::from_isa(isa), Some(kind));
                assert_eq!(isa, kind.to_string());
            } else {
                assert!(kind.requirement_kind().is_some() || kind == ObjectKind::ProjectReference);
            }
        }
    }

    #[test]
    fn test_discriminant() {
        assert_eq!(ObjectKind::PBXGroup.discriminant(), "PBXGroup");
        assert_eq!(ObjectKind::VersionRequirementBranch.discriminant(), "branch");
        assert_eq!(
            ObjectKind::VersionRequirementUpToNextMajor.discriminant(),
            "upToNextMajorVersion"
        );
    }

    #[test]
    fn test_coding_key_display() {
        assert_eq!(CodingKey::ISA.to_string(), "isa");
        assert_eq!(
            ObjectKind::PBXNativeTarget.key("name").to_string(),
            "PBXNativeTarget.name"
        );
        assert_ne!(
            ObjectKind::PBXNativeTarget.key("name"),
            ObjectKind::PBXAggregateTarget.key("name")
        );
    }
}
