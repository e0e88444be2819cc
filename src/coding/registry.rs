//! The static coder registry.
//!
//! Every `(kind, field)` pair the codec understands is bound to exactly one [`Coder`] here, once
//! per process. Nothing is discovered at runtime: a field that is not listed has no coder, and
//! accessing it is reported as [`crate::Error::MissingCoder`].

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::coding::coders::{BooleanSpelling, Coder, EnumCoder};
use crate::coding::{CodingKey, ObjectKind};
use crate::objects::{
    BuildFileReference, Codeable, ContainerPortal, GroupChild, PBXBuildFile, PBXBuildPhase,
    PBXContainerItemProxy, PBXFileReference, PBXGroup, PBXTarget, PBXTargetDependency,
    ProjectReference, VersionRequirement, XCBuildConfiguration, XCConfigurationList,
    XCRemoteSwiftPackageReference, XCSwiftPackageProductDependency,
};
use crate::{Error, Result};

static REGISTRY: LazyLock<CoderRegistry> = LazyLock::new(CoderRegistry::build);

const TARGETS: [ObjectKind; 3] = [
    ObjectKind::PBXNativeTarget,
    ObjectKind::PBXLegacyTarget,
    ObjectKind::PBXAggregateTarget,
];

const BUILD_PHASES: [ObjectKind; 6] = [
    ObjectKind::PBXSourcesBuildPhase,
    ObjectKind::PBXHeadersBuildPhase,
    ObjectKind::PBXFrameworksBuildPhase,
    ObjectKind::PBXResourcesBuildPhase,
    ObjectKind::PBXCopyFilesBuildPhase,
    ObjectKind::PBXShellScriptBuildPhase,
];

const GROUPS: [ObjectKind; 3] = [
    ObjectKind::PBXGroup,
    ObjectKind::PBXVariantGroup,
    ObjectKind::XCVersionGroup,
];

/// Table of coders keyed by [`CodingKey`].
#[derive(Debug, Default)]
pub struct CoderRegistry {
    coders: HashMap<CodingKey, Coder>,
    by_kind: HashMap<ObjectKind, Vec<CodingKey>>,
}

impl CoderRegistry {
    /// The process-wide registry
    #[must_use]
    pub fn global() -> &'static CoderRegistry {
        &REGISTRY
    }

    /// Returns the coder bound to `key`.
    ///
    /// # Errors
    /// Returns [`Error::MissingCoder`] if `key` has no coder.
    pub fn get(&self, key: CodingKey) -> Result<&Coder> {
        self.coders.get(&key).ok_or(Error::MissingCoder(key))
    }

    /// Returns true if `key` has a coder.
    #[must_use]
    pub fn contains(&self, key: CodingKey) -> bool {
        self.coders.contains_key(&key)
    }

    /// Number of bound keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.coders.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coders.is_empty()
    }

    /// Iterates the keys declared by `kind`, in registration order.
    pub fn keys_of(&self, kind: ObjectKind) -> impl Iterator<Item = CodingKey> + '_ {
        self.by_kind.get(&kind).into_iter().flatten().copied()
    }

    /// Finds the key `kind` declares for the raw field `name`.
    #[must_use]
    pub fn key_for(&self, kind: ObjectKind, name: &str) -> Option<CodingKey> {
        self.keys_of(kind).find(|key| key.name() == name)
    }

    fn bind(&mut self, kind: ObjectKind, name: &'static str, coder: Coder) {
        let key = kind.key(name);
        let previous = self.coders.insert(key, coder);
        debug_assert!(previous.is_none(), "{key} is bound twice");
        self.by_kind.entry(kind).or_default().push(key);
    }

    fn bind_all(&mut self, kinds: &[ObjectKind], name: &'static str, coder: &Coder) {
        for kind in kinds {
            self.bind(*kind, name, coder.clone());
        }
    }

    fn build() -> CoderRegistry {
        use ObjectKind as K;

        let one_zero = Coder::boolean(BooleanSpelling::OneZero);
        let strings = Coder::list(Coder::string());

        let mut registry = CoderRegistry::default();
        registry.coders.insert(CodingKey::ISA, Coder::string());

        // Project
        registry.bind(K::PBXProject, "mainGroup", Coder::reference::<PBXGroup>());
        registry.bind(K::PBXProject, "productRefGroup", Coder::reference::<PBXGroup>());
        registry.bind(K::PBXProject, "targets", Coder::list(Coder::reference::<PBXTarget>()));
        registry.bind(
            K::PBXProject,
            "buildConfigurationList",
            Coder::reference::<XCConfigurationList>(),
        );
        registry.bind(K::PBXProject, "compatibilityVersion", Coder::string());
        registry.bind(K::PBXProject, "developmentRegion", Coder::string());
        registry.bind(K::PBXProject, "projectDirPath", Coder::string());
        registry.bind(K::PBXProject, "projectRoot", Coder::string());
        registry.bind(K::PBXProject, "knownRegions", strings.clone());
        registry.bind(K::PBXProject, "hasScannedForEncodings", one_zero.clone());
        registry.bind(K::PBXProject, "attributes", Coder::dictionary());
        registry.bind(
            K::PBXProject,
            "projectReferences",
            Coder::list(Coder::inline::<ProjectReference>()),
        );
        registry.bind(
            K::PBXProject,
            "packageReferences",
            Coder::list(Coder::reference::<XCRemoteSwiftPackageReference>()),
        );

        registry.bind(K::ProjectReference, "ProductGroup", Coder::reference::<PBXGroup>());
        registry.bind(K::ProjectReference, "ProjectRef", Coder::reference::<PBXFileReference>());

        // Targets
        registry.bind_all(&TARGETS, "name", &Coder::string());
        registry.bind_all(&TARGETS, "productName", &Coder::string());
        registry.bind_all(
            &TARGETS,
            "productType",
            &Coder::enumeration(EnumCoder::ProductType),
        );
        registry.bind_all(
            &TARGETS,
            "productReference",
            &Coder::reference::<PBXFileReference>(),
        );
        registry.bind_all(
            &TARGETS,
            "buildConfigurationList",
            &Coder::reference::<XCConfigurationList>(),
        );
        registry.bind_all(
            &TARGETS,
            "buildPhases",
            &Coder::list(Coder::reference::<PBXBuildPhase>()),
        );
        registry.bind_all(
            &TARGETS,
            "dependencies",
            &Coder::list(Coder::reference::<PBXTargetDependency>()),
        );
        registry.bind(
            K::PBXNativeTarget,
            "packageProductDependencies",
            Coder::list(Coder::reference::<XCSwiftPackageProductDependency>()),
        );
        registry.bind(K::PBXLegacyTarget, "buildArgumentsString", Coder::string());
        registry.bind(K::PBXLegacyTarget, "buildToolPath", Coder::string());
        registry.bind(K::PBXLegacyTarget, "buildWorkingDirectory", Coder::string());
        registry.bind(
            K::PBXLegacyTarget,
            "passBuildSettingsInEnvironment",
            one_zero.clone(),
        );

        // Build phases
        registry.bind_all(
            &BUILD_PHASES,
            "files",
            &Coder::list(Coder::reference::<PBXBuildFile>()),
        );
        registry.bind_all(&BUILD_PHASES, "buildActionMask", &Coder::integer());
        registry.bind_all(&BUILD_PHASES, "runOnlyForDeploymentPostprocessing", &one_zero);
        registry.bind(K::PBXCopyFilesBuildPhase, "name", Coder::string());
        registry.bind(K::PBXCopyFilesBuildPhase, "dstPath", Coder::string());
        registry.bind(
            K::PBXCopyFilesBuildPhase,
            "dstSubfolderSpec",
            Coder::enumeration(EnumCoder::SubFolder),
        );
        registry.bind(K::PBXShellScriptBuildPhase, "name", Coder::string());
        registry.bind(K::PBXShellScriptBuildPhase, "shellPath", Coder::string());
        registry.bind(K::PBXShellScriptBuildPhase, "shellScript", Coder::string());
        registry.bind(K::PBXShellScriptBuildPhase, "inputPaths", strings.clone());
        registry.bind(K::PBXShellScriptBuildPhase, "inputFileListPaths", strings.clone());
        registry.bind(K::PBXShellScriptBuildPhase, "outputPaths", strings.clone());
        registry.bind(K::PBXShellScriptBuildPhase, "outputFileListPaths", strings);
        registry.bind(K::PBXShellScriptBuildPhase, "showEnvVarsInLog", one_zero.clone());

        // Files and groups
        let source_tree = Coder::enumeration(EnumCoder::SourceTree);
        for kind in [K::PBXFileReference, K::PBXReferenceProxy]
            .iter()
            .chain(GROUPS.iter())
        {
            registry.bind(*kind, "name", Coder::string());
            registry.bind(*kind, "path", Coder::string());
            registry.bind(*kind, "sourceTree", source_tree.clone());
        }
        registry.bind(K::PBXFileReference, "explicitFileType", Coder::string());
        registry.bind(K::PBXFileReference, "lastKnownFileType", Coder::string());
        registry.bind(K::PBXFileReference, "fileEncoding", Coder::integer());
        registry.bind(K::PBXFileReference, "includeInIndex", one_zero);
        registry.bind_all(
            &GROUPS,
            "children",
            &Coder::list(Coder::reference::<GroupChild>()),
        );
        registry.bind(
            K::XCVersionGroup,
            "currentVersion",
            Coder::reference::<PBXFileReference>(),
        );
        registry.bind(K::XCVersionGroup, "versionGroupType", Coder::string());
        registry.bind(K::PBXReferenceProxy, "fileType", Coder::string());
        registry.bind(
            K::PBXReferenceProxy,
            "remoteRef",
            Coder::reference::<PBXContainerItemProxy>(),
        );

        registry.bind(K::PBXBuildFile, "fileRef", Coder::reference::<BuildFileReference>());
        registry.bind(
            K::PBXBuildFile,
            "productRef",
            Coder::reference::<XCSwiftPackageProductDependency>(),
        );
        registry.bind(K::PBXBuildFile, "settings", Coder::dictionary());

        // Configurations
        registry.bind(
            K::XCConfigurationList,
            "buildConfigurations",
            Coder::list(Coder::reference::<XCBuildConfiguration>()),
        );
        registry.bind(K::XCConfigurationList, "defaultConfigurationName", Coder::string());
        registry.bind(
            K::XCConfigurationList,
            "defaultConfigurationIsVisible",
            Coder::boolean(BooleanSpelling::YesNo),
        );
        registry.bind(K::XCBuildConfiguration, "name", Coder::string());
        registry.bind(K::XCBuildConfiguration, "buildSettings", Coder::dictionary());
        registry.bind(
            K::XCBuildConfiguration,
            "baseConfigurationReference",
            Coder::reference::<PBXFileReference>(),
        );

        // Dependencies and proxies
        registry.bind(K::PBXTargetDependency, "name", Coder::string());
        registry.bind(K::PBXTargetDependency, "target", Coder::reference::<PBXTarget>());
        registry.bind(
            K::PBXTargetDependency,
            "targetProxy",
            Coder::reference::<PBXContainerItemProxy>(),
        );
        registry.bind(
            K::PBXContainerItemProxy,
            "containerPortal",
            Coder::reference::<ContainerPortal>(),
        );
        registry.bind(
            K::PBXContainerItemProxy,
            "proxyType",
            Coder::enumeration(EnumCoder::ProxyType),
        );
        registry.bind(K::PBXContainerItemProxy, "remoteGlobalIDString", Coder::string());
        registry.bind(K::PBXContainerItemProxy, "remoteInfo", Coder::string());

        // Swift packages
        registry.bind(K::XCRemoteSwiftPackageReference, "repositoryURL", Coder::string());
        registry.bind(
            K::XCRemoteSwiftPackageReference,
            "requirement",
            Coder::inline::<VersionRequirement>(),
        );
        registry.bind(K::XCSwiftPackageProductDependency, "productName", Coder::string());
        registry.bind(
            K::XCSwiftPackageProductDependency,
            "package",
            Coder::reference::<XCRemoteSwiftPackageReference>(),
        );

        let requirement_kind = Coder::enumeration(EnumCoder::RequirementKind);
        for kind in VersionRequirement::KINDS {
            registry.bind(*kind, "kind", requirement_kind.clone());
        }
        registry.bind(K::VersionRequirementRevision, "revision", Coder::string());
        registry.bind(K::VersionRequirementBranch, "branch", Coder::string());
        registry.bind(K::VersionRequirementExact, "version", Coder::string());
        registry.bind(K::VersionRequirementRange, "minimumVersion", Coder::string());
        registry.bind(K::VersionRequirementRange, "maximumVersion", Coder::string());
        registry.bind(K::VersionRequirementUpToNextMinor, "minimumVersion", Coder::string());
        registry.bind(K::VersionRequirementUpToNextMajor, "minimumVersion", Coder::string());

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::coders::Coder;
    use crate::objects::Codeable;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_kind_declares_fields() {
        let registry = CoderRegistry::global();
        for kind in ObjectKind::iter() {
            assert!(registry.keys_of(kind).count() > 0, "{kind} has no coders");
        }
    }

    #[test]
    fn test_missing_coder() {
        let registry = CoderRegistry::global();
        let key = ObjectKind::PBXGroup.key("buildSettings");
        assert!(matches!(registry.get(key), Err(Error::MissingCoder(k)) if k == key));
        assert!(registry.get(CodingKey::ISA).is_ok());
    }

    #[test]
    fn test_boolean_spellings_differ_per_field() -> Result<()> {
        let registry = CoderRegistry::global();
        let spelling = |key: CodingKey| match registry.get(key) {
            Ok(Coder::Boolean(coder)) => Some(coder.spelling()),
            _ => None,
        };

        assert_eq!(
            spelling(ObjectKind::XCConfigurationList.key("defaultConfigurationIsVisible")),
            Some(BooleanSpelling::YesNo)
        );
        assert_eq!(
            spelling(ObjectKind::PBXLegacyTarget.key("passBuildSettingsInEnvironment")),
            Some(BooleanSpelling::OneZero)
        );
        Ok(())
    }

    #[test]
    fn test_by_ref_and_by_copy_fields() {
        let registry = CoderRegistry::global();

        match registry.get(ObjectKind::PBXTargetDependency.key("target")) {
            Ok(Coder::Reference(coder)) => assert_eq!(coder.kinds(), PBXTarget::KINDS),
            other => panic!("unexpected coder {other:?}"),
        }
        match registry.get(ObjectKind::XCRemoteSwiftPackageReference.key("requirement")) {
            Ok(Coder::Inline(coder)) => assert_eq!(coder.kinds(), VersionRequirement::KINDS),
            other => panic!("unexpected coder {other:?}"),
        }
    }

    #[test]
    fn test_key_for_raw_field_names() {
        let registry = CoderRegistry::global();
        assert_eq!(
            registry.key_for(ObjectKind::PBXGroup, "children"),
            Some(ObjectKind::PBXGroup.key("children"))
        );
        assert_eq!(registry.key_for(ObjectKind::PBXGroup, "usesTabs"), None);
    }
}
