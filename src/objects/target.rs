//! Targets: native, legacy and aggregate.

use std::marker::PhantomData;

use crate::coding::{FieldValue, KeyedObjectBuilder};
use crate::objects::{
    view, Codeable, PBXBuildPhase, PBXFileReference, PBXTargetDependency, ProductType,
    XCConfigurationList, XCSwiftPackageProductDependency,
};
use crate::Result;

codeable! {
    /// A target compiled and linked by Xcode itself.
    PBXNativeTarget => PBXNativeTarget
}

codeable! {
    /// A target driving an external build tool such as `make`.
    PBXLegacyTarget => PBXLegacyTarget
}

codeable! {
    /// A target without a product of its own, used to group dependencies and script phases.
    PBXAggregateTarget => PBXAggregateTarget
}

codeable_family! {
    /// Any target, the accepted kinds of a project's `targets` and of a dependency's `target`.
    PBXTarget {
        /// A native target
        Native(PBXNativeTarget),
        /// A legacy target
        Legacy(PBXLegacyTarget),
        /// An aggregate target
        Aggregate(PBXAggregateTarget),
    }
}

macro_rules! target_fields {
    ($($ty:ty),+) => {
        $(
            impl $ty {
                /// The target name
                ///
                /// # Errors
                /// Returns [`crate::Error::MissingField`] if the name is absent, or any decode
                /// error.
                pub fn name(&self) -> Result<String> {
                    self.as_object().require("name")
                }

                /// The product name
                ///
                /// # Errors
                /// Returns an error if the field cannot be decoded.
                pub fn product_name(&self) -> Result<Option<String>> {
                    self.as_object().get("productName")
                }

                /// The product type
                ///
                /// # Errors
                /// Returns an error if the field holds an unknown product type.
                pub fn product_type(&self) -> Result<Option<ProductType>> {
                    self.as_object().get("productType")
                }

                /// The file reference of the built product
                ///
                /// # Errors
                /// Returns an error if the reference cannot be resolved.
                pub fn product_reference(&self) -> Result<Option<PBXFileReference>> {
                    self.as_object().get("productReference")
                }

                /// The build configurations of this target
                ///
                /// # Errors
                /// Returns [`crate::Error::MissingField`] if the list is absent, or any decode
                /// error.
                pub fn build_configuration_list(&self) -> Result<XCConfigurationList> {
                    self.as_object().require("buildConfigurationList")
                }

                /// The build phases, in execution order
                ///
                /// # Errors
                /// Returns an error if a phase reference cannot be resolved.
                pub fn build_phases(&self) -> Result<Vec<PBXBuildPhase>> {
                    self.as_object().list("buildPhases")
                }

                /// The targets this target depends on
                ///
                /// # Errors
                /// Returns an error if a dependency reference cannot be resolved.
                pub fn dependencies(&self) -> Result<Vec<PBXTargetDependency>> {
                    self.as_object().list("dependencies")
                }
            }
        )+
    };
}

target_fields!(PBXNativeTarget, PBXLegacyTarget, PBXAggregateTarget, PBXTarget);

impl PBXNativeTarget {
    /// Starts building a native target.
    #[must_use]
    pub fn builder() -> PBXTargetBuilder<PBXNativeTarget> {
        PBXTargetBuilder::new()
    }

    /// Starts a builder overriding fields of this target.
    #[must_use]
    pub fn to_builder(&self) -> PBXTargetBuilder<PBXNativeTarget> {
        PBXTargetBuilder::from_parent(self)
    }

    /// Swift package products linked by this target
    ///
    /// # Errors
    /// Returns an error if a product reference cannot be resolved.
    pub fn package_product_dependencies(&self) -> Result<Vec<XCSwiftPackageProductDependency>> {
        self.0.list("packageProductDependencies")
    }
}

impl PBXLegacyTarget {
    /// Starts building a legacy target.
    #[must_use]
    pub fn builder() -> PBXTargetBuilder<PBXLegacyTarget> {
        PBXTargetBuilder::new()
    }

    /// Starts a builder overriding fields of this target.
    #[must_use]
    pub fn to_builder(&self) -> PBXTargetBuilder<PBXLegacyTarget> {
        PBXTargetBuilder::from_parent(self)
    }

    /// Arguments passed to the build tool
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn build_arguments_string(&self) -> Result<Option<String>> {
        self.0.get("buildArgumentsString")
    }

    /// Path of the build tool
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn build_tool_path(&self) -> Result<Option<String>> {
        self.0.get("buildToolPath")
    }

    /// Directory the build tool runs in
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn build_working_directory(&self) -> Result<Option<String>> {
        self.0.get("buildWorkingDirectory")
    }

    /// Whether build settings are exported as environment variables
    ///
    /// # Errors
    /// Returns an error if the field is not a boolean.
    pub fn pass_build_settings_in_environment(&self) -> Result<Option<bool>> {
        self.0.get("passBuildSettingsInEnvironment")
    }
}

impl PBXAggregateTarget {
    /// Starts building an aggregate target.
    #[must_use]
    pub fn builder() -> PBXTargetBuilder<PBXAggregateTarget> {
        PBXTargetBuilder::new()
    }

    /// Starts a builder overriding fields of this target.
    #[must_use]
    pub fn to_builder(&self) -> PBXTargetBuilder<PBXAggregateTarget> {
        PBXTargetBuilder::from_parent(self)
    }
}

/// Builder for the target kinds.
///
/// Setters shared by every target are available on all builders. Kind-specific setters only exist
/// on the builder of that kind.
#[derive(Debug, Clone)]
pub struct PBXTargetBuilder<T> {
    inner: KeyedObjectBuilder,
    target: PhantomData<T>,
}

impl<T: Codeable> PBXTargetBuilder<T> {
    fn new() -> Self {
        PBXTargetBuilder {
            inner: KeyedObjectBuilder::new(T::KINDS[0]),
            target: PhantomData,
        }
    }

    fn from_parent(parent: &T) -> Self {
        PBXTargetBuilder {
            inner: parent.as_object().to_builder(),
            target: PhantomData,
        }
    }

    /// Sets the target name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.set("name", FieldValue::String(name.into()));
        self
    }

    /// Sets the product name.
    #[must_use]
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.inner.set("productName", FieldValue::String(name.into()));
        self
    }

    /// Sets the product type.
    #[must_use]
    pub fn product_type(mut self, product_type: ProductType) -> Self {
        self.inner.set("productType", product_type);
        self
    }

    /// Sets the file reference of the built product.
    #[must_use]
    pub fn product_reference(mut self, product: PBXFileReference) -> Self {
        self.inner.set("productReference", product);
        self
    }

    /// Sets the build configurations.
    #[must_use]
    pub fn build_configurations(mut self, configurations: XCConfigurationList) -> Self {
        self.inner.set("buildConfigurationList", configurations);
        self
    }

    /// Appends a build phase.
    #[must_use]
    pub fn build_phase(mut self, phase: impl Into<PBXBuildPhase>) -> Self {
        let phase: PBXBuildPhase = phase.into();
        self.inner.add("buildPhases", phase);
        self
    }

    /// Replaces the build phases.
    #[must_use]
    pub fn build_phases(mut self, phases: impl IntoIterator<Item = PBXBuildPhase>) -> Self {
        self.inner
            .set("buildPhases", phases.into_iter().collect::<Vec<_>>());
        self
    }

    /// Appends a dependency.
    #[must_use]
    pub fn dependency(mut self, dependency: PBXTargetDependency) -> Self {
        self.inner.add("dependencies", dependency);
        self
    }

    /// Replaces the dependencies.
    #[must_use]
    pub fn dependencies(
        mut self,
        dependencies: impl IntoIterator<Item = PBXTargetDependency>,
    ) -> Self {
        self.inner
            .set("dependencies", dependencies.into_iter().collect::<Vec<_>>());
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the target.
    ///
    /// Build phases and dependencies default to empty. The configuration list defaults to one
    /// holding a single `Default` configuration.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no name was given.
    pub fn build(self) -> Result<T> {
        let object = self
            .inner
            .if_absent("buildPhases", Vec::<FieldValue>::new())
            .if_absent("dependencies", Vec::<FieldValue>::new())
            .if_absent(
                "buildConfigurationList",
                XCConfigurationList::with_default_configuration()?,
            )
            .requires("name")
            .build()?;
        view(object)
    }
}

impl PBXTargetBuilder<PBXNativeTarget> {
    /// Appends a Swift package product linked by the target.
    #[must_use]
    pub fn package_product_dependency(mut self, product: XCSwiftPackageProductDependency) -> Self {
        self.inner.add("packageProductDependencies", product);
        self
    }
}

impl PBXTargetBuilder<PBXLegacyTarget> {
    /// Sets the arguments passed to the build tool.
    #[must_use]
    pub fn build_arguments_string(mut self, arguments: impl Into<String>) -> Self {
        self.inner
            .set("buildArgumentsString", FieldValue::String(arguments.into()));
        self
    }

    /// Sets the path of the build tool.
    #[must_use]
    pub fn build_tool_path(mut self, path: impl Into<String>) -> Self {
        self.inner.set("buildToolPath", FieldValue::String(path.into()));
        self
    }

    /// Sets the directory the build tool runs in.
    #[must_use]
    pub fn build_working_directory(mut self, directory: impl Into<String>) -> Self {
        self.inner
            .set("buildWorkingDirectory", FieldValue::String(directory.into()));
        self
    }

    /// Sets whether build settings are exported as environment variables.
    #[must_use]
    pub fn pass_build_settings_in_environment(mut self, pass: bool) -> Self {
        self.inner.set("passBuildSettingsInEnvironment", pass);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::ObjectKind;
    use crate::objects::PBXSourcesBuildPhase;
    use crate::Error;

    #[test]
    fn test_defaults() -> Result<()> {
        let target = PBXNativeTarget::builder()
            .name("App")
            .product_type(ProductType::Application)
            .build()?;

        assert_eq!(target.name()?, "App");
        assert_eq!(target.product_type()?, Some(ProductType::Application));
        assert!(target.build_phases()?.is_empty());
        assert!(target.dependencies()?.is_empty());
        assert!(target.package_product_dependencies()?.is_empty());

        let list = target.build_configuration_list()?;
        assert_eq!(list.build_configurations()?.len(), 1);
        assert_eq!(list.default_configuration_name()?.as_deref(), Some("Default"));
        Ok(())
    }

    #[test]
    fn test_name_is_required() {
        match PBXLegacyTarget::builder().build_tool_path("/usr/bin/make").build() {
            Err(Error::MissingField { kind, field }) => {
                assert_eq!(kind, ObjectKind::PBXLegacyTarget);
                assert_eq!(field, "name");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_family_accessors() -> Result<()> {
        let phase = PBXSourcesBuildPhase::builder().build()?;
        let target: PBXTarget = PBXAggregateTarget::builder()
            .name("Prepare")
            .build_phase(phase)
            .build()?
            .into();

        assert_eq!(target.kind(), ObjectKind::PBXAggregateTarget);
        assert_eq!(target.name()?, "Prepare");
        assert_eq!(target.build_phases()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_legacy_fields() -> Result<()> {
        let target = PBXLegacyTarget::builder()
            .name("Make")
            .build_tool_path("/usr/bin/make")
            .build_arguments_string("$(ACTION)")
            .pass_build_settings_in_environment(true)
            .build()?;

        assert_eq!(target.build_tool_path()?.as_deref(), Some("/usr/bin/make"));
        assert_eq!(target.build_arguments_string()?.as_deref(), Some("$(ACTION)"));
        assert_eq!(target.pass_build_settings_in_environment()?, Some(true));
        assert_eq!(target.build_working_directory()?, None);
        Ok(())
    }

    #[test]
    fn test_to_builder_keeps_other_fields() -> Result<()> {
        let target = PBXNativeTarget::builder()
            .name("App")
            .product_name("App")
            .build()?;
        let renamed = target.to_builder().name("Renamed").build()?;

        assert_eq!(renamed.name()?, "Renamed");
        assert_eq!(renamed.product_name()?.as_deref(), Some("App"));
        assert_eq!(
            renamed.build_configuration_list()?,
            target.build_configuration_list()?
        );
        Ok(())
    }
}
