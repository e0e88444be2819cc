//! `PBXBuildFile`, the membership of a file or package product in a build phase.

use crate::coding::{KeyedObjectBuilder, ObjectKind};
use crate::model::{Dictionary, Value};
use crate::objects::{
    view, Codeable, PBXFileReference, PBXReferenceProxy, PBXVariantGroup, XCVersionGroup,
    XCSwiftPackageProductDependency,
};
use crate::Result;

codeable! {
    /// A file as a member of a build phase, with per-file settings such as compiler flags.
    PBXBuildFile => PBXBuildFile
}

codeable_family! {
    /// What a build file can point at.
    BuildFileReference {
        /// A file
        FileReference(PBXFileReference),
        /// Localized variants of one file
        VariantGroup(PBXVariantGroup),
        /// A versioned file
        VersionGroup(XCVersionGroup),
        /// A product of another project
        ReferenceProxy(PBXReferenceProxy),
    }
}

impl PBXBuildFile {
    /// Starts building a build file.
    #[must_use]
    pub fn builder() -> PBXBuildFileBuilder {
        PBXBuildFileBuilder {
            inner: KeyedObjectBuilder::new(ObjectKind::PBXBuildFile),
            settings: None,
        }
    }

    /// Starts a builder overriding fields of this build file.
    #[must_use]
    pub fn to_builder(&self) -> PBXBuildFileBuilder {
        PBXBuildFileBuilder {
            inner: self.as_object().to_builder(),
            settings: None,
        }
    }

    /// The file being built
    ///
    /// # Errors
    /// Returns an error if the reference cannot be resolved.
    pub fn file_ref(&self) -> Result<Option<BuildFileReference>> {
        self.0.get("fileRef")
    }

    /// The Swift package product being linked
    ///
    /// # Errors
    /// Returns an error if the reference cannot be resolved.
    pub fn product_ref(&self) -> Result<Option<XCSwiftPackageProductDependency>> {
        self.0.get("productRef")
    }

    /// Per-file settings, empty when absent
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn settings(&self) -> Result<Dictionary> {
        Ok(self.0.get("settings")?.unwrap_or_default())
    }
}

/// Builder for [`PBXBuildFile`]
#[derive(Debug, Clone)]
pub struct PBXBuildFileBuilder {
    inner: KeyedObjectBuilder,
    settings: Option<Dictionary>,
}

impl PBXBuildFileBuilder {
    /// Sets the file being built.
    #[must_use]
    pub fn file_ref(mut self, file: impl Into<BuildFileReference>) -> Self {
        let file: BuildFileReference = file.into();
        self.inner.set("fileRef", file);
        self
    }

    /// Sets the Swift package product being linked.
    #[must_use]
    pub fn product_ref(mut self, product: XCSwiftPackageProductDependency) -> Self {
        self.inner.set("productRef", product);
        self
    }

    /// Replaces the per-file settings.
    #[must_use]
    pub fn settings(mut self, settings: Dictionary) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Sets one per-file setting, e.g. `COMPILER_FLAGS`.
    #[must_use]
    pub fn setting(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings
            .get_or_insert_with(Dictionary::new)
            .insert(name.into(), value.into());
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the build file. Empty settings are left out.
    ///
    /// # Errors
    /// Returns an error if the build file cannot be built.
    pub fn build(mut self) -> Result<PBXBuildFile> {
        match self.settings {
            Some(settings) if !settings.is_empty() => self.inner.set("settings", settings),
            Some(_) => {
                self.inner.take("settings");
            }
            None => {}
        }
        view(self.inner.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_are_omitted() -> Result<()> {
        let file = PBXFileReference::of_group("main.c")?;
        let build_file = PBXBuildFile::builder()
            .file_ref(file.clone())
            .settings(Dictionary::new())
            .build()?;

        assert_eq!(build_file.as_object().try_decode("settings")?, None);
        assert!(build_file.settings()?.is_empty());
        assert_eq!(
            build_file.file_ref()?,
            Some(BuildFileReference::FileReference(file))
        );
        assert_eq!(build_file.product_ref()?, None);
        Ok(())
    }

    #[test]
    fn test_settings() -> Result<()> {
        let build_file = PBXBuildFile::builder()
            .file_ref(PBXFileReference::of_group("main.c")?)
            .setting("COMPILER_FLAGS", "-Wall")
            .build()?;

        assert_eq!(
            build_file.settings()?.get("COMPILER_FLAGS"),
            Some(&Value::from("-Wall"))
        );
        Ok(())
    }
}
