//! Build phases.
//!
//! The four plain phases (sources, headers, frameworks, resources) only hold build files. Copy
//! files and shell script phases add fields of their own; their setters live on the matching
//! [`PBXBuildPhaseBuilder`] specialization.

use std::marker::PhantomData;

use crate::coding::{FieldValue, KeyedObjectBuilder};
use crate::objects::{view, Codeable, PBXBuildFile, SubFolder};
use crate::Result;

/// Default `buildActionMask`, meaning the phase runs for every build action
pub const DEFAULT_BUILD_ACTION_MASK: i64 = 2_147_483_647;

codeable! {
    /// Compiles source files.
    PBXSourcesBuildPhase => PBXSourcesBuildPhase
}

codeable! {
    /// Copies public and private headers.
    PBXHeadersBuildPhase => PBXHeadersBuildPhase
}

codeable! {
    /// Links frameworks and libraries.
    PBXFrameworksBuildPhase => PBXFrameworksBuildPhase
}

codeable! {
    /// Copies bundle resources.
    PBXResourcesBuildPhase => PBXResourcesBuildPhase
}

codeable! {
    /// Copies files to a location inside or outside the product.
    PBXCopyFilesBuildPhase => PBXCopyFilesBuildPhase
}

codeable! {
    /// Runs a shell script.
    PBXShellScriptBuildPhase => PBXShellScriptBuildPhase
}

codeable_family! {
    /// Any build phase, the accepted kinds of a target's `buildPhases`.
    PBXBuildPhase {
        /// Compile sources
        Sources(PBXSourcesBuildPhase),
        /// Headers
        Headers(PBXHeadersBuildPhase),
        /// Link binary with libraries
        Frameworks(PBXFrameworksBuildPhase),
        /// Copy bundle resources
        Resources(PBXResourcesBuildPhase),
        /// Copy files
        CopyFiles(PBXCopyFilesBuildPhase),
        /// Run script
        ShellScript(PBXShellScriptBuildPhase),
    }
}

macro_rules! build_phase_fields {
    ($($ty:ty),+) => {
        $(
            impl $ty {
                /// The files processed by this phase, in order
                ///
                /// # Errors
                /// Returns an error if a build file reference cannot be resolved.
                pub fn files(&self) -> Result<Vec<PBXBuildFile>> {
                    self.as_object().list("files")
                }

                /// The build actions this phase runs for
                ///
                /// # Errors
                /// Returns an error if the field cannot be decoded.
                pub fn build_action_mask(&self) -> Result<Option<i64>> {
                    self.as_object().get("buildActionMask")
                }

                /// Whether the phase only runs when installing
                ///
                /// # Errors
                /// Returns an error if the field is not a boolean.
                pub fn run_only_for_deployment_postprocessing(&self) -> Result<Option<bool>> {
                    self.as_object().get("runOnlyForDeploymentPostprocessing")
                }
            }
        )+
    };
}

build_phase_fields!(
    PBXSourcesBuildPhase,
    PBXHeadersBuildPhase,
    PBXFrameworksBuildPhase,
    PBXResourcesBuildPhase,
    PBXCopyFilesBuildPhase,
    PBXShellScriptBuildPhase,
    PBXBuildPhase
);

macro_rules! build_phase_builders {
    ($($ty:ident),+) => {
        $(
            impl $ty {
                /// Starts building a phase of this kind.
                #[must_use]
                pub fn builder() -> PBXBuildPhaseBuilder<$ty> {
                    PBXBuildPhaseBuilder::new()
                }

                /// Starts a builder overriding fields of this phase.
                #[must_use]
                pub fn to_builder(&self) -> PBXBuildPhaseBuilder<$ty> {
                    PBXBuildPhaseBuilder::from_parent(self)
                }
            }
        )+
    };
}

build_phase_builders!(
    PBXSourcesBuildPhase,
    PBXHeadersBuildPhase,
    PBXFrameworksBuildPhase,
    PBXResourcesBuildPhase,
    PBXCopyFilesBuildPhase,
    PBXShellScriptBuildPhase
);

impl PBXCopyFilesBuildPhase {
    /// The phase name shown in Xcode
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn name(&self) -> Result<Option<String>> {
        self.0.get("name")
    }

    /// Destination path, relative to the destination folder
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn dst_path(&self) -> Result<Option<String>> {
        self.0.get("dstPath")
    }

    /// Destination folder
    ///
    /// # Errors
    /// Returns an error if the field holds an unknown destination.
    pub fn dst_subfolder_spec(&self) -> Result<Option<SubFolder>> {
        self.0.get("dstSubfolderSpec")
    }
}

impl PBXShellScriptBuildPhase {
    /// The phase name shown in Xcode
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn name(&self) -> Result<Option<String>> {
        self.0.get("name")
    }

    /// The interpreter running the script
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn shell_path(&self) -> Result<Option<String>> {
        self.0.get("shellPath")
    }

    /// The script
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn shell_script(&self) -> Result<Option<String>> {
        self.0.get("shellScript")
    }

    /// Input files
    ///
    /// # Errors
    /// Returns an error if the field is not a list of strings.
    pub fn input_paths(&self) -> Result<Vec<String>> {
        self.0.list("inputPaths")
    }

    /// Files listing further inputs
    ///
    /// # Errors
    /// Returns an error if the field is not a list of strings.
    pub fn input_file_list_paths(&self) -> Result<Vec<String>> {
        self.0.list("inputFileListPaths")
    }

    /// Output files
    ///
    /// # Errors
    /// Returns an error if the field is not a list of strings.
    pub fn output_paths(&self) -> Result<Vec<String>> {
        self.0.list("outputPaths")
    }

    /// Files listing further outputs
    ///
    /// # Errors
    /// Returns an error if the field is not a list of strings.
    pub fn output_file_list_paths(&self) -> Result<Vec<String>> {
        self.0.list("outputFileListPaths")
    }

    /// Whether the build environment is printed to the build log
    ///
    /// # Errors
    /// Returns an error if the field is not a boolean.
    pub fn show_env_vars_in_log(&self) -> Result<Option<bool>> {
        self.0.get("showEnvVarsInLog")
    }
}

/// Builder for every build phase kind.
#[derive(Debug, Clone)]
pub struct PBXBuildPhaseBuilder<T> {
    inner: KeyedObjectBuilder,
    phase: PhantomData<T>,
}

/// Builder for [`PBXCopyFilesBuildPhase`]
pub type PBXCopyFilesBuildPhaseBuilder = PBXBuildPhaseBuilder<PBXCopyFilesBuildPhase>;

/// Builder for [`PBXShellScriptBuildPhase`]
pub type PBXShellScriptBuildPhaseBuilder = PBXBuildPhaseBuilder<PBXShellScriptBuildPhase>;

impl<T: Codeable> PBXBuildPhaseBuilder<T> {
    fn new() -> Self {
        PBXBuildPhaseBuilder {
            inner: KeyedObjectBuilder::new(T::KINDS[0]),
            phase: PhantomData,
        }
    }

    fn from_parent(parent: &T) -> Self {
        PBXBuildPhaseBuilder {
            inner: parent.as_object().to_builder(),
            phase: PhantomData,
        }
    }

    /// Appends a build file.
    #[must_use]
    pub fn file(mut self, file: PBXBuildFile) -> Self {
        self.inner.add("files", file);
        self
    }

    /// Replaces the build files.
    #[must_use]
    pub fn files(mut self, files: impl IntoIterator<Item = PBXBuildFile>) -> Self {
        self.inner.set("files", files.into_iter().collect::<Vec<_>>());
        self
    }

    /// Sets the build actions the phase runs for.
    #[must_use]
    pub fn build_action_mask(mut self, mask: i64) -> Self {
        self.inner.set("buildActionMask", mask);
        self
    }

    /// Sets whether the phase only runs when installing.
    #[must_use]
    pub fn run_only_for_deployment_postprocessing(mut self, value: bool) -> Self {
        self.inner.set("runOnlyForDeploymentPostprocessing", value);
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the phase.
    ///
    /// Files default to empty, the action mask to [`DEFAULT_BUILD_ACTION_MASK`] and
    /// `runOnlyForDeploymentPostprocessing` to false. Shell script phases further default to
    /// `/bin/sh` running an empty script.
    ///
    /// # Errors
    /// Returns an error if the phase cannot be built.
    pub fn build(self) -> Result<T> {
        let mut inner = self
            .inner
            .if_absent("files", Vec::<FieldValue>::new())
            .if_absent("buildActionMask", DEFAULT_BUILD_ACTION_MASK)
            .if_absent("runOnlyForDeploymentPostprocessing", false);
        if inner.kind() == PBXShellScriptBuildPhase::KIND {
            inner = inner
                .if_absent("shellPath", "/bin/sh")
                .if_absent("shellScript", "");
        }
        view(inner.build()?)
    }
}

impl PBXBuildPhaseBuilder<PBXCopyFilesBuildPhase> {
    /// Sets the phase name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.set("name", FieldValue::String(name.into()));
        self
    }

    /// Sets the destination path.
    #[must_use]
    pub fn dst_path(mut self, path: impl Into<String>) -> Self {
        self.inner.set("dstPath", FieldValue::String(path.into()));
        self
    }

    /// Sets the destination folder.
    #[must_use]
    pub fn dst_subfolder_spec(mut self, destination: SubFolder) -> Self {
        self.inner.set("dstSubfolderSpec", destination);
        self
    }
}

impl PBXBuildPhaseBuilder<PBXShellScriptBuildPhase> {
    /// Sets the phase name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.set("name", FieldValue::String(name.into()));
        self
    }

    /// Sets the interpreter.
    #[must_use]
    pub fn shell_path(mut self, path: impl Into<String>) -> Self {
        self.inner.set("shellPath", FieldValue::String(path.into()));
        self
    }

    /// Sets the script.
    #[must_use]
    pub fn shell_script(mut self, script: impl Into<String>) -> Self {
        self.inner.set("shellScript", FieldValue::String(script.into()));
        self
    }

    /// Appends an input file.
    #[must_use]
    pub fn input_path(mut self, path: impl Into<String>) -> Self {
        self.inner.add("inputPaths", FieldValue::String(path.into()));
        self
    }

    /// Appends a file listing further inputs.
    #[must_use]
    pub fn input_file_list_path(mut self, path: impl Into<String>) -> Self {
        self.inner
            .add("inputFileListPaths", FieldValue::String(path.into()));
        self
    }

    /// Appends an output file.
    #[must_use]
    pub fn output_path(mut self, path: impl Into<String>) -> Self {
        self.inner.add("outputPaths", FieldValue::String(path.into()));
        self
    }

    /// Appends a file listing further outputs.
    #[must_use]
    pub fn output_file_list_path(mut self, path: impl Into<String>) -> Self {
        self.inner
            .add("outputFileListPaths", FieldValue::String(path.into()));
        self
    }

    /// Sets whether the build environment is printed to the build log.
    #[must_use]
    pub fn show_env_vars_in_log(mut self, value: bool) -> Self {
        self.inner.set("showEnvVarsInLog", value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::ObjectKind;

    #[test]
    fn test_shell_script_defaults() -> Result<()> {
        let phase = PBXShellScriptBuildPhase::builder()
            .name("Generate")
            .input_path("$(SRCROOT)/schema.json")
            .output_path("$(DERIVED_FILE_DIR)/Schema.swift")
            .build()?;

        assert_eq!(phase.shell_path()?.as_deref(), Some("/bin/sh"));
        assert_eq!(phase.shell_script()?.as_deref(), Some(""));
        assert_eq!(phase.input_paths()?, vec!["$(SRCROOT)/schema.json"]);
        assert_eq!(phase.output_paths()?, vec!["$(DERIVED_FILE_DIR)/Schema.swift"]);
        assert!(phase.input_file_list_paths()?.is_empty());
        assert_eq!(phase.show_env_vars_in_log()?, None);
        Ok(())
    }

    #[test]
    fn test_common_defaults() -> Result<()> {
        let phase = PBXFrameworksBuildPhase::builder().build()?;

        assert!(phase.files()?.is_empty());
        assert_eq!(phase.build_action_mask()?, Some(DEFAULT_BUILD_ACTION_MASK));
        assert_eq!(phase.run_only_for_deployment_postprocessing()?, Some(false));
        Ok(())
    }

    #[test]
    fn test_copy_files() -> Result<()> {
        let phase: PBXBuildPhase = PBXCopyFilesBuildPhase::builder()
            .name("Embed Frameworks")
            .dst_subfolder_spec(SubFolder::Frameworks)
            .dst_path("")
            .build()?
            .into();

        assert_eq!(phase.kind(), ObjectKind::PBXCopyFilesBuildPhase);
        let copy: PBXCopyFilesBuildPhase = phase.cast()?;
        assert_eq!(copy.dst_subfolder_spec()?, Some(SubFolder::Frameworks));
        assert_eq!(copy.name()?.as_deref(), Some("Embed Frameworks"));
        Ok(())
    }
}
