//! Build configurations and configuration lists.

use crate::coding::{FieldValue, KeyedObjectBuilder, ObjectKind};
use crate::model::{Dictionary, Value};
use crate::objects::{view, Codeable, PBXFileReference};
use crate::Result;

/// Name of the configuration created for targets and projects without explicit configurations
pub const DEFAULT_CONFIGURATION_NAME: &str = "Default";

codeable! {
    /// One named set of build settings, e.g. `Debug`.
    XCBuildConfiguration => XCBuildConfiguration
}

impl XCBuildConfiguration {
    /// Starts building a configuration.
    #[must_use]
    pub fn builder() -> XCBuildConfigurationBuilder {
        XCBuildConfigurationBuilder {
            inner: KeyedObjectBuilder::new(ObjectKind::XCBuildConfiguration),
        }
    }

    /// Starts a builder overriding fields of this configuration.
    #[must_use]
    pub fn to_builder(&self) -> XCBuildConfigurationBuilder {
        XCBuildConfigurationBuilder {
            inner: self.as_object().to_builder(),
        }
    }

    /// The configuration name
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the name is absent, or any decode error.
    pub fn name(&self) -> Result<String> {
        self.0.require("name")
    }

    /// The build settings, empty when absent
    ///
    /// # Errors
    /// Returns an error if the settings cannot be decoded.
    pub fn build_settings(&self) -> Result<Dictionary> {
        Ok(self.0.get("buildSettings")?.unwrap_or_default())
    }

    /// The `.xcconfig` file these settings are based on
    ///
    /// # Errors
    /// Returns an error if the reference cannot be resolved.
    pub fn base_configuration_reference(&self) -> Result<Option<PBXFileReference>> {
        self.0.get("baseConfigurationReference")
    }
}

/// Builder for [`XCBuildConfiguration`]
#[derive(Debug, Clone)]
pub struct XCBuildConfigurationBuilder {
    inner: KeyedObjectBuilder,
}

impl XCBuildConfigurationBuilder {
    /// Sets the configuration name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.set("name", FieldValue::String(name.into()));
        self
    }

    /// Replaces the build settings.
    #[must_use]
    pub fn build_settings(mut self, settings: Dictionary) -> Self {
        self.inner.set("buildSettings", settings);
        self
    }

    /// Sets one build setting, adding to the settings given to this builder so far.
    #[must_use]
    pub fn build_setting(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut settings = match self.inner.take("buildSettings") {
            Some(FieldValue::Dictionary(settings)) => settings,
            _ => Dictionary::new(),
        };
        settings.insert(name.into(), value.into());
        self.inner.set("buildSettings", settings);
        self
    }

    /// Sets the `.xcconfig` file the settings are based on.
    #[must_use]
    pub fn base_configuration_reference(mut self, file: PBXFileReference) -> Self {
        self.inner.set("baseConfigurationReference", file);
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the configuration. Settings default to empty.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no name was given.
    pub fn build(self) -> Result<XCBuildConfiguration> {
        let object = self
            .inner
            .if_absent("buildSettings", Dictionary::new())
            .requires("name")
            .build()?;
        view(object)
    }
}

codeable! {
    /// The build configurations of a project or a target.
    XCConfigurationList => XCConfigurationList
}

impl XCConfigurationList {
    /// Starts building a configuration list.
    #[must_use]
    pub fn builder() -> XCConfigurationListBuilder {
        XCConfigurationListBuilder {
            inner: KeyedObjectBuilder::new(ObjectKind::XCConfigurationList),
        }
    }

    /// Starts a builder overriding fields of this list.
    #[must_use]
    pub fn to_builder(&self) -> XCConfigurationListBuilder {
        XCConfigurationListBuilder {
            inner: self.as_object().to_builder(),
        }
    }

    /// A list holding a single [`DEFAULT_CONFIGURATION_NAME`] configuration with no settings.
    ///
    /// # Errors
    /// Only fails if the builders reject their input, which they do not for these values.
    pub fn with_default_configuration() -> Result<XCConfigurationList> {
        let configuration = XCBuildConfiguration::builder()
            .name(DEFAULT_CONFIGURATION_NAME)
            .build()?;
        XCConfigurationList::builder()
            .build_configuration(configuration)
            .default_configuration_name(DEFAULT_CONFIGURATION_NAME)
            .default_configuration_is_visible(false)
            .build()
    }

    /// The configurations, in declaration order
    ///
    /// # Errors
    /// Returns an error if a configuration reference cannot be resolved.
    pub fn build_configurations(&self) -> Result<Vec<XCBuildConfiguration>> {
        self.0.list("buildConfigurations")
    }

    /// Looks up a configuration by name.
    ///
    /// # Errors
    /// Returns an error if a configuration cannot be decoded.
    pub fn build_configuration(&self, name: &str) -> Result<Option<XCBuildConfiguration>> {
        for configuration in self.build_configurations()? {
            if configuration.name()? == name {
                return Ok(Some(configuration));
            }
        }
        Ok(None)
    }

    /// Name of the configuration used when none is selected
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn default_configuration_name(&self) -> Result<Option<String>> {
        self.0.get("defaultConfigurationName")
    }

    /// Whether the default configuration is shown in Xcode
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn default_configuration_is_visible(&self) -> Result<Option<bool>> {
        self.0.get("defaultConfigurationIsVisible")
    }
}

/// Builder for [`XCConfigurationList`]
#[derive(Debug, Clone)]
pub struct XCConfigurationListBuilder {
    inner: KeyedObjectBuilder,
}

impl XCConfigurationListBuilder {
    /// Appends a configuration.
    #[must_use]
    pub fn build_configuration(mut self, configuration: XCBuildConfiguration) -> Self {
        self.inner.add("buildConfigurations", configuration);
        self
    }

    /// Replaces the configurations.
    #[must_use]
    pub fn build_configurations(
        mut self,
        configurations: impl IntoIterator<Item = XCBuildConfiguration>,
    ) -> Self {
        self.inner.set(
            "buildConfigurations",
            configurations.into_iter().collect::<Vec<_>>(),
        );
        self
    }

    /// Sets the name of the default configuration.
    #[must_use]
    pub fn default_configuration_name(mut self, name: impl Into<String>) -> Self {
        self.inner.set("defaultConfigurationName", FieldValue::String(name.into()));
        self
    }

    /// Sets whether the default configuration is shown in Xcode.
    #[must_use]
    pub fn default_configuration_is_visible(mut self, visible: bool) -> Self {
        self.inner.set("defaultConfigurationIsVisible", visible);
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the list. It defaults to no configurations and a hidden default configuration.
    ///
    /// # Errors
    /// Returns an error if the list cannot be built.
    pub fn build(self) -> Result<XCConfigurationList> {
        let object = self
            .inner
            .if_absent("buildConfigurations", Vec::<FieldValue>::new())
            .if_absent("defaultConfigurationIsVisible", false)
            .build()?;
        view(object)
    }
}
