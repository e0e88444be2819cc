//! The project, root of every object graph.

use crate::coding::{FieldValue, KeyedObjectBuilder, ObjectKind};
use crate::model::{Dictionary, Value};
use crate::objects::{
    view, Codeable, GroupChild, PBXFileReference, PBXGroup, PBXSourceTree, PBXTarget,
    XCConfigurationList, XCRemoteSwiftPackageReference,
};
use crate::Result;

/// Compatibility version of freshly built projects
pub const DEFAULT_COMPATIBILITY_VERSION: &str = "Xcode 3.2";

/// `LastUpgradeCheck` attribute of freshly built projects
pub const DEFAULT_LAST_UPGRADE_CHECK: &str = "0610";

/// Name of the main group created when none is given
pub const DEFAULT_MAIN_GROUP_NAME: &str = "mainGroup";

codeable! {
    /// The project, referenced by the table's `rootObject`.
    PBXProject => PBXProject
}

codeable! {
    /// A reference to another `.xcodeproj`, stored inline in the referencing project.
    ProjectReference => ProjectReference
}

impl PBXProject {
    /// Starts building a project.
    #[must_use]
    pub fn builder() -> PBXProjectBuilder {
        PBXProjectBuilder::with_inner(KeyedObjectBuilder::new(ObjectKind::PBXProject), None)
    }

    /// Starts a builder overriding fields of this project.
    #[must_use]
    pub fn to_builder(&self) -> PBXProjectBuilder {
        PBXProjectBuilder::with_inner(self.as_object().to_builder(), Some(self.clone()))
    }

    /// The root group of the project navigator
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the group is absent, or any decode error.
    pub fn main_group(&self) -> Result<PBXGroup> {
        self.0.require("mainGroup")
    }

    /// The group holding the target products
    ///
    /// # Errors
    /// Returns an error if the reference cannot be resolved.
    pub fn product_ref_group(&self) -> Result<Option<PBXGroup>> {
        self.0.get("productRefGroup")
    }

    /// The targets, in declaration order
    ///
    /// # Errors
    /// Returns an error if a target reference cannot be resolved.
    pub fn targets(&self) -> Result<Vec<PBXTarget>> {
        self.0.list("targets")
    }

    /// Looks up a target by name.
    ///
    /// # Errors
    /// Returns an error if a target or its name cannot be decoded.
    pub fn target(&self, name: &str) -> Result<Option<PBXTarget>> {
        for target in self.targets()? {
            if target.name()? == name {
                return Ok(Some(target));
            }
        }
        Ok(None)
    }

    /// The project-level configurations
    ///
    /// # Errors
    /// Returns an error if the reference cannot be resolved.
    pub fn build_configuration_list(&self) -> Result<Option<XCConfigurationList>> {
        self.0.get("buildConfigurationList")
    }

    /// The oldest Xcode able to open the project, e.g. `Xcode 3.2`
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn compatibility_version(&self) -> Result<Option<String>> {
        self.0.get("compatibilityVersion")
    }

    /// The development language
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn development_region(&self) -> Result<Option<String>> {
        self.0.get("developmentRegion")
    }

    /// Location of the project directory relative to the `.xcodeproj`
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn project_dir_path(&self) -> Result<Option<String>> {
        self.0.get("projectDirPath")
    }

    /// Location of the project root
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn project_root(&self) -> Result<Option<String>> {
        self.0.get("projectRoot")
    }

    /// The localizations of the project
    ///
    /// # Errors
    /// Returns an error if the field is not a list of strings.
    pub fn known_regions(&self) -> Result<Vec<String>> {
        self.0.list("knownRegions")
    }

    /// Whether Xcode has scanned the files for their encodings
    ///
    /// # Errors
    /// Returns an error if the field holds an unknown boolean spelling.
    pub fn has_scanned_for_encodings(&self) -> Result<Option<bool>> {
        self.0.get("hasScannedForEncodings")
    }

    /// Free-form project attributes such as `LastUpgradeCheck`, empty when absent
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn attributes(&self) -> Result<Dictionary> {
        Ok(self.0.get("attributes")?.unwrap_or_default())
    }

    /// The referenced projects
    ///
    /// # Errors
    /// Returns an error if an inline reference cannot be decoded.
    pub fn project_references(&self) -> Result<Vec<ProjectReference>> {
        self.0.list("projectReferences")
    }

    /// The remote Swift packages used by the project
    ///
    /// # Errors
    /// Returns an error if a package reference cannot be resolved.
    pub fn package_references(&self) -> Result<Vec<XCRemoteSwiftPackageReference>> {
        self.0.list("packageReferences")
    }
}

/// Builder for [`PBXProject`]
///
/// Children added through [`PBXProjectBuilder::child`] are appended to the main group: the one
/// given explicitly, else the parent project's, else a new group named `mainGroup`. Targets and
/// references appended on a builder from [`PBXProject::to_builder`] extend the parent's lists.
#[derive(Debug, Clone)]
pub struct PBXProjectBuilder {
    inner: KeyedObjectBuilder,
    parent: Option<PBXProject>,
    main_group: Option<PBXGroup>,
    children: Vec<GroupChild>,
    appended: Vec<(&'static str, FieldValue)>,
    attributes: Dictionary,
}

impl PBXProjectBuilder {
    fn with_inner(inner: KeyedObjectBuilder, parent: Option<PBXProject>) -> Self {
        PBXProjectBuilder {
            inner,
            parent,
            main_group: None,
            children: Vec::new(),
            appended: Vec::new(),
            attributes: Dictionary::new(),
        }
    }

    fn append(mut self, name: &'static str, element: FieldValue) -> Self {
        self.appended.push((name, element));
        self
    }

    fn replace(mut self, name: &'static str, elements: Vec<FieldValue>) -> Self {
        self.appended.retain(|(pending, _)| *pending != name);
        self.inner.set(name, elements);
        self
    }

    /// Appends a target.
    #[must_use]
    pub fn target(self, target: impl Into<PBXTarget>) -> Self {
        let target: PBXTarget = target.into();
        self.append("targets", target.into())
    }

    /// Replaces the targets.
    #[must_use]
    pub fn targets(self, targets: impl IntoIterator<Item = PBXTarget>) -> Self {
        self.replace("targets", targets.into_iter().map(FieldValue::from).collect())
    }

    /// Sets the project-level configurations.
    #[must_use]
    pub fn build_configurations(mut self, list: XCConfigurationList) -> Self {
        self.inner.set("buildConfigurationList", list);
        self
    }

    /// Appends a file to the main group.
    #[must_use]
    pub fn file(self, file: PBXFileReference) -> Self {
        self.child(file)
    }

    /// Appends a child to the main group.
    #[must_use]
    pub fn child(mut self, child: impl Into<GroupChild>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Sets the main group.
    #[must_use]
    pub fn main_group(mut self, group: PBXGroup) -> Self {
        self.main_group = Some(group);
        self
    }

    /// Sets the group holding the target products.
    #[must_use]
    pub fn product_ref_group(mut self, group: PBXGroup) -> Self {
        self.inner.set("productRefGroup", group);
        self
    }

    /// Appends a reference to another project.
    #[must_use]
    pub fn project_reference(self, reference: ProjectReference) -> Self {
        self.append("projectReferences", reference.into())
    }

    /// Replaces the references to other projects.
    #[must_use]
    pub fn project_references(
        self,
        references: impl IntoIterator<Item = ProjectReference>,
    ) -> Self {
        self.replace(
            "projectReferences",
            references.into_iter().map(FieldValue::from).collect(),
        )
    }

    /// Appends a remote Swift package.
    #[must_use]
    pub fn package_reference(self, package: XCRemoteSwiftPackageReference) -> Self {
        self.append("packageReferences", package.into())
    }

    /// Replaces the remote Swift packages.
    #[must_use]
    pub fn package_references(
        self,
        packages: impl IntoIterator<Item = XCRemoteSwiftPackageReference>,
    ) -> Self {
        self.replace(
            "packageReferences",
            packages.into_iter().map(FieldValue::from).collect(),
        )
    }

    /// Sets the localizations.
    #[must_use]
    pub fn known_regions<S: Into<String>>(mut self, regions: impl IntoIterator<Item = S>) -> Self {
        let regions = regions.into_iter().map(Into::into).collect::<Vec<String>>();
        self.inner.set("knownRegions", regions);
        self
    }

    /// Sets the development language.
    #[must_use]
    pub fn development_region(mut self, region: impl Into<String>) -> Self {
        self.inner
            .set("developmentRegion", FieldValue::String(region.into()));
        self
    }

    /// Sets the compatibility version.
    #[must_use]
    pub fn compatibility_version(mut self, version: impl Into<String>) -> Self {
        self.inner
            .set("compatibilityVersion", FieldValue::String(version.into()));
        self
    }

    /// Sets the project directory path.
    #[must_use]
    pub fn project_dir_path(mut self, path: impl Into<String>) -> Self {
        self.inner.set("projectDirPath", FieldValue::String(path.into()));
        self
    }

    /// Sets the project root.
    #[must_use]
    pub fn project_root(mut self, root: impl Into<String>) -> Self {
        self.inner.set("projectRoot", FieldValue::String(root.into()));
        self
    }

    /// Sets whether files were scanned for their encodings.
    #[must_use]
    pub fn has_scanned_for_encodings(mut self, scanned: bool) -> Self {
        self.inner.set("hasScannedForEncodings", scanned);
        self
    }

    /// Replaces the project attributes.
    #[must_use]
    pub fn attributes(mut self, attributes: Dictionary) -> Self {
        self.inner.set("attributes", attributes);
        self.attributes.clear();
        self
    }

    /// Sets one project attribute, keeping the others.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    fn resolve_main_group(&mut self) -> Result<Option<PBXGroup>> {
        let base = match (self.main_group.take(), &self.parent) {
            (Some(group), _) => Some(group),
            (None, Some(parent)) => parent.as_object().get::<PBXGroup>("mainGroup")?,
            (None, None) => None,
        };
        let children = std::mem::take(&mut self.children);
        match base {
            Some(group) if children.is_empty() => Ok(Some(group)),
            Some(group) => {
                let mut merged = group.children()?;
                merged.extend(children);
                group.to_builder().children(merged).build().map(Some)
            }
            None if self.parent.is_some() && children.is_empty() => Ok(None),
            None => PBXGroup::builder()
                .name(DEFAULT_MAIN_GROUP_NAME)
                .source_tree(PBXSourceTree::Group)
                .children(children)
                .build()
                .map(Some),
        }
    }

    fn resolve_appended(&mut self) -> Result<()> {
        for (name, element) in std::mem::take(&mut self.appended) {
            if self.inner.get(name).is_none() {
                let base = match &self.parent {
                    Some(parent) => parent.as_object().try_decode(name)?,
                    None => None,
                };
                self.inner
                    .set(name, base.unwrap_or(FieldValue::List(Vec::new())));
            }
            self.inner.add(name, element);
        }
        Ok(())
    }

    fn resolve_attributes(&mut self) -> Result<Option<Dictionary>> {
        if self.attributes.is_empty() {
            return Ok(None);
        }
        let mut attributes = match self.inner.take("attributes") {
            Some(FieldValue::Dictionary(attributes)) => attributes,
            _ => match &self.parent {
                Some(parent) => parent.attributes()?,
                None => default_attributes(),
            },
        };
        attributes.append(&mut self.attributes);
        Ok(Some(attributes))
    }

    /// Builds the project.
    ///
    /// A fresh project defaults to compatibility version `Xcode 3.2`, a `LastUpgradeCheck`
    /// attribute and a configuration list holding one `Default` configuration.
    ///
    /// # Errors
    /// Returns an error if the main group or the default configurations cannot be built.
    pub fn build(mut self) -> Result<PBXProject> {
        if let Some(group) = self.resolve_main_group()? {
            self.inner.set("mainGroup", group);
        }
        self.resolve_appended()?;
        if let Some(attributes) = self.resolve_attributes()? {
            self.inner.set("attributes", attributes);
        }

        let object = self
            .inner
            .if_absent("compatibilityVersion", DEFAULT_COMPATIBILITY_VERSION)
            .if_absent("attributes", default_attributes())
            .if_absent("targets", Vec::<FieldValue>::new())
            .if_absent(
                "buildConfigurationList",
                XCConfigurationList::with_default_configuration()?,
            )
            .requires("mainGroup")
            .build()?;
        view(object)
    }
}

fn default_attributes() -> Dictionary {
    let mut attributes = Dictionary::new();
    attributes.insert(
        "LastUpgradeCheck".to_string(),
        Value::from(DEFAULT_LAST_UPGRADE_CHECK),
    );
    attributes
}

impl ProjectReference {
    /// Starts building a project reference.
    #[must_use]
    pub fn builder() -> ProjectReferenceBuilder {
        ProjectReferenceBuilder {
            inner: KeyedObjectBuilder::new(ObjectKind::ProjectReference),
        }
    }

    /// The group listing the products of the referenced project
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the group is absent, or any decode error.
    pub fn product_group(&self) -> Result<PBXGroup> {
        self.0.require("ProductGroup")
    }

    /// The referenced `.xcodeproj`
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the file is absent, or any decode error.
    pub fn project_ref(&self) -> Result<PBXFileReference> {
        self.0.require("ProjectRef")
    }
}

/// Builder for [`ProjectReference`]
#[derive(Debug, Clone)]
pub struct ProjectReferenceBuilder {
    inner: KeyedObjectBuilder,
}

impl ProjectReferenceBuilder {
    /// Sets the group listing the products of the referenced project.
    #[must_use]
    pub fn product_group(mut self, group: PBXGroup) -> Self {
        self.inner.set("ProductGroup", group);
        self
    }

    /// Sets the referenced `.xcodeproj`.
    #[must_use]
    pub fn project_ref(mut self, file: PBXFileReference) -> Self {
        self.inner.set("ProjectRef", file);
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the reference.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] unless both the group and the file were given.
    pub fn build(self) -> Result<ProjectReference> {
        view(
            self.inner
                .requires("ProductGroup")
                .requires("ProjectRef")
                .build()?,
        )
    }
}
