//! File references and reference proxies.

use crate::coding::{FieldValue, KeyedObjectBuilder, ObjectKind};
use crate::objects::{view, Codeable, FileType, PBXContainerItemProxy, PBXSourceTree};
use crate::Result;

codeable! {
    /// A file or folder on disk.
    PBXFileReference => PBXFileReference
}

impl PBXFileReference {
    /// Starts building a file reference.
    #[must_use]
    pub fn builder() -> PBXFileReferenceBuilder {
        PBXFileReferenceBuilder {
            inner: KeyedObjectBuilder::new(ObjectKind::PBXFileReference),
            name: None,
            path: None,
            typed: false,
        }
    }

    /// Starts a builder overriding fields of this file reference. Its file type is kept unless
    /// the builder sets a new one.
    #[must_use]
    pub fn to_builder(&self) -> PBXFileReferenceBuilder {
        PBXFileReferenceBuilder {
            inner: self.as_object().to_builder(),
            name: None,
            path: None,
            typed: true,
        }
    }

    /// A reference to the absolute `path`
    ///
    /// # Errors
    /// Returns an error if `path` is empty.
    pub fn of_absolute_path(path: impl Into<String>) -> Result<PBXFileReference> {
        Self::of(path, PBXSourceTree::Absolute)
    }

    /// A reference to `path` relative to the project directory
    ///
    /// # Errors
    /// Returns an error if `path` is empty.
    pub fn of_source_root(path: impl Into<String>) -> Result<PBXFileReference> {
        Self::of(path, PBXSourceTree::SourceRoot)
    }

    /// A reference to `path` relative to the enclosing group
    ///
    /// # Errors
    /// Returns an error if `path` is empty.
    pub fn of_group(path: impl Into<String>) -> Result<PBXFileReference> {
        Self::of(path, PBXSourceTree::Group)
    }

    /// A reference to `path` relative to the built products directory
    ///
    /// # Errors
    /// Returns an error if `path` is empty.
    pub fn of_built_products_dir(path: impl Into<String>) -> Result<PBXFileReference> {
        Self::of(path, PBXSourceTree::BuiltProductsDir)
    }

    fn of(path: impl Into<String>, source_tree: PBXSourceTree) -> Result<PBXFileReference> {
        Self::builder().path(path).source_tree(source_tree).build()
    }

    /// The name shown in Xcode, when it differs from the last path component
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn name(&self) -> Result<Option<String>> {
        self.0.get("name")
    }

    /// The path, interpreted relative to the source tree
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn path(&self) -> Result<Option<String>> {
        self.0.get("path")
    }

    /// The base location of the path
    ///
    /// # Errors
    /// Returns an error if the field holds an unknown source tree.
    pub fn source_tree(&self) -> Result<Option<PBXSourceTree>> {
        self.0.get("sourceTree")
    }

    /// File type that does not change when the file is renamed
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn explicit_file_type(&self) -> Result<Option<String>> {
        self.0.get("explicitFileType")
    }

    /// File type last determined from the file name
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn last_known_file_type(&self) -> Result<Option<String>> {
        self.0.get("lastKnownFileType")
    }

    /// Text encoding of the file
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn file_encoding(&self) -> Result<Option<i64>> {
        self.0.get("fileEncoding")
    }

    /// Whether the file is indexed
    ///
    /// # Errors
    /// Returns an error if the field is not a boolean.
    pub fn include_in_index(&self) -> Result<Option<bool>> {
        self.0.get("includeInIndex")
    }
}

/// Builder for [`PBXFileReference`]
#[derive(Debug, Clone)]
pub struct PBXFileReferenceBuilder {
    inner: KeyedObjectBuilder,
    name: Option<String>,
    path: Option<String>,
    typed: bool,
}

impl PBXFileReferenceBuilder {
    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.inner.set("name", FieldValue::String(name.clone()));
        self.name = Some(name);
        self
    }

    /// Sets the path. Surrounding whitespace is removed.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        let path = path.into().trim().to_string();
        self.inner.set("path", FieldValue::String(path.clone()));
        self.path = Some(path);
        self
    }

    /// Sets the base location of the path.
    #[must_use]
    pub fn source_tree(mut self, source_tree: PBXSourceTree) -> Self {
        self.inner.set("sourceTree", source_tree);
        self
    }

    /// Sets an explicit file type, disabling inference.
    #[must_use]
    pub fn explicit_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.inner
            .set("explicitFileType", FieldValue::String(file_type.into()));
        self.typed = true;
        self
    }

    /// Sets the last known file type, disabling inference.
    #[must_use]
    pub fn last_known_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.inner
            .set("lastKnownFileType", FieldValue::String(file_type.into()));
        self.typed = true;
        self
    }

    /// Sets the text encoding.
    #[must_use]
    pub fn file_encoding(mut self, encoding: i64) -> Self {
        self.inner.set("fileEncoding", encoding);
        self
    }

    /// Sets whether the file is indexed.
    #[must_use]
    pub fn include_in_index(mut self, include: bool) -> Self {
        self.inner.set("includeInIndex", include);
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the file reference.
    ///
    /// The source tree defaults to [`PBXSourceTree::Group`]. Without an explicit type, the type is
    /// inferred from the extension of the path, or of the name when there is no path; see
    /// [`FileType::infer`].
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no path was given and
    /// [`crate::Error::MalformedValue`] if the path is empty.
    pub fn build(mut self) -> Result<PBXFileReference> {
        if let Some(path) = &self.path {
            if path.is_empty() {
                return Err(malformed_value!(
                    ObjectKind::PBXFileReference.key("path"),
                    "path must not be empty"
                ));
            }
        }

        if !self.typed {
            let inferred = self
                .path
                .as_deref()
                .or(self.name.as_deref())
                .and_then(FileType::infer);
            match inferred {
                Some(FileType::LastKnown(identifier)) => {
                    self.inner.set("lastKnownFileType", identifier);
                }
                Some(FileType::Explicit(identifier)) => {
                    self.inner.set("explicitFileType", identifier);
                }
                None => {}
            }
        }

        let object = self
            .inner
            .if_absent("sourceTree", PBXSourceTree::Group)
            .requires("path")
            .requires("sourceTree")
            .build()?;
        view(object)
    }
}

codeable! {
    /// A product of a target living in another project, referenced through a container proxy.
    PBXReferenceProxy => PBXReferenceProxy
}

impl PBXReferenceProxy {
    /// Starts building a reference proxy.
    #[must_use]
    pub fn builder() -> PBXReferenceProxyBuilder {
        PBXReferenceProxyBuilder {
            inner: KeyedObjectBuilder::new(ObjectKind::PBXReferenceProxy),
        }
    }

    /// Starts a builder overriding fields of this proxy.
    #[must_use]
    pub fn to_builder(&self) -> PBXReferenceProxyBuilder {
        PBXReferenceProxyBuilder {
            inner: self.as_object().to_builder(),
        }
    }

    /// The display name
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn name(&self) -> Result<Option<String>> {
        self.0.get("name")
    }

    /// The product path
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn path(&self) -> Result<Option<String>> {
        self.0.get("path")
    }

    /// The base location of the path
    ///
    /// # Errors
    /// Returns an error if the field holds an unknown source tree.
    pub fn source_tree(&self) -> Result<Option<PBXSourceTree>> {
        self.0.get("sourceTree")
    }

    /// The product file type
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn file_type(&self) -> Result<Option<String>> {
        self.0.get("fileType")
    }

    /// The proxy naming the remote target
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the proxy is absent, or any decode error.
    pub fn remote_ref(&self) -> Result<PBXContainerItemProxy> {
        self.0.require("remoteRef")
    }
}

/// Builder for [`PBXReferenceProxy`]
#[derive(Debug, Clone)]
pub struct PBXReferenceProxyBuilder {
    inner: KeyedObjectBuilder,
}

impl PBXReferenceProxyBuilder {
    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.set("name", FieldValue::String(name.into()));
        self
    }

    /// Sets the product path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.inner.set("path", FieldValue::String(path.into()));
        self
    }

    /// Sets the base location of the path.
    #[must_use]
    pub fn source_tree(mut self, source_tree: PBXSourceTree) -> Self {
        self.inner.set("sourceTree", source_tree);
        self
    }

    /// Sets the product file type.
    #[must_use]
    pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
        self.inner.set("fileType", FieldValue::String(file_type.into()));
        self
    }

    /// Sets the proxy naming the remote target.
    #[must_use]
    pub fn remote_ref(mut self, proxy: PBXContainerItemProxy) -> Self {
        self.inner.set("remoteRef", proxy);
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the proxy. The source tree defaults to [`PBXSourceTree::BuiltProductsDir`].
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no remote proxy was given.
    pub fn build(self) -> Result<PBXReferenceProxy> {
        let object = self
            .inner
            .if_absent("sourceTree", PBXSourceTree::BuiltProductsDir)
            .requires("remoteRef")
            .build()?;
        view(object)
    }
}
