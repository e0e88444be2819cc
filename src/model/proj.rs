//! The flat project file: header versions, objects table and root gid.

use crate::config::CodecConfig;
use crate::model::objects::PBXObjects;

/// A complete project file in its flat form: the objects table plus the gid of the root project.
///
/// The persisted `classes` dictionary is always empty in practice and therefore not modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PBXProj {
    archive_version: u32,
    object_version: u32,
    objects: PBXObjects,
    root_object: String,
}

impl PBXProj {
    /// Creates a project with the default archive and object versions.
    pub fn new(root_object: impl Into<String>, objects: PBXObjects) -> Self {
        Self::with_config(root_object, objects, &CodecConfig::default())
    }

    /// Creates a project whose header versions are taken from `config`.
    pub fn with_config(
        root_object: impl Into<String>,
        objects: PBXObjects,
        config: &CodecConfig,
    ) -> Self {
        PBXProj {
            archive_version: config.archive_version,
            object_version: config.object_version,
            objects,
            root_object: root_object.into(),
        }
    }

    /// Replaces the header versions.
    #[must_use]
    pub fn versions(mut self, archive_version: u32, object_version: u32) -> Self {
        self.archive_version = archive_version;
        self.object_version = object_version;
        self
    }

    /// The `archiveVersion` header value
    #[must_use]
    pub fn archive_version(&self) -> u32 {
        self.archive_version
    }

    /// The `objectVersion` header value
    #[must_use]
    pub fn object_version(&self) -> u32 {
        self.object_version
    }

    /// The objects table
    #[must_use]
    pub fn objects(&self) -> &PBXObjects {
        &self.objects
    }

    /// Gid of the root `PBXProject`
    #[must_use]
    pub fn root_object(&self) -> &str {
        &self.root_object
    }
}
