//! Codec configuration
//!
//! Controls the header versions written into new project files and how fields without a
//! registered coder are treated when a decoded graph is encoded again.

/// Configuration for encoding object graphs into project files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Value of the `archiveVersion` header (default: 1)
    pub archive_version: u32,

    /// Value of the `objectVersion` header (default: 46)
    pub object_version: u32,

    /// Copy raw fields that have no registered coder verbatim when re-encoding a decoded object
    /// Disabling this drops every field the codec does not understand
    pub preserve_unknown_fields: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            archive_version: 1,
            object_version: 46,
            preserve_unknown_fields: true,
        }
    }
}

impl CodecConfig {
    /// Creates a configuration that only keeps fields the codec has coders for
    ///
    /// Useful to normalize foreign project files into the subset this crate models.
    #[must_use]
    pub fn normalizing() -> Self {
        Self {
            preserve_unknown_fields: false,
            ..Self::default()
        }
    }

    /// Replaces the header versions
    #[must_use]
    pub fn with_versions(mut self, archive_version: u32, object_version: u32) -> Self {
        self.archive_version = archive_version;
        self.object_version = object_version;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.archive_version, 1);
        assert_eq!(config.object_version, 46);
        assert!(config.preserve_unknown_fields);
        assert!(!CodecConfig::normalizing().preserve_unknown_fields);
        assert_eq!(config.with_versions(1, 56).object_version, 56);
    }
}
