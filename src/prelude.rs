//! # pbxcodec Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the pbxcodec library. Import this module to get quick access to everything needed to
//! read, navigate, build and write project files.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all pbxcodec operations
pub use crate::Error;

/// The result type used throughout pbxcodec
pub use crate::Result;

/// Encoding options
pub use crate::CodecConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Graph to table and table to graph conversion
pub use crate::archive::{DecodeObserver, PBXObjectArchiver, PBXObjectUnarchiver};

/// Property-list document I/O
pub use crate::io::{PBXProjReader, PBXProjWriter};

/// The flat project table
pub use crate::model::{Dictionary, PBXObjectReference, PBXObjects, PBXProj, Value};

// ================================================================================================
// Typed Views
// ================================================================================================

/// View trait implemented by every object kind and family
pub use crate::objects::{Codeable, CodeableObject};

/// Project and project references
pub use crate::objects::{PBXProject, ProjectReference};

/// Targets and their dependencies
pub use crate::objects::{
    PBXAggregateTarget, PBXContainerItemProxy, PBXLegacyTarget, PBXNativeTarget, PBXTarget,
    PBXTargetDependency,
};

/// Build configurations
pub use crate::objects::{XCBuildConfiguration, XCConfigurationList};

/// Build phases and build files
pub use crate::objects::{
    PBXBuildFile, PBXBuildPhase, PBXCopyFilesBuildPhase, PBXFrameworksBuildPhase,
    PBXHeadersBuildPhase, PBXResourcesBuildPhase, PBXShellScriptBuildPhase, PBXSourcesBuildPhase,
};

/// Files and groups
pub use crate::objects::{
    GroupChild, PBXFileReference, PBXGroup, PBXReferenceProxy, PBXVariantGroup, XCVersionGroup,
};

/// Swift packages
pub use crate::objects::{
    VersionRequirement, XCRemoteSwiftPackageReference, XCSwiftPackageProductDependency,
};

// ================================================================================================
// Enumerations
// ================================================================================================

/// Closed value sets of enum fields
pub use crate::objects::{FileType, PBXSourceTree, ProductType, ProxyType, SubFolder};

/// Kinds of the object graph
pub use crate::coding::ObjectKind;
