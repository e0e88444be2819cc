//! Stable hashes over the identity-bearing fields of each kind.
//!
//! The hash feeds the middle part of a generated gid. Only fields naming *what* an object is take
//! part, so editing build settings or file lists of an object keeps its gid.

use crate::coding::ObjectKind;
use crate::model::StableHasher;
use crate::objects::CodeableObject;
use crate::Result;

/// Computes the stable hash of `object`. Kinds without a natural identity hash to `0`.
///
/// # Errors
/// Returns an error if an identity field cannot be decoded.
pub(crate) fn stable_hash(object: &CodeableObject) -> Result<u32> {
    use ObjectKind as K;

    let mut hasher = StableHasher::new();
    match object.kind() {
        K::PBXNativeTarget
        | K::PBXLegacyTarget
        | K::PBXAggregateTarget
        | K::XCBuildConfiguration => {
            hasher.write_opt(object.get::<String>("name")?.as_deref());
        }
        K::PBXFileReference
        | K::PBXReferenceProxy
        | K::PBXGroup
        | K::PBXVariantGroup
        | K::XCVersionGroup => {
            // most file references only carry a path
            let name = match object.get::<String>("name")? {
                Some(name) => Some(name),
                None => object.get::<String>("path")?,
            };
            hasher.write_opt(name.as_deref());
        }
        K::PBXContainerItemProxy => {
            hasher.write_opt(object.get::<String>("remoteGlobalIDString")?.as_deref());
        }
        K::XCRemoteSwiftPackageReference => {
            hasher.write_opt(object.get::<String>("repositoryURL")?.as_deref());
        }
        K::XCSwiftPackageProductDependency => {
            hasher.write_opt(object.get::<String>("productName")?.as_deref());
            let package = object.get::<CodeableObject>("package")?;
            let url = match &package {
                Some(package) => package.get::<String>("repositoryURL")?,
                None => None,
            };
            hasher.write_opt(url.as_deref());
        }
        K::PBXBuildFile => {
            if let Some(referent) = first_present(object, &["fileRef", "productRef"])? {
                hasher.write_u32(stable_hash(&referent)?);
            }
        }
        K::PBXTargetDependency => {
            if let Some(referent) = first_present(object, &["targetProxy", "target"])? {
                hasher.write_u32(stable_hash(&referent)?);
            }
        }
        _ => {}
    }
    Ok(hasher.finish())
}

fn first_present(
    object: &CodeableObject,
    fields: &[&'static str],
) -> Result<Option<CodeableObject>> {
    for field in fields.iter().copied() {
        if let Some(referent) = object.get::<CodeableObject>(field)? {
            return Ok(Some(referent));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{
        Codeable, PBXBuildFile, PBXFileReference, PBXNativeTarget, PBXSourcesBuildPhase,
        XCBuildConfiguration,
    };

    #[test]
    fn test_incidental_fields_do_not_matter() -> Result<()> {
        let debug = XCBuildConfiguration::builder().name("Debug").build()?;
        let tuned = XCBuildConfiguration::builder()
            .name("Debug")
            .build_setting("SWIFT_VERSION", "5.0")
            .build()?;
        let release = XCBuildConfiguration::builder().name("Release").build()?;

        assert_eq!(stable_hash(debug.as_object())?, stable_hash(tuned.as_object())?);
        assert_ne!(stable_hash(debug.as_object())?, stable_hash(release.as_object())?);
        Ok(())
    }

    #[test]
    fn test_kinds_without_identity_hash_to_zero() -> Result<()> {
        let phase = PBXSourcesBuildPhase::builder().build()?;
        assert_eq!(stable_hash(phase.as_object())?, 0);
        Ok(())
    }

    #[test]
    fn test_build_file_follows_its_file() -> Result<()> {
        let file = PBXFileReference::of_group("main.c")?;
        let build_file = PBXBuildFile::builder().file_ref(file.clone()).build()?;
        let other = PBXBuildFile::builder()
            .file_ref(PBXFileReference::of_group("util.c")?)
            .build()?;

        assert_ne!(stable_hash(build_file.as_object())?, 0);
        assert_ne!(
            stable_hash(build_file.as_object())?,
            stable_hash(other.as_object())?
        );
        assert_ne!(
            stable_hash(build_file.as_object())?,
            stable_hash(file.as_object())?
        );

        let target = PBXNativeTarget::builder().name("App").build()?;
        assert_ne!(stable_hash(target.as_object())?, 0);
        Ok(())
    }
}
