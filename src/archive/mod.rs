//! Conversion between typed object graphs and the flat objects table.
//!
//! This module holds the two directions of the codec:
//!
//! - [`PBXObjectArchiver`] flattens a graph into a [`crate::PBXProj`]. Every by-ref object gets
//!   one table entry under a gid that is either carried over from a previous decode or derived
//!   deterministically from the object's kind and identity fields. By-copy objects are inlined
//!   into their parent's field map.
//! - [`PBXObjectUnarchiver`] wraps a [`crate::PBXProj`] into a lazily navigable graph. Nothing is
//!   decoded up front: each field is interpreted on first access through the coder registry, and
//!   referenced objects are only wrapped when the field holding them is read.
//!
//! # Round trip
//!
//! ```rust
//! use pbxcodec::prelude::*;
//!
//! let project = PBXProject::builder()
//!     .target(PBXNativeTarget::builder().name("App").build()?)
//!     .build()?;
//!
//! let proj = PBXObjectArchiver::new().encode(&project)?;
//! let decoded = PBXObjectUnarchiver::new().decode(&proj)?;
//!
//! assert_eq!(decoded.targets()?[0].name()?, "App");
//! assert_eq!(decoded.global_id(), Some(proj.root_object()));
//!
//! // Encoding the decoded graph again reproduces the table
//! let again = PBXObjectArchiver::for_rewrite(&proj).encode(&decoded)?;
//! assert_eq!(again, proj);
//! # Ok::<(), pbxcodec::Error>(())
//! ```

mod archiver;
mod unarchiver;

pub use archiver::PBXObjectArchiver;
pub use unarchiver::{DecodeObserver, PBXObjectReferenceKeyedObject, PBXObjectUnarchiver};
