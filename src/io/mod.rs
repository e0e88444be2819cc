//! Reading and writing project documents.
//!
//! A project document is a property list with five top-level keys: `archiveVersion`, an empty
//! `classes` dictionary, `objectVersion`, the `objects` table keyed by gid and the `rootObject`
//! gid. The property-list syntax itself is handled by the [`plist`] crate; this module only
//! translates between its document model and [`crate::PBXProj`].
//!
//! Value kinds a project file never uses (reals, dates, data and uids) are rejected when reading.
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//! use pbxcodec::prelude::*;
//!
//! let project = PBXProject::builder().build()?;
//! let proj = PBXObjectArchiver::new().encode(&project)?;
//!
//! let mut xml = Vec::new();
//! PBXProjWriter::write_xml(&proj, &mut xml)?;
//! let read = PBXProjReader::from_reader(Cursor::new(xml))?;
//!
//! assert_eq!(read, proj);
//! # Ok::<(), pbxcodec::Error>(())
//! ```

mod reader;
mod writer;

pub use reader::PBXProjReader;
pub use writer::PBXProjWriter;
