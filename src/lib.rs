// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # pbxcodec
//!
//! A codec for Xcode project description files (`project.pbxproj`).
//!
//! A project file is a property-list dictionary whose `objects` table maps 24-character global
//! ids (gids) to flat field maps, each tagged with an `isa` naming its kind. Objects point at each
//! other by gid. `pbxcodec` converts between that flat table and a typed, navigable object graph
//! in both directions:
//!
//! - **Decoding is lazy.** [`PBXObjectUnarchiver`] hands back the root [`objects::PBXProject`]
//!   without touching the rest of the table. Fields are interpreted on first access and then
//!   cached, and referenced objects are only wrapped when the field that names them is read.
//! - **Encoding is deterministic.** [`PBXObjectArchiver`] walks a graph, assigns each by-ref object
//!   a gid derived from its kind and identity fields, and inlines by-copy objects. Encoding the
//!   same graph twice yields identical tables, and objects that came from a decode keep their gid.
//! - **Round trips are lossless.** Fields the codec has no coder for are carried through unchanged
//!   when a decoded graph is written back (see [`CodecConfig::preserve_unknown_fields`]).
//!
//! # Architecture
//!
//! - [`model`] - The flat, untyped side: [`PBXProj`], [`PBXObjects`], [`PBXObjectReference`] and
//!   gid generation
//! - [`coding`] - Coding keys, value coders, the process-wide coder registry and the keyed object
//!   abstraction views are built on
//! - [`objects`] - Typed views and builders for every object kind
//! - [`archive`] - The archiver and unarchiver
//! - [`io`] - Reading and writing property-list documents
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pbxcodec::prelude::*;
//!
//! let proj = PBXProjReader::from_path("App.xcodeproj/project.pbxproj")?;
//! let project = PBXObjectUnarchiver::new().decode(&proj)?;
//!
//! for target in project.targets()? {
//!     println!("{} ({})", target.name()?, target.kind());
//! }
//!
//! // Add a target and write the file back, keeping every existing gid
//! let updated = project
//!     .to_builder()
//!     .target(PBXAggregateTarget::builder().name("Lint").build()?)
//!     .build()?;
//! let proj = PBXObjectArchiver::for_rewrite(&proj).encode(&updated)?;
//! PBXProjWriter::to_path(&proj, "App.xcodeproj/project.pbxproj")?;
//! # Ok::<(), pbxcodec::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Decoding errors surface at the
//! field access that triggered them, so a single malformed field never prevents navigating the
//! rest of the graph.

#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use pbxcodec::prelude::*;
///
/// let project = PBXProject::builder().build()?;
/// let proj = PBXObjectArchiver::new().encode(&project)?;
/// assert_eq!(proj.objects().len(), 4);
/// # Ok::<(), pbxcodec::Error>(())
/// ```
pub mod prelude;

pub mod archive;
pub mod coding;
pub mod config;
pub mod io;
pub mod model;
pub mod objects;

/// `pbxcodec` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `pbxcodec` Error type
pub use error::Error;

/// Encoding options.
pub use config::CodecConfig;

/// The flat representation of a project file.
pub use model::{GidGenerator, PBXObjectReference, PBXObjects, PBXProj};

/// Conversion between object graphs and [`PBXProj`] tables.
pub use archive::{DecodeObserver, PBXObjectArchiver, PBXObjectUnarchiver};

/// Property-list document I/O.
pub use io::{PBXProjReader, PBXProjWriter};
