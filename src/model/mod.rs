//! Flat, serializable representation of a project file.
//!
//! A project file stores its object graph as a single table: every object that can be referenced
//! owns one entry, keyed by its gid, holding a raw field map. Fields that point at other objects
//! hold the referenced gid as a string; nested values that are copied into their parent are stored
//! inline as dictionaries.
//!
//! # Key Components
//!
//! - [`crate::model::value::Value`] / [`crate::model::value::Dictionary`] - Raw field values
//! - [`crate::model::reference::PBXObjectReference`] - One table entry (gid + field map)
//! - [`crate::model::objects::PBXObjects`] - The whole table, ordered by gid
//! - [`crate::model::proj::PBXProj`] - The table plus root gid and header versions
//! - [`crate::model::gid::GidGenerator`] - Deterministic gid allocation

pub mod gid;
pub mod objects;
pub mod proj;
pub mod reference;
pub mod value;

pub use gid::{GidGenerator, StableHasher};
pub use objects::{PBXObjects, PBXObjectsBuilder};
pub use proj::PBXProj;
pub use reference::PBXObjectReference;
pub use value::{Dictionary, Value};
