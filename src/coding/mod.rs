//! Field coding: keys, coders, the coder registry and keyed objects.
//!
//! This module holds the untyped half of the codec. A [`CodingKey`] names one field of one
//! [`ObjectKind`]; the static [`CoderRegistry`] binds each key to the [`Coder`] that converts
//! between the raw table value and a decoded [`FieldValue`]; and a [`KeyedObject`] is any object
//! that can answer field queries by key.
//!
//! # Key Components
//!
//! - [`crate::coding::key`] - [`ObjectKind`] and [`CodingKey`]
//! - [`crate::coding::coders`] - [`ValueCoder`] and its implementations
//! - [`crate::coding::registry`] - The static [`CoderRegistry`]
//! - [`crate::coding::keyed`] - [`KeyedObject`], [`DefaultKeyedObject`], [`KeyedObjectBuilder`]
//! - [`crate::coding::caching`] - The memoizing [`CachingKeyedObject`]
//! - [`crate::coding::context`] - [`DecodeContext`] and [`EncodeContext`]

pub mod caching;
pub mod coders;
pub mod context;
pub mod key;
pub mod keyed;
pub mod registry;
pub mod value;

pub use caching::CachingKeyedObject;
pub use coders::{
    BooleanCoder, BooleanSpelling, Coder, DictionaryCoder, EnumCoder, InlineCoder, IntegerCoder,
    ListCoder, ReferenceCoder, StringCoder, ValueCoder,
};
pub use context::{DecodeContext, EncodeContext};
pub use key::{CodingKey, ObjectKind};
pub use keyed::{DefaultKeyedObject, KeyedObject, KeyedObjectBuilder, KeyedObjectRc, SessionStamp};
pub use registry::CoderRegistry;
pub use value::{FieldValue, FromFieldValue};
