//! Decoded field values.
//!
//! [`FieldValue`] is what a [`crate::coding::KeyedObject`] hands out for a field once its coder
//! has interpreted the raw [`crate::model::Value`]. Typed views convert it further into plain Rust
//! types through [`FromFieldValue`].

use crate::coding::CodingKey;
use crate::model::Dictionary;
use crate::objects::{
    CodeableObject, PBXSourceTree, ProductType, ProxyType, RequirementKind, SubFolder,
};
use crate::Result;

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A string
    String(String),
    /// An integer
    Integer(i64),
    /// A boolean, whatever spelling it was stored with
    Boolean(bool),
    /// An opaque dictionary such as build settings
    Dictionary(Dictionary),
    /// A source tree
    SourceTree(PBXSourceTree),
    /// A product type
    ProductType(ProductType),
    /// A container item proxy type
    ProxyType(ProxyType),
    /// A copy files destination
    SubFolder(SubFolder),
    /// A version requirement discriminant
    RequirementKind(RequirementKind),
    /// An object, either referenced by gid or copied inline
    Object(CodeableObject),
    /// An ordered list of values
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Short name of the value shape, used in error messages.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Dictionary(_) => "dictionary",
            FieldValue::SourceTree(_) => "source tree",
            FieldValue::ProductType(_) => "product type",
            FieldValue::ProxyType(_) => "proxy type",
            FieldValue::SubFolder(_) => "sub folder",
            FieldValue::RequirementKind(_) => "requirement kind",
            FieldValue::Object(_) => "object",
            FieldValue::List(_) => "list",
        }
    }

    /// Returns the string content if this is a [`FieldValue::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the object if this is a [`FieldValue::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&CodeableObject> {
        match self {
            FieldValue::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Conversion from a decoded [`FieldValue`] into a typed accessor result.
pub trait FromFieldValue: Sized {
    /// Converts `value`, decoded for `key`, failing with [`crate::Error::MalformedValue`] when it
    /// has another shape.
    ///
    /// ## Arguments
    /// * 'key'   - The field the value was decoded for, used for error reporting
    /// * 'value' - The decoded value
    ///
    /// # Errors
    /// Returns an error if the value does not have the shape expected by `Self`.
    fn from_field_value(key: CodingKey, value: FieldValue) -> Result<Self>;
}

macro_rules! field_value_scalar {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::$variant(value)
                }
            }

            impl FromFieldValue for $ty {
                fn from_field_value(key: CodingKey, value: FieldValue) -> Result<Self> {
                    match value {
                        FieldValue::$variant(value) => Ok(value),
                        other => Err(malformed_value!(
                            key,
                            "expected {} but found {}",
                            stringify!($variant),
                            other.shape()
                        )),
                    }
                }
            }
        )+
    };
}

field_value_scalar! {
    String => String,
    i64 => Integer,
    bool => Boolean,
    Dictionary => Dictionary,
    PBXSourceTree => SourceTree,
    ProductType => ProductType,
    ProxyType => ProxyType,
    SubFolder => SubFolder,
    RequirementKind => RequirementKind,
    CodeableObject => Object,
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::ObjectKind;
    use crate::Error;

    #[test]
    fn test_scalar_conversions() -> Result<()> {
        let key = ObjectKind::PBXGroup.key("name");

        assert_eq!(String::from_field_value(key, FieldValue::from("Sources"))?, "Sources");
        assert!(bool::from_field_value(key, FieldValue::from(true))?);
        assert_eq!(
            PBXSourceTree::from_field_value(key, FieldValue::from(PBXSourceTree::Group))?,
            PBXSourceTree::Group
        );
        Ok(())
    }

    #[test]
    fn test_shape_mismatch_is_malformed() {
        let key = ObjectKind::PBXGroup.key("name");
        let result = i64::from_field_value(key, FieldValue::from("Sources"));

        match result {
            Err(Error::MalformedValue { field, message, .. }) => {
                assert_eq!(field, "PBXGroup.name");
                assert_eq!(message, "expected Integer but found string");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_lists() {
        let value = FieldValue::from(vec!["a", "b"]);
        assert_eq!(
            value,
            FieldValue::List(vec![FieldValue::from("a"), FieldValue::from("b")])
        );
        assert_eq!(value.shape(), "list");
    }
}
