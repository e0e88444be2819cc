//! Raw field values of the flat objects table.
//!
//! A project file only ever uses a handful of property-list value kinds: strings, integers,
//! the occasional boolean, arrays and dictionaries. [`Value`] models exactly those. Dictionaries
//! are kept in a [`BTreeMap`], which gives every field map one canonical ordering independent of
//! the order in which fields were produced.

use std::collections::BTreeMap;
use std::fmt;

/// String-keyed map of raw values, used both for object field maps and for opaque dictionaries
/// such as build settings.
pub type Dictionary = BTreeMap<String, Value>;

/// One raw value as stored in a [`crate::PBXObjectReference`] field map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A string scalar. Gids, enum spellings and most booleans are stored as strings.
    String(String),
    /// An integer scalar
    Integer(i64),
    /// A boolean scalar, only produced by property-list dialects that have a native boolean
    Boolean(bool),
    /// An ordered list of values
    Array(Vec<Value>),
    /// A nested dictionary
    Dictionary(Dictionary),
}

impl Value {
    /// Returns the string content if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the integer content if this is a [`Value::Integer`].
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::Array`].
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the entries if this is a [`Value::Dictionary`].
    #[must_use]
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(values) => Some(values),
            _ => None,
        }
    }

    /// Short name of the value shape, used in error messages.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::Dictionary(_) => "dictionary",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(value) => write!(f, "{value:?}"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Array(values) => {
                write!(f, "(")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
            Value::Dictionary(values) => {
                write!(f, "{{")?;
                for (key, value) in values {
                    write!(f, "{key} = {value}; ")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<Dictionary> for Value {
    fn from(values: Dictionary) -> Self {
        Value::Dictionary(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::from(7).as_integer(), Some(7));
        assert_eq!(Value::from(7).as_str(), None);
        assert_eq!(Value::from(vec!["a", "b"]).as_array().map(<[Value]>::len), Some(2));
        assert!(Value::from(Dictionary::new()).as_dictionary().is_some());
    }

    #[test]
    fn test_display() {
        let mut settings = Dictionary::new();
        settings.insert("PRODUCT_NAME".to_string(), Value::from("App"));
        assert_eq!(Value::from(settings).to_string(), "{PRODUCT_NAME = \"App\"; }");
        assert_eq!(Value::from(vec![1i64, 2]).to_string(), "(1, 2)");
    }
}
