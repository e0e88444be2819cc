#![allow(unused_macros)]

/// Declares a typed view over exactly one [`crate::coding::ObjectKind`].
///
/// The generated newtype wraps a [`crate::objects::CodeableObject`], implements
/// [`crate::objects::Codeable`] and converts to and from [`crate::coding::FieldValue`].
///
/// ```rust, ignore
/// codeable! {
///     /// A group in the project navigator
///     PBXGroup => PBXGroup
/// }
/// ```
macro_rules! codeable {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(crate::objects::CodeableObject);

        impl $name {
            /// The kind viewed by this type
            pub const KIND: crate::coding::ObjectKind = crate::coding::ObjectKind::$kind;
        }

        impl crate::objects::Codeable for $name {
            const KINDS: &'static [crate::coding::ObjectKind] = &[crate::coding::ObjectKind::$kind];

            fn from_object(object: crate::objects::CodeableObject) -> crate::Result<Self> {
                object.expect_kind(Self::KINDS)?;
                Ok($name(object))
            }

            fn as_object(&self) -> &crate::objects::CodeableObject {
                &self.0
            }
        }

        impl crate::coding::FromFieldValue for $name {
            fn from_field_value(
                key: crate::coding::CodingKey,
                value: crate::coding::FieldValue,
            ) -> crate::Result<Self> {
                let object: crate::objects::CodeableObject =
                    crate::coding::FromFieldValue::from_field_value(key, value)?;
                <Self as crate::objects::Codeable>::from_object(object)
            }
        }

        impl From<$name> for crate::coding::FieldValue {
            fn from(value: $name) -> Self {
                crate::coding::FieldValue::Object(value.0)
            }
        }
    };
}

/// Declares a closed family of typed views, the accepted kinds of a polymorphic field.
///
/// Each variant wraps a type declared through [`codeable!`]; the family's kinds are the variants'
/// kinds in declaration order.
///
/// ```rust, ignore
/// codeable_family! {
///     /// Any target
///     PBXTarget {
///         Native(PBXNativeTarget),
///         Aggregate(PBXAggregateTarget),
///     }
/// }
/// ```
macro_rules! codeable_family {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident($ty:ident)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $($(#[$vmeta])* $variant($ty)),+
        }

        impl crate::objects::Codeable for $name {
            const KINDS: &'static [crate::coding::ObjectKind] = &[$($ty::KIND),+];

            fn from_object(object: crate::objects::CodeableObject) -> crate::Result<Self> {
                let kind = object.kind();
                $(
                    if kind == $ty::KIND {
                        return <$ty as crate::objects::Codeable>::from_object(object)
                            .map($name::$variant);
                    }
                )+
                Err(crate::Error::KindMismatch {
                    found: kind.discriminant().to_string(),
                    expected: Self::KINDS.to_vec(),
                })
            }

            fn as_object(&self) -> &crate::objects::CodeableObject {
                match self {
                    $($name::$variant(value) => crate::objects::Codeable::as_object(value)),+
                }
            }
        }

        impl crate::coding::FromFieldValue for $name {
            fn from_field_value(
                key: crate::coding::CodingKey,
                value: crate::coding::FieldValue,
            ) -> crate::Result<Self> {
                let object: crate::objects::CodeableObject =
                    crate::coding::FromFieldValue::from_field_value(key, value)?;
                <Self as crate::objects::Codeable>::from_object(object)
            }
        }

        impl From<$name> for crate::coding::FieldValue {
            fn from(value: $name) -> Self {
                crate::coding::FieldValue::Object(crate::objects::Codeable::into_object(value))
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    $name::$variant(value)
                }
            }
        )+
    };
}
