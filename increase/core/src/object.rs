//! Common behaviour of API resource objects.

use crate::codec::Extras;

/// A resource object returned by the API.
///
/// Every resource carries a `type` discriminator whose value is fixed for the
/// resource kind. It is kept for identification only; nothing in the client
/// branches on it.
pub trait ApiObject {
    /// The constant value of the `type` member, such as `"account"`.
    const OBJECT_TYPE: &'static str;

    /// The `type` member as received, if it was present.
    fn object_type(&self) -> Option<&str>;

    /// Members of the object that this client version does not know about.
    fn extras(&self) -> &Extras;

    /// Returns `true` unless the object carries a different `type` than expected.
    ///
    /// An object without a `type` member is accepted.
    fn has_expected_type(&self) -> bool {
        self.object_type().is_none_or(|t| t == Self::OBJECT_TYPE)
    }
}

/// Implements [`ApiObject`] for a struct with `object_type` and `extras` fields.
///
/// The `object_type` field must be a `Field` of a string enum generated by
/// [`string_enum!`](crate::string_enum).
#[macro_export]
macro_rules! impl_api_object {
    ($ty:ty, $object_type:literal) => {
        impl $crate::ApiObject for $ty {
            const OBJECT_TYPE: &'static str = $object_type;

            fn object_type(&self) -> Option<&str> {
                self.object_type.value().map(|t| t.as_str())
            }

            fn extras(&self) -> &$crate::Extras {
                &self.extras
            }
        }
    };
}

/// Declares a forward-compatible string enumeration.
///
/// Each listed variant maps to a fixed wire string. Any other string decodes
/// into the generated `Unknown(String)` variant and is written back verbatim,
/// so values added to the API later survive a round trip.
///
/// ## Examples
///
/// ```rust
/// increase_core::string_enum! {
///     /// Lifecycle of an account.
///     pub enum AccountStatus {
///         /// Open and accepting transactions.
///         Open => "open",
///         /// Closed.
///         Closed => "closed",
///     }
/// }
///
/// let status: AccountStatus = serde_json::from_str(r#""open""#).unwrap();
/// assert_eq!(status, AccountStatus::Open);
///
/// let future: AccountStatus = serde_json::from_str(r#""frozen""#).unwrap();
/// assert_eq!(future.as_str(), "frozen");
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
            /// A value this version of the client does not recognise.
            Unknown(::std::string::String),
        }

        impl $name {
            /// Returns the wire representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Unknown(value) => value.as_str(),
                }
            }

            /// Returns `true` if the value is not one of the known variants.
            pub fn is_unknown(&self) -> bool {
                matches!(self, Self::Unknown(_))
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $($wire => Self::$variant,)+
                    other => Self::Unknown(other.to_string()),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let value = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from(value.as_str()))
            }
        }
    };
}
