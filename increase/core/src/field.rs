//! Three-state field presence.
//!
//! JSON distinguishes a member that is missing from one that is `null`, and
//! PATCH requests depend on that difference: an omitted field is left alone
//! while a `null` field is cleared. [`Field`] keeps the three cases apart.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that may be omitted, explicitly `null`, or present.
///
/// Structs holding `Field`s mark them with
/// `#[serde(default, skip_serializing_if = "Field::is_omitted")]` so an
/// omitted field never reaches the wire and a missing member decodes as
/// [`Field::Omitted`].
///
/// ## Examples
///
/// ```rust
/// use increase_core::Field;
///
/// let name: Field<String> = "Operating".to_string().into();
/// assert_eq!(name.value().map(String::as_str), Some("Operating"));
///
/// let cleared: Field<String> = Field::Null;
/// assert!(cleared.is_null());
/// assert_eq!(serde_json::to_string(&cleared).unwrap(), "null");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// The member is absent.
    #[default]
    Omitted,
    /// The member is present with a `null` value.
    Null,
    /// The member is present with a value.
    Present(T),
}

impl<T> Field<T> {
    /// Returns an explicit `null`.
    pub fn null() -> Self {
        Self::Null
    }

    /// Converts an `Option`, mapping `None` to an explicit `null`.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Present)
    }

    /// Returns `true` if the member is absent.
    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }

    /// Returns `true` if the member is an explicit `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the member carries a value.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrows the value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Omitted | Self::Null => None,
        }
    }

    /// Takes the value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Omitted | Self::Null => None,
        }
    }

    /// Borrows the contents as a `Field<&T>`.
    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Omitted => Field::Omitted,
            Self::Null => Field::Null,
            Self::Present(v) => Field::Present(v),
        }
    }

    /// Maps the value, keeping omitted and null as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Omitted => Field::Omitted,
            Self::Null => Field::Null,
            Self::Present(v) => Field::Present(f(v)),
        }
    }
}

impl<T: std::ops::Deref> Field<T> {
    /// Borrows the value through its `Deref` target, e.g. `&str` for `String`.
    pub fn as_deref(&self) -> Option<&T::Target> {
        self.value().map(|v| v.deref())
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Self::Present(value.to_string())
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(v) => v.serialize(serializer),
            // An omitted field that is not skipped by its container encodes as
            // null; query and form encoders drop both.
            Self::Omitted | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}
