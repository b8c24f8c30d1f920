//! Query-string encoding.
//!
//! Parameter structs are flattened into `(key, value)` pairs:
//!
//! - `None`, unit, and `Field::Null`/`Field::Omitted` produce nothing
//! - nested structs and maps use bracketed keys (`created_at[after]=...`)
//! - lists of scalars are comma-joined (`status[in]=accepted,rejected`)
//! - unit enum variants and string enums use their wire names
//!
//! The same flattening feeds the text parts of multipart forms.

use serde::Serialize;
use serde::ser::{self, Impossible};

use crate::error::EncodeError;

/// Flattens `value` into ordered query pairs.
///
/// ## Errors
///
/// - [`EncodeError::UnsupportedTopLevel`] unless `value` is a struct or map
/// - [`EncodeError::UnsupportedType`] for bytes, lists of objects, enum
///   variants carrying data, and non-scalar map keys
///
/// ## Examples
///
/// ```rust
/// use increase_core::codec::to_pairs;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct In { r#in: Vec<&'static str> }
///
/// #[derive(Serialize)]
/// struct Query {
///     #[serde(skip_serializing_if = "Option::is_none")]
///     cursor: Option<String>,
///     status: In,
/// }
///
/// let query = Query { cursor: None, status: In { r#in: vec!["accepted", "rejected"] } };
/// assert_eq!(
///     to_pairs(&query).unwrap(),
///     vec![("status[in]".to_string(), "accepted,rejected".to_string())]
/// );
/// ```
pub fn to_pairs<T: Serialize + ?Sized>(value: &T) -> Result<Vec<(String, String)>, EncodeError> {
    let mut pairs = Vec::new();
    value.serialize(TopLevelSerializer { out: &mut pairs })?;
    Ok(pairs)
}

/// Flattens `value` and percent-encodes the result.
///
/// ## Errors
///
/// Same as [`to_pairs`].
pub fn to_query_string<T: Serialize + ?Sized>(value: &T) -> Result<String, EncodeError> {
    let pairs = to_pairs(value)?;
    Ok(url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish())
}

fn nested_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}[{key}]")
    }
}

/// Accepts only structs and maps; everything else is rejected.
struct TopLevelSerializer<'a> {
    out: &'a mut Vec<(String, String)>,
}

macro_rules! reject_top_level {
    ($($method:ident($($ty:ty),*) => $label:literal;)*) => {
        $(
            fn $method(self, $(_: $ty),*) -> Result<Self::Ok, Self::Error> {
                Err(EncodeError::UnsupportedTopLevel($label))
            }
        )*
    };
}

impl<'a> ser::Serializer for TopLevelSerializer<'a> {
    type Ok = ();
    type Error = EncodeError;
    type SerializeSeq = Impossible<(), EncodeError>;
    type SerializeTuple = Impossible<(), EncodeError>;
    type SerializeTupleStruct = Impossible<(), EncodeError>;
    type SerializeTupleVariant = Impossible<(), EncodeError>;
    type SerializeMap = MapCollector<'a>;
    type SerializeStruct = StructCollector<'a>;
    type SerializeStructVariant = Impossible<(), EncodeError>;

    reject_top_level! {
        serialize_bool(bool) => "boolean";
        serialize_i8(i8) => "integer";
        serialize_i16(i16) => "integer";
        serialize_i32(i32) => "integer";
        serialize_i64(i64) => "integer";
        serialize_u8(u8) => "integer";
        serialize_u16(u16) => "integer";
        serialize_u32(u32) => "integer";
        serialize_u64(u64) => "integer";
        serialize_f32(f32) => "float";
        serialize_f64(f64) => "float";
        serialize_char(char) => "character";
        serialize_str(&str) => "string";
        serialize_bytes(&[u8]) => "byte string";
        serialize_unit_variant(&'static str, u32, &'static str) => "enum";
    }

    fn serialize_none(self) -> Result<(), EncodeError> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), EncodeError> {
        Ok(())
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<(), EncodeError> {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<(), EncodeError> {
        Err(EncodeError::UnsupportedTopLevel("enum"))
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq, EncodeError> {
        Err(EncodeError::UnsupportedTopLevel("sequence"))
    }

    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple, EncodeError> {
        Err(EncodeError::UnsupportedTopLevel("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct, EncodeError> {
        Err(EncodeError::UnsupportedTopLevel("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodeError> {
        Err(EncodeError::UnsupportedTopLevel("enum"))
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap, EncodeError> {
        Ok(MapCollector::new(String::new(), self.out))
    }

    fn serialize_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStruct, EncodeError> {
        Ok(StructCollector {
            prefix: String::new(),
            out: self.out,
        })
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant, EncodeError> {
        Err(EncodeError::UnsupportedTopLevel("enum"))
    }
}

/// Writes one value under `key`, recursing into nested structs and maps.
struct ValueSerializer<'a> {
    key: String,
    out: &'a mut Vec<(String, String)>,
}

impl ValueSerializer<'_> {
    fn push(self, value: String) -> Result<(), EncodeError> {
        self.out.push((self.key, value));
        Ok(())
    }
}

macro_rules! push_display {
    ($($method:ident($ty:ty);)*) => {
        $(
            fn $method(self, v: $ty) -> Result<Self::Ok, Self::Error> {
                self.push(v.to_string())
            }
        )*
    };
}

impl<'a> ser::Serializer for ValueSerializer<'a> {
    type Ok = ();
    type Error = EncodeError;
    type SerializeSeq = SeqCollector<'a>;
    type SerializeTuple = SeqCollector<'a>;
    type SerializeTupleStruct = SeqCollector<'a>;
    type SerializeTupleVariant = Impossible<(), EncodeError>;
    type SerializeMap = MapCollector<'a>;
    type SerializeStruct = StructCollector<'a>;
    type SerializeStructVariant = Impossible<(), EncodeError>;

    push_display! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
    }

    fn serialize_bytes(self, _: &[u8]) -> Result<(), EncodeError> {
        Err(EncodeError::UnsupportedType("bytes"))
    }

    fn serialize_none(self) -> Result<(), EncodeError> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), EncodeError> {
        Ok(())
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<(), EncodeError> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<(), EncodeError> {
        self.push(variant.to_string())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<(), EncodeError> {
        Err(EncodeError::UnsupportedType("enum variant with data"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, EncodeError> {
        Ok(SeqCollector {
            key: self.key,
            items: Vec::with_capacity(len.unwrap_or_default()),
            out: self.out,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodeError> {
        Err(EncodeError::UnsupportedType("enum variant with data"))
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap, EncodeError> {
        Ok(MapCollector::new(self.key, self.out))
    }

    fn serialize_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStruct, EncodeError> {
        Ok(StructCollector {
            prefix: self.key,
            out: self.out,
        })
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant, EncodeError> {
        Err(EncodeError::UnsupportedType("enum variant with data"))
    }
}

/// Collects list elements and emits them comma-joined under one key.
struct SeqCollector<'a> {
    key: String,
    items: Vec<String>,
    out: &'a mut Vec<(String, String)>,
}

impl SeqCollector<'_> {
    fn push_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        if let Some(item) = value.serialize(ScalarSerializer)? {
            self.items.push(item);
        }
        Ok(())
    }

    fn finish(self) -> Result<(), EncodeError> {
        self.out.push((self.key, self.items.join(",")));
        Ok(())
    }
}

impl ser::SerializeSeq for SeqCollector<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.push_element(value)
    }

    fn end(self) -> Result<(), EncodeError> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqCollector<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.push_element(value)
    }

    fn end(self) -> Result<(), EncodeError> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqCollector<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.push_element(value)
    }

    fn end(self) -> Result<(), EncodeError> {
        self.finish()
    }
}

/// Emits each struct field under `prefix[field]`.
struct StructCollector<'a> {
    prefix: String,
    out: &'a mut Vec<(String, String)>,
}

impl ser::SerializeStruct for StructCollector<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(ValueSerializer {
            key: nested_key(&self.prefix, key),
            out: &mut *self.out,
        })
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

/// Emits each map entry under `prefix[key]`.
struct MapCollector<'a> {
    prefix: String,
    pending_key: Option<String>,
    out: &'a mut Vec<(String, String)>,
}

impl<'a> MapCollector<'a> {
    fn new(prefix: String, out: &'a mut Vec<(String, String)>) -> Self {
        Self {
            prefix,
            pending_key: None,
            out,
        }
    }
}

impl ser::SerializeMap for MapCollector<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), EncodeError> {
        let key = key
            .serialize(ScalarSerializer)?
            .ok_or(EncodeError::UnsupportedType("empty map key"))?;
        self.pending_key = Some(key);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| EncodeError::Custom("map value without a key".to_string()))?;
        value.serialize(ValueSerializer {
            key: nested_key(&self.prefix, &key),
            out: &mut *self.out,
        })
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

/// Renders a single scalar; used for list elements and map keys.
///
/// Yields `None` for values that encode to nothing, such as `None` and unit.
struct ScalarSerializer;

macro_rules! scalar_display {
    ($($method:ident($ty:ty);)*) => {
        $(
            fn $method(self, v: $ty) -> Result<Self::Ok, Self::Error> {
                Ok(Some(v.to_string()))
            }
        )*
    };
}

type ScalarOk = Option<String>;

impl ser::Serializer for ScalarSerializer {
    type Ok = ScalarOk;
    type Error = EncodeError;
    type SerializeSeq = Impossible<ScalarOk, EncodeError>;
    type SerializeTuple = Impossible<ScalarOk, EncodeError>;
    type SerializeTupleStruct = Impossible<ScalarOk, EncodeError>;
    type SerializeTupleVariant = Impossible<ScalarOk, EncodeError>;
    type SerializeMap = Impossible<ScalarOk, EncodeError>;
    type SerializeStruct = Impossible<ScalarOk, EncodeError>;
    type SerializeStructVariant = Impossible<ScalarOk, EncodeError>;

    scalar_display! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
    }

    fn serialize_bytes(self, _: &[u8]) -> Result<ScalarOk, EncodeError> {
        Err(EncodeError::UnsupportedType("bytes"))
    }

    fn serialize_none(self) -> Result<ScalarOk, EncodeError> {
        Ok(None)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<ScalarOk, EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<ScalarOk, EncodeError> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<ScalarOk, EncodeError> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<ScalarOk, EncodeError> {
        Ok(Some(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<ScalarOk, EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<ScalarOk, EncodeError> {
        Err(EncodeError::UnsupportedType("enum variant with data"))
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq, EncodeError> {
        Err(EncodeError::UnsupportedType("nested list"))
    }

    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple, EncodeError> {
        Err(EncodeError::UnsupportedType("nested list"))
    }

    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct, EncodeError> {
        Err(EncodeError::UnsupportedType("nested list"))
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodeError> {
        Err(EncodeError::UnsupportedType("enum variant with data"))
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap, EncodeError> {
        Err(EncodeError::UnsupportedType("object inside a list or key"))
    }

    fn serialize_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStruct, EncodeError> {
        Err(EncodeError::UnsupportedType("object inside a list or key"))
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant, EncodeError> {
        Err(EncodeError::UnsupportedType("enum variant with data"))
    }
}
