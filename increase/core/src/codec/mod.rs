//! Wire codecs.
//!
//! - [`json`] decodes response bodies and encodes request bodies
//! - [`query`] flattens parameter structs into bracketed query pairs
//! - [`multipart`] builds `multipart/form-data` bodies for file uploads
//! - [`path_segment`] escapes identifiers placed in request paths

pub mod json;
pub mod multipart;
mod path;
pub mod query;

use std::collections::BTreeMap;

/// Object members that the declared type does not know about.
///
/// Every object type keeps one of these under `#[serde(flatten)]`, so
/// unrecognised members are retained on decode and written back on encode.
pub type Extras = BTreeMap<String, serde_json::Value>;

pub use json::{decode, encode};
pub use multipart::{FileSource, FileUpload, FormPart, MultipartForm, PartBody};
pub use path::path_segment;
pub use query::{to_pairs, to_query_string};
