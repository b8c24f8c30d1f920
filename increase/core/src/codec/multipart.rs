//! `multipart/form-data` bodies.
//!
//! A [`MultipartForm`] is an ordered list of named parts. Text parts come
//! from parameter structs through the same flattening as query strings;
//! file parts wrap a [`FileUpload`]. Files backed by a path or a reader are
//! not read here: the transport streams them into the request body.

use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::Serialize;
use tokio::io::AsyncRead;

use crate::codec::query;
use crate::error::EncodeError;

/// Where the content of an uploaded file comes from.
pub enum FileSource {
    /// Content already held in memory.
    Bytes(Bytes),
    /// A file on disk, opened when the request is sent.
    Path(PathBuf),
    /// Any asynchronous reader, consumed chunk by chunk while sending.
    Reader(Box<dyn AsyncRead + Send + Sync + Unpin>),
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

/// A file to send as one part of a multipart form.
///
/// ## Examples
///
/// ```rust
/// use increase_core::codec::FileUpload;
///
/// let upload = FileUpload::from_bytes("statement.pdf", b"%PDF-1.7".to_vec())
///     .with_content_type("application/pdf");
/// assert_eq!(upload.filename(), "statement.pdf");
/// assert_eq!(upload.content_type(), Some("application/pdf"));
/// ```
#[derive(Debug)]
pub struct FileUpload {
    filename: String,
    content_type: Option<String>,
    source: FileSource,
}

impl FileUpload {
    /// Uploads in-memory content.
    pub fn from_bytes(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            source: FileSource::Bytes(content.into()),
        }
    }

    /// Uploads a file from disk; the file name is taken from the path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Self {
            filename,
            content_type: None,
            source: FileSource::Path(path.to_path_buf()),
        }
    }

    /// Uploads whatever `reader` yields until end of stream.
    pub fn from_reader<R>(filename: impl Into<String>, reader: R) -> Self
    where
        R: AsyncRead + Send + Sync + Unpin + 'static,
    {
        Self {
            filename: filename.into(),
            content_type: None,
            source: FileSource::Reader(Box::new(reader)),
        }
    }

    /// Sets the part's `Content-Type`.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the file name sent in `Content-Disposition`.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Splits the upload into its name, content type and source.
    pub fn into_parts(self) -> (String, Option<String>, FileSource) {
        (self.filename, self.content_type, self.source)
    }
}

/// The body of one form part.
#[derive(Debug)]
pub enum PartBody {
    Text(String),
    File(FileUpload),
}

/// A named form part.
#[derive(Debug)]
pub struct FormPart {
    pub name: String,
    pub body: PartBody,
}

impl FormPart {
    /// Returns `true` for a file part.
    pub fn is_file(&self) -> bool {
        matches!(self.body, PartBody::File(_))
    }
}

/// An ordered `multipart/form-data` body.
///
/// ## Examples
///
/// ```rust
/// use increase_core::codec::{FileUpload, MultipartForm};
///
/// let form = MultipartForm::new()
///     .file("file", FileUpload::from_bytes("id.png", vec![0x89, 0x50]))
///     .text("purpose", "identity_document")
///     .text("description", "Front of license");
/// assert_eq!(form.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds text parts from a parameter struct.
    ///
    /// Fields are flattened exactly as in query strings, so unset fields
    /// produce no part and nested keys are bracketed.
    ///
    /// ## Errors
    ///
    /// Returns an [`EncodeError`] if the value cannot be flattened.
    pub fn from_fields<T: Serialize + ?Sized>(fields: &T) -> Result<Self, EncodeError> {
        let parts = query::to_pairs(fields)?
            .into_iter()
            .map(|(name, value)| FormPart {
                name,
                body: PartBody::Text(value),
            })
            .collect();
        Ok(Self { parts })
    }

    /// Appends a text part.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(FormPart {
            name: name.into(),
            body: PartBody::Text(value.into()),
        });
        self
    }

    /// Appends a file part.
    pub fn file(mut self, name: impl Into<String>, upload: FileUpload) -> Self {
        self.push(FormPart {
            name: name.into(),
            body: PartBody::File(upload),
        });
        self
    }

    /// Inserts a file part before every other part.
    pub fn prepend_file(mut self, name: impl Into<String>, upload: FileUpload) -> Self {
        self.parts.insert(
            0,
            FormPart {
                name: name.into(),
                body: PartBody::File(upload),
            },
        );
        self
    }

    pub fn push(&mut self, part: FormPart) {
        self.parts.push(part);
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;

    #[derive(Serialize, Default)]
    struct FileParams {
        #[serde(skip_serializing_if = "Field::is_omitted")]
        purpose: Field<String>,
        #[serde(skip_serializing_if = "Field::is_omitted")]
        description: Field<String>,
    }

    #[test]
    fn test_from_fields_skips_unset() {
        let params = FileParams {
            purpose: "check_image_front".into(),
            ..Default::default()
        };
        let form = MultipartForm::from_fields(&params).unwrap();
        assert_eq!(form.len(), 1);
        assert_eq!(form.parts()[0].name, "purpose");
        assert!(matches!(&form.parts()[0].body, PartBody::Text(v) if v == "check_image_front"));
    }

    #[test]
    fn test_file_and_two_scalars_make_three_parts() {
        let params = FileParams {
            purpose: "identity_document".into(),
            description: "passport".into(),
        };
        let form = MultipartForm::from_fields(&params)
            .unwrap()
            .prepend_file("file", FileUpload::from_bytes("p.jpg", vec![1, 2, 3]));
        assert_eq!(form.len(), 3);
        assert!(form.parts()[0].is_file());
        assert_eq!(
            form.parts().iter().filter(|p| p.is_file()).count(),
            1
        );
    }

    #[test]
    fn test_from_path_uses_file_name() {
        let upload = FileUpload::from_path("/tmp/uploads/statement.pdf");
        assert_eq!(upload.filename(), "statement.pdf");
        assert!(matches!(upload.source(), FileSource::Path(_)));
    }

    #[test]
    fn test_reader_source_is_not_buffered() {
        let upload = FileUpload::from_reader("data.bin", tokio::io::empty());
        assert!(matches!(upload.source(), FileSource::Reader(_)));
        assert_eq!(format!("{:?}", upload.source()), "Reader(..)");
    }
}
