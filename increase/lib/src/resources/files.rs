//! Files uploaded to or generated by Increase.

use chrono::{DateTime, Utc};
use increase_core::codec::{FileUpload, MultipartForm, path_segment};
use increase_core::{
    EncodeError, Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filters::{InFilter, TimeRange};

const PATH: &str = "files";

string_enum! {
    pub enum FileType {
        File => "file",
    }
}

string_enum! {
    /// What a file is used for.
    pub enum FilePurpose {
        CheckImageFront => "check_image_front",
        CheckImageBack => "check_image_back",
        Form1099Int => "form_1099_int",
        FormSs4 => "form_ss_4",
        IdentityDocument => "identity_document",
        IncreaseStatement => "increase_statement",
        Other => "other",
        TrustFormationDocument => "trust_formation_document",
        DigitalWalletArtwork => "digital_wallet_artwork",
        DigitalWalletAppIcon => "digital_wallet_app_icon",
        DocumentRequest => "document_request",
        EntitySupplementalDocument => "entity_supplemental_document",
        Export => "export",
    }
}

string_enum! {
    pub enum FileDirection {
        /// Uploaded by you.
        ToIncrease => "to_increase",
        /// Generated by Increase.
        FromIncrease => "from_increase",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub purpose: Field<FilePurpose>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub direction: Field<FileDirection>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub filename: Field<String>,
    /// A short-lived URL for the file's content.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub download_url: Field<String>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<FileType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(File, "file");

/// An upload for `POST /files`.
///
/// The content is streamed; a file on disk is opened only when the request
/// is sent.
///
/// ## Examples
///
/// ```rust
/// use increase::codec::FileUpload;
/// use increase::resources::files::{FileCreateParams, FilePurpose};
///
/// let params = FileCreateParams::new(
///     FileUpload::from_path("license-front.png").with_content_type("image/png"),
///     FilePurpose::IdentityDocument,
/// )
/// .description("Front of driver's license");
/// assert_eq!(params.into_form().unwrap().len(), 3);
/// ```
#[derive(Debug)]
pub struct FileCreateParams {
    pub file: FileUpload,
    pub purpose: FilePurpose,
    pub description: Field<String>,
}

/// The text parts sent next to the file, in wire order.
#[derive(Serialize)]
struct FileFormFields {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    description: Field<String>,
    purpose: FilePurpose,
}

impl FileCreateParams {
    pub fn new(file: FileUpload, purpose: FilePurpose) -> Self {
        Self {
            file,
            purpose,
            description: Field::Omitted,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Field::Present(description.into());
        self
    }

    /// Builds the form: the `file` part first, then `description` and `purpose`.
    ///
    /// ## Errors
    ///
    /// Returns an [`EncodeError`] if the text fields cannot be encoded.
    pub fn into_form(self) -> Result<MultipartForm, EncodeError> {
        let Self {
            file,
            purpose,
            description,
        } = self;
        let fields = FileFormFields {
            description,
            purpose,
        };
        Ok(MultipartForm::from_fields(&fields)?.prepend_file("file", file))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<InFilter<FilePurpose>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<TimeRange>,
}

service! {
    /// `/files`
    FilesService
}

impl<T: Transport> FilesService<T> {
    /// Uploads a file as `multipart/form-data`.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected. A
    /// file that cannot be read is reported as a transport error.
    pub async fn create(&self, params: FileCreateParams) -> Result<File, IncreaseError> {
        debug!(
            filename = params.file.filename(),
            purpose = %params.purpose,
            "uploading file"
        );
        let form = params.into_form()?;
        self.client.post_multipart(PATH, form, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, file_id: &str) -> Result<File, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(file_id)?), &self.options)
            .await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(&self, params: &FileListParams) -> Result<Page<File, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(&self, params: &FileListParams) -> Result<Pager<File, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }
}
