use std::path::PathBuf;

use validator::Validate;

use crate::validation::form::{check_update_form, check_upload_form, single_path_segment};

/// Where the PDF for an upload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// A local file sent as the multipart `file` part.
    Local(PathBuf),
    /// A remote URL the backend downloads itself (`file_url` field).
    Url(String),
}

/// Fields of the upload form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Validate)]
#[validate(schema(function = "check_upload_form", skip_on_field_errors = false))]
pub struct UploadForm {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Shop name must be between 1 and 128 characters"
    ))]
    pub shop_name: String,
    #[validate(length(min = 1, message = "valid_from is required"))]
    pub valid_from: String,
    #[validate(length(min = 1, message = "valid_to is required"))]
    pub valid_to: String,
    pub file: Option<PathBuf>,
    #[validate(url(message = "Invalid file URL"))]
    pub file_url: Option<String>,
}

impl UploadForm {
    /// Copy with surrounding whitespace removed; a blank URL counts as absent.
    pub fn normalized(&self) -> Self {
        Self {
            shop_name: self.shop_name.trim().to_string(),
            valid_from: self.valid_from.trim().to_string(),
            valid_to: self.valid_to.trim().to_string(),
            file: self.file.clone(),
            file_url: self
                .file_url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string),
        }
    }

    /// The PDF source the backend will use. A local file wins over a URL.
    pub fn source(&self) -> Option<FileSource> {
        match (&self.file, &self.file_url) {
            (Some(path), _) => Some(FileSource::Local(path.clone())),
            (None, Some(url)) => Some(FileSource::Url(url.clone())),
            (None, None) => None,
        }
    }
}

/// Fields of the edit form. Replaces shop name and window; the file is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Validate)]
#[validate(schema(function = "check_update_form", skip_on_field_errors = false))]
pub struct UpdateForm {
    #[validate(
        length(min = 1, message = "Filename is required"),
        custom(function = "single_path_segment")
    )]
    pub filename: String,
    #[validate(length(
        min = 1,
        max = 128,
        message = "Shop name must be between 1 and 128 characters"
    ))]
    pub shop_name: String,
    #[validate(length(min = 1, message = "valid_from is required"))]
    pub valid_from: String,
    #[validate(length(min = 1, message = "valid_to is required"))]
    pub valid_to: String,
    pub file: Option<PathBuf>,
}

impl UpdateForm {
    /// Copy with surrounding whitespace removed from the text fields.
    pub fn normalized(&self) -> Self {
        Self {
            filename: self.filename.trim().to_string(),
            shop_name: self.shop_name.trim().to_string(),
            valid_from: self.valid_from.trim().to_string(),
            valid_to: self.valid_to.trim().to_string(),
            file: self.file.clone(),
        }
    }
}
