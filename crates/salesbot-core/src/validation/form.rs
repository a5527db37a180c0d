//! Form validation
//!
//! Field rules live on the form structs as `validator` attributes. The cross-field
//! rules below run as their schema checks:
//! - Dates: `YYYY-MM-DD`, start not after end
//! - Upload source: a local file or a URL (the file wins when both are given)
//! - Local paths: no `..` components
//! - Filename: usable as a single URL path segment

use std::borrow::Cow;
use std::path::{Component, Path};

use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::models::{FileSource, UpdateForm, UploadForm};
use crate::validity::ValidityWindow;

/// Maximum length for shop names (128 characters)
pub const MAX_SHOP_NAME_LENGTH: usize = 128;

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn check_window(valid_from: &str, valid_to: &str) -> Result<(), ValidationError> {
    if valid_from.is_empty() || valid_to.is_empty() {
        // Reported by the field rules.
        return Ok(());
    }
    ValidityWindow::parse(valid_from, valid_to)
        .map(|_| ())
        .map_err(|e| invalid("window", e.to_string()))
}

fn check_local_path(path: &Path) -> Result<(), ValidationError> {
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(invalid(
            "path",
            format!("Invalid file path: {}", path.display()),
        ));
    }
    Ok(())
}

/// A filename is sent as one path segment (`/update/{filename}`), so it must not
/// contain separators or be a dot entry.
pub fn single_path_segment(filename: &str) -> Result<(), ValidationError> {
    if filename.contains('/') || filename.contains('\\') || filename == "." || filename == ".."
    {
        return Err(invalid("filename", format!("Invalid filename: {}", filename)));
    }
    Ok(())
}

pub fn check_upload_form(form: &UploadForm) -> Result<(), ValidationError> {
    check_window(&form.valid_from, &form.valid_to)?;
    match form.source() {
        Some(FileSource::Local(path)) => check_local_path(&path),
        Some(FileSource::Url(url)) => {
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(())
            } else {
                Err(invalid(
                    "file_url",
                    format!("File URL must start with http:// or https://: {}", url),
                ))
            }
        }
        None => Err(invalid(
            "source",
            "Either a file or a file URL is required".to_string(),
        )),
    }
}

pub fn check_update_form(form: &UpdateForm) -> Result<(), ValidationError> {
    check_window(&form.valid_from, &form.valid_to)?;
    match &form.file {
        Some(path) => check_local_path(path),
        None => Ok(()),
    }
}

pub fn validate_filename(filename: &str) -> Result<(), AppError> {
    let filename = filename.trim();
    if filename.is_empty() {
        return Err(AppError::InvalidInput("Filename is required".to_string()));
    }
    single_path_segment(filename)
        .map_err(|e| AppError::InvalidInput(format!("Validation error: {}", e)))
}

/// Validate the upload form and resolve where the PDF comes from.
///
/// Returns the trimmed form that should be sent along with its source.
pub fn validate_upload_form(form: &UploadForm) -> Result<(UploadForm, FileSource), AppError> {
    let form = form.normalized();
    form.validate()?;
    let source = form.source().ok_or_else(|| {
        AppError::InvalidInput("Either a file or a file URL is required".to_string())
    })?;
    Ok((form, source))
}

/// Validate the edit form, returning the trimmed copy that should be sent.
pub fn validate_update_form(form: &UpdateForm) -> Result<UpdateForm, AppError> {
    let form = form.normalized();
    form.validate()?;
    Ok(form)
}
