//! Domain methods for the admin backend.
//!
//! Every form is validated locally before a request is sent, so a malformed date or a
//! missing shop name never reaches the backend.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use salesbot_core::models::{
    sort_shops, Document, FileSource, MessageResponse, Shop, UpdateForm, UpdateResponse,
    UploadForm, UploadResponse,
};
use salesbot_core::validation::{validate_filename, validate_update_form, validate_upload_form};
use salesbot_core::{AppError, DocumentAction, DocumentSource};

use crate::{into_app_error, ApiClient};

/// Read a local PDF into a multipart `file` part.
fn file_part(path: &Path) -> Result<Part> {
    let buffer =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf")
        .to_string();

    Ok(Part::bytes(buffer).file_name(filename))
}

fn window_fields(form: Form, shop_name: &str, valid_from: &str, valid_to: &str) -> Form {
    form.text("shop_name", shop_name.to_string())
        .text("valid_from", valid_from.to_string())
        .text("valid_to", valid_to.to_string())
}

fn segment(filename: &str) -> String {
    urlencoding::encode(filename).into_owned()
}

impl ApiClient {
    /// List all documents (`GET /pdfs`).
    pub async fn list_documents(&self) -> Result<Vec<Document>> {
        self.get("/pdfs").await
    }

    /// List the shop directory (`GET /shops`), sorted by name.
    pub async fn list_shops(&self) -> Result<Vec<Shop>> {
        let mut shops: Vec<Shop> = self.get("/shops").await?;
        sort_shops(&mut shops);
        Ok(shops)
    }

    /// Upload a new document from a local file or a URL (`POST /upload`).
    ///
    /// When both are set only the file is sent.
    pub async fn upload_document(&self, form: &UploadForm) -> Result<UploadResponse> {
        let (form, source) = validate_upload_form(form)?;

        let mut multipart = window_fields(
            Form::new(),
            &form.shop_name,
            &form.valid_from,
            &form.valid_to,
        );
        multipart = match source {
            FileSource::Local(path) => multipart.part("file", file_part(&path)?),
            FileSource::Url(url) => multipart.text("file_url", url),
        };

        let response: UploadResponse = self.post_multipart("/upload", multipart).await?;
        tracing::info!(
            filename = %response.filename,
            valid = response.valid,
            "Document uploaded"
        );
        Ok(response)
    }

    /// Replace shop name, window and optionally the file (`POST /update/{filename}`).
    pub async fn update_document(&self, form: &UpdateForm) -> Result<UpdateResponse> {
        let form = validate_update_form(form)?;

        let mut multipart = window_fields(
            Form::new(),
            &form.shop_name,
            &form.valid_from,
            &form.valid_to,
        );
        if let Some(path) = &form.file {
            multipart = multipart.part("file", file_part(path)?);
        }

        let response: UpdateResponse = self
            .post_multipart(&format!("/update/{}", segment(&form.filename)), multipart)
            .await?;
        tracing::info!(filename = %form.filename, valid = response.valid, "Document updated");
        Ok(response)
    }

    /// Delete a document by filename (`DELETE /delete/{filename}`).
    pub async fn delete_document(&self, filename: &str) -> Result<MessageResponse> {
        validate_filename(filename)?;
        let response: MessageResponse = self
            .delete(&format!("/delete/{}", segment(filename)))
            .await?;
        tracing::info!(%filename, "Document deleted");
        Ok(response)
    }

    /// Trigger the processing pipeline (`POST /trigger_pipeline/{filename}`).
    ///
    /// This does not check eligibility; build a [`DocumentAction`] from a presented row
    /// and use [`ApiClient::execute`] for the guarded path.
    pub async fn trigger_pipeline(&self, filename: &str) -> Result<MessageResponse> {
        validate_filename(filename)?;
        let response: MessageResponse = self
            .post_empty(&format!("/trigger_pipeline/{}", segment(filename)))
            .await?;
        tracing::info!(%filename, "Pipeline triggered");
        Ok(response)
    }

    /// Execute an action request and return the backend's acknowledgment message.
    pub async fn execute(&self, action: &DocumentAction) -> Result<String> {
        let message = match action {
            DocumentAction::Update(form) => self.update_document(form).await?.message,
            DocumentAction::Delete { filename } => self.delete_document(filename).await?.message,
            DocumentAction::TriggerPipeline { filename } => {
                self.trigger_pipeline(filename).await?.message
            }
        };
        Ok(message)
    }
}

#[async_trait]
impl DocumentSource for ApiClient {
    async fn fetch_documents(&self) -> Result<Vec<Document>, AppError> {
        self.list_documents().await.map_err(into_app_error)
    }
}
