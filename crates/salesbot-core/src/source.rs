//! Document sources
//!
//! The presenter works on a snapshot of documents. Where that snapshot comes from is
//! behind [`DocumentSource`]: the HTTP client implements it against the admin backend,
//! and [`SnapshotSource`] serves a fixed list (for example a JSON export).

use std::path::Path;

use async_trait::async_trait;

use crate::clock::Clock;
use crate::error::AppError;
use crate::models::Document;
use crate::presenter::{present, AnnotatedDocument, ListOrder};

/// Anything that can produce the current list of documents.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch a full snapshot of the documents.
    async fn fetch_documents(&self) -> Result<Vec<Document>, AppError>;
}

/// A fixed, in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    documents: Vec<Document>,
}

impl SnapshotSource {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Load a JSON array of document records, as returned by `GET /pdfs`.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let documents: Vec<Document> = serde_json::from_str(&raw)?;
        Ok(Self::new(documents))
    }
}

#[async_trait]
impl DocumentSource for SnapshotSource {
    async fn fetch_documents(&self) -> Result<Vec<Document>, AppError> {
        Ok(self.documents.clone())
    }
}

/// Fetch a snapshot from `source` and present it.
pub async fn fetch_and_present(
    source: &dyn DocumentSource,
    clock: &dyn Clock,
    order: ListOrder,
) -> Result<Vec<AnnotatedDocument>, AppError> {
    let documents = source.fetch_documents().await?;
    Ok(present(&documents, clock, order))
}
