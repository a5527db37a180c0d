use serde::{Deserialize, Serialize};

/// Generic `{"message": ...}` acknowledgment returned by delete and trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    #[serde(default)]
    pub s3_url: Option<String>,
    #[serde(default)]
    pub valid: bool,
}

/// Response of `POST /update/{filename}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub message: String,
    #[serde(default)]
    pub valid: bool,
}
