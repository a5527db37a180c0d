//! HTTP client for the salesbot admin backend.
//!
//! Provides a minimal client with optional X-API-Key auth, generic
//! GET/POST/DELETE helpers, and domain methods (list, upload, update, delete,
//! trigger). The CLI uses this client directly; it also implements
//! [`salesbot_core::DocumentSource`] so the presenter can read from the backend.

pub mod api;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use salesbot_core::{AppError, ClientConfig};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// HTTP client for the admin backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Option<Auth>,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Option<Auth>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Create a client from a loaded configuration. An API key, when set, is sent as X-API-Key.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let auth = config.api_key.clone().map(Auth::XApiKey);
        Self::new(config.api_url.clone(), auth, config.request_timeout())
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(Auth::XApiKey(key)) => request.header("X-API-Key", key.as_str()),
            None => request,
        }
    }

    /// Turn a non-success status into an [`AppError`] carrying the backend's message.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::debug!(status = status.as_u16(), body = %error_text, "API request failed");
        Err(AppError::from_status(status.as_u16(), &error_text).into())
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        let body: T = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;
        Ok(body)
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        tracing::debug!(%url, "GET");
        let request = self.apply_auth(self.client.get(&url));
        let response = request.send().await.context("Failed to send request")?;
        Self::parse_json(response).await
    }

    /// POST without a body and deserialize response.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        tracing::debug!(%url, "POST");
        let request = self.apply_auth(self.client.post(&url));
        let response = request.send().await.context("Failed to send request")?;
        Self::parse_json(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.build_url(path);
        tracing::debug!(%url, "POST multipart");
        let request = self.apply_auth(self.client.post(&url).multipart(form));
        let response = request.send().await.context("Failed to send request")?;
        Self::parse_json(response).await
    }

    /// DELETE request and deserialize response.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        tracing::debug!(%url, "DELETE");
        let request = self.apply_auth(self.client.delete(&url));
        let response = request.send().await.context("Failed to send request")?;
        Self::parse_json(response).await
    }
}

/// Recover the [`AppError`] behind an `anyhow` error, or wrap it as internal.
pub fn into_app_error(err: anyhow::Error) -> AppError {
    err.downcast::<AppError>().unwrap_or_else(AppError::from)
}

// Re-export domain types for convenience.
pub use salesbot_core::models::{
    Document, MessageResponse, Shop, UpdateResponse, UploadResponse,
};
