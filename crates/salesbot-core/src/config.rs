//! Configuration module
//!
//! Client-side settings for talking to the admin backend, read from the environment
//! (a `.env` file is honored).

use std::env;
use std::time::Duration;

use crate::constants::DEFAULT_API_URL;
use crate::error::AppError;
use crate::presenter::ListOrder;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Admin client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub list_order: ListOrder,
    pub environment: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            list_order: ListOrder::default(),
            environment: "development".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("SALESBOT_API_URL")
            .or_else(|| non_empty("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let api_key = non_empty("SALESBOT_API_KEY").or_else(|| non_empty("API_KEY"));

        let request_timeout_secs = match non_empty("SALESBOT_API_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("SALESBOT_API_TIMEOUT_SECS must be a valid number")
            })?,
            None => REQUEST_TIMEOUT_SECS,
        };

        let list_order = Self::list_order_from_lookup(&lookup)?;

        let environment = non_empty("ENVIRONMENT")
            .or_else(|| non_empty("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let config = Self {
            api_url,
            api_key,
            request_timeout_secs,
            list_order,
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    /// Default list order alone, for commands that never talk to the backend.
    pub fn list_order_from_env() -> Result<ListOrder, AppError> {
        dotenvy::dotenv().ok();
        Self::list_order_from_lookup(&|key: &str| env::var(key).ok())
    }

    pub fn list_order_from_lookup<F>(lookup: &F) -> Result<ListOrder, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("SALESBOT_LIST_ORDER").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.parse(),
            None => Ok(ListOrder::default()),
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "SALESBOT_API_URL must start with http:// or https://"
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "SALESBOT_API_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if self.is_production() && self.api_url.starts_with("http://") {
            tracing::warn!(api_url = %self.api_url, "Using plain HTTP in production");
        }

        Ok(())
    }

    /// Check if the client is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
