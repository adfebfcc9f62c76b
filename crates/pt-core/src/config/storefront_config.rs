//! Storefront configuration domain model

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cart::DEFAULT_RECORD_NAME;

/// Storefront configuration
///
/// Every section falls back to its defaults when absent from the file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Remote catalog / order service
    pub api: ApiConfig,

    /// Local selection storage
    pub storage: StorageConfig,

    /// Checkout behavior
    pub checkout: CheckoutConfig,
}

/// A configuration value that cannot be used as given.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("api.request_timeout_ms must be greater than zero")]
    ZeroRequestTimeout,
}

impl StorefrontConfig {
    /// Rejects values that parse but would make every request fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        Ok(())
    }
}

/// Remote service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,

    /// Item detail path; the item id is appended as the last segment.
    pub item_path: String,

    pub order_path: String,

    /// Per-request timeout. A request that exceeds it settles as a failure.
    pub request_timeout_ms: u64,

    /// Session token sent as `Authorization: Bearer`.
    pub bearer_token: Option<String>,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            item_path: "/item".to_string(),
            order_path: "/order/new".to_string(),
            request_timeout_ms: 10_000,
            bearer_token: None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding durable records. `None` uses the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Name of the record holding the selection.
    pub record_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            record_name: DEFAULT_RECORD_NAME.to_string(),
        }
    }
}

/// Checkout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// How long the success notice stays before navigating away.
    pub redirect_delay_ms: u64,

    /// Where to go after a successful order.
    pub redirect_route: String,

    /// Base URL for listing photos.
    pub media_base_url: String,
}

impl CheckoutConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: 2_000,
            redirect_route: "/dashboard".to_string(),
            media_base_url: "http://localhost:8000".to_string(),
        }
    }
}
