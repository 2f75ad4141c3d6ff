//! Configuration infrastructure
//!
//! Settings are layered with the `config` crate: an optional file source
//! first, then `STORE_PAGER__*` environment variables
//! (e.g. `STORE_PAGER__RETRY__MAX_ATTEMPTS=1`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::host_page::HostPage;
use super::http_client::HttpClientConfig;
use super::retry::RetryPolicy;
use crate::domain::render::PRODUCT_ID_PLACEHOLDER;

pub const ENV_PREFIX: &str = "STORE_PAGER";
pub const CONFIG_FILE_NAME: &str = "store_pager.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub http: HttpClientConfig,
    pub retry: RetryPolicy,
    pub logging: LoggingConfig,
}

/// Listing endpoint and link template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// `PUT` endpoint returning a JSON array of products
    pub products_url: String,
    /// Product link, `product_id` is replaced by the product's id
    pub link_template: String,
    pub store_id: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            products_url: "http://localhost:5001/api/v1/products/".to_string(),
            link_template: "/products/product_id".to_string(),
            store_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,
    pub json_format: bool,
    pub console_output: bool,
    pub file_output: bool,
    /// Directory for the log file; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load from `path` (if given) and the environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Self::env_source())
    }

    /// `STORE_PAGER__<SECTION>__<KEY>` variables, e.g. `STORE_PAGER__HTTP__TIMEOUT_SECONDS`
    pub fn env_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
    }

    /// Same as [`AppConfig::load`] with an explicit environment layer
    pub fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path));
            }
            None => {
                if let Some(default_path) = Self::default_config_path() {
                    builder = builder.add_source(config::File::from(default_path).required(false));
                }
            }
        }

        let settings = builder.add_source(env).build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// `<user config dir>/store-pager/store_pager.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("store-pager").join(CONFIG_FILE_NAME))
    }

    /// Take endpoint, template and store id from a store page
    pub fn apply_host_page(&mut self, page: &HostPage) {
        self.api.products_url.clone_from(&page.products_url);
        self.api.link_template.clone_from(&page.link_template);
        if page.store_id.is_some() {
            self.api.store_id.clone_from(&page.store_id);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.products_url.trim().is_empty() {
            return Err(validation("api.products_url must not be empty"));
        }
        if !self.api.link_template.contains(PRODUCT_ID_PLACEHOLDER) {
            return Err(validation(&format!(
                "api.link_template must contain '{PRODUCT_ID_PLACEHOLDER}'"
            )));
        }
        if self.http.timeout_seconds == 0 {
            return Err(validation("http.timeout_seconds must be greater than 0"));
        }
        if self.retry.max_attempts == 0 {
            return Err(validation("retry.max_attempts must be at least 1"));
        }
        if self.retry.backoff_multiplier < 1.0 {
            return Err(validation("retry.backoff_multiplier must be >= 1.0"));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(validation(
                "retry.base_delay_ms cannot be greater than retry.max_delay_ms",
            ));
        }
        Ok(())
    }
}

fn validation(message: &str) -> ConfigError {
    ConfigError::Validation {
        message: message.to_string(),
    }
}
