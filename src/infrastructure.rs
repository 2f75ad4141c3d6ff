//! Infrastructure layer for HTTP, HTML targets, configuration and logging

pub mod config;
pub mod host_page;
pub mod html_target;
pub mod http_client;
pub mod logging;
pub mod retry;

pub use config::{AppConfig, ConfigError};
pub use host_page::{HostPage, HostPageError};
pub use html_target::{FileRenderTarget, HtmlRenderTarget, list_to_html};
pub use http_client::{HttpClientConfig, ProductApiClient};
pub use logging::{init_logging, init_logging_with_config};
pub use retry::RetryPolicy;
