//! Error types for fetching, rendering and driving listing pages

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    #[error("Request timed out: {url}")]
    Timeout { url: String },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to decode product list from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid products endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl FetchError {
    /// Server errors, throttling and network trouble are worth another try;
    /// client errors and bad payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout { .. } | Self::Transport { .. } => true,
            Self::Decode { .. } | Self::InvalidEndpoint { .. } => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write render target {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum PagerError {
    #[error("Page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: FetchError,
    },

    #[error("Page {page}: {source}")]
    Render {
        page: u32,
        #[source]
        source: RenderError,
    },
}

impl PagerError {
    pub fn page(&self) -> u32 {
        match self {
            Self::Fetch { page, .. } | Self::Render { page, .. } => *page,
        }
    }
}
