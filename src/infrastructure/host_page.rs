//! Reads listing settings embedded in a store page.
//!
//! The store page carries the endpoint and link template as the text content
//! of elements with well-known ids.

use scraper::{Html, Selector};
use thiserror::Error;
use tracing::debug;

use super::html_target::{DEFAULT_CONTAINER_ID, HtmlRenderTarget};

pub const STORE_ID_ELEMENT: &str = "store_id";
pub const LINK_TEMPLATE_ELEMENT: &str = "product_in_store_url";
pub const PRODUCTS_URL_ELEMENT: &str = "api_products_in_store_url";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostPageError {
    #[error("Element #{id} not found in store page")]
    MissingElement { id: String },

    #[error("Element #{id} has no text content")]
    EmptyElement { id: String },

    #[error("Invalid selector for element id '{id}'")]
    InvalidSelector { id: String },
}

/// Settings read from a store page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPage {
    /// Read for completeness; requests do not use it
    pub store_id: Option<String>,
    pub products_url: String,
    pub link_template: String,
    /// Render container id, present only if the page declares it
    pub container_id: Option<String>,
}

impl HostPage {
    pub fn parse(html: &str) -> Result<Self, HostPageError> {
        let document = Html::parse_document(html);

        let products_url = required_text(&document, PRODUCTS_URL_ELEMENT)?;
        let link_template = required_text(&document, LINK_TEMPLATE_ELEMENT)?;
        let store_id = element_text(&document, STORE_ID_ELEMENT)?.filter(|s| !s.is_empty());
        let container_id = element_text(&document, DEFAULT_CONTAINER_ID)?
            .map(|_| DEFAULT_CONTAINER_ID.to_string());

        debug!(
            "Store page: endpoint={} template={} store_id={:?}",
            products_url, link_template, store_id
        );

        Ok(Self {
            store_id,
            products_url,
            link_template,
            container_id,
        })
    }

    /// Render target for this page's container, or the default container
    pub fn html_target(&self) -> HtmlRenderTarget {
        self.container_id
            .as_deref()
            .map_or_else(HtmlRenderTarget::default, HtmlRenderTarget::new)
    }
}

fn element_text(document: &Html, id: &str) -> Result<Option<String>, HostPageError> {
    let selector = Selector::parse(&format!("#{id}")).map_err(|_| HostPageError::InvalidSelector {
        id: id.to_string(),
    })?;
    Ok(document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string()))
}

fn required_text(document: &Html, id: &str) -> Result<String, HostPageError> {
    match element_text(document, id)? {
        None => Err(HostPageError::MissingElement { id: id.to_string() }),
        Some(text) if text.is_empty() => Err(HostPageError::EmptyElement { id: id.to_string() }),
        Some(text) => Ok(text),
    }
}
