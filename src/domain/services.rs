//! Seams between the pager and the outside world

use async_trait::async_trait;

use super::errors::{FetchError, RenderError};
use super::product::{PageRequest, Product};
use super::render::ProductList;

/// Source of product listing pages
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one page of products
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Product>, FetchError>;
}

/// Container that receives a rendered list.
///
/// Each call replaces the whole content; targets never patch what was there.
pub trait RenderTarget: Send {
    fn replace(&mut self, list: &ProductList) -> Result<(), RenderError>;
}

#[async_trait]
impl<S: ProductSource + ?Sized> ProductSource for std::sync::Arc<S> {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Product>, FetchError> {
        (**self).fetch_page(request).await
    }
}
