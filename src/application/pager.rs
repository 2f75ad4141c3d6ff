//! Fetch-then-render driver for paginated product listings

use tracing::{info, warn};

use crate::domain::errors::PagerError;
use crate::domain::pagination::PageCounter;
use crate::domain::product::PageRequest;
use crate::domain::render::render_products;
use crate::domain::services::{ProductSource, RenderTarget};

/// Result of a successful `load_content` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOutcome {
    pub page: u32,
    pub rendered: usize,
}

/// Tally of a `run_pages` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagingReport {
    pub requested: u32,
    pub loaded: u32,
    pub failed: u32,
}

impl PagingReport {
    /// True when at least one page was requested and none rendered
    pub fn all_failed(&self) -> bool {
        self.requested > 0 && self.failed == self.requested
    }
}

/// Owns the page counter and drives one request/render cycle per call.
///
/// `load_content` takes `&mut self`, so a pager never has two requests in
/// flight.
pub struct ProductPager<S, T> {
    source: S,
    target: T,
    link_template: String,
    counter: PageCounter,
}

impl<S, T> ProductPager<S, T>
where
    S: ProductSource,
    T: RenderTarget,
{
    pub fn new(source: S, target: T, link_template: impl Into<String>) -> Self {
        Self::with_counter(source, target, link_template, PageCounter::new())
    }

    pub fn with_counter(
        source: S,
        target: T,
        link_template: impl Into<String>,
        counter: PageCounter,
    ) -> Self {
        Self {
            source,
            target,
            link_template: link_template.into(),
            counter,
        }
    }

    /// Page the next `load_content` call will request
    pub fn next_page(&self) -> u32 {
        self.counter.next_page()
    }

    pub fn counter(&self) -> PageCounter {
        self.counter
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// Fetch the current page and render it into the target.
    ///
    /// The counter moves to the next page whatever the outcome, so a failed
    /// page is not requested again by this pager.
    pub async fn load_content(&mut self) -> Result<PageOutcome, PagerError> {
        let request = self.counter.request();
        let result = self.fetch_and_render(request).await;
        self.counter.advance();

        match &result {
            Ok(outcome) => info!(
                "Page {} rendered ({} products)",
                outcome.page, outcome.rendered
            ),
            Err(e) => warn!("Page {} not rendered: {}", request.page, e),
        }
        result
    }

    /// Run `count` consecutive `load_content` calls.
    ///
    /// Failures do not stop the run; one result is returned per page.
    pub async fn load_pages(&mut self, count: u32) -> Vec<Result<PageOutcome, PagerError>> {
        // Grows with the pages actually loaded; `count` may be huge.
        let mut results = Vec::new();
        for _ in 0..count {
            results.push(self.load_content().await);
        }
        results
    }

    /// Run `count` consecutive `load_content` calls and only keep the tally.
    pub async fn run_pages(&mut self, count: u32) -> PagingReport {
        let mut report = PagingReport {
            requested: count,
            ..PagingReport::default()
        };
        for _ in 0..count {
            match self.load_content().await {
                Ok(_) => report.loaded += 1,
                Err(_) => report.failed += 1,
            }
        }
        report
    }

    async fn fetch_and_render(&mut self, request: PageRequest) -> Result<PageOutcome, PagerError> {
        let page = request.page;
        let products = self
            .source
            .fetch_page(&request)
            .await
            .map_err(|source| PagerError::Fetch { page, source })?;

        let list = render_products(&products, &self.link_template);
        self.target
            .replace(&list)
            .map_err(|source| PagerError::Render { page, source })?;

        Ok(PageOutcome {
            page,
            rendered: list.len(),
        })
    }
}
