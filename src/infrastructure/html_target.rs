//! HTML render targets
//!
//! Serialises a [`ProductList`] to markup and hands it to a container. The
//! container content is always replaced as a whole.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::errors::RenderError;
use crate::domain::render::ProductList;
use crate::domain::services::RenderTarget;

/// Id of the container the listing is rendered into on the store page
pub const DEFAULT_CONTAINER_ID: &str = "static_prod_in_store";

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `<ul><li><a class="link" href="...">name</a> (amount)count</li>...</ul>`
pub fn list_to_html(list: &ProductList) -> String {
    let mut out = String::from("<ul>");
    for item in list {
        out.push_str("<li><a class=\"");
        out.push_str(item.link.class);
        out.push_str("\" href=\"");
        out.push_str(&escape_html(&item.link.href));
        out.push_str("\">");
        out.push_str(&escape_html(&item.link.text));
        out.push_str("</a>");
        out.push_str(&escape_html(&item.trailer));
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    out
}

/// In-memory container element
#[derive(Debug, Clone)]
pub struct HtmlRenderTarget {
    container_id: String,
    inner_html: String,
    renders: usize,
}

impl Default for HtmlRenderTarget {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_ID)
    }
}

impl HtmlRenderTarget {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            inner_html: String::new(),
            renders: 0,
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Number of times the content has been replaced
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// The container element including its content
    pub fn outer_html(&self) -> String {
        format!(
            "<div id=\"{}\">{}</div>",
            escape_html(&self.container_id),
            self.inner_html
        )
    }
}

impl RenderTarget for HtmlRenderTarget {
    fn replace(&mut self, list: &ProductList) -> Result<(), RenderError> {
        self.inner_html = list_to_html(list);
        self.renders += 1;
        debug!(
            "Rendered {} items into #{}",
            list.len(),
            self.container_id
        );
        Ok(())
    }
}

/// Writes each rendered list to a file, overwriting the previous one
#[derive(Debug, Clone)]
pub struct FileRenderTarget {
    path: PathBuf,
}

impl FileRenderTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderTarget for FileRenderTarget {
    fn replace(&mut self, list: &ProductList) -> Result<(), RenderError> {
        std::fs::write(&self.path, list_to_html(list)).map_err(|source| RenderError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        debug!("Rendered {} items into {}", list.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Product;
    use crate::domain::render::render_products;

    fn sample_list() -> ProductList {
        let products = vec![
            Product::new(1_u64, "Milk").with_prices(2, 9.99),
            Product::new(2_u64, "Bread & Butter"),
        ];
        render_products(&products, "/store/product_id")
    }

    #[test]
    fn test_list_markup() {
        assert_eq!(
            list_to_html(&sample_list()),
            "<ul>\
             <li><a class=\"link\" href=\"/store/2\">Bread &amp; Butter</a> ()0</li>\
             <li><a class=\"link\" href=\"/store/1\">Milk</a> (9.99)2</li>\
             </ul>"
        );
    }

    #[test]
    fn test_empty_list_markup() {
        assert_eq!(list_to_html(&ProductList::default()), "<ul></ul>");
    }

    #[test]
    fn test_text_is_escaped() {
        let products = vec![Product::new("x\"y", "<b>bold</b>")];
        let html = list_to_html(&render_products(&products, "/p/product_id"));
        assert!(html.contains("href=\"/p/x&quot;y\""));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_replace_is_not_incremental() {
        let mut target = HtmlRenderTarget::default();
        target.replace(&sample_list()).unwrap();
        target.replace(&ProductList::default()).unwrap();

        assert_eq!(target.inner_html(), "<ul></ul>");
        assert_eq!(target.render_count(), 2);
        assert_eq!(
            target.outer_html(),
            "<div id=\"static_prod_in_store\"><ul></ul></div>"
        );
    }

    #[test]
    fn test_file_target_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.html");
        let mut target = FileRenderTarget::new(&path);

        target.replace(&sample_list()).unwrap();
        target.replace(&ProductList::default()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<ul></ul>");
    }

    #[test]
    fn test_file_target_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut target = FileRenderTarget::new(dir.path().join("missing").join("out.html"));
        let err = target.replace(&ProductList::default()).unwrap_err();
        assert!(err.to_string().contains("out.html"));
    }
}
