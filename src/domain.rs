//! Domain module - products, pagination state, rendering and service seams
//!
//! Everything here is free of I/O; the infrastructure layer plugs in behind
//! the traits in [`services`].

pub mod errors;
pub mod pagination;
pub mod product;
pub mod render;
pub mod services;

pub use errors::{FetchError, PagerError, RenderError};
pub use pagination::PageCounter;
pub use product::{LatestPrice, PageRequest, Product, ProductId};
pub use render::{ProductItem, ProductLink, ProductList, render_products};
pub use services::{ProductSource, RenderTarget};
