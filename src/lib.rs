//! Store Pager - paginated store product listings
//!
//! Fetches product pages from a store listing API and renders each page as
//! a list of product links.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{PageOutcome, PagingReport, ProductPager};
pub use domain::{PageCounter, Product, ProductList, render_products};
