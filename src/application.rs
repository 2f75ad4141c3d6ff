//! Application layer - drives listing pages through the domain seams

pub mod pager;

pub use pager::{PageOutcome, PagingReport, ProductPager};
