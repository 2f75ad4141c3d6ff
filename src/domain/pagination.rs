//! Page counter for sequential listing requests.
//!
//! Rules:
//! - pages are 1-based, the first request asks for page 1
//! - every load attempt consumes exactly one page, success or not
//! - there is no reset and no terminal page; the counter saturates at `u32::MAX`

use super::product::PageRequest;

const FIRST_PAGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCounter {
    next_page: u32,
}

impl Default for PageCounter {
    fn default() -> Self {
        Self {
            next_page: FIRST_PAGE,
        }
    }
}

impl PageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an explicit page. Page 0 is not a valid listing page and is
    /// clamped to the first page.
    pub fn starting_at(page: u32) -> Self {
        Self {
            next_page: page.max(FIRST_PAGE),
        }
    }

    /// Page the next request will ask for
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.next_page)
    }

    /// Move past the current page. Returns the page that was consumed.
    pub fn advance(&mut self) -> u32 {
        let consumed = self.next_page;
        self.next_page = self.next_page.saturating_add(1);
        consumed
    }
}
