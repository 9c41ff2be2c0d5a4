//! # Pagination
//!
//! Two modes share one page cursor:
//!
//! - **Default**: the provider's own sequential listing. The total count is only known
//!   after a listing page has been loaded, so "next" stays unavailable until then.
//! - **Explicit**: an ordered id list produced by a search or a filter. Pages are
//!   slices `[offset, offset + page_size)` of that list.
//!
//! Any mode transition resets the cursor to page 1.

use crate::error::{DexError, Result};
use serde::Serialize;

pub const PAGE_SIZE: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMode {
    Default,
    Explicit(Vec<u32>),
}

#[derive(Debug, Clone)]
pub struct PageState {
    page: u32,
    page_size: u32,
    mode: PageMode,
    /// Provider count for the default listing, learned from the last load.
    listing_total: Option<u32>,
}

/// Navigation data for one rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub total: Option<u32>,
}

impl PageInfo {
    pub fn label(&self) -> String {
        if self.has_next {
            format!("Page {}", self.page)
        } else {
            format!("Page {} (last)", self.page)
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            mode: PageMode::Default,
            listing_total: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn mode(&self) -> &PageMode {
        &self.mode
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self.mode, PageMode::Explicit(_))
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn total(&self) -> Option<u32> {
        match &self.mode {
            PageMode::Default => self.listing_total,
            PageMode::Explicit(ids) => Some(ids.len() as u32),
        }
    }

    /// Switches to explicit mode over `ids`, back on page 1.
    pub fn enter_explicit(&mut self, ids: Vec<u32>) {
        self.mode = PageMode::Explicit(ids);
        self.page = 1;
    }

    /// Switches back to the default listing on page 1. The total is re-learned on the
    /// next load.
    pub fn enter_default(&mut self) {
        self.mode = PageMode::Default;
        self.page = 1;
        self.listing_total = None;
    }

    pub fn set_listing_total(&mut self, count: u32) {
        self.listing_total = Some(count);
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        match self.total() {
            Some(total) => self.offset().saturating_add(self.page_size) < total,
            None => false,
        }
    }

    /// Moves forward if a next page exists. Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn goto(&mut self, page: u32) -> Result<()> {
        if page == 0 {
            return Err(DexError::InvalidInput("pages start at 1".into()));
        }
        self.page = page;
        Ok(())
    }

    /// The ids on the current page in explicit mode; `None` in default mode.
    ///
    /// A page past the end of the list is an empty slice.
    pub fn explicit_slice(&self) -> Option<&[u32]> {
        match &self.mode {
            PageMode::Default => None,
            PageMode::Explicit(ids) => {
                let start = (self.offset() as usize).min(ids.len());
                let end = (start + self.page_size as usize).min(ids.len());
                Some(&ids[start..end])
            }
        }
    }

    pub fn info(&self) -> PageInfo {
        PageInfo {
            page: self.page,
            has_prev: self.has_prev(),
            has_next: self.has_next(),
            total: self.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explicit(len: u32, page: u32) -> PageState {
        let mut state = PageState::default();
        state.enter_explicit((1..=len).collect());
        state.goto(page).unwrap();
        state
    }

    #[test]
    fn explicit_slices_follow_page_size() {
        let state = explicit(75, 2);
        let slice = state.explicit_slice().unwrap();
        assert_eq!(slice.len(), 30);
        assert_eq!(slice[0], 31);
        assert_eq!(slice[29], 60);

        let last = explicit(75, 3);
        assert_eq!(last.explicit_slice().unwrap(), &(61..=75u32).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn next_disabled_iff_page_end_reaches_list_end() {
        for (len, page, expected) in [
            (75, 1, true),
            (75, 2, true),
            (75, 3, false),
            (60, 2, false),
            (61, 2, true),
            (30, 1, false),
            (0, 1, false),
        ] {
            let state = explicit(len, page);
            assert_eq!(state.has_next(), expected, "len {} page {}", len, page);
            assert_eq!(state.has_next(), page * 30 < len);
        }
    }

    #[test]
    fn prev_disabled_on_first_page() {
        let mut state = explicit(75, 1);
        assert!(!state.has_prev());
        assert!(!state.prev());
        assert!(state.next());
        assert!(state.has_prev());
        assert!(state.prev());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn default_mode_needs_a_total_before_next() {
        let mut state = PageState::default();
        assert!(!state.has_next());
        state.set_listing_total(1302);
        assert!(state.has_next());
        state.goto(44).unwrap();
        // offset 1290 + 30 >= 1302
        assert!(!state.has_next());
        assert_eq!(state.offset(), 1290);
    }

    #[test]
    fn mode_transitions_reset_to_page_one() {
        let mut state = PageState::default();
        state.set_listing_total(100);
        state.next();
        state.enter_explicit(vec![1, 2, 3]);
        assert_eq!(state.page(), 1);
        assert!(state.is_explicit());

        state.enter_default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.total(), None);
        assert_eq!(state.mode(), &PageMode::Default);
    }

    #[test]
    fn single_result_disables_both_directions() {
        let state = explicit(1, 1);
        let info = state.info();
        assert!(!info.has_prev);
        assert!(!info.has_next);
        assert_eq!(info.label(), "Page 1 (last)");
    }

    #[test]
    fn page_beyond_end_is_empty_not_error() {
        let state = explicit(10, 5);
        assert_eq!(state.explicit_slice().unwrap(), &[] as &[u32]);
        assert!(!state.has_next());
    }

    #[test]
    fn page_zero_is_rejected() {
        let mut state = PageState::default();
        assert!(state.goto(0).is_err());
        assert_eq!(state.page(), 1);
    }
}
