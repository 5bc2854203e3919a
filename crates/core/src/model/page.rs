use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of questions shown per page in listings.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PageError {
    #[error("page numbers start at 1")]
    Zero,
}

/// 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Page(u32);

impl Page {
    pub const FIRST: Page = Page(1);

    /// # Errors
    ///
    /// Returns `PageError::Zero` for page `0`.
    pub fn new(value: u32) -> Result<Self, PageError> {
        if value == 0 {
            return Err(PageError::Zero);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Zero-based offset of the first item on this page.
    #[must_use]
    pub fn offset(self) -> usize {
        (self.0 as usize - 1) * PAGE_SIZE as usize
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of pages needed to show `total` questions.
#[must_use]
pub fn page_count(total: u64) -> u32 {
    let pages = total.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(10), 1);
        assert_eq!(page_count(11), 2);
        assert_eq!(page_count(19), 2);
    }

    #[test]
    fn page_zero_is_rejected() {
        assert_eq!(Page::new(0).unwrap_err(), PageError::Zero);
        assert_eq!(Page::new(3).unwrap().offset(), 20);
        assert_eq!(Page::default(), Page::FIRST);
    }
}
