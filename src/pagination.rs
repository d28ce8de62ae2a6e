//! Page requests, result pages and page-link windows.

use serde::Serialize;

use crate::domain::types::TypeConstraintError;

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Zero-based page number plus a non-zero page size.
///
/// The row offset and the page size must both fit the `i64` used for SQL
/// `OFFSET`/`LIMIT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page_number: usize,
    page_size: usize,
    offset: i64,
    limit: i64,
}

impl PageRequest {
    pub fn new(page_number: usize, page_size: usize) -> Result<Self, TypeConstraintError> {
        if page_size == 0 {
            return Err(TypeConstraintError::ZeroPageSize);
        }

        let offset = page_number
            .checked_mul(page_size)
            .and_then(|rows| i64::try_from(rows).ok())
            .ok_or(TypeConstraintError::PageOutOfRange)?;
        let limit = i64::try_from(page_size).map_err(|_| TypeConstraintError::PageOutOfRange)?;

        Ok(Self {
            page_number,
            page_size,
            offset,
            limit,
        })
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of rows skipped before this page starts.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Page size as an SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    // Checked in `new`.
    fn skipped_rows(&self) -> usize {
        self.page_number * self.page_size
    }
}

/// One page of results together with the total number of matching rows.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total: usize) -> Self {
        Self {
            content,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page_number + 1 < self.total_pages()
    }

    /// One-based page links around the current page; `None` marks a gap.
    pub fn page_links(&self) -> Vec<Option<usize>> {
        get_pages(self.total_pages(), self.page_number + 1, 2, 2, 4, 2)
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total: self.total,
        }
    }
}

/// Builds a page, calling `count` only when `content` does not already
/// determine the total.
///
/// The total is known without counting when the page is short: on the first
/// page it equals the content length, on later pages (with non-empty
/// content) it equals `offset + content.len()`.
pub fn page_with_deferred_count<T, E, F>(
    content: Vec<T>,
    request: PageRequest,
    count: F,
) -> Result<Page<T>, E>
where
    F: FnOnce() -> Result<usize, E>,
{
    let short_page = content.len() < request.page_size();

    let total = if request.offset() == 0 && short_page {
        content.len()
    } else if !content.is_empty() && short_page {
        request.skipped_rows() + content.len()
    } else {
        count()?
    };

    Ok(Page::new(content, request, total))
}
