//! Request and result types for merged pagination
//!
//! This module provides the types that flow through a merge: the caller's
//! [`PageRequest`], the [`OriginWindow`] asked of each origin, the
//! [`OriginPage`] an origin answers with, and the assembled [`MergedPage`].
//!
//! # Example
//!
//! ```rust
//! use splice_pager::pagination::{PageRequest, SortDirection, SortOrder};
//!
//! // Second page of 20, newest first
//! let request = PageRequest::of(1, 20).with_sort(SortOrder::desc("timestamp"));
//! assert_eq!(request.page_index, 1);
//! assert_eq!(request.sort.as_ref().map(|s| s.direction), Some(SortDirection::Descending));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort field used when a request does not name one
pub const DEFAULT_SORT_FIELD: &str = "timestamp";

/// Sort direction used when a request does not name one
pub const DEFAULT_SORT_DIRECTION: SortDirection = SortDirection::Descending;

/// Direction for ordering results
///
/// # Example
///
/// ```rust
/// use splice_pager::pagination::SortDirection;
///
/// assert_eq!(format!("{}", SortDirection::Ascending), "asc");
/// assert_eq!(format!("{}", SortDirection::Descending), "desc");
/// assert_eq!(SortDirection::Ascending.reverse(), SortDirection::Descending);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest key first
    #[serde(alias = "asc", alias = "ASC")]
    Ascending,
    /// Largest key first
    #[default]
    #[serde(alias = "desc", alias = "DESC")]
    Descending,
}

impl SortDirection {
    /// The opposite direction
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// A single sort key and its direction
///
/// Only one field governs a request; there is no multi-key sort.
///
/// # Example
///
/// ```rust
/// use splice_pager::pagination::{SortDirection, SortOrder};
///
/// let order = SortOrder::default();
/// assert_eq!(order.field, "timestamp");
/// assert_eq!(order.direction, SortDirection::Descending);
/// assert_eq!(order.to_string(), "timestamp desc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOrder {
    /// Field the origins sort on
    pub field: String,
    /// Direction of the sort
    pub direction: SortDirection,
}

impl SortOrder {
    /// Create a sort order
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Ascending sort on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    /// Descending sort on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_FIELD, DEFAULT_SORT_DIRECTION)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

/// A caller's request for one page of the merged result
///
/// Index and size are signed because they arrive from callers unchecked;
/// the merger rejects `page_size < 1` and `page_index < 0` instead of
/// clamping them. When `sort` is `None` the merger's configured default applies.
///
/// # Example
///
/// ```rust
/// use splice_pager::pagination::PageRequest;
///
/// let first = PageRequest::of(0, 25);
/// let second = first.next();
/// assert_eq!(second.page_index, 1);
/// assert_eq!(second.page_size, 25);
/// assert_eq!(second.previous(), Some(first));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index
    pub page_index: i64,
    /// Number of records per page
    pub page_size: i64,
    /// Sort to apply, or `None` for the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

impl PageRequest {
    /// Request page `page_index` of `page_size` records with the default sort
    #[must_use]
    pub const fn of(page_index: i64, page_size: i64) -> Self {
        Self {
            page_index,
            page_size,
            sort: None,
        }
    }

    /// Set an explicit sort
    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// The request for the following page
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            page_index: self.page_index.saturating_add(1),
            page_size: self.page_size,
            sort: self.sort.clone(),
        }
    }

    /// The request for the preceding page, if there is one
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        (self.page_index > 0).then(|| Self {
            page_index: self.page_index - 1,
            page_size: self.page_size,
            sort: self.sort.clone(),
        })
    }
}

/// The slice requested from one origin for one page
///
/// A `count` of zero means the origin must not be contacted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OriginWindow {
    /// Number of records to skip in the origin's own ordering
    pub offset: u64,
    /// Maximum number of records to return
    pub count: u64,
}

impl OriginWindow {
    /// Create a window
    #[must_use]
    pub const fn new(offset: u64, count: u64) -> Self {
        Self { offset, count }
    }

    /// The window that skips an origin entirely
    #[must_use]
    pub const fn skip() -> Self {
        Self {
            offset: 0,
            count: 0,
        }
    }

    /// Whether this window asks for nothing
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        self.count == 0
    }
}

impl fmt::Display for OriginWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}+{}]", self.offset, self.count)
    }
}

/// One origin's answer to a windowed fetch
///
/// `total_count` is the origin's full size, independent of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginPage<T> {
    /// Records in the requested order, at most the requested count
    pub items: Vec<T>,
    /// Size of the whole origin
    pub total_count: u64,
}

impl<T> OriginPage<T> {
    /// Create an origin page
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    /// A page with no items for an origin of `total_count` records
    pub fn empty(total_count: u64) -> Self {
        Self {
            items: Vec::new(),
            total_count,
        }
    }
}

/// One page drawn from the concatenation of two origins
///
/// # Example
///
/// ```rust
/// use splice_pager::pagination::{MergedPage, SortOrder};
///
/// let page = MergedPage::new(vec![1, 2, 3], 0, 3, 7, SortOrder::default());
/// assert_eq!(page.total_pages(), 3);
/// assert!(page.has_next);
/// assert!(!page.has_previous);
/// assert_eq!(page.next_request().map(|r| r.page_index), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedPage<R> {
    /// Leading-origin records followed by trailing-origin records
    pub content: Vec<R>,
    /// Zero-based index of this page
    pub page_index: u64,
    /// Requested page size
    pub page_size: u64,
    /// Sum of both origins' sizes
    pub total_elements: u64,
    /// Whether at least one record follows this page
    pub has_next: bool,
    /// Whether this is not the first page
    pub has_previous: bool,
    /// Sort the page was resolved with
    pub sort: SortOrder,
}

impl<R> MergedPage<R> {
    /// Assemble a page, deriving `has_next` and `has_previous`
    pub fn new(
        content: Vec<R>,
        page_index: u64,
        page_size: u64,
        total_elements: u64,
        sort: SortOrder,
    ) -> Self {
        let end = page_index
            .saturating_mul(page_size)
            .saturating_add(page_size);
        Self {
            content,
            page_index,
            page_size,
            total_elements,
            has_next: end < total_elements,
            has_previous: page_index > 0,
            sort,
        }
    }

    /// Number of records on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether this page holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of pages of `page_size` needed for `total_elements`
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.page_size)
    }

    /// The request for the following page, when there is one
    #[must_use]
    pub fn next_request(&self) -> Option<PageRequest> {
        self.has_next.then(|| self.request_for(self.page_index + 1))
    }

    /// The request for the preceding page, when there is one
    #[must_use]
    pub fn previous_request(&self) -> Option<PageRequest> {
        self.has_previous
            .then(|| self.request_for(self.page_index - 1))
    }

    fn request_for(&self, page_index: u64) -> PageRequest {
        PageRequest {
            page_index: i64::try_from(page_index).unwrap_or(i64::MAX),
            page_size: i64::try_from(self.page_size).unwrap_or(i64::MAX),
            sort: Some(self.sort.clone()),
        }
    }

    /// Map the content to a new type, keeping the metadata
    pub fn map<U, F>(self, f: F) -> MergedPage<U>
    where
        F: FnMut(R) -> U,
    {
        MergedPage {
            content: self.content.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_elements: self.total_elements,
            has_next: self.has_next,
            has_previous: self.has_previous,
            sort: self.sort,
        }
    }
}
