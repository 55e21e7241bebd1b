//! Merged pagination over two origins
//!
//! A [`Merger`] serves fixed-size pages over the concatenation of two
//! independently paginated origins. Each origin holds a contiguous run of the
//! combined ordering: for a descending sort the primary origin's records come
//! first, for an ascending sort the secondary origin's records do. Records are
//! never interleaved by value.
//!
//! Per page the merger probes both origins for their sizes, plans one window
//! per origin with [`WindowPlan::compute`], fetches the non-empty windows,
//! maps both sides into the shared result type, and concatenates them in role
//! order.
//!
//! # Example
//!
//! ```rust
//! use splice_pager::drive::{ArchivedDrive, LiveDrive};
//! use splice_pager::merger::Merger;
//! use splice_pager::origin::MemoryOrigin;
//! use splice_pager::pagination::{PageRequest, SortOrder};
//!
//! let live = MemoryOrigin::new("live", (0..8).map(LiveDrive::new).collect(), |d| d.timestamp);
//! let archived =
//!     MemoryOrigin::new("archived", (0..8).map(ArchivedDrive::new).collect(), |d| d.timestamp);
//!
//! let request = PageRequest::of(1, 6).with_sort(SortOrder::desc("timestamp"));
//! let page = futures::executor::block_on(Merger::default().merge_page(
//!     &live,
//!     &archived,
//!     |d| d,
//!     LiveDrive::from,
//!     &request,
//! ))
//! .unwrap();
//!
//! assert_eq!(page.len(), 6);
//! assert_eq!(page.total_elements, 16);
//! assert!(page.has_next);
//! ```

use futures::future::try_join;

use crate::config::PagerConfig;
use crate::error::{Error, Result};
use crate::origin::{Origin, OriginSlot};
use crate::pagination::{MergedPage, OriginWindow, PageRequest, SortDirection, SortOrder};

/// The origin whose records come first for `direction`
///
/// Descending pages start with the primary origin, ascending pages with the
/// secondary one.
#[must_use]
pub const fn leading_origin(direction: SortDirection) -> OriginSlot {
    match direction {
        SortDirection::Descending => OriginSlot::Primary,
        SortDirection::Ascending => OriginSlot::Secondary,
    }
}

/// Windows to request from the leading and trailing origin for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlan {
    /// Window into the origin whose records come first
    pub leading: OriginWindow,
    /// Window into the origin whose records come second
    pub trailing: OriginWindow,
    /// Position of the page's first record in the combined ordering
    pub global_start: u64,
    /// One past the position of the page's last possible record
    pub global_end: u64,
    /// Combined size of both origins
    pub total: u64,
}

impl WindowPlan {
    /// Plan the windows for page `page_index` of `page_size` records
    ///
    /// The trailing window never asks for more than the trailing origin
    /// holds. A window that would start past the end of its origin has
    /// `count == 0`.
    #[must_use]
    pub fn compute(leading_size: u64, trailing_size: u64, page_index: u64, page_size: u64) -> Self {
        let total = leading_size.saturating_add(trailing_size);
        let global_start = page_index.saturating_mul(page_size);
        let global_end = global_start.saturating_add(page_size);

        let (leading, trailing) = if global_start >= leading_size {
            (
                OriginWindow::skip(),
                clamped(global_start - leading_size, page_size, trailing_size),
            )
        } else if global_end <= leading_size {
            (OriginWindow::new(global_start, page_size), OriginWindow::skip())
        } else {
            let from_leading = leading_size - global_start;
            (
                OriginWindow::new(global_start, from_leading),
                clamped(0, page_size - from_leading, trailing_size),
            )
        };

        Self {
            leading,
            trailing,
            global_start,
            global_end,
            total,
        }
    }

    /// Number of records the page will hold
    #[must_use]
    pub fn expected_len(&self) -> u64 {
        self.leading.count + self.trailing.count
    }

    /// Whether any record lies beyond this page
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.global_end < self.total
    }
}

fn clamped(offset: u64, wanted: u64, size: u64) -> OriginWindow {
    if offset >= size {
        return OriginWindow::skip();
    }
    OriginWindow::new(offset, wanted.min(size - offset))
}

/// Serves merged pages over a primary and a secondary origin
///
/// The merger holds only its configuration, so one instance can serve any
/// number of concurrent callers against any origins.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    config: PagerConfig,
}

impl Merger {
    /// Create a merger with the given configuration
    pub fn new(config: PagerConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Assemble one page of the combined ordering
    ///
    /// `primary_map` and `secondary_map` convert each origin's records into
    /// the shared result type. A request without a sort uses the configured
    /// default. A page past the end is empty, not an error.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPageRequest`] for a non-positive page size or a
    /// negative page index, before either origin is contacted.
    /// [`Error::OriginUnavailable`] when either origin fails to count or
    /// fetch; no partial page is returned.
    pub async fn merge_page<P, S, R, FP, FS>(
        &self,
        primary: &P,
        secondary: &S,
        primary_map: FP,
        secondary_map: FS,
        request: &PageRequest,
    ) -> Result<MergedPage<R>>
    where
        P: Origin,
        S: Origin,
        FP: FnMut(P::Item) -> R,
        FS: FnMut(S::Item) -> R,
    {
        let (page_index, page_size) = validate(request)?;
        let sort = self.config.resolve_sort(request);

        let (primary_size, secondary_size) = self.count_both(primary, secondary).await?;

        let leading = leading_origin(sort.direction);
        let plan = match leading {
            OriginSlot::Primary => {
                WindowPlan::compute(primary_size, secondary_size, page_index, page_size)
            }
            OriginSlot::Secondary => {
                WindowPlan::compute(secondary_size, primary_size, page_index, page_size)
            }
        };
        let (primary_window, secondary_window) = match leading {
            OriginSlot::Primary => (plan.leading, plan.trailing),
            OriginSlot::Secondary => (plan.trailing, plan.leading),
        };

        tracing::debug!(
            page_index,
            page_size,
            sort = %sort,
            leading = %leading,
            primary_window = %primary_window,
            secondary_window = %secondary_window,
            total = plan.total,
            "Computed merge plan"
        );

        let primary_fetch = fetch_window(
            primary,
            OriginSlot::Primary,
            primary_window,
            primary_size,
            &sort,
        );
        let secondary_fetch = fetch_window(
            secondary,
            OriginSlot::Secondary,
            secondary_window,
            secondary_size,
            &sort,
        );
        let (primary_items, secondary_items) = if self.config.concurrent_fetch {
            try_join(primary_fetch, secondary_fetch).await?
        } else {
            (primary_fetch.await?, secondary_fetch.await?)
        };

        let primary_mapped = primary_items.into_iter().map(primary_map);
        let secondary_mapped = secondary_items.into_iter().map(secondary_map);

        let mut content = Vec::with_capacity(usize::try_from(plan.expected_len()).unwrap_or(0));
        match leading {
            OriginSlot::Primary => {
                content.extend(primary_mapped);
                content.extend(secondary_mapped);
            }
            OriginSlot::Secondary => {
                content.extend(secondary_mapped);
                content.extend(primary_mapped);
            }
        }

        Ok(MergedPage::new(
            content, page_index, page_size, plan.total, sort,
        ))
    }

    async fn count_both<P, S>(&self, primary: &P, secondary: &S) -> Result<(u64, u64)>
    where
        P: Origin,
        S: Origin,
    {
        let primary_count = count(primary, OriginSlot::Primary);
        let secondary_count = count(secondary, OriginSlot::Secondary);
        if self.config.concurrent_fetch {
            try_join(primary_count, secondary_count).await
        } else {
            Ok((primary_count.await?, secondary_count.await?))
        }
    }
}

/// Assemble one page with the default configuration
///
/// Shorthand for [`Merger::merge_page`] on [`Merger::default`].
pub async fn merge_page<P, S, R, FP, FS>(
    primary: &P,
    secondary: &S,
    primary_map: FP,
    secondary_map: FS,
    request: &PageRequest,
) -> Result<MergedPage<R>>
where
    P: Origin,
    S: Origin,
    FP: FnMut(P::Item) -> R,
    FS: FnMut(S::Item) -> R,
{
    Merger::default()
        .merge_page(primary, secondary, primary_map, secondary_map, request)
        .await
}

fn validate(request: &PageRequest) -> Result<(u64, u64)> {
    let page_size = u64::try_from(request.page_size)
        .ok()
        .filter(|size| *size > 0);
    let Some(page_size) = page_size else {
        tracing::error!(page_size = request.page_size, "Rejected page request");
        return Err(Error::invalid_page_request("page size must be positive"));
    };
    let Ok(page_index) = u64::try_from(request.page_index) else {
        tracing::error!(page_index = request.page_index, "Rejected page request");
        return Err(Error::invalid_page_request("page index must be non-negative"));
    };
    Ok((page_index, page_size))
}

async fn count<O: Origin>(origin: &O, slot: OriginSlot) -> Result<u64> {
    origin.total_count().await.map_err(|source| {
        tracing::error!(origin = %slot, error = %source, "Origin count failed");
        Error::origin_unavailable(slot, source)
    })
}

async fn fetch_window<O: Origin>(
    origin: &O,
    slot: OriginSlot,
    window: OriginWindow,
    probed_total: u64,
    sort: &SortOrder,
) -> Result<Vec<O::Item>> {
    if window.is_skip() {
        tracing::debug!(origin = %slot, "Skipping fetch for empty window");
        return Ok(Vec::new());
    }

    let page = origin.fetch(window, sort).await.map_err(|source| {
        tracing::error!(origin = %slot, window = %window, error = %source, "Origin fetch failed");
        Error::origin_unavailable(slot, source)
    })?;

    if page.total_count != probed_total {
        tracing::warn!(
            origin = %slot,
            probed = probed_total,
            reported = page.total_count,
            "Origin size changed between count and fetch"
        );
    }

    let mut items = page.items;
    let requested = usize::try_from(window.count).unwrap_or(usize::MAX);
    if items.len() > requested {
        tracing::warn!(
            origin = %slot,
            requested = window.count,
            returned = items.len(),
            "Origin returned more records than requested, dropping the surplus"
        );
        items.truncate(requested);
    }

    Ok(items)
}
