//! In-memory origin
//!
//! [`MemoryOrigin`] keeps its records sorted ascending by a caller-supplied
//! key and serves windows in either direction. It counts the calls that
//! actually reached its data and can be switched offline, which makes it the
//! origin of choice for tests and for small fixed datasets.
//!
//! # Example
//!
//! ```rust
//! use splice_pager::origin::MemoryOrigin;
//!
//! let origin = MemoryOrigin::new("numbers", vec![3, 1, 2], |n: &i32| *n);
//! assert_eq!(origin.len(), 3);
//! assert_eq!(origin.name(), "numbers");
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::error::{OriginError, OriginOperation};
use super::traits::{Origin, OriginResult};
use crate::pagination::{OriginPage, OriginWindow, SortDirection, SortOrder};

/// Origin backed by a sorted `Vec`
pub struct MemoryOrigin<T> {
    name: String,
    records: Vec<T>,
    offline: AtomicBool,
    count_calls: AtomicU64,
    fetch_calls: AtomicU64,
}

impl<T> MemoryOrigin<T> {
    /// Create an origin holding `records`, sorted ascending by `key`
    ///
    /// The sort is stable, so records with equal keys keep their input order.
    pub fn new<K, F>(name: impl Into<String>, mut records: Vec<T>, key: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        records.sort_by_key(key);
        Self {
            name: name.into(),
            records,
            offline: AtomicBool::new(false),
            count_calls: AtomicU64::new(0),
            fetch_calls: AtomicU64::new(0),
        }
    }

    /// Name used in errors and logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the origin holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Simulate the backing store going away (or coming back)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `total_count` calls served
    pub fn count_calls(&self) -> u64 {
        self.count_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch` calls that reached the records
    ///
    /// Zero-count fetches return before touching the records and are not
    /// counted.
    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn ensure_online(&self, operation: OriginOperation) -> OriginResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(
                OriginError::connection_failed(operation, "origin is offline")
                    .with_origin(self.name.clone()),
            );
        }
        Ok(())
    }
}

impl<T: Clone> MemoryOrigin<T> {
    fn window(&self, window: OriginWindow, direction: SortDirection) -> Vec<T> {
        let len = self.records.len() as u64;
        if window.offset >= len {
            return Vec::new();
        }
        let count = window.count.min(len - window.offset) as usize;
        let offset = window.offset as usize;
        match direction {
            SortDirection::Ascending => self.records[offset..offset + count].to_vec(),
            SortDirection::Descending => self
                .records
                .iter()
                .rev()
                .skip(offset)
                .take(count)
                .cloned()
                .collect(),
        }
    }
}

impl<T> fmt::Debug for MemoryOrigin<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryOrigin")
            .field("name", &self.name)
            .field("len", &self.records.len())
            .field("offline", &self.offline.load(Ordering::SeqCst))
            .finish()
    }
}

impl<T: Clone + Send + Sync> Origin for MemoryOrigin<T> {
    type Item = T;

    async fn total_count(&self) -> OriginResult<u64> {
        self.ensure_online(OriginOperation::Count)?;
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.len() as u64)
    }

    async fn fetch(&self, window: OriginWindow, sort: &SortOrder) -> OriginResult<OriginPage<T>> {
        let total = self.records.len() as u64;
        if window.is_skip() {
            return Ok(OriginPage::empty(total));
        }
        self.ensure_online(OriginOperation::Fetch)?;
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(OriginPage::new(self.window(window, sort.direction), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::error::OriginErrorKind;

    fn numbers() -> MemoryOrigin<u32> {
        MemoryOrigin::new("numbers", vec![4, 0, 3, 1, 2], |n| *n)
    }

    #[tokio::test]
    async fn test_fetch_ascending() {
        let origin = numbers();
        let page = origin
            .fetch(OriginWindow::new(1, 3), &SortOrder::asc("n"))
            .await
            .unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total_count, 5);
    }

    #[tokio::test]
    async fn test_fetch_descending() {
        let origin = numbers();
        let page = origin
            .fetch(OriginWindow::new(1, 3), &SortOrder::desc("n"))
            .await
            .unwrap();
        assert_eq!(page.items, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_fetch_truncates_at_end() {
        let origin = numbers();
        let page = origin
            .fetch(OriginWindow::new(3, 10), &SortOrder::desc("n"))
            .await
            .unwrap();
        assert_eq!(page.items, vec![1, 0]);
    }

    #[tokio::test]
    async fn test_fetch_past_end_is_empty_not_error() {
        let origin = numbers();
        let page = origin
            .fetch(OriginWindow::new(5, 2), &SortOrder::asc("n"))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
        assert_eq!(origin.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_count_does_not_touch_records() {
        let origin = numbers();
        origin.set_offline(true);
        let page = origin
            .fetch(OriginWindow::skip(), &SortOrder::asc("n"))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
        assert_eq!(origin.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_offline_origin_fails() {
        let origin = numbers();
        origin.set_offline(true);

        let err = origin.total_count().await.unwrap_err();
        assert_eq!(err.kind, OriginErrorKind::ConnectionFailed);
        assert_eq!(err.operation, OriginOperation::Count);
        assert_eq!(err.origin.as_deref(), Some("numbers"));

        let err = origin
            .fetch(OriginWindow::new(0, 1), &SortOrder::default())
            .await
            .unwrap_err();
        assert_eq!(err.operation, OriginOperation::Fetch);

        origin.set_offline(false);
        assert_eq!(origin.total_count().await.unwrap(), 5);
        assert_eq!(origin.count_calls(), 1);
    }

    #[test]
    fn test_stable_sort_keeps_input_order_for_equal_keys() {
        let origin = MemoryOrigin::new("pairs", vec![(1, 'b'), (0, 'x'), (1, 'a')], |p| p.0);
        assert_eq!(
            origin.window(OriginWindow::new(0, 3), SortDirection::Ascending),
            vec![(0, 'x'), (1, 'b'), (1, 'a')]
        );
    }

    #[test]
    fn test_debug_omits_records() {
        let debug = format!("{:?}", numbers());
        assert!(debug.contains("numbers"));
        assert!(debug.contains("len: 5"));
    }
}
