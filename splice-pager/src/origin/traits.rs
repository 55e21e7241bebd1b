//! Origin trait definition
//!
//! An origin is an independently paginated, sort-ordered record source: a
//! table, a collection, a remote service. The merger only ever asks it for
//! its size and for one window of its records.
//!
//! # Example
//!
//! ```rust,ignore
//! use splice_pager::origin::{Origin, OriginResult};
//! use splice_pager::pagination::{OriginPage, OriginWindow, SortOrder};
//!
//! struct LiveDrives {
//!     pool: PgPool,
//! }
//!
//! impl Origin for LiveDrives {
//!     type Item = LiveDrive;
//!
//!     async fn total_count(&self) -> OriginResult<u64> {
//!         sqlx::query_scalar!("SELECT COUNT(*) FROM live_drives")
//!             .fetch_one(&self.pool)
//!             .await
//!             .map_err(into_origin_error)
//!     }
//!
//!     async fn fetch(&self, window: OriginWindow, sort: &SortOrder) -> OriginResult<OriginPage<LiveDrive>> {
//!         // SELECT ... ORDER BY {sort} OFFSET {window.offset} LIMIT {window.count}
//!         todo!()
//!     }
//! }
//! ```

use std::future::Future;

use super::error::OriginError;
use crate::pagination::{OriginPage, OriginWindow, SortOrder};

/// Result type for origin operations
pub type OriginResult<T> = std::result::Result<T, OriginError>;

/// A paginated, sort-ordered record source
///
/// Implementations are read-only against their backing store. Retry policy,
/// if any, belongs here and not in the merger.
pub trait Origin: Send + Sync {
    /// Native record type of this origin
    type Item: Send;

    /// Current number of records in this origin
    fn total_count(&self) -> impl Future<Output = OriginResult<u64>> + Send;

    /// Fetch up to `window.count` records starting at `window.offset`, in
    /// `sort` order
    ///
    /// An offset at or past the end yields an empty page carrying the correct
    /// `total_count`, not an error. A zero count must return an empty page
    /// without querying the backing store.
    fn fetch(
        &self,
        window: OriginWindow,
        sort: &SortOrder,
    ) -> impl Future<Output = OriginResult<OriginPage<Self::Item>>> + Send;
}

impl<O: Origin + ?Sized> Origin for &O {
    type Item = O::Item;

    fn total_count(&self) -> impl Future<Output = OriginResult<u64>> + Send {
        (**self).total_count()
    }

    fn fetch(
        &self,
        window: OriginWindow,
        sort: &SortOrder,
    ) -> impl Future<Output = OriginResult<OriginPage<Self::Item>>> + Send {
        (**self).fetch(window, sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::error::OriginOperation;

    #[test]
    fn test_origin_result_type() {
        let ok_result: OriginResult<u64> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: OriginResult<u64> = Err(OriginError::timeout(
            OriginOperation::Count,
            "timed out",
        ));
        assert!(err_result.is_err());
    }

    struct FixedOrigin {
        values: Vec<u32>,
    }

    impl Origin for FixedOrigin {
        type Item = u32;

        async fn total_count(&self) -> OriginResult<u64> {
            Ok(self.values.len() as u64)
        }

        async fn fetch(
            &self,
            window: OriginWindow,
            _sort: &SortOrder,
        ) -> OriginResult<OriginPage<u32>> {
            let items = self
                .values
                .iter()
                .skip(window.offset as usize)
                .take(window.count as usize)
                .copied()
                .collect();
            Ok(OriginPage::new(items, self.values.len() as u64))
        }
    }

    #[tokio::test]
    async fn test_origin_can_be_implemented() {
        let origin = FixedOrigin {
            values: vec![1, 2, 3, 4],
        };
        assert_eq!(origin.total_count().await.unwrap(), 4);

        let page = origin
            .fetch(OriginWindow::new(1, 2), &SortOrder::default())
            .await
            .unwrap();
        assert_eq!(page.items, vec![2, 3]);
        assert_eq!(page.total_count, 4);
    }

    #[tokio::test]
    async fn test_origin_reference_forwards() {
        let origin = FixedOrigin { values: vec![7, 8] };
        let by_ref = &origin;
        assert_eq!(by_ref.total_count().await.unwrap(), 2);
        let page = by_ref
            .fetch(OriginWindow::new(5, 1), &SortOrder::default())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 2);
    }
}
