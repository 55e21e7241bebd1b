//! # splice-pager
//!
//! Merged pagination over two independently paginated, sort-ordered record
//! origins. Callers page through the union of a "live" and an "archived"
//! store as if it were one sorted list, while each store is queried only for
//! the slice that lands on the requested page.
//!
//! ## Features
//!
//! - **Window planning**: one bounded fetch per origin per page, none for an origin with nothing on it
//! - **Role ordering**: descending pages lead with the primary origin, ascending pages with the secondary
//! - **Fail fast**: an origin failure fails the page; no partial page is returned
//! - **Configuration**: default sort and page size via figment (files + `SPLICE_` env vars)
//! - **Observability**: structured tracing of plans, skipped windows and origin inconsistencies
//!
//! ## Example
//!
//! ```rust,no_run
//! use splice_pager::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!
//!     // Initialize tracing
//!     init_tracing(&config)?;
//!
//!     let live = MemoryOrigin::new("live", vec![LiveDrive::new(3), LiveDrive::new(9)], |d| d.timestamp);
//!     let archived = MemoryOrigin::new("archived", vec![ArchivedDrive::new(1)], |d| d.timestamp);
//!
//!     let merger = Merger::new(config.pager.clone());
//!     let page = merger
//!         .merge_page(&live, &archived, |d| d, LiveDrive::from, &config.pager.default_request(0))
//!         .await?;
//!
//!     tracing::info!(records = page.len(), total = page.total_elements, "Served page");
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod drive;
pub mod error;
pub mod merger;
pub mod observability;
pub mod origin;
pub mod pagination;

pub mod prelude {
    pub use crate::config::{Config, PagerConfig, ServiceConfig};
    pub use crate::drive::{ArchivedDrive, DriveType, LiveDrive};
    pub use crate::error::{Error, Result};
    pub use crate::merger::{leading_origin, merge_page, Merger, WindowPlan};
    pub use crate::observability::init_tracing;
    pub use crate::origin::{
        MemoryOrigin, Origin, OriginError, OriginErrorKind, OriginOperation, OriginResult,
        OriginSlot,
    };
    pub use crate::pagination::{
        MergedPage, OriginPage, OriginWindow, PageRequest, SortDirection, SortOrder,
        DEFAULT_SORT_DIRECTION, DEFAULT_SORT_FIELD,
    };
}
