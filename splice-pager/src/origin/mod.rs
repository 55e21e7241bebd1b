//! Origin contract for paginated record sources
//!
//! This module provides the trait the merger consumes, the structured error
//! an origin fails with, and an in-memory implementation.
//!
//! # Features
//!
//! - **Contract**: [`Origin`] reports its size and serves one window of its
//!   sorted records
//! - **Errors**: [`OriginError`] carries the failed call and a retriability hint
//! - **In-memory**: [`MemoryOrigin`] for tests and small fixed datasets
//!
//! # Example
//!
//! ```rust
//! use splice_pager::origin::{MemoryOrigin, Origin};
//! use splice_pager::pagination::{OriginWindow, SortOrder};
//!
//! let origin = MemoryOrigin::new("drives", vec![10_i64, 30, 20], |ts| *ts);
//! let page = futures::executor::block_on(
//!     origin.fetch(OriginWindow::new(0, 2), &SortOrder::desc("timestamp")),
//! )
//! .unwrap();
//! assert_eq!(page.items, vec![30, 20]);
//! assert_eq!(page.total_count, 3);
//! ```

mod error;
mod memory;
mod traits;

pub use error::{OriginError, OriginErrorKind, OriginOperation, OriginSlot};
pub use memory::MemoryOrigin;
pub use traits::{Origin, OriginResult};
