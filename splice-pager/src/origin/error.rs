//! Origin error types
//!
//! Structured errors reported by an [`Origin`](super::Origin) when its
//! backing store cannot answer a count or fetch.
//!
//! # Example
//!
//! ```rust
//! use splice_pager::origin::{OriginError, OriginErrorKind, OriginOperation};
//!
//! let error = OriginError::connection_failed(OriginOperation::Fetch, "connection refused")
//!     .with_origin("archived_drives");
//! assert!(matches!(error.kind, OriginErrorKind::ConnectionFailed));
//! assert!(error.is_retriable());
//! ```

use std::fmt;

/// Origin call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginOperation {
    /// Reporting the origin's total size
    Count,
    /// Fetching a window of records
    Fetch,
}

impl fmt::Display for OriginOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::Fetch => write!(f, "fetch"),
        }
    }
}

/// Declared position of an origin in a merge call
///
/// The primary origin holds the records considered newer (the "live" set);
/// the secondary origin holds the older ones (the "archived" set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginSlot {
    /// First-declared origin
    Primary,
    /// Second-declared origin
    Secondary,
}

impl fmt::Display for OriginSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// Category of origin error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginErrorKind {
    /// Backing store could not be reached
    ConnectionFailed,
    /// Backing store did not answer in time
    Timeout,
    /// Backing store rejected or failed the query
    QueryFailed,
    /// Other unclassified error
    Other,
}

impl fmt::Display for OriginErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::QueryFailed => write!(f, "query_failed"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured origin error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginError {
    /// The call being made when the error occurred
    pub operation: OriginOperation,
    /// The category of error
    pub kind: OriginErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Name of the origin (e.g., "live_drives")
    pub origin: Option<String>,
}

impl OriginError {
    /// Create a new origin error
    pub fn new(
        operation: OriginOperation,
        kind: OriginErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            origin: None,
        }
    }

    /// Create a connection failed error
    pub fn connection_failed(operation: OriginOperation, message: impl Into<String>) -> Self {
        Self::new(operation, OriginErrorKind::ConnectionFailed, message)
    }

    /// Create a timeout error
    pub fn timeout(operation: OriginOperation, message: impl Into<String>) -> Self {
        Self::new(operation, OriginErrorKind::Timeout, message)
    }

    /// Create a query failed error
    pub fn query_failed(operation: OriginOperation, message: impl Into<String>) -> Self {
        Self::new(operation, OriginErrorKind::QueryFailed, message)
    }

    /// Name the origin that failed
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Check if this error is transient
    ///
    /// The merger never retries; this is for callers deciding whether to.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            OriginErrorKind::ConnectionFailed | OriginErrorKind::Timeout
        )
    }
}

impl fmt::Display for OriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Origin {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(ref origin) = self.origin {
            write!(f, " [{}]", origin)?;
        }
        Ok(())
    }
}

impl std::error::Error for OriginError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_operation_display() {
        assert_eq!(format!("{}", OriginOperation::Count), "count");
        assert_eq!(format!("{}", OriginOperation::Fetch), "fetch");
    }

    #[test]
    fn test_origin_slot_display() {
        assert_eq!(format!("{}", OriginSlot::Primary), "primary");
        assert_eq!(format!("{}", OriginSlot::Secondary), "secondary");
    }

    #[test]
    fn test_origin_error_kind_display() {
        assert_eq!(
            format!("{}", OriginErrorKind::ConnectionFailed),
            "connection_failed"
        );
        assert_eq!(format!("{}", OriginErrorKind::Timeout), "timeout");
        assert_eq!(format!("{}", OriginErrorKind::QueryFailed), "query_failed");
        assert_eq!(format!("{}", OriginErrorKind::Other), "other");
    }

    #[test]
    fn test_convenience_constructors() {
        let error = OriginError::timeout(OriginOperation::Count, "slow");
        assert_eq!(error.operation, OriginOperation::Count);
        assert_eq!(error.kind, OriginErrorKind::Timeout);

        let error = OriginError::query_failed(OriginOperation::Fetch, "bad cursor");
        assert_eq!(error.kind, OriginErrorKind::QueryFailed);
        assert!(error.origin.is_none());
    }

    #[test]
    fn test_is_retriable() {
        assert!(OriginError::connection_failed(OriginOperation::Fetch, "down").is_retriable());
        assert!(OriginError::timeout(OriginOperation::Count, "slow").is_retriable());
        assert!(!OriginError::query_failed(OriginOperation::Fetch, "syntax").is_retriable());
        assert!(
            !OriginError::new(OriginOperation::Fetch, OriginErrorKind::Other, "?").is_retriable()
        );
    }

    #[test]
    fn test_display_without_origin() {
        let error = OriginError::query_failed(OriginOperation::Fetch, "Query failed");
        let display = format!("{}", error);
        assert!(display.contains("query_failed"));
        assert!(display.contains("fetch"));
        assert!(!display.contains('['));
    }

    #[test]
    fn test_display_with_origin() {
        let error =
            OriginError::connection_failed(OriginOperation::Count, "refused").with_origin("live");
        assert!(format!("{}", error).ends_with("[live]"));
    }

    #[test]
    fn test_error_is_error_trait() {
        let error: Box<dyn std::error::Error> =
            Box::new(OriginError::timeout(OriginOperation::Fetch, "slow"));
        assert!(error.to_string().contains("timeout"));
    }
}
