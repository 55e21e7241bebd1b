//! Error types and status code mapping

use http::StatusCode;
use thiserror::Error;

use crate::origin::{OriginError, OriginSlot};

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for merged pagination
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Caller-supplied page index or size is out of range
    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    /// An origin failed to count or fetch; no partial page is produced
    #[error("Origin unavailable ({origin}): {source}")]
    OriginUnavailable {
        /// Which declared origin failed
        origin: OriginSlot,
        /// The origin's own error
        #[source]
        source: OriginError,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid page request error
    pub fn invalid_page_request(message: impl Into<String>) -> Self {
        Self::InvalidPageRequest(message.into())
    }

    /// Wrap an origin failure
    pub fn origin_unavailable(origin: OriginSlot, source: OriginError) -> Self {
        Self::OriginUnavailable { origin, source }
    }

    /// HTTP status a service wrapping this crate should answer with
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPageRequest(_) => StatusCode::BAD_REQUEST,
            Self::OriginUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidPageRequest(_) => "INVALID_PAGE_REQUEST",
            Self::OriginUnavailable { .. } => "ORIGIN_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller is at fault
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
