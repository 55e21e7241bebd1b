//! Drive records
//!
//! The two record shapes merged in practice: drives still in progress
//! ([`LiveDrive`]) and drives that have ended and been archived
//! ([`ArchivedDrive`]). Both sort on `timestamp`. A translated record keeps
//! the [`DriveType`] of the origin it came from, so provenance survives
//! the merge.
//!
//! # Example
//!
//! ```rust
//! use splice_pager::drive::{ArchivedDrive, DriveType, LiveDrive};
//!
//! let live: LiveDrive = ArchivedDrive::new(1_700_000_000).into();
//! assert_eq!(live.kind, DriveType::Archived);
//! assert_eq!(live.timestamp, 1_700_000_000);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which origin a drive record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveType {
    /// Ongoing drive
    Live,
    /// Ended, archived drive
    Archived,
}

impl fmt::Display for DriveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// An ongoing drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiveDrive {
    /// Provenance tag
    #[serde(rename = "type")]
    pub kind: DriveType,
    /// Sort key
    pub timestamp: i64,
}

impl LiveDrive {
    /// A live drive tagged [`DriveType::Live`]
    #[must_use]
    pub const fn new(timestamp: i64) -> Self {
        Self {
            kind: DriveType::Live,
            timestamp,
        }
    }
}

/// A drive that has ended and been archived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchivedDrive {
    /// Provenance tag
    #[serde(rename = "type")]
    pub kind: DriveType,
    /// Sort key
    pub timestamp: i64,
}

impl ArchivedDrive {
    /// An archived drive tagged [`DriveType::Archived`]
    #[must_use]
    pub const fn new(timestamp: i64) -> Self {
        Self {
            kind: DriveType::Archived,
            timestamp,
        }
    }
}

impl From<ArchivedDrive> for LiveDrive {
    fn from(drive: ArchivedDrive) -> Self {
        Self {
            kind: drive.kind,
            timestamp: drive.timestamp,
        }
    }
}

impl From<LiveDrive> for ArchivedDrive {
    fn from(drive: LiveDrive) -> Self {
        Self {
            kind: drive.kind,
            timestamp: drive.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_tag_provenance() {
        assert_eq!(LiveDrive::new(5).kind, DriveType::Live);
        assert_eq!(ArchivedDrive::new(5).kind, DriveType::Archived);
    }

    #[test]
    fn test_archived_to_live_keeps_archived_tag() {
        let live = LiveDrive::from(ArchivedDrive::new(42));
        assert_eq!(
            live,
            LiveDrive {
                kind: DriveType::Archived,
                timestamp: 42
            }
        );
    }

    #[test]
    fn test_live_to_archived_keeps_live_tag() {
        let archived = ArchivedDrive::from(LiveDrive::new(7));
        assert_eq!(archived.kind, DriveType::Live);
        assert_eq!(archived.timestamp, 7);
    }

    #[test]
    fn test_serializes_type_field() {
        let json = serde_json::to_value(LiveDrive::new(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "live", "timestamp": 3 }));
    }
}
