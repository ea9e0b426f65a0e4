//! # Storage Error Types
//!
//! Error types for the key-value backing and the persisted record.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / record checks                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds the key and categorization          │
//! │       │                                                                 │
//! │       ├──► Backend callers (tests, CLI `reset`) get Result<_, _>       │
//! │       │                                                                 │
//! │       └──► QuotationStore swallows it: logs, keeps it as               │
//! │            last_persist_error, calls the failure listener              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store operations never return these errors. A failed write leaves the
//! in-memory state authoritative for the rest of the session.

use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    /// - Record file removed mid-rename
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be encoded or decoded.
    #[error("Stored record is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The record parsed but holds state that cannot exist (e.g. a
    /// quotation line with no quantity).
    #[error("Stored record is invalid: {0}")]
    InvalidRecord(String),

    /// The record was written by a newer version of the application.
    #[error("Stored record version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The key cannot be mapped onto the backing (e.g. a path separator).
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// The backing is unavailable (e.g. poisoned lock on the memory store).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StorageError::UnsupportedVersion {
            found: 3,
            supported: 0,
        };
        assert_eq!(
            err.to_string(),
            "Stored record version 3 is newer than supported version 0"
        );

        let err = StorageError::InvalidRecord("quotation QT-1-x has a line with quantity 0".into());
        assert_eq!(
            err.to_string(),
            "Stored record is invalid: quotation QT-1-x has a line with quantity 0"
        );

        let err = StorageError::InvalidKey("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid storage key: '../etc'");
    }

    #[test]
    fn test_io_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
