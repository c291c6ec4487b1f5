//! # Store Error Types
//!
//! Errors raised below the entity store.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds the slot key                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Persistence::load / save ← logs warn!, swallows                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store keeps working in memory                                         │
//! │                                                                         │
//! │  PrintSurface failure ──► PrintError ──► Printer logs warn!, no-op     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Caller-facing validation failures are `kirana_core::CoreError`; nothing in
//! this module ever reaches the UI.

use thiserror::Error;

/// Slot read/write failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing medium failed (disk full, permissions, missing dir).
    #[error("I/O error on slot '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The slot held text that does not parse as the expected shape.
    #[error("Corrupt payload in slot '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded.
    #[error("Failed to encode slot '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the write (quota, simulated failure).
    #[error("Write rejected for slot '{key}': {reason}")]
    Rejected { key: String, reason: String },
}

impl StorageError {
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.into(),
            source,
        }
    }

    pub fn rejected(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::Rejected {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Print surface failures.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Print surface unavailable: {0}")]
    Unavailable(String),

    #[error("Print I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for slot operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_slot() {
        let err = StorageError::rejected("kirana_sales", "quota exceeded");
        assert_eq!(
            err.to_string(),
            "Write rejected for slot 'kirana_sales': quota exceeded"
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(StorageError::io("kirana_items", io)
            .to_string()
            .contains("kirana_items"));
    }
}
