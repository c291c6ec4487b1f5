//! # Slot Storage
//!
//! Named JSON slots behind a small trait, plus the load/save policy the
//! store relies on.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Persistence Layers                                   │
//! │                                                                         │
//! │  Store                                                                 │
//! │       │  persistence.save(Collection::Sales.key(), &sales)             │
//! │       ▼                                                                 │
//! │  Persistence<S>  ← JSON encode/decode, fallback, warn! and swallow     │
//! │       │                                                                 │
//! │       │  backend.write("kirana_sales", "[...]")                        │
//! │       ▼                                                                 │
//! │  SlotStorage                                                           │
//! │  ├── FileStorage    <data_dir>/kirana_sales.json                       │
//! │  └── MemoryStorage  HashMap (tests, previews)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! Neither `load` nor `save` ever returns an error to the store. A missing or
//! unparseable slot yields the fallback; a failed write is logged and the
//! in-memory state stays authoritative for the rest of the session.

pub mod file;
pub mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};

pub use file::FileStorage;
pub use memory::MemoryStorage;

// =============================================================================
// Backend Trait
// =============================================================================

/// A key/value medium holding one text payload per slot.
pub trait SlotStorage {
    /// Returns the raw payload, or `None` if the slot was never written.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the slot's payload.
    fn write(&mut self, key: &str, payload: &str) -> StorageResult<()>;
}

// =============================================================================
// Collections
// =============================================================================

/// The five persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Items,
    Sales,
    Udhaar,
    Expenses,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Items,
        Collection::Sales,
        Collection::Udhaar,
        Collection::Expenses,
        Collection::Settings,
    ];

    /// Slot key. Stable across releases; existing data files depend on it.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Items => "kirana_items",
            Collection::Sales => "kirana_sales",
            Collection::Udhaar => "kirana_udhaar",
            Collection::Expenses => "kirana_expenses",
            Collection::Settings => "kirana_settings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Persistence
// =============================================================================

/// JSON load/save over a [`SlotStorage`] backend.
#[derive(Debug)]
pub struct Persistence<S> {
    backend: S,
}

impl<S: SlotStorage> Persistence<S> {
    pub fn new(backend: S) -> Self {
        Persistence { backend }
    }

    /// Reads and decodes a slot, surfacing every failure.
    ///
    /// `Ok(None)` means the slot is absent.
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(raw) = self.backend.read(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    /// Reads a slot, returning `fallback` when it is absent or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key = %key, "Slot empty, using fallback");
                fallback
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Slot unreadable, using fallback");
                fallback
            }
        }
    }

    /// Encodes and writes a slot. Returns whether the write landed.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match self.try_save(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "Slot write failed, keeping in-memory state");
                false
            }
        }
    }

    fn try_save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StorageResult<()> {
        let payload = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.write(key, &payload)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keys() {
        let keys: Vec<&str> = Collection::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            [
                "kirana_items",
                "kirana_sales",
                "kirana_udhaar",
                "kirana_expenses",
                "kirana_settings"
            ]
        );
        assert_eq!(Collection::Udhaar.to_string(), "kirana_udhaar");
    }

    #[test]
    fn test_load_missing_slot_returns_fallback() {
        let persistence = Persistence::new(MemoryStorage::new());
        let value: Vec<u32> = persistence.load("kirana_sales", vec![7]);
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_load_corrupt_slot_returns_fallback() {
        let storage = MemoryStorage::new();
        storage.insert_raw("kirana_sales", "{not json");
        let persistence = Persistence::new(storage);

        let value: Vec<u32> = persistence.load("kirana_sales", Vec::new());
        assert!(value.is_empty());
        assert!(matches!(
            persistence.try_load::<Vec<u32>>("kirana_sales"),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let mut persistence = Persistence::new(MemoryStorage::new());
        assert!(persistence.save("kirana_expenses", &vec![1, 2, 3]));

        let value: Vec<u32> = persistence.load("kirana_expenses", Vec::new());
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_failed_save_is_swallowed() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        let mut persistence = Persistence::new(storage);

        assert!(!persistence.save("kirana_items", &vec![1]));
        assert_eq!(persistence.backend().raw("kirana_items"), None);
    }
}
