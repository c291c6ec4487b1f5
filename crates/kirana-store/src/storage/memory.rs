//! In-process slot storage.
//!
//! Clones share the same map, so a test can keep a handle on the storage it
//! handed to a `Store` and inspect or sabotage it afterwards.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::SlotStorage;
use crate::error::{StorageError, StorageResult};

#[derive(Debug, Default)]
struct Inner {
    slots: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

/// Shared in-memory slots with an optional simulated write failure.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Makes every subsequent write fail (quota exceeded, disk full).
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Plants a raw payload, bypassing encoding.
    pub fn insert_raw(&self, key: &str, payload: &str) {
        self.lock()
            .slots
            .insert(key.to_string(), payload.to_string());
    }

    /// Current raw payload of a slot.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().slots.get(key).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn write(&mut self, key: &str, payload: &str) -> StorageResult<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(StorageError::rejected(key, "simulated write failure"));
        }
        inner.slots.insert(key.to_string(), payload.to_string());
        inner.writes += 1;
        Ok(())
    }
}
