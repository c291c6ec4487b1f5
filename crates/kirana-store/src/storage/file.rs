//! # File Slot Storage
//!
//! One JSON file per slot inside a data directory.
//!
//! ```text
//! <data_dir>/
//! ├── kirana_items.json
//! ├── kirana_sales.json
//! ├── kirana_udhaar.json
//! ├── kirana_expenses.json
//! └── kirana_settings.json
//! ```
//!
//! Writes go to `<key>.json.tmp` first and are renamed over the slot file, so
//! a crash mid-write leaves the previous payload intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::SlotStorage;
use crate::error::{StorageError, StorageResult};

/// Directory-backed slots.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (creating if needed) a data directory.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(dir.display().to_string(), e))?;
        info!(path = %dir.display(), "Opened data directory");
        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a slot.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn check_key(key: &str) -> StorageResult<()> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(())
        } else {
            Err(StorageError::rejected(key, "invalid slot key"))
        }
    }
}

impl SlotStorage for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Self::check_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn write(&mut self, key: &str, payload: &str) -> StorageResult<()> {
        Self::check_key(key)?;
        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));

        fs::write(&tmp, payload).map_err(|e| StorageError::io(key, e))?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::io(key, e));
        }

        debug!(key = %key, bytes = payload.len(), "Slot written");
        Ok(())
    }
}
