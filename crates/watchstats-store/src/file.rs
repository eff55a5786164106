//! Directory-backed store: one `<key>.json` file per entry.
//!
//! Writes go to a temporary sibling first and are renamed into place, so an
//! interrupted write never leaves a truncated entry behind.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::quota::{entry_size, reserve};
use crate::{KeyValueStore, StoreError};

const ENTRY_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    capacity: u64,
    sizes: HashMap<String, u64>,
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
        })
    }
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// Existing entries are indexed so the quota reflects what is already
    /// on disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created or read.
    pub fn open(dir: impl Into<PathBuf>, capacity: u64) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

        let mut sizes = HashMap::new();
        for entry in std::fs::read_dir(&dir).map_err(|e| io_error(&dir, e))? {
            let entry = entry.map_err(|e| io_error(&dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if validate_key(key).is_err() {
                continue;
            }
            let len = entry.metadata().map_err(|e| io_error(&path, e))?.len();
            sizes.insert(key.to_string(), key.len() as u64 + len);
        }

        let store = Self {
            dir,
            capacity,
            sizes,
        };
        tracing::debug!(
            dir = %store.dir.display(),
            entries = store.sizes.len(),
            used_bytes = store.used_bytes(),
            capacity,
            "file store opened"
        );
        Ok(store)
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    #[must_use]
    pub fn used_bytes(&self) -> u64 {
        self.sizes.values().sum()
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{ENTRY_EXTENSION}"))
    }
}

impl KeyValueStore for FileStore {
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let old = self.sizes.get(key).copied().unwrap_or(0);
        let size = entry_size(key, value);
        reserve(key, self.used_bytes(), old, size, self.capacity)?;

        let path = self.entry_path(key);
        let temp = path.with_extension(format!("{ENTRY_EXTENSION}.{TEMP_EXTENSION}"));
        std::fs::write(&temp, value).map_err(|e| io_error(&temp, e))?;
        if let Err(e) = std::fs::rename(&temp, &path) {
            if let Err(cleanup) = std::fs::remove_file(&temp) {
                tracing::warn!(path = %temp.display(), error = %cleanup, "failed to remove temp entry");
            }
            return Err(io_error(&path, e));
        }

        self.sizes.insert(key.to_string(), size);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let path = self.entry_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let path = self.entry_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(io_error(&path, e)),
        }
        self.sizes.remove(key);
        Ok(())
    }
}
