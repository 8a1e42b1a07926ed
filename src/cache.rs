// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Cache Store
//!
//! The cache is an opaque byte blob under a fixed key plus its modification
//! time. [`FileCache`] stores it on disk; [`MemoryCache`] keeps it in process
//! with a settable timestamp.

use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::errors::{InventoryError, InventoryResult};
use crate::staleness::CacheState;

/// Default on-disk location of the inventory cache
pub const DEFAULT_CACHE_PATH: &str = "/tmp/ansible-inventory.cache";

/// Byte-blob store holding the last built inventory
pub trait CacheStore: Send + Sync {
    /// Cached bytes, or `None` when nothing has been written
    fn read(&self) -> InventoryResult<Option<Vec<u8>>>;

    /// Replace the cached bytes
    fn write(&self, bytes: &[u8]) -> InventoryResult<()>;

    /// Modification time of the cached bytes, or `None` when absent
    fn modified(&self) -> InventoryResult<Option<DateTime<Utc>>>;

    /// Size of the cached bytes, `0` when absent
    fn size(&self) -> InventoryResult<u64>;

    /// Snapshot of existence, size and modification time
    fn state(&self) -> InventoryResult<CacheState> {
        match self.modified()? {
            Some(modified) => Ok(CacheState::present(self.size()?, modified)),
            None => Ok(CacheState::missing()),
        }
    }
}

/// Cache stored as a single file
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn metadata(&self) -> InventoryResult<Option<fs::Metadata>> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.is_file() => Ok(Some(meta)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(cache_error(&self.path, "stat", e)),
        }
    }
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_PATH)
    }
}

fn cache_error(path: &Path, action: &str, err: std::io::Error) -> InventoryError {
    InventoryError::CacheIo(format!("failed to {} {}: {}", action, path.display(), err))
}

impl CacheStore for FileCache {
    fn read(&self) -> InventoryResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                debug!(path = %self.path.display(), bytes = bytes.len(), "Read inventory cache");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(cache_error(&self.path, "read", e)),
        }
    }

    fn write(&self, bytes: &[u8]) -> InventoryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| cache_error(parent, "create", e))?;
        }
        fs::write(&self.path, bytes).map_err(|e| cache_error(&self.path, "write", e))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Wrote inventory cache");
        Ok(())
    }

    fn modified(&self) -> InventoryResult<Option<DateTime<Utc>>> {
        let Some(meta) = self.metadata()? else {
            return Ok(None);
        };
        let modified = meta
            .modified()
            .map_err(|e| cache_error(&self.path, "stat", e))?;
        Ok(Some(DateTime::<Utc>::from(modified)))
    }

    fn size(&self) -> InventoryResult<u64> {
        Ok(self.metadata()?.map(|meta| meta.len()).unwrap_or(0))
    }
}

#[derive(Debug, Default)]
struct MemoryEntry {
    bytes: Option<Vec<u8>>,
    modified: Option<DateTime<Utc>>,
}

/// In-process cache; writes are stamped with the current time
#[derive(Debug, Default)]
pub struct MemoryCache {
    entry: Mutex<MemoryEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-populated with `bytes` written at `modified`
    pub fn with_contents(bytes: impl Into<Vec<u8>>, modified: DateTime<Utc>) -> Self {
        Self {
            entry: Mutex::new(MemoryEntry {
                bytes: Some(bytes.into()),
                modified: Some(modified),
            }),
        }
    }

    fn lock(&self) -> InventoryResult<MutexGuard<'_, MemoryEntry>> {
        self.entry
            .lock()
            .map_err(|e| InventoryError::CacheIo(format!("memory cache poisoned: {}", e)))
    }
}

impl CacheStore for MemoryCache {
    fn read(&self) -> InventoryResult<Option<Vec<u8>>> {
        Ok(self.lock()?.bytes.clone())
    }

    fn write(&self, bytes: &[u8]) -> InventoryResult<()> {
        let mut entry = self.lock()?;
        entry.bytes = Some(bytes.to_vec());
        entry.modified = Some(Utc::now());
        Ok(())
    }

    fn modified(&self) -> InventoryResult<Option<DateTime<Utc>>> {
        let entry = self.lock()?;
        Ok(entry.bytes.as_ref().and(entry.modified))
    }

    fn size(&self) -> InventoryResult<u64> {
        Ok(self
            .lock()?
            .bytes
            .as_ref()
            .map(|b| b.len() as u64)
            .unwrap_or(0))
    }
}
