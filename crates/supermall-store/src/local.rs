// ABOUTME: Local-storage emulation: named text entries, in-memory or backed by a directory.
// ABOUTME: Each key maps to one JSON text file; writes replace the whole entry atomically.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors that can occur while reading or writing storage entries.
#[derive(Debug, Error)]
pub enum LocalStorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage entry has a non-UTF-8 name: {0}")]
    BadEntryName(String),
}

struct Inner {
    entries: HashMap<String, String>,
    dir: Option<PathBuf>,
}

/// A per-process emulation of the browser's origin-scoped key-value storage.
/// Values are opaque text; callers serialize whole collections into a single
/// entry on every write, exactly like the system this mocks.
///
/// Clones share the same underlying map, mirroring how every script on a
/// page sees one storage area.
#[derive(Clone)]
pub struct LocalStorage {
    inner: Arc<Mutex<Inner>>,
}

impl LocalStorage {
    /// A purely in-memory storage area. Nothing survives the process.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                dir: None,
            })),
        }
    }

    /// Open a directory-backed storage area, creating the directory if needed.
    /// Existing `*.json` files are loaded as entries keyed by file stem.
    pub fn open(dir: &Path) -> Result<Self, LocalStorageError> {
        fs::create_dir_all(dir)?;

        let mut entries = HashMap::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| LocalStorageError::BadEntryName(path.display().to_string()))?
                .to_string();
            let value = fs::read_to_string(&path)?;
            entries.insert(stem, value);
        }

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                entries,
                dir: Some(dir.to_path_buf()),
            })),
        })
    }

    /// Read an entry, if present.
    pub fn get_item(&self, key: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.get(key).cloned()
    }

    /// Write an entry, replacing any previous value. Directory-backed areas
    /// write the file via temp file + rename so a crash mid-write cannot
    /// leave a torn entry behind.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.insert(key.to_string(), value.to_string());

        if let Some(dir) = inner.dir.clone() {
            let path = dir.join(format!("{key}.json"));
            let tmp_path = dir.join(format!("{key}.json.tmp"));
            let mut tmp = File::create(&tmp_path)?;
            tmp.write_all(value.as_bytes())?;
            tmp.sync_all()?;
            fs::rename(&tmp_path, &path)?;
        }
        Ok(())
    }

    /// Remove an entry. Missing keys are not an error.
    pub fn remove_item(&self, key: &str) -> Result<(), LocalStorageError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.remove(key);

        if let Some(dir) = inner.dir.clone() {
            let path = dir.join(format!("{key}.json"));
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// All entry keys currently present, unordered.
    pub fn keys(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
