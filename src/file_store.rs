//! File-backed settings store
//!
//! Each namespace is one pretty-printed JSON object on disk,
//! `<directory>/<namespace>.json`, mapping keys to string values. Nothing is
//! touched until the first get or put. Every access re-reads the file, and
//! every write re-reads, updates and atomically replaces it through a
//! temporary file in the same directory, so writes from other handles on the
//! same namespace are never dropped.
//!
//! Handles in one process that open the same path share a lock, making each
//! read-modify-write atomic between them. Across processes a write only
//! races with another write issued at the same moment.

use crate::error::{Error, Result};
use crate::settings::SettingsStore;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tempfile::NamedTempFile;

type Entries = BTreeMap<String, String>;

/// Settings store persisted as a JSON file per namespace
///
/// # Example
///
/// ```rust
/// use switchboard::{FileStore, SettingsStore};
///
/// let dir = tempfile::TempDir::new()?;
/// let store = FileStore::open(dir.path(), "app.settings")?;
/// store.put_string("key", "value")?;
///
/// let reopened = FileStore::open(dir.path(), "app.settings")?;
/// assert_eq!(reopened.get_string("key")?, Some("value".to_string()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct FileStore {
    directory: PathBuf,
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Open the namespace file under `directory`
    ///
    /// Nothing is read or created until the first get or put. The directory
    /// is created on first write if it does not exist yet.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidNamespace`] if `namespace` is empty, `.`/`..`, or contains a path separator
    /// - [`Error::InvalidStoreDirectory`] if `directory` exists but is not a directory
    pub fn open(directory: impl Into<PathBuf>, namespace: &str) -> Result<Self> {
        validate_namespace(namespace)?;

        let directory = directory.into();
        if directory.exists() && !directory.is_dir() {
            return Err(Error::InvalidStoreDirectory(directory));
        }

        let path = directory.join(format!("{namespace}.json"));
        let lock = path_lock(&path);
        Ok(Self {
            directory,
            path,
            lock,
        })
    }

    /// Location of the namespace file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `update` to the entries currently on disk and persist them if they changed
    fn write_with<T>(&self, update: impl FnOnce(&mut Entries) -> T) -> Result<T> {
        let _guard = self.lock();
        let mut entries = load_entries(&self.path)?;
        let before = entries.clone();

        let output = update(&mut entries);
        if entries != before {
            self.persist(&entries)?;
        }
        Ok(output)
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        fs::create_dir_all(&self.directory)?;

        let mut file = NamedTempFile::new_in(&self.directory)?;
        serde_json::to_writer_pretty(&mut file, entries)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        log::debug!("Wrote {} settings to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock();
        let mut entries = load_entries(&self.path)?;
        Ok(entries.remove(key))
    }

    fn put_string(&self, key: &str, value: &str) -> Result<()> {
        self.write_with(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.write_with(|entries| {
            entries.remove(key);
        })
    }

    fn update_string(
        &self,
        key: &str,
        update: &mut dyn FnMut(Option<&str>) -> String,
    ) -> Result<String> {
        self.write_with(|entries| {
            let value = update(entries.get(key).map(String::as_str));
            entries.insert(key.to_string(), value.clone());
            value
        })
    }
}

/// Lock shared by every handle on `path` in this process
fn path_lock(path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(path.to_path_buf()).or_default())
}

/// Read the namespace file
///
/// A missing file is an empty namespace, and so is a file that is not a JSON
/// object of strings (logged). Any other I/O failure is returned so that a
/// write never replaces a file it could not read.
fn load_entries(path: &Path) -> Result<Entries> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_slice(&content) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            log::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
            Ok(Entries::new())
        }
    }
}

fn validate_namespace(namespace: &str) -> Result<()> {
    let invalid = namespace.is_empty()
        || namespace == "."
        || namespace == ".."
        || namespace.contains(['/', '\\', '\0']);

    if invalid {
        return Err(Error::InvalidNamespace(namespace.to_string()));
    }
    Ok(())
}
