use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SecurityError, SecurityResult};

/// Version of the on-disk store format
const STORE_VERSION: u8 = 1;

/// Abstraction over the key-value storage backing the security core
///
/// All failures surface as [`SecurityError::StorageError`] and are never
/// retried automatically. `clear` must remove every key in one operation:
/// it is the reset path, and a partial reset that leaves a credential
/// record without its configuration record (or vice versa) is worse than
/// a failed one.
pub trait CredentialStore {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> SecurityResult<Option<String>>;

    /// Write a value, overwriting any previous one
    fn set(&mut self, key: &str, value: &str) -> SecurityResult<()>;

    /// Remove a single key; absent keys are not an error
    fn remove(&mut self, key: &str) -> SecurityResult<()>;

    /// Remove every key atomically
    fn clear(&mut self) -> SecurityResult<()>;
}

/// In-process store with no persistence
///
/// Used by tests and by ephemeral "guest" sessions that should leave no
/// trace on disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> SecurityResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SecurityResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SecurityResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> SecurityResult<()> {
        self.entries.clear();
        Ok(())
    }
}

/// On-disk store file format
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    /// Version of the store format
    version: u8,
    /// Stored entries
    entries: HashMap<String, String>,
}

/// File-backed store persisting entries as a single versioned JSON file
///
/// Every mutation rewrites the file. `clear` removes the backing file
/// entirely, which makes reset a single atomic filesystem operation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open a store at the given path, creating an empty one if the file
    /// does not exist yet
    ///
    /// A file that cannot be parsed is treated as empty: the application
    /// must be able to start and route the user to credential creation
    /// rather than crash on corrupted state.
    pub fn open<P: AsRef<Path>>(path: P) -> SecurityResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .map_err(|e| SecurityError::storage_error("open store", &e.to_string()))?;
            match serde_json::from_str::<StoreFile>(&contents) {
                Ok(file) => file.entries,
                Err(e) => {
                    log::warn!("Store file at {:?} is unreadable, starting empty: {}", path, e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Open a store at the platform's user data directory
    pub fn open_default() -> SecurityResult<Self> {
        Self::open(Self::default_path()?)
    }

    /// Default store location under the user data directory
    pub fn default_path() -> SecurityResult<PathBuf> {
        let base = dirs::data_dir().ok_or_else(|| {
            SecurityError::storage_error("resolve store path", "no user data directory")
        })?;
        Ok(base.join("ledgerlock").join("store.json"))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> SecurityResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SecurityError::storage_error("create store directory", &e.to_string()))?;
        }

        let file = StoreFile {
            version: STORE_VERSION,
            entries: self.entries.clone(),
        };

        let serialized = serde_json::to_string_pretty(&file)
            .map_err(|e| SecurityError::SerializationError(e.to_string()))?;

        fs::write(&self.path, serialized)
            .map_err(|e| SecurityError::storage_error("write store", &e.to_string()))
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> SecurityResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SecurityResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> SecurityResult<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> SecurityResult<()> {
        self.entries.clear();
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| SecurityError::storage_error("clear store", &e.to_string()))?;
        }
        Ok(())
    }
}
