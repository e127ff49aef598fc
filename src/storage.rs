//! Persistence adapters for the task store
//!
//! The store only sees the `Persistence` trait. `FileStorage` keeps the whole
//! state in one TOML file; `MemoryStorage` is a shared in-memory slot used by
//! tests and embedders.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StorageError;
use crate::tasks::TaskList;

/// Format version written to the TOML file
pub const FORMAT_VERSION: u32 = 1;

/// Durable slot holding the full, ordered sequence of lists
pub trait Persistence: Send {
    /// Replace the persisted state with `lists`
    fn save(&self, lists: &[TaskList]) -> Result<(), StorageError>;

    /// Read the persisted state
    ///
    /// # Returns
    /// `None` when nothing has been saved yet and the caller should seed defaults
    fn load(&self) -> Result<Option<Vec<TaskList>>, StorageError>;
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    format_version: u32,
    lists: &'a [TaskList],
}

#[derive(Deserialize)]
struct StoreFile {
    #[serde(default)]
    format_version: u32,
    #[serde(default)]
    lists: Vec<TaskList>,
}

/// Encode lists into the TOML document layout
pub fn encode(lists: &[TaskList]) -> Result<String, StorageError> {
    let file = StoreFileRef {
        format_version: FORMAT_VERSION,
        lists,
    };
    Ok(toml::to_string_pretty(&file)?)
}

/// Decode lists from the TOML document layout
///
/// Files written by a newer format version are rejected rather than
/// partially read.
pub fn decode(content: &str) -> Result<Vec<TaskList>, StorageError> {
    let file: StoreFile = toml::from_str(content)?;
    if file.format_version > FORMAT_VERSION {
        return Err(StorageError::UnsupportedVersion(file.format_version));
    }
    Ok(file.lists)
}

/// TOML file storage
pub struct FileStorage {
    file_path: PathBuf,
}

impl FileStorage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.file_path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Persistence for FileStorage {
    /// Write to a sibling temp file, then rename it over the target so a
    /// failed write never leaves a truncated data file behind.
    fn save(&self, lists: &[TaskList]) -> Result<(), StorageError> {
        let content = encode(lists)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, content)?;
        if let Err(e) = fs::rename(&temp_path, &self.file_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// A missing or blank file counts as "no prior data".
    fn load(&self) -> Result<Option<Vec<TaskList>>, StorageError> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(decode(&content)?))
    }
}

#[derive(Default)]
struct MemorySlot {
    lists: Option<Vec<TaskList>>,
    fail_saves: bool,
    save_count: usize,
}

/// In-memory storage
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// the store persisted.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<MemorySlot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage that already holds `lists`
    pub fn with_lists(lists: Vec<TaskList>) -> Self {
        let storage = Self::default();
        storage.slot().lists = Some(lists);
        storage
    }

    /// Last successfully saved state
    pub fn snapshot(&self) -> Option<Vec<TaskList>> {
        self.slot().lists.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.slot().save_count
    }

    /// Make every following save fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.slot().fail_saves = fail;
    }

    fn slot(&self) -> MutexGuard<'_, MemorySlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Persistence for MemoryStorage {
    fn save(&self, lists: &[TaskList]) -> Result<(), StorageError> {
        let mut slot = self.slot();
        if slot.fail_saves {
            return Err(io::Error::other("memory storage is configured to fail").into());
        }
        slot.lists = Some(lists.to_vec());
        slot.save_count += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<TaskList>>, StorageError> {
        Ok(self.slot().lists.clone())
    }
}
