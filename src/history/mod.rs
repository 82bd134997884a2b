// src/history/mod.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

pub const HISTORY_CAPACITY: usize = 10;
pub const HISTORY_SLOT: &str = "passquartz_history";

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

/// A single named slot holding the serialized log.
pub trait HistoryStorage: Send {
    fn load(&self) -> Result<Option<Vec<String>>>;
    fn save(&self, entries: &[String]) -> Result<()>;
    fn remove(&self) -> Result<()>;
}

// JSON array of strings in one file
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<String>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)?;
        let entries: Vec<String> = serde_json::from_str(&data)?;
        Ok(Some(entries))
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Replace the slot atomically
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process slot. Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<Vec<String>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(entries))),
        }
    }

    pub fn snapshot(&self) -> Option<Vec<String>> {
        self.slot.lock().map(|slot| slot.clone()).unwrap_or(None)
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<String>>> {
        Ok(self.snapshot())
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(entries.to_vec());
        }
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// Newest-first log of recently generated passwords, capped at
/// `HISTORY_CAPACITY`. Every mutation is written through to storage.
pub struct HistoryStore {
    entries: Vec<String>,
    storage: Box<dyn HistoryStorage>,
}

impl HistoryStore {
    /// Seed from storage. A missing slot starts empty; so does an unreadable
    /// one, after logging why.
    pub fn load(storage: Box<dyn HistoryStorage>) -> Self {
        let mut entries = match storage.load() {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read password history, starting empty: {}", e);
                Vec::new()
            }
        };
        entries.truncate(HISTORY_CAPACITY);

        log::debug!("Loaded {} history entries", entries.len());
        Self { entries, storage }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn prepend(&mut self, password: String) -> Result<()> {
        self.entries.insert(0, password);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist()
    }

    /// Remove the entry at `index`. Out-of-range indexes are a no-op and do
    /// not touch storage.
    pub fn remove_at(&mut self, index: usize) -> Result<Option<String>> {
        if index >= self.entries.len() {
            log::debug!("Ignoring history delete at {} (len {})", index, self.entries.len());
            return Ok(None);
        }

        let removed = self.entries.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if self.entries.is_empty() {
            self.storage.remove()
        } else {
            self.storage.save(&self.entries)
        }
    }
}
