//! Slot Storage Module
//! Durable named string slots, one write per call.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub const LAYOUT_SLOT: &str = "dashboardLayout";
pub const WIDGETS_SLOT: &str = "dashboardComponents";
pub const THEME_SLOT: &str = "theme";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read slot '{slot}': {source}")]
    Read { slot: String, source: io::Error },
    #[error("Failed to write slot '{slot}': {source}")]
    Write { slot: String, source: io::Error },
    #[error("Failed to encode slot '{slot}': {source}")]
    Encode {
        slot: String,
        source: serde_json::Error,
    },
}

/// Key/value string storage that survives restarts.
pub trait SlotStore {
    /// `Ok(None)` when the slot was never written.
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: SlotStore + ?Sized> SlotStore for Box<T> {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        (**self).get(slot)
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(slot, value)
    }
}

/// One file per slot inside a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Write {
            slot: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[cfg(test)]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(slot)
    }
}

impl SlotStore for FileStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                slot: slot.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        // Write-then-rename so a crash never leaves half a slot behind
        let path = self.slot_path(slot);
        let tmp = self.dir.join(format!("{}.tmp", slot));
        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|source| StorageError::Write {
                slot: slot.to_string(),
                source,
            })
    }
}

/// Non-durable store, used when no data directory is available.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    #[cfg(test)]
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far.
    #[cfg(test)]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SlotStore for MemoryStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(slot.to_string(), value.to_string());
        #[cfg(test)]
        {
            self.writes += 1;
        }
        Ok(())
    }
}
