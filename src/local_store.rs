use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;
use crate::journal_entry::{EntryUpdate, JournalEntry};

pub const ENTRIES_SLOT: &str = "reflections";

/// Slot-based key-value store; every slot is a `<slot>.json` file under `dir`.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(LocalStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    pub fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn write_slot(&self, slot: &str, value: &str) -> Result<()> {
        fs::write(self.slot_path(slot), value)?;
        Ok(())
    }

    pub fn remove_slot(&self, slot: &str) -> Result<()> {
        match fs::remove_file(self.slot_path(slot)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    pub fn try_load_entries(&self) -> Result<Vec<JournalEntry>> {
        match self.read_slot(ENTRIES_SLOT)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Unreadable or corrupt data loads as an empty collection.
    pub fn load_entries(&self) -> Vec<JournalEntry> {
        self.try_load_entries().unwrap_or_else(|e| {
            warn!(error = %e, "local entries unreadable, treating as empty");
            Vec::new()
        })
    }

    pub fn save_entries(&self, entries: &[JournalEntry]) -> Result<()> {
        let serialized = serde_json::to_string(entries)?;
        self.write_slot(ENTRIES_SLOT, &serialized)
    }

    // Mutations refuse to rewrite a slot they could not read.
    pub fn prepend_entry(&self, entry: JournalEntry) -> Result<()> {
        let mut entries = self.try_load_entries()?;
        entries.insert(0, entry);
        self.save_entries(&entries)
    }

    pub fn update_entry(&self, id: &str, update: &EntryUpdate) -> Result<()> {
        let mut entries = self.try_load_entries()?;
        if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
            entry.apply(update);
        }
        self.save_entries(&entries)
    }

    pub fn delete_entry(&self, id: &str) -> Result<()> {
        let mut entries = self.try_load_entries()?;
        entries.retain(|e| e.id != id);
        self.save_entries(&entries)
    }

    pub fn clear_entries(&self) -> Result<()> {
        self.remove_slot(ENTRIES_SLOT)
    }
}
