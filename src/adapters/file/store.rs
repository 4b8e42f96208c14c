//! JSON ledger file
//!
//! The whole ledger is read and rewritten on every operation. Batches are
//! kept sorted by ID so the file diffs cleanly. Writes go to a sibling
//! `.tmp` file that is renamed over the ledger, so a crash mid-write leaves
//! the previous ledger intact.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::models::Batch;
use crate::core::ports::BatchStore;

/// Current ledger file format version
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    version: u32,
    #[serde(default)]
    batches: Vec<Batch>,
}

impl Default for LedgerFile {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            batches: Vec::new(),
        }
    }
}

/// Batch store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at the given path. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the ledger file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> anyhow::Result<LedgerFile> {
        if !self.path.exists() {
            return Ok(LedgerFile::default());
        }
        let content = fs::read_to_string(&self.path)?;
        let file: LedgerFile = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid ledger file {}: {e}", self.path.display()))?;
        if file.version != FORMAT_VERSION {
            anyhow::bail!(
                "Unsupported ledger version {} in {} (expected {FORMAT_VERSION})",
                file.version,
                self.path.display()
            );
        }
        log::debug!("Loaded {} batch(es) from {}", file.batches.len(), self.path.display());
        Ok(file)
    }

    /// Sibling file that receives each write before the rename
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write(&self, file: &LedgerFile) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(file)?;
        let temp = self.temp_path();
        fs::write(&temp, content)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", temp.display()))?;
        fs::rename(&temp, &self.path).map_err(|e| {
            anyhow::anyhow!("Failed to replace {} with {}: {e}", self.path.display(), temp.display())
        })?;
        log::debug!("Wrote {} batch(es) to {}", file.batches.len(), self.path.display());
        Ok(())
    }
}

impl BatchStore for JsonFileStore {
    fn save(&self, batch: &Batch) -> anyhow::Result<()> {
        let mut file = self.load()?;
        match file.batches.iter_mut().find(|b| b.id == batch.id) {
            Some(existing) => *existing = batch.clone(),
            None => file.batches.push(batch.clone()),
        }
        file.batches.sort_by(|a, b| a.id.cmp(&b.id));
        self.write(&file)
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<Batch>> {
        Ok(self.load()?.batches.into_iter().find(|b| b.id == id))
    }

    fn list(&self) -> anyhow::Result<Vec<Batch>> {
        let mut batches = self.load()?.batches;
        batches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(batches)
    }
}
