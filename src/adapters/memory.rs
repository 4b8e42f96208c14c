//! In-memory batch store
//!
//! Implements `BatchStore` with a map guarded by a `RwLock`.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::core::models::Batch;
use crate::core::ports::BatchStore;

/// Batch store that lives for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemoryBatchStore {
    batches: RwLock<BTreeMap<String, Batch>>,
}

impl InMemoryBatchStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored batches
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.read().map(|b| b.len()).unwrap_or(0)
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> anyhow::Error {
    anyhow::anyhow!("batch store lock poisoned")
}

impl BatchStore for InMemoryBatchStore {
    fn save(&self, batch: &Batch) -> anyhow::Result<()> {
        let mut batches = self.batches.write().map_err(|_| poisoned())?;
        batches.insert(batch.id.clone(), batch.clone());
        Ok(())
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<Batch>> {
        let batches = self.batches.read().map_err(|_| poisoned())?;
        Ok(batches.get(id).cloned())
    }

    fn list(&self) -> anyhow::Result<Vec<Batch>> {
        let batches = self.batches.read().map_err(|_| poisoned())?;
        Ok(batches.values().cloned().collect())
    }

    fn contains(&self, id: &str) -> anyhow::Result<bool> {
        let batches = self.batches.read().map_err(|_| poisoned())?;
        Ok(batches.contains_key(id))
    }
}
