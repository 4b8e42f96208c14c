//! Batch store port
//!
//! Defines the interface for persisting and retrieving batches.

use crate::core::models::{Batch, BatchStatus};

/// Store for batches and their events
///
/// Implementations handle where batches live (process memory, a JSON
/// file, etc.). The ledger service is the only writer.
pub trait BatchStore: Send + Sync {
    /// Insert or replace a batch by ID
    fn save(&self, batch: &Batch) -> anyhow::Result<()>;

    /// Get a batch by ID
    fn get(&self, id: &str) -> anyhow::Result<Option<Batch>>;

    /// List all batches, ordered by ID
    fn list(&self) -> anyhow::Result<Vec<Batch>>;

    /// Whether a batch with this ID exists
    fn contains(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// List batches, optionally filtered by status
    fn list_filtered(&self, status: Option<BatchStatus>) -> anyhow::Result<Vec<Batch>> {
        let all = self.list()?;
        match status {
            Some(status) => Ok(all.into_iter().filter(|b| b.status == status).collect()),
            None => Ok(all),
        }
    }
}
