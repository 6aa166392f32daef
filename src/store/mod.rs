//! Store Module
//!
//! The persisted vector store capability consumed by the importer and the
//! analogy engine, plus the in-memory reference implementation.

mod memory;
mod snapshot;

pub use memory::MemoryStore;

use hashbrown::HashSet;

use crate::error::StoreError;

/// One persisted word entry. Created once per import run, read-only after.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    /// The word, unique across the store.
    pub word: String,
    /// 1-based position of the word in the source stream, not insertion order.
    pub rank: u64,
    /// Unit-length embedding vector.
    pub vector: Vec<f32>,
}

/// A nearest-neighbor result.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub word: String,
    pub distance: f32,
}

/// Vector store capability contract.
///
/// An import run produces one `commit`; afterwards the store only answers
/// lookups and nearest-neighbor queries. All read methods take `&self` so
/// concurrent queries need no synchronization.
pub trait VectorStore {
    /// Apply a batch of entries atomically: either every entry becomes
    /// visible or none does. A word already present, or named twice within
    /// the batch, rejects the whole batch with `StoreError::DuplicateWord`.
    fn commit(&mut self, entries: Vec<StoredEntry>) -> Result<(), StoreError>;

    /// Exact lookup by word.
    fn lookup_exact(&self, word: &str) -> Option<&StoredEntry>;

    /// Case-insensitive prefix scan, ascending by rank.
    fn lookup_prefix(&self, prefix: &str) -> Vec<&StoredEntry>;

    /// Up to `k` entries closest to `query` by Euclidean distance, ascending,
    /// skipping every word in `exclude`. Ties break by insertion order.
    fn nearest(&self, query: &[f32], exclude: &HashSet<String>, k: usize) -> Vec<Neighbor>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
