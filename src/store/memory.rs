//! In-Memory Vector Store
//!
//! Insertion-ordered entries with a word index and a linear nearest scan,
//! persisted to disk through the snapshot format.

use std::path::Path;

use hashbrown::{HashMap, HashSet};

use super::snapshot;
use super::{Neighbor, StoredEntry, VectorStore};
use crate::error::StoreError;
use crate::vector::euclidean_distance;

/// In-memory vector store.
///
/// Entries keep their commit order, which is also the tie-break order for
/// `nearest`.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Expected vector dimension
    dimension: usize,
    /// Entries in insertion order
    entries: Vec<StoredEntry>,
    /// Word -> position in `entries`
    index: HashMap<String, usize>,
}

impl MemoryStore {
    /// Create an empty store for vectors of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Write the store to a snapshot file. The file appears atomically: a
    /// crash mid-write leaves any previous snapshot untouched.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        snapshot::save(path.as_ref(), self.dimension, &self.entries)?;
        Ok(())
    }

    /// Load a store from a snapshot file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let (dimension, entries) = snapshot::load(path.as_ref())?;
        let mut store = Self::new(dimension);
        store.commit(entries)?;
        Ok(store)
    }
}

impl VectorStore for MemoryStore {
    fn commit(&mut self, entries: Vec<StoredEntry>) -> Result<(), StoreError> {
        // Validate the whole batch before touching anything, so a rejection
        // leaves the store in its prior state.
        {
            let mut batch_words: HashSet<&str> = HashSet::with_capacity(entries.len());
            for entry in &entries {
                if entry.vector.len() != self.dimension {
                    return Err(StoreError::DimensionMismatch {
                        expected: self.dimension,
                        got: entry.vector.len(),
                    });
                }
                if self.index.contains_key(entry.word.as_str())
                    || !batch_words.insert(entry.word.as_str())
                {
                    return Err(StoreError::DuplicateWord(entry.word.clone()));
                }
            }
        }

        self.entries.reserve(entries.len());
        for entry in entries {
            self.index.insert(entry.word.clone(), self.entries.len());
            self.entries.push(entry);
        }
        Ok(())
    }

    fn lookup_exact(&self, word: &str) -> Option<&StoredEntry> {
        self.index.get(word).map(|&i| &self.entries[i])
    }

    fn lookup_prefix(&self, prefix: &str) -> Vec<&StoredEntry> {
        let prefix = prefix.to_lowercase();
        let mut results: Vec<&StoredEntry> = self
            .entries
            .iter()
            .filter(|e| e.word.to_lowercase().starts_with(&prefix))
            .collect();
        results.sort_by_key(|e| e.rank);
        results
    }

    fn nearest(&self, query: &[f32], exclude: &HashSet<String>, k: usize) -> Vec<Neighbor> {
        let mut results: Vec<Neighbor> = self
            .entries
            .iter()
            .filter(|e| !exclude.contains(&e.word))
            .map(|e| Neighbor {
                word: e.word.clone(),
                distance: euclidean_distance(query, &e.vector),
            })
            .collect();

        // Stable sort keeps insertion order for equal distances
        results.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);
        results
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, rank: u64, vector: Vec<f32>) -> StoredEntry {
        StoredEntry {
            word: word.to_string(),
            rank,
            vector,
        }
    }

    #[test]
    fn test_commit_and_lookup() {
        let mut store = MemoryStore::new(3);
        store
            .commit(vec![
                entry("king", 1, vec![1.0, 0.0, 0.0]),
                entry("queen", 2, vec![0.0, 1.0, 0.0]),
            ])
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup_exact("king").unwrap().rank, 1);
        assert!(store.lookup_exact("prince").is_none());
    }

    #[test]
    fn test_duplicate_word_rejects_whole_batch() {
        let mut store = MemoryStore::new(2);
        store.commit(vec![entry("a", 1, vec![1.0, 0.0])]).unwrap();

        let err = store
            .commit(vec![
                entry("b", 2, vec![0.0, 1.0]),
                entry("a", 3, vec![1.0, 0.0]),
            ])
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateWord(w) if w == "a"));

        // Nothing from the rejected batch is visible
        assert_eq!(store.len(), 1);
        assert!(store.lookup_exact("b").is_none());
    }

    #[test]
    fn test_duplicate_within_batch() {
        let mut store = MemoryStore::new(1);
        let err = store
            .commit(vec![entry("x", 1, vec![1.0]), entry("x", 2, vec![1.0])])
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateWord(w) if w == "x"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut store = MemoryStore::new(3);
        let err = store.commit(vec![entry("a", 1, vec![1.0])]).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DimensionMismatch {
                expected: 3,
                got: 1
            }
        ));
    }

    #[test]
    fn test_lookup_prefix_case_insensitive() {
        let mut store = MemoryStore::new(1);
        store
            .commit(vec![
                entry("New_York", 5, vec![1.0]),
                entry("news", 2, vec![1.0]),
                entry("Newton", 9, vec![1.0]),
                entry("old", 1, vec![1.0]),
            ])
            .unwrap();

        let words: Vec<&str> = store
            .lookup_prefix("new")
            .iter()
            .map(|e| e.word.as_str())
            .collect();
        // Ascending rank
        assert_eq!(words, vec!["news", "New_York", "Newton"]);
    }

    #[test]
    fn test_nearest_excludes_and_orders() {
        let mut store = MemoryStore::new(2);
        store
            .commit(vec![
                entry("a", 1, vec![1.0, 0.0]),
                entry("b", 2, vec![0.8, 0.6]),
                entry("c", 3, vec![0.0, 1.0]),
            ])
            .unwrap();

        let mut exclude = HashSet::new();
        exclude.insert("a".to_string());

        let results = store.nearest(&[1.0, 0.0], &exclude, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word, "b");
        assert_eq!(results[1].word, "c");
        assert!(results[0].distance < results[1].distance);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.wvec");

        let mut store = MemoryStore::new(2);
        store
            .commit(vec![
                entry("king", 1, vec![0.6, 0.8]),
                entry("queen", 4, vec![0.0, 1.0]),
            ])
            .unwrap();
        store.save(&path).unwrap();

        let loaded = MemoryStore::load(&path).unwrap();
        assert_eq!(loaded.dimension(), 2);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.lookup_exact("queen").unwrap().rank, 4);
        assert_eq!(loaded.lookup_exact("king").unwrap().vector, vec![0.6, 0.8]);
    }

    #[test]
    fn test_nearest_tie_breaks_by_insertion_order() {
        let mut store = MemoryStore::new(2);
        store
            .commit(vec![
                entry("first", 1, vec![0.0, 1.0]),
                entry("second", 2, vec![0.0, -1.0]),
            ])
            .unwrap();

        // Both are equidistant from the query
        let results = store.nearest(&[1.0, 0.0], &HashSet::new(), 2);
        assert_eq!(results[0].word, "first");
        assert_eq!(results[1].word, "second");
    }
}
