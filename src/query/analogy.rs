//! Analogy Queries
//!
//! Nearest-neighbor search where the query vector is a signed sum of stored
//! word vectors (e.g. king - man + woman).

use hashbrown::HashSet;
use tracing::debug;

use crate::error::QueryError;
use crate::store::{Neighbor, VectorStore};
use crate::vector::unit;

/// Analogy query configuration
#[derive(Debug, Clone)]
pub struct AnalogyConfig {
    /// Maximum number of neighbors to return
    pub neighbors: usize,
}

impl Default for AnalogyConfig {
    fn default() -> Self {
        Self { neighbors: 5 }
    }
}

impl AnalogyConfig {
    pub fn with_neighbors(mut self, neighbors: usize) -> Self {
        self.neighbors = neighbors;
        self
    }
}

/// Read-only analogy engine over a committed store.
///
/// Stateless between calls; concurrent queries share nothing mutable.
pub struct AnalogyEngine<'a, S: VectorStore> {
    store: &'a S,
    config: AnalogyConfig,
}

impl<'a, S: VectorStore> AnalogyEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_config(store, AnalogyConfig::default())
    }

    pub fn with_config(store: &'a S, config: AnalogyConfig) -> Self {
        Self { store, config }
    }

    /// Rank stored words by distance to `sum(positive) - sum(negative)`,
    /// normalized to a unit vector. Every example word must exist in the
    /// store; the examples themselves are excluded from the results.
    pub fn analogy(
        &self,
        positive: &[String],
        negative: &[String],
    ) -> Result<Vec<Neighbor>, QueryError> {
        let mut exclude: HashSet<String> = HashSet::new();
        let mut summed: Vec<f32> = Vec::new();

        for (words, sign) in [(positive, 1.0f32), (negative, -1.0f32)] {
            for word in words {
                let entry = self
                    .store
                    .lookup_exact(word)
                    .ok_or_else(|| QueryError::UnknownWord(word.clone()))?;
                if summed.is_empty() {
                    summed = vec![0.0; entry.vector.len()];
                }
                for (acc, x) in summed.iter_mut().zip(&entry.vector) {
                    *acc += sign * x;
                }
                exclude.insert(word.clone());
            }
        }

        let query = unit(&summed).ok_or(QueryError::DegenerateVector)?;

        debug!(
            positive = positive.len(),
            negative = negative.len(),
            neighbors = self.config.neighbors,
            "analogy query"
        );

        Ok(self.store.nearest(&query, &exclude, self.config.neighbors))
    }
}
