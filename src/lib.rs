//! WORDVEC - Word Embedding Import and Analogy Queries
//!
//! Ingests a pretrained word2vec model in its binary format, keeps a bounded,
//! stem-deduplicated subset of entries as unit vectors, and answers
//! nearest-neighbor analogy queries (king - man + woman) against the stored
//! set.

pub mod error;
pub mod import;
pub mod model;
pub mod query;
pub mod store;
pub mod vector;

pub use error::{DecodeError, ImportError, QueryError, StoreError};
pub use import::{ImportConfig, Importer, SelectionPolicy};
pub use model::{ModelHeader, ModelReader, RawRecord};
pub use query::{AnalogyConfig, AnalogyEngine};
pub use store::{MemoryStore, Neighbor, StoredEntry, VectorStore};
