//! Error Types
//!
//! Failure taxonomy for decoding, importing, storing, and querying.
//! No operation retries; every failure surfaces to the caller.

use std::io;
use thiserror::Error;

/// Failures while decoding the binary word2vec stream.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The header line did not contain two whitespace-separated integers.
    #[error("malformed model header: {0:?}")]
    MalformedHeader(String),

    /// The stream ended in the middle of a record.
    #[error("unexpected end of stream at rank {rank}; is the word count incorrect or the file damaged?")]
    UnexpectedEndOfStream { rank: u64 },

    /// A word's bytes were not valid UTF-8.
    #[error("word at rank {rank} is not valid UTF-8")]
    InvalidEncoding { rank: u64 },

    #[error("i/o error reading model: {0}")]
    Io(#[from] io::Error),
}

/// Failures in the persisted vector store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A commit batch named a word the store already holds, or named it twice.
    /// Nothing from the batch is applied.
    #[error("duplicate word in store: {0:?}")]
    DuplicateWord(String),

    /// An entry's vector width does not match the store's dimension.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("store i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Failures that abort an import run. The store is left in its prior state.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A record's vector had zero Euclidean norm and cannot be normalized.
    #[error("degenerate zero-norm vector for word {word:?}")]
    DegenerateVector { word: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of a single analogy query. The store is unaffected.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A positive or negative example word is not in the store.
    #[error("unknown word: {0:?}")]
    UnknownWord(String),

    /// The signed sum of the example vectors was zero (e.g. king - king).
    #[error("query vector has zero norm; positive and negative examples cancel out")]
    DegenerateVector,

    #[error(transparent)]
    Store(#[from] StoreError),
}
