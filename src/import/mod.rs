//! Import Module
//!
//! One-shot batch import: decode, select, normalize, commit.

mod importer;
mod policy;

pub use importer::{ImportReport, Importer};
pub use policy::{Decision, ScanState, SelectionPolicy, SkipReason};

/// Import configuration
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Number of top terms to import (by stream rank)
    pub top_words: usize,

    /// Words to import even if they are not among the top terms, given in
    /// lowercase with spaces instead of underscores
    pub whitelist: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            top_words: 30_000,
            whitelist: Vec::new(),
        }
    }
}

impl ImportConfig {
    pub fn with_top_words(mut self, top_words: usize) -> Self {
        self.top_words = top_words;
        self
    }

    pub fn with_whitelist<I, S>(mut self, whitelist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = whitelist.into_iter().map(Into::into).collect();
        self
    }
}
