//! Importer
//!
//! Drives the decoder through the selection policy, unit-normalizes every
//! kept vector, and commits the batch to the store in one shot. Nothing
//! becomes visible in the store if any step fails.

use std::io::BufRead;

use tracing::{info, warn};

use super::policy::{Decision, SelectionPolicy};
use super::ImportConfig;
use crate::error::ImportError;
use crate::model::ModelReader;
use crate::store::{StoredEntry, VectorStore};
use crate::vector::unit;

/// Summary of a finished import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Entries committed to the store
    pub inserted: usize,
    /// Ranks scanned before stopping
    pub scanned: u64,
    /// Records dropped because their stem was already taken
    pub stem_skipped: u64,
    /// Whitelist entries that never matched ("not found", not an error)
    pub missing_whitelist: Vec<String>,
}

/// Single-pass batch importer.
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Run the import: one sequential pass over `reader`, then one atomic
    /// commit into `store`.
    pub fn run<R, S>(&self, reader: ModelReader<R>, store: &mut S) -> Result<ImportReport, ImportError>
    where
        R: BufRead,
        S: VectorStore,
    {
        let mut policy = SelectionPolicy::new(&self.config);
        let mut pending: Vec<StoredEntry> = Vec::new();

        for record in reader {
            let record = record?;
            match policy.consider(&record.word) {
                Decision::Halt => break,
                Decision::Skip(_) => {}
                Decision::Keep { word, rank } => {
                    let vector = unit(&record.vector)
                        .ok_or(ImportError::DegenerateVector { word: word.clone() })?;
                    pending.push(StoredEntry { word, rank, vector });
                }
            }
            if policy.is_stopped() {
                break;
            }
        }

        store.commit(pending)?;

        let report = ImportReport {
            inserted: policy.inserted(),
            scanned: policy.scanned(),
            stem_skipped: policy.stem_skipped(),
            missing_whitelist: policy.leftover_whitelist(),
        };

        info!(
            inserted = report.inserted,
            scanned = report.scanned,
            stem_skipped = report.stem_skipped,
            "import complete"
        );
        if !report.missing_whitelist.is_empty() {
            warn!(
                missing = report.missing_whitelist.join(", "),
                "whitelist words not found in model"
            );
        }

        Ok(report)
    }
}
