//! Selection Policy
//!
//! Single-pass state machine deciding which decoded records to keep: a
//! whitelist that bypasses every other rule, a top-N cap, Porter2 stem
//! deduplication, and a 6x rank grace window for late whitelist matches.

use hashbrown::HashSet;
use rust_stemmers::{Algorithm, Stemmer};
use tracing::debug;

use super::ImportConfig;

/// Scan state of the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Still filling the top-N budget.
    Scanning,
    /// Budget full but whitelist entries remain; scanning continues up to
    /// `rank_cutoff`.
    GracePeriod { rank_cutoff: u64 },
    /// Terminal.
    Stopped,
}

/// Why a record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another word with the same Porter2 stem was already kept.
    StemCollision,
    /// The top-N budget is spent and the word is not whitelisted.
    CapReached,
}

/// Outcome for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Keep the record under this (possibly canonicalized) word.
    Keep { word: String, rank: u64 },
    /// Drop the record and keep scanning.
    Skip(SkipReason),
    /// The rank cutoff was passed; the record is dropped and scanning ends.
    Halt,
}

/// Keep/skip decision engine, fed one word per record in stream order.
pub struct SelectionPolicy {
    top_words: usize,
    whitelist: HashSet<String>,
    stems_seen: HashSet<String>,
    stemmer: Stemmer,
    state: ScanState,
    rank: u64,
    inserted: usize,
    stem_skipped: u64,
}

impl SelectionPolicy {
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            top_words: config.top_words,
            whitelist: config.whitelist.iter().cloned().collect(),
            stems_seen: HashSet::new(),
            stemmer: Stemmer::create(Algorithm::English),
            state: ScanState::Scanning,
            rank: 0,
            inserted: 0,
            stem_skipped: 0,
        }
    }

    /// Decide the fate of the next record in the stream. The rank advances
    /// on every call, kept or not.
    pub fn consider(&mut self, word: &str) -> Decision {
        if self.state == ScanState::Stopped {
            return Decision::Halt;
        }

        self.rank += 1;
        let rank = self.rank;

        if rank % 1000 == 0 {
            debug!(
                rank,
                stem_skipped = self.stem_skipped,
                whitelist_remaining = self.whitelist.len(),
                "scan progress"
            );
        }

        if let ScanState::GracePeriod { rank_cutoff } = self.state {
            if rank > rank_cutoff {
                self.state = ScanState::Stopped;
                return Decision::Halt;
            }
        }

        let normalized = word.to_lowercase().replace('_', " ");
        let kept_word = if self.whitelist.remove(&normalized) {
            // Whitelist hit: kept unconditionally, each entry matches once.
            // Fully uppercase words are treated as acronym-style multi-word
            // phrases and canonicalized, e.g. NEW_YORK -> New_York.
            if is_all_uppercase(word) {
                canonicalize_acronym(word)
            } else {
                word.to_string()
            }
        } else if self.inserted > self.top_words {
            return Decision::Skip(SkipReason::CapReached);
        } else {
            let stem = self.stemmer.stem(word).into_owned();
            if !self.stems_seen.insert(stem) {
                self.stem_skipped += 1;
                return Decision::Skip(SkipReason::StemCollision);
            }
            word.to_string()
        };

        self.inserted += 1;
        if self.inserted == self.top_words {
            if self.whitelist.is_empty() {
                self.state = ScanState::Stopped;
            } else {
                // Grace period: whitelist words may still turn up further
                // into the stream, but not past 6x the cap-reaching rank.
                self.state = ScanState::GracePeriod {
                    rank_cutoff: rank * 6,
                };
            }
        }

        Decision::Keep {
            word: kept_word,
            rank,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == ScanState::Stopped
    }

    /// Ranks scanned so far.
    pub fn scanned(&self) -> u64 {
        self.rank
    }

    pub fn inserted(&self) -> usize {
        self.inserted
    }

    pub fn stem_skipped(&self) -> u64 {
        self.stem_skipped
    }

    /// Whitelist entries that never matched, sorted for stable reporting.
    pub fn leftover_whitelist(&self) -> Vec<String> {
        let mut leftover: Vec<String> = self.whitelist.iter().cloned().collect();
        leftover.sort();
        leftover
    }
}

fn is_all_uppercase(word: &str) -> bool {
    word.to_uppercase() == word
}

fn canonicalize_acronym(word: &str) -> String {
    word.split('_')
        .map(title_case)
        .collect::<Vec<_>>()
        .join("_")
}

fn title_case(token: &str) -> String {
    let lower = token.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(top_words: usize, whitelist: &[&str]) -> SelectionPolicy {
        SelectionPolicy::new(
            &ImportConfig::default()
                .with_top_words(top_words)
                .with_whitelist(whitelist.iter().copied()),
        )
    }

    fn keep(p: &mut SelectionPolicy, word: &str) -> (String, u64) {
        match p.consider(word) {
            Decision::Keep { word, rank } => (word, rank),
            other => panic!("expected keep for {word:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_cap_with_empty_whitelist_stops_at_n() {
        let mut p = policy(2, &[]);
        assert_eq!(keep(&mut p, "alpha"), ("alpha".to_string(), 1));
        assert_eq!(keep(&mut p, "beta"), ("beta".to_string(), 2));
        assert!(p.is_stopped());
        assert_eq!(p.consider("gamma"), Decision::Halt);
        assert_eq!(p.inserted(), 2);
    }

    #[test]
    fn test_rank_counts_skipped_records() {
        let mut p = policy(10, &[]);
        keep(&mut p, "run");
        assert_eq!(
            p.consider("running"),
            Decision::Skip(SkipReason::StemCollision)
        );
        // rank 3, even though rank 2 was dropped
        assert_eq!(keep(&mut p, "river"), ("river".to_string(), 3));
        assert_eq!(p.stem_skipped(), 1);
    }

    #[test]
    fn test_stem_collision_counts_once_per_duplicate() {
        let mut p = policy(10, &[]);
        keep(&mut p, "run");
        assert_eq!(
            p.consider("running"),
            Decision::Skip(SkipReason::StemCollision)
        );
        assert_eq!(p.stem_skipped(), 1);
        assert_eq!(p.inserted(), 1);
    }

    #[test]
    fn test_whitelist_hit_within_grace_window() {
        let mut p = policy(1, &["new york"]);
        keep(&mut p, "alpha");
        assert_eq!(p.state(), ScanState::GracePeriod { rank_cutoff: 6 });

        // The cap comparison is `inserted > top_words`, so exactly one more
        // unlisted word slips through before skipping starts.
        keep(&mut p, "beta");
        assert_eq!(p.consider("gamma"), Decision::Skip(SkipReason::CapReached));
        assert_eq!(p.consider("delta"), Decision::Skip(SkipReason::CapReached));
        assert_eq!(p.consider("epsilon"), Decision::Skip(SkipReason::CapReached));

        // Rank 6 == cutoff, still inside the window
        assert_eq!(keep(&mut p, "NEW_YORK"), ("New_York".to_string(), 6));
        assert!(p.leftover_whitelist().is_empty());

        assert_eq!(p.consider("zeta"), Decision::Halt);
        assert!(p.is_stopped());
    }

    #[test]
    fn test_whitelist_miss_past_cutoff_is_reported() {
        let mut p = policy(1, &["unobtainium"]);
        keep(&mut p, "alpha");
        for word in ["b", "c", "d", "e", "f"] {
            p.consider(word);
        }
        // rank 7 > cutoff 6: stop even with the whitelist unexhausted
        assert_eq!(p.consider("unobtainium"), Decision::Halt);
        assert_eq!(p.leftover_whitelist(), vec!["unobtainium".to_string()]);
    }

    #[test]
    fn test_whitelist_bypasses_stem_dedup() {
        let mut p = policy(10, &["running"]);
        keep(&mut p, "run");
        // Same stem as "run", but whitelisted
        assert_eq!(keep(&mut p, "running"), ("running".to_string(), 2));
        assert_eq!(p.stem_skipped(), 0);
    }

    #[test]
    fn test_whitelist_entry_matches_at_most_once() {
        let mut p = policy(10, &["foo"]);
        keep(&mut p, "foo");
        // Second occurrence takes the normal path and is kept via stemming,
        // which is exactly the duplicate-word hazard the store rejects.
        assert_eq!(keep(&mut p, "foo"), ("foo".to_string(), 2));
    }

    #[test]
    fn test_mixed_case_whitelist_hit_is_not_canonicalized() {
        let mut p = policy(10, &["new york"]);
        assert_eq!(keep(&mut p, "New_york"), ("New_york".to_string(), 1));
    }

    #[test]
    fn test_top_words_zero_never_stops() {
        let mut p = policy(0, &[]);
        keep(&mut p, "alpha");
        // The cap equality never fires, so scanning continues; everything
        // after the first keep is capped out.
        assert_eq!(p.consider("beta"), Decision::Skip(SkipReason::CapReached));
        assert_eq!(p.consider("gamma"), Decision::Skip(SkipReason::CapReached));
        assert!(!p.is_stopped());
    }
}
