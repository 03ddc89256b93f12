//! Best score per level
//!
//! Persisted as JSON, one entry per level that has been finished at least once.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};
use crate::sim::Level;

/// Best finish recorded for a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreEntry {
    pub level: Level,
    /// Questions answered correctly on the first attempt
    pub correct_on_first_attempt: u32,
    /// Length of the run the score was achieved in
    pub questions: u32,
}

/// Best scores, sorted by level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScores {
    pub entries: Vec<BestScoreEntry>,
}

impl BestScores {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "chameleon_best_scores";

    /// Create empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, level: Level) -> Option<&BestScoreEntry> {
        self.entries.iter().find(|e| e.level == level)
    }

    /// Record a finished run. Returns true when it beats the previous best.
    pub fn record(&mut self, level: Level, correct_on_first_attempt: u32, questions: u32) -> bool {
        let entry = BestScoreEntry {
            level,
            correct_on_first_attempt,
            questions,
        };

        match self.entries.binary_search_by_key(&level, |e| e.level) {
            Ok(i) => {
                if correct_on_first_attempt <= self.entries[i].correct_on_first_attempt {
                    return false;
                }
                self.entries[i] = entry;
            }
            Err(i) => self.entries.insert(i, entry),
        }
        true
    }

    /// Check if no level has been finished yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load best scores, starting fresh when absent or unreadable
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match persistence::load_json::<BestScores, _>(store, Self::STORAGE_KEY) {
            Ok(Some(mut scores)) => {
                scores.entries.sort_by_key(|e| e.level);
                scores.entries.dedup_by_key(|e| e.level);
                log::info!("Loaded best scores for {} levels", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No best scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Discarding stored best scores: {}", e);
                Self::new()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> persistence::Result<()> {
        persistence::save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Best scores saved ({} levels)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn level(n: u32) -> Level {
        Level::new(n).unwrap()
    }

    #[test]
    fn test_record_keeps_best() {
        let mut scores = BestScores::new();
        assert!(scores.is_empty());
        assert!(scores.record(level(2), 6, 10));
        assert!(!scores.record(level(2), 6, 10));
        assert!(!scores.record(level(2), 4, 10));
        assert!(scores.record(level(2), 9, 10));
        assert_eq!(scores.get(level(2)).map(|e| e.correct_on_first_attempt), Some(9));
        assert_eq!(scores.get(level(3)), None);
    }

    #[test]
    fn test_entries_sorted_by_level() {
        let mut scores = BestScores::new();
        scores.record(level(7), 5, 10);
        scores.record(level(1), 10, 10);
        scores.record(level(4), 8, 10);
        let levels: Vec<u32> = scores.entries.iter().map(|e| e.level.get()).collect();
        assert_eq!(levels, [1, 4, 7]);
    }

    #[test]
    fn test_persist_roundtrip() {
        let mut store = MemoryStore::new();
        let mut scores = BestScores::new();
        scores.record(level(12), 7, 10);
        scores.save(&mut store).unwrap();
        assert_eq!(BestScores::load(&store), scores);
    }

    #[test]
    fn test_out_of_range_level_discards_table() {
        let store = MemoryStore::with_entry(
            "chameleon_best_scores",
            r#"{"entries":[{"level":40,"correct_on_first_attempt":3,"questions":10}]}"#,
        );
        assert!(BestScores::load(&store).is_empty());
    }
}
