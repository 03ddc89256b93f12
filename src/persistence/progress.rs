//! Highest unlocked level, persisted across sessions

use super::{KeyValueStore, Result, StorageError};
use crate::sim::Level;

/// Progress that survives between visits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRecord {
    /// Never below 1, never decreases. One past the last level once
    /// everything is passed.
    highest_unlocked_level: u32,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            highest_unlocked_level: 1,
        }
    }
}

impl ProgressRecord {
    /// Storage key, value is a base-10 integer string
    pub const STORAGE_KEY: &'static str = "chameleon_highest_unlocked_level";

    pub fn new(highest_unlocked_level: u32) -> Self {
        Self {
            highest_unlocked_level: highest_unlocked_level.max(1),
        }
    }

    pub fn highest_unlocked_level(&self) -> u32 {
        self.highest_unlocked_level
    }

    pub fn is_unlocked(&self, level: Level) -> bool {
        level.get() <= self.highest_unlocked_level
    }

    /// Level shown in the "last level passed" banner, if any
    pub fn last_passed_level(&self) -> Option<u32> {
        Some(self.highest_unlocked_level - 1).filter(|&n| n > 0)
    }

    /// Unlock the level after `passed` if `passed` is the current frontier.
    /// Returns true when the record changed.
    pub fn unlock_after(&mut self, passed: Level) -> bool {
        if passed.get() != self.highest_unlocked_level {
            return false;
        }
        self.highest_unlocked_level = passed.get() + 1;
        true
    }

    /// Read the record, treating a missing key as a fresh player
    pub fn try_load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        let Some(raw) = store.get(Self::STORAGE_KEY)? else {
            return Ok(Self::default());
        };
        raw.trim()
            .parse::<i64>()
            .map(|n| Self::new(n.clamp(1, i64::from(u32::MAX)) as u32))
            .map_err(|_| StorageError::Malformed {
                key: Self::STORAGE_KEY.to_string(),
                value: raw,
            })
    }

    /// Read the record, falling back to a fresh one on any storage error
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match Self::try_load(store) {
            Ok(record) => {
                log::info!(
                    "Loaded progress: highest unlocked level {}",
                    record.highest_unlocked_level
                );
                record
            }
            Err(e) => {
                log::warn!("Could not load progress ({}), starting at level 1", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.set(
            Self::STORAGE_KEY,
            &self.highest_unlocked_level.to_string(),
        )
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
    fn test_fresh_store_defaults_to_one() {
        let record = ProgressRecord::load(&MemoryStore::new());
        assert_eq!(record.highest_unlocked_level(), 1);
        assert_eq!(record.last_passed_level(), None);
        assert!(record.is_unlocked(level(1)));
        assert!(!record.is_unlocked(level(2)));
    }

    #[test]
    fn test_load_parses_integer_string() {
        let store = MemoryStore::with_entry(ProgressRecord::STORAGE_KEY, " 5 ");
        let record = ProgressRecord::load(&store);
        assert_eq!(record.highest_unlocked_level(), 5);
        assert_eq!(record.last_passed_level(), Some(4));
    }

    #[test]
    fn test_load_clamps_non_positive() {
        let store = MemoryStore::with_entry(ProgressRecord::STORAGE_KEY, "-3");
        assert_eq!(ProgressRecord::load(&store).highest_unlocked_level(), 1);
    }

    #[test]
    fn test_malformed_value_falls_back() {
        let store = MemoryStore::with_entry(ProgressRecord::STORAGE_KEY, "three");
        assert!(matches!(
            ProgressRecord::try_load(&store),
            Err(StorageError::Malformed { .. })
        ));
        assert_eq!(ProgressRecord::load(&store), ProgressRecord::default());
    }

    #[test]
    fn test_unlock_only_at_frontier() {
        let mut record = ProgressRecord::new(3);
        assert!(!record.unlock_after(level(2)));
        assert_eq!(record.highest_unlocked_level(), 3);
        assert!(record.unlock_after(level(3)));
        assert_eq!(record.highest_unlocked_level(), 4);
        assert!(!record.unlock_after(level(3)));
        assert_eq!(record.highest_unlocked_level(), 4);
    }

    #[test]
    fn test_save_roundtrip() {
        let mut store = MemoryStore::new();
        ProgressRecord::new(13).save(&mut store).unwrap();
        assert_eq!(
            store.get(ProgressRecord::STORAGE_KEY).unwrap().as_deref(),
            Some("13")
        );
        let record = ProgressRecord::load(&store);
        assert!(record.is_unlocked(Level::LAST));
    }
}
