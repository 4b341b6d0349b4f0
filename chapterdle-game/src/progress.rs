//! Durable per-date progress records.

use serde::{Deserialize, Serialize};

use crate::ProgressStorage;
use crate::constants::{MAX_GUESSES, SAVE_KEY_PREFIX};
use crate::date::PuzzleDate;
use crate::reveal::HINT_REVEAL_SCHEDULE;

/// Per-date play state, persisted after every accepted guess.
///
/// `guesses` counts *incorrect* attempts only; `history` logs every accepted
/// attempt, so the two diverge by one on the solving guess. Every field
/// defaults so that records written by older builds still hydrate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub guesses: u32,
    #[serde(default)]
    pub solved: bool,
    /// Cosmetic counter of hint stages announced; never gates reveal logic.
    #[serde(default)]
    pub hints_given: u32,
    /// Raw trimmed guesses in insertion order. Duplicates allowed.
    #[serde(default)]
    pub history: Vec<String>,
}

impl ProgressRecord {
    /// Clamp hydrated values into their documented ranges.
    #[must_use]
    fn sanitized(mut self) -> Self {
        let stages = u32::try_from(HINT_REVEAL_SCHEDULE.len()).unwrap_or(u32::MAX);
        self.hints_given = self.hints_given.min(stages);
        self
    }

    /// Guesses still available under the fixed budget.
    #[must_use]
    pub const fn guesses_remaining(&self) -> u32 {
        MAX_GUESSES.saturating_sub(self.guesses)
    }
}

/// Durable store of progress records, partitioned strictly by date.
///
/// Wraps a platform key-value backend. Saves are synchronous from the
/// caller's point of view: once `save` returns, a reload sees the new state.
#[derive(Debug, Clone)]
pub struct ProgressStore<S> {
    storage: S,
}

impl<S: ProgressStorage> ProgressStore<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    fn key(date: &PuzzleDate) -> String {
        format!("{SAVE_KEY_PREFIX}{date}")
    }

    /// Load the record for a date.
    ///
    /// Returns the zero-valued record when nothing is stored. A record that
    /// fails to parse is purged before the zero record is returned, so the
    /// corrupt payload cannot reappear on the next visit. Backend read
    /// failures degrade the same way.
    pub fn load(&self, date: &PuzzleDate) -> ProgressRecord {
        let key = Self::key(date);
        let raw = match self.storage.read(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ProgressRecord::default(),
            Err(err) => {
                log::warn!("progress read failed for {date}: {err}");
                return ProgressRecord::default();
            }
        };
        match serde_json::from_str::<ProgressRecord>(&raw) {
            Ok(record) => record.sanitized(),
            Err(err) => {
                log::warn!("discarding corrupt progress record for {date}: {err}");
                if let Err(err) = self.storage.delete(&key) {
                    log::warn!("failed to purge corrupt record for {date}: {err}");
                }
                ProgressRecord::default()
            }
        }
    }

    /// Overwrite the record for a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn save(&self, date: &PuzzleDate, record: &ProgressRecord) -> Result<(), anyhow::Error> {
        let raw = serde_json::to_string(record)?;
        self.storage
            .write(&Self::key(date), &raw)
            .map_err(anyhow::Error::new)
    }

    /// Clear every stored record at once. There is no per-date reset.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend clear fails.
    pub fn reset_all(&self) -> Result<(), anyhow::Error> {
        self.storage.clear().map_err(anyhow::Error::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStorage {
        cells: Rc<RefCell<HashMap<String, String>>>,
    }

    impl ProgressStorage for MemoryStorage {
        type Error = Infallible;

        fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
            Ok(self.cells.borrow().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
            self.cells
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn delete(&self, key: &str) -> Result<(), Self::Error> {
            self.cells.borrow_mut().remove(key);
            Ok(())
        }

        fn clear(&self) -> Result<(), Self::Error> {
            self.cells.borrow_mut().clear();
            Ok(())
        }
    }

    fn date(s: &str) -> PuzzleDate {
        s.parse().unwrap()
    }

    #[test]
    fn missing_record_loads_as_zero_defaults() {
        let store = ProgressStore::new(MemoryStorage::default());
        assert_eq!(store.load(&date("2025-05-01")), ProgressRecord::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = ProgressStore::new(MemoryStorage::default());
        let day = date("2025-05-01");
        let record = ProgressRecord {
            guesses: 2,
            solved: false,
            hints_given: 1,
            history: vec!["Dune".to_string(), "The Hobbit".to_string()],
        };
        store.save(&day, &record).unwrap();
        assert_eq!(store.load(&day), record);
    }

    #[test]
    fn persisted_payload_uses_reference_field_names() {
        let record = ProgressRecord {
            guesses: 1,
            solved: true,
            hints_given: 0,
            history: vec!["Dune".to_string()],
        };
        let raw = serde_json::to_string(&record).unwrap();
        assert!(raw.contains("\"guesses\":1"));
        assert!(raw.contains("\"solved\":true"));
        assert!(raw.contains("\"hintsGiven\":0"));
        assert!(raw.contains("\"history\":[\"Dune\"]"));
    }

    #[test]
    fn partial_payload_hydrates_with_defaults() {
        let storage = MemoryStorage::default();
        storage
            .write("chapterGuesserSave-2025-05-01", r#"{"solved":true}"#)
            .unwrap();
        let store = ProgressStore::new(storage);
        let record = store.load(&date("2025-05-01"));
        assert!(record.solved);
        assert_eq!(record.guesses, 0);
        assert!(record.history.is_empty());
    }

    #[test]
    fn corrupt_record_is_purged_and_degrades_to_defaults() {
        let storage = MemoryStorage::default();
        storage
            .write("chapterGuesserSave-2025-05-01", "{not json")
            .unwrap();
        let store = ProgressStore::new(storage.clone());
        let day = date("2025-05-01");
        assert_eq!(store.load(&day), ProgressRecord::default());
        // Purged: the corrupt payload must not reappear.
        assert_eq!(storage.read("chapterGuesserSave-2025-05-01").unwrap(), None);
    }

    #[test]
    fn hydrated_hint_counter_is_clamped_to_schedule_length() {
        let storage = MemoryStorage::default();
        storage
            .write("chapterGuesserSave-2025-05-01", r#"{"hintsGiven":99}"#)
            .unwrap();
        let store = ProgressStore::new(storage);
        assert_eq!(store.load(&date("2025-05-01")).hints_given, 3);
    }

    #[test]
    fn records_are_partitioned_by_date() {
        let store = ProgressStore::new(MemoryStorage::default());
        let first = date("2025-05-01");
        let second = date("2025-05-02");
        let record = ProgressRecord {
            guesses: 3,
            ..ProgressRecord::default()
        };
        store.save(&first, &record).unwrap();
        assert_eq!(store.load(&second), ProgressRecord::default());
        assert_eq!(store.load(&first).guesses, 3);
    }

    #[test]
    fn reset_all_clears_every_date() {
        let store = ProgressStore::new(MemoryStorage::default());
        let first = date("2025-05-01");
        let second = date("2025-05-02");
        let record = ProgressRecord {
            solved: true,
            ..ProgressRecord::default()
        };
        store.save(&first, &record).unwrap();
        store.save(&second, &record).unwrap();
        store.reset_all().unwrap();
        assert_eq!(store.load(&first), ProgressRecord::default());
        assert_eq!(store.load(&second), ProgressRecord::default());
    }
}
