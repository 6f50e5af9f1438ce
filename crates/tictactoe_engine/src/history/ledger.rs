//! The history ledger: the five most recent finished matches.

use super::{Clock, KeyValueStore};
use crate::error::StoreError;
use crate::types::Mark;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Store key holding the serialized history.
pub const HISTORY_KEY: &str = "ticTacToeHistory";

/// Number of entries kept; older entries are evicted first.
pub const HISTORY_LIMIT: usize = 5;

/// Summary of one finished match.
///
/// Serialized as `{"outcome", "winner", "moves", "finishedAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Outcome text shown to the player, e.g. `"X wins"` or `"Draw"`.
    outcome: String,
    /// Winning mark, or `None` for a draw.
    winner: Option<Mark>,
    /// Number of plies in the match.
    moves: u32,
    /// When the match finished.
    finished_at: DateTime<Utc>,
}

/// Append-bounded ledger of finished matches.
///
/// The injected store is the only copy of the history; nothing is cached in
/// process. Store failures are logged and swallowed so they never interrupt
/// play.
pub struct HistoryLedger {
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for HistoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLedger")
            .field("key", &HISTORY_KEY)
            .finish_non_exhaustive()
    }
}

impl HistoryLedger {
    /// Creates a ledger over `store`, stamping entries with `clock`.
    pub fn new(store: impl KeyValueStore + 'static, clock: impl Clock + 'static) -> Self {
        Self::from_boxed(Box::new(store), Box::new(clock))
    }

    /// Creates a ledger from already boxed collaborators.
    pub fn from_boxed(store: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Prepends an entry stamped with the current time and keeps the newest
    /// [`HISTORY_LIMIT`].
    ///
    /// Returns the entry if it was persisted, `None` if the store failed.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: &str, winner: Option<Mark>, moves: u32) -> Option<HistoryEntry> {
        let entry = HistoryEntry::new(outcome.to_string(), winner, moves, self.clock.now());
        match self.try_record(entry.clone()) {
            Ok(kept) => {
                info!(outcome = %entry.outcome, moves, kept, "Match recorded in history");
                Some(entry)
            }
            Err(e) => {
                warn!(error = %e, "Unable to save history");
                None
            }
        }
    }

    fn try_record(&mut self, entry: HistoryEntry) -> Result<usize, StoreError> {
        let mut entries = self.list();
        entries.insert(0, entry);
        entries.truncate(HISTORY_LIMIT);
        let json = serde_json::to_string(&entries)?;
        self.store.set(HISTORY_KEY, &json)?;
        Ok(entries.len())
    }

    /// Returns the stored entries, most recent first.
    ///
    /// Never fails: a missing, unreadable or unparsable value is an empty
    /// history.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Unable to read history from store");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(HISTORY_LIMIT);
                debug!(count = entries.len(), "History loaded");
                entries
            }
            Err(e) => {
                warn!(error = %e, "Stored history is unparsable; treating as empty");
                Vec::new()
            }
        }
    }

    /// Removes all stored entries.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        match self.store.remove(HISTORY_KEY) {
            Ok(()) => info!("History cleared"),
            Err(e) => warn!(error = %e, "Unable to clear history"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{FixedClock, MemoryStore};
    use chrono::{Duration, TimeZone};
    use std::rc::Rc;

    fn ledger() -> (HistoryLedger, MemoryStore, Rc<FixedClock>) {
        let store = MemoryStore::new();
        let clock = Rc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()));
        let ledger = HistoryLedger::new(store.clone(), clock.clone());
        (ledger, store, clock)
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let (ledger, _, _) = ledger();
        assert!(ledger.list().is_empty());
    }

    #[test]
    fn test_record_prepends_and_stamps() {
        let (mut ledger, _, clock) = ledger();
        ledger.record("X wins", Some(Mark::X), 5);
        clock.advance(Duration::minutes(3));
        ledger.record("Draw", None, 9);

        let entries = ledger.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].outcome(), "Draw");
        assert_eq!(*entries[0].winner(), None);
        assert_eq!(entries[1].outcome(), "X wins");
        assert_eq!(*entries[1].moves(), 5);
        assert_eq!(*entries[0].finished_at() - *entries[1].finished_at(), Duration::minutes(3));
    }

    #[test]
    fn test_bounded_to_five_newest() {
        let (mut ledger, _, _) = ledger();
        for moves in 1..=7 {
            ledger.record("Draw", None, moves);
        }
        let moves: Vec<u32> = ledger.list().iter().map(|e| *e.moves()).collect();
        assert_eq!(moves, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_persisted_layout() {
        let (mut ledger, store, _) = ledger();
        ledger.record("O wins", Some(Mark::O), 6);
        let raw = store.get(HISTORY_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "outcome": "O wins",
                "winner": "O",
                "moves": 6,
                "finishedAt": "2024-01-02T03:04:05Z"
            }])
        );
    }

    #[test]
    fn test_unparsable_content_is_empty_history() {
        let (mut ledger, mut store, _) = ledger();
        store.set(HISTORY_KEY, "{not json").unwrap();
        assert!(ledger.list().is_empty());

        store.set(HISTORY_KEY, r#"{"outcome":"Draw"}"#).unwrap();
        assert!(ledger.list().is_empty());

        // Recording over garbage starts a fresh list.
        ledger.record("Draw", None, 9);
        assert_eq!(ledger.list().len(), 1);
    }

    #[test]
    fn test_reads_millisecond_timestamps() {
        let (ledger, mut store, _) = ledger();
        store
            .set(
                HISTORY_KEY,
                r#"[{"outcome":"X wins","winner":"X","moves":7,"finishedAt":"2024-03-01T10:00:00.123Z"}]"#,
            )
            .unwrap();
        let entries = ledger.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(*entries[0].winner(), Some(Mark::X));
    }

    #[test]
    fn test_clear_removes_entries() {
        let (mut ledger, store, _) = ledger();
        ledger.record("Draw", None, 9);
        ledger.clear();
        assert!(ledger.list().is_empty());
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
    }
}
