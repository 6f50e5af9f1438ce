//! Bounded match history persisted through an injected key-value store.

mod clock;
mod ledger;
mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger::{HISTORY_KEY, HISTORY_LIMIT, HistoryEntry, HistoryLedger};
pub use store::{FileStore, KeyValueStore, MemoryStore};
