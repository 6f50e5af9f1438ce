//! Tests for match history recorded by the engine.

use chrono::{Duration, TimeZone, Utc};
use std::rc::Rc;
use tictactoe_engine::{
    Cell, FileStore, FixedClock, GameEngine, HISTORY_KEY, HistoryLedger, KeyValueStore, Mark,
    MemoryStore, StoreError,
};

const X: Cell = Cell::Occupied(Mark::X);
const O: Cell = Cell::Occupied(Mark::O);

/// Store whose every operation fails.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::new("storage unavailable"))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::new("storage full"))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::new("storage unavailable"))
    }
}

fn clock() -> Rc<FixedClock> {
    Rc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()))
}

fn win_top_row(engine: &mut GameEngine) {
    for (row, col) in [(1, 1), (2, 1), (1, 2), (2, 2), (1, 3)] {
        engine.play_move(row, col);
    }
}

#[test]
fn test_history_keeps_five_most_recent() {
    let store = MemoryStore::new();
    let clock = clock();
    let mut engine = GameEngine::builder()
        .seed(2)
        .store(store.clone())
        .clock(clock.clone())
        .build();

    for _ in 0..4 {
        win_top_row(&mut engine);
        engine.reset_game();
        clock.advance(Duration::minutes(1));
    }
    for _ in 0..3 {
        engine.set_draw_state(None);
        clock.advance(Duration::minutes(1));
    }

    let history = engine.history();
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].outcome(), "Draw");
    assert_eq!(history[2].outcome(), "Draw");
    assert_eq!(history[3].outcome(), "X wins");
    assert!(history.windows(2).all(|w| w[0].finished_at() > w[1].finished_at()));
    assert_eq!(*history[0].finished_at(), Utc.with_ymd_and_hms(2024, 6, 1, 12, 6, 0).unwrap());

    // The shared handle sees exactly what the engine persisted.
    let raw = store.get(HISTORY_KEY).unwrap().unwrap();
    let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 5);
    assert_eq!(stored[4]["winner"], "X");
    assert_eq!(stored[4]["moves"], 5);
}

#[test]
fn test_draw_state_records_entry() {
    let mut engine = GameEngine::builder().seed(2).clock(clock()).build();
    engine.set_draw_state(None);

    assert!(!engine.is_game_active());
    assert_eq!(engine.message(), "Draw");
    let history = engine.history();
    assert_eq!(history.len(), 1);
    assert_eq!(*history[0].winner(), None);
    assert_eq!(*history[0].moves(), 9);
}

#[test]
fn test_custom_draw_pattern() {
    let mut engine = GameEngine::builder().seed(2).build();
    engine.set_draw_state(Some([[O, X, O], [O, X, X], [X, O, X]]));
    assert_eq!(engine.cell(1, 1), O);
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn test_store_failure_never_interrupts_play() {
    let mut engine = GameEngine::builder().seed(2).store(BrokenStore).build();
    win_top_row(&mut engine);

    assert!(!engine.is_game_active());
    assert_eq!(engine.message(), "X wins");
    assert!(engine.history().is_empty());
    engine.clear_history();
    engine.reset_game();
    assert!(engine.is_game_active());
}

#[test]
fn test_clear_history() {
    let store = MemoryStore::new();
    let mut engine = GameEngine::builder().seed(2).store(store.clone()).build();
    win_top_row(&mut engine);
    assert_eq!(engine.history().len(), 1);

    engine.clear_history();
    assert!(engine.history().is_empty());
    assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
}

#[test]
fn test_history_survives_engine_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let mut engine = GameEngine::builder()
        .seed(2)
        .store(FileStore::new(dir.path()))
        .clock(clock())
        .build();
    win_top_row(&mut engine);
    drop(engine);

    assert!(dir.path().join(format!("{}.json", HISTORY_KEY)).exists());

    let ledger = HistoryLedger::new(FileStore::new(dir.path()), clock());
    let history = ledger.list();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].outcome(), "X wins");
}
