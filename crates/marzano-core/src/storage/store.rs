//! Keyed persistence for the session state.
//!
//! Four independent slots in a SQLite kv table, one per persisted field,
//! with JSON-encoded primitive values. Fields are written individually as
//! they change and read back together only at startup. A slot that is
//! missing or fails to parse falls back to that field's default without
//! blocking initialization.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use super::data_dir;
use crate::error::{Result, StoreError};
use crate::timer::Mode;

// Slot keys. Stable across versions; stored values are JSON primitives
// (integer seconds, "work"|"short-break"|"long-break", bool, integer).
const KEY_TIME: &str = "timer.time";
const KEY_MODE: &str = "timer.mode";
const KEY_RUNNING: &str = "timer.running";
const KEY_COMPLETED: &str = "timer.completed";

/// Previously stored session fields. `None` means absent or unreadable;
/// the engine substitutes that field's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredState {
    pub remaining_secs: Option<u64>,
    pub mode: Option<Mode>,
    pub is_active: Option<bool>,
    pub completed_work_sessions: Option<u64>,
}

/// SQLite-backed store for the four session-state slots.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `<data_dir>/marzano.db`, creating the file and
    /// schema if they don't exist.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("marzano.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the store at an explicit path (tests point this at a temp
    /// directory).
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Read all four slots. Absent or unparsable slots come back `None`.
    pub fn load(&self) -> StoredState {
        StoredState {
            remaining_secs: self.read_slot(KEY_TIME),
            mode: self.read_slot(KEY_MODE),
            is_active: self.read_slot(KEY_RUNNING),
            completed_work_sessions: self.read_slot(KEY_COMPLETED),
        }
    }

    pub fn save_remaining(&self, secs: u64) -> Result<(), StoreError> {
        self.write_slot(KEY_TIME, &secs)
    }

    pub fn save_mode(&self, mode: Mode) -> Result<(), StoreError> {
        self.write_slot(KEY_MODE, &mode)
    }

    pub fn save_active(&self, active: bool) -> Result<(), StoreError> {
        self.write_slot(KEY_RUNNING, &active)
    }

    pub fn save_completed(&self, count: u64) -> Result<(), StoreError> {
        self.write_slot(KEY_COMPLETED, &count)
    }

    /// Erase all stored session state.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn read_slot<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.kv_get(key) {
            Ok(raw) => raw?,
            Err(err) => {
                eprintln!("warning: failed to read {key}: {err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                eprintln!("warning: ignoring corrupt value for {key}: {err}");
                None
            }
        }
    }

    fn write_slot<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.kv_set(key, &raw)
    }

    fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_all_absent() {
        let store = Store::open_memory().unwrap();
        let state = store.load();
        assert!(state.remaining_secs.is_none());
        assert!(state.mode.is_none());
        assert!(state.is_active.is_none());
        assert!(state.completed_work_sessions.is_none());
    }

    #[test]
    fn slots_round_trip() {
        let store = Store::open_memory().unwrap();
        store.save_remaining(1234).unwrap();
        store.save_mode(Mode::ShortBreak).unwrap();
        store.save_active(true).unwrap();
        store.save_completed(6).unwrap();

        let state = store.load();
        assert_eq!(state.remaining_secs, Some(1234));
        assert_eq!(state.mode, Some(Mode::ShortBreak));
        assert_eq!(state.is_active, Some(true));
        assert_eq!(state.completed_work_sessions, Some(6));
    }

    #[test]
    fn slots_are_written_independently() {
        let store = Store::open_memory().unwrap();
        store.save_completed(2).unwrap();

        let state = store.load();
        assert_eq!(state.completed_work_sessions, Some(2));
        assert!(state.remaining_secs.is_none());
        assert!(state.mode.is_none());
    }

    #[test]
    fn corrupt_slot_falls_back_to_absent() {
        let store = Store::open_memory().unwrap();
        store.kv_set(KEY_TIME, "not a number").unwrap();
        store.kv_set(KEY_MODE, "\"nap\"").unwrap();
        store.save_completed(3).unwrap();

        // Corruption in one slot never poisons the others.
        let state = store.load();
        assert!(state.remaining_secs.is_none());
        assert!(state.mode.is_none());
        assert_eq!(state.completed_work_sessions, Some(3));
    }

    #[test]
    fn mode_slot_uses_wire_names() {
        let store = Store::open_memory().unwrap();
        store.save_mode(Mode::LongBreak).unwrap();
        assert_eq!(
            store.kv_get(KEY_MODE).unwrap().as_deref(),
            Some("\"long-break\"")
        );
    }

    #[test]
    fn clear_erases_every_slot() {
        let store = Store::open_memory().unwrap();
        store.save_remaining(10).unwrap();
        store.save_mode(Mode::Work).unwrap();
        store.save_active(false).unwrap();
        store.save_completed(1).unwrap();

        store.clear().unwrap();
        let state = store.load();
        assert!(state.remaining_secs.is_none());
        assert!(state.mode.is_none());
        assert!(state.is_active.is_none());
        assert!(state.completed_work_sessions.is_none());
    }
}
