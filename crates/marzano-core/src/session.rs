//! Persistent session: the engine wired to its store.
//!
//! A `Session` restores the engine per-field at startup and writes back
//! only the fields an operation changed. Because the session is
//! constructed *from* the initial load, nothing can write to the store
//! before that load - transient defaults never clobber stored state.

use crate::events::Event;
use crate::storage::Store;
use crate::timer::{Mode, SessionEngine};

/// The last values written to each slot, used to diff after every
/// operation so unchanged fields are not rewritten.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PersistedView {
    remaining_secs: u64,
    mode: Mode,
    is_active: bool,
    completed_work_sessions: u64,
}

impl PersistedView {
    fn of(engine: &SessionEngine) -> Self {
        Self {
            remaining_secs: engine.remaining_secs(),
            mode: engine.mode(),
            is_active: engine.is_active(),
            completed_work_sessions: engine.completed_work_sessions(),
        }
    }
}

/// A [`SessionEngine`] bound to a [`Store`].
///
/// Every forwarded operation is followed by a field-by-field diff and
/// save. Writers are per-field and non-transactional; readers only ever
/// load at startup.
pub struct Session {
    engine: SessionEngine,
    store: Store,
    persisted: PersistedView,
}

impl Session {
    /// Restore a session from the store. Absent or unreadable fields fall
    /// back to their defaults individually; a stored mode without a stored
    /// countdown defaults to that mode's full duration.
    pub fn open(store: Store) -> Self {
        let stored = store.load();
        let mode = stored.mode.unwrap_or(Mode::Work);
        let engine = SessionEngine::restore(
            stored.remaining_secs.unwrap_or_else(|| mode.duration_secs()),
            mode,
            stored.is_active.unwrap_or(false),
            stored.completed_work_sessions.unwrap_or(0),
        );
        let persisted = PersistedView::of(&engine);
        Self {
            engine,
            store,
            persisted,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn remaining_secs(&self) -> u64 {
        self.engine.remaining_secs()
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    pub fn completed_work_sessions(&self) -> u64 {
        self.engine.completed_work_sessions()
    }

    pub fn progress_percent(&self) -> f64 {
        self.engine.progress_percent()
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // ── Commands (forwarded, then persisted) ─────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start();
        self.persist();
        event
    }

    pub fn stop(&mut self) -> Option<Event> {
        let event = self.engine.stop();
        self.persist();
        event
    }

    pub fn reset(&mut self) -> Option<Event> {
        let event = self.engine.reset();
        self.persist();
        event
    }

    pub fn reset_all(&mut self) -> Option<Event> {
        let event = self.engine.reset_all();
        self.persist();
        event
    }

    pub fn set_time(&mut self, secs: i64) {
        self.engine.set_time(secs);
        self.persist();
    }

    pub fn set_completed_sessions(&mut self, count: i64) {
        self.engine.set_completed_sessions(count);
        self.persist();
    }

    pub fn tick(&mut self) -> Option<Event> {
        let event = self.engine.tick();
        self.persist();
        event
    }

    /// Forwarded to the engine; the hook itself is not persisted.
    pub fn set_completion_hook<F>(&mut self, hook: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.engine.set_completion_hook(hook);
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Write each field that changed since the last save. Failures warn
    /// and leave the in-memory state authoritative; the next change
    /// retries the slot.
    fn persist(&mut self) {
        let current = PersistedView::of(&self.engine);

        if current.remaining_secs != self.persisted.remaining_secs {
            if let Err(err) = self.store.save_remaining(current.remaining_secs) {
                eprintln!("warning: failed to persist timer.time: {err}");
                return;
            }
        }
        if current.mode != self.persisted.mode {
            if let Err(err) = self.store.save_mode(current.mode) {
                eprintln!("warning: failed to persist timer.mode: {err}");
                return;
            }
        }
        if current.is_active != self.persisted.is_active {
            if let Err(err) = self.store.save_active(current.is_active) {
                eprintln!("warning: failed to persist timer.running: {err}");
                return;
            }
        }
        if current.completed_work_sessions != self.persisted.completed_work_sessions {
            if let Err(err) = self.store.save_completed(current.completed_work_sessions) {
                eprintln!("warning: failed to persist timer.completed: {err}");
                return;
            }
        }

        self.persisted = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_session() -> Session {
        Session::open(Store::open_memory().unwrap())
    }

    #[test]
    fn empty_store_yields_defaults() {
        let session = memory_session();
        assert_eq!(session.remaining_secs(), 1500);
        assert_eq!(session.mode(), Mode::Work);
        assert!(!session.is_active());
        assert_eq!(session.completed_work_sessions(), 0);
    }

    #[test]
    fn nothing_is_written_before_an_operation() {
        let session = memory_session();
        let stored = session.store().load();
        assert!(stored.remaining_secs.is_none());
        assert!(stored.mode.is_none());
        assert!(stored.is_active.is_none());
        assert!(stored.completed_work_sessions.is_none());
    }

    #[test]
    fn operations_write_only_changed_fields() {
        let mut session = memory_session();
        session.start();

        let stored = session.store().load();
        assert_eq!(stored.is_active, Some(true));
        // The countdown and mode did not change; their slots stay empty.
        assert!(stored.remaining_secs.is_none());
        assert!(stored.mode.is_none());
        assert!(stored.completed_work_sessions.is_none());
    }

    #[test]
    fn ticks_persist_the_countdown() {
        let mut session = memory_session();
        session.start();
        session.tick();
        session.tick();

        let stored = session.store().load();
        assert_eq!(stored.remaining_secs, Some(1498));
    }

    #[test]
    fn completion_persists_every_changed_field() {
        let mut session = memory_session();
        session.set_time(1);
        session.start();
        session.tick();

        let stored = session.store().load();
        assert_eq!(stored.remaining_secs, Some(300));
        assert_eq!(stored.mode, Some(Mode::ShortBreak));
        assert_eq!(stored.is_active, Some(false));
        assert_eq!(stored.completed_work_sessions, Some(1));
    }

    #[test]
    fn stored_mode_without_countdown_defaults_to_its_duration() {
        let store = Store::open_memory().unwrap();
        store.save_mode(Mode::LongBreak).unwrap();

        let session = Session::open(store);
        assert_eq!(session.mode(), Mode::LongBreak);
        assert_eq!(session.remaining_secs(), 900);
    }

    #[test]
    fn completion_hook_fires_through_the_session() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        let mut session = memory_session();
        let calls = Arc::new(AtomicU32::new(0));
        let hook_calls = Arc::clone(&calls);
        session.set_completion_hook(move || {
            hook_calls.fetch_add(1, Ordering::SeqCst);
        });

        session.set_time(1);
        session.start();
        session.tick();
        session.tick();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
