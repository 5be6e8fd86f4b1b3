//! Session persistence integration tests: state survives a restart and
//! partially-absent stored fields fall back per-field.

use marzano_core::{Mode, Session, Store};
use tempfile::TempDir;

fn open_session(dir: &TempDir) -> Session {
    let store = Store::open_at(&dir.path().join("marzano.db")).unwrap();
    Session::open(store)
}

#[test]
fn countdown_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open_session(&dir);
        session.start();
        for _ in 0..5 {
            session.tick();
        }
        session.stop();
    }

    let session = open_session(&dir);
    assert_eq!(session.remaining_secs(), 1495);
    assert_eq!(session.mode(), Mode::Work);
    assert!(!session.is_active());
}

#[test]
fn running_flag_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open_session(&dir);
        session.start();
    }

    // A restored running session keeps counting down once driven again.
    let mut session = open_session(&dir);
    assert!(session.is_active());
    session.tick();
    assert_eq!(session.remaining_secs(), 1499);
}

#[test]
fn completion_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open_session(&dir);
        session.set_time(1);
        session.start();
        session.tick();
    }

    let session = open_session(&dir);
    assert_eq!(session.mode(), Mode::ShortBreak);
    assert_eq!(session.remaining_secs(), 300);
    assert_eq!(session.completed_work_sessions(), 1);
    assert!(!session.is_active());
}

#[test]
fn reset_all_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open_session(&dir);
        session.set_completed_sessions(9);
        session.set_time(17);
        session.reset_all();
    }

    let session = open_session(&dir);
    assert_eq!(session.mode(), Mode::Work);
    assert_eq!(session.remaining_secs(), 1500);
    assert_eq!(session.completed_work_sessions(), 0);
}

#[test]
fn cleared_store_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open_session(&dir);
        session.set_completed_sessions(3);
        session.start();
        session.tick();
    }
    {
        let store = Store::open_at(&dir.path().join("marzano.db")).unwrap();
        store.clear().unwrap();
    }

    // Reinitializing after a wholesale clear lands on all defaults.
    let session = open_session(&dir);
    assert_eq!(session.remaining_secs(), 1500);
    assert_eq!(session.mode(), Mode::Work);
    assert!(!session.is_active());
    assert_eq!(session.completed_work_sessions(), 0);
}
