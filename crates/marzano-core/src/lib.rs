//! # Marzano Core Library
//!
//! Core business logic for the Marzano Pomodoro timer: a session state
//! machine that alternates fixed-length work and break intervals, counts
//! completed work sessions, persists its state field-by-field, and signals
//! interval completions to notification collaborators. The `marzano` CLI
//! binary is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Session Engine**: a tick-driven state machine; the caller invokes
//!   `tick()` once per elapsed second while a countdown is active
//! - **Storage**: SQLite-backed keyed slots for session state and a TOML
//!   configuration file
//! - **Notifications**: a title-flashing state machine and a chime
//!   synthesizer, both driven from the presentation layer
//!
//! ## Key components
//!
//! - [`SessionEngine`]: countdown state machine
//! - [`Session`]: the engine wired to its [`Store`]
//! - [`Config`]: application configuration
//! - [`TitleFlasher`] / [`Tone`]: completion notification collaborators

pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod storage;
pub mod timer;
pub mod util;

pub use error::{ConfigError, CoreError, StoreError};
pub use events::Event;
pub use notify::{TitleFlasher, Tone};
pub use session::Session;
pub use storage::{Config, Store, StoredState};
pub use timer::{Mode, SessionEngine};
