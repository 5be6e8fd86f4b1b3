//! Session engine implementation.
//!
//! The engine is a tick-driven state machine. It owns no timer of its own -
//! the caller invokes `tick()` once per elapsed second while a countdown is
//! active. The `watch` loop in the CLI arms a one-second interval for this
//! and drops it on teardown, so no tick source can outlive its driver.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::new();
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::TimerCompleted) on the 1 -> 0 edge
//! ```

use chrono::Utc;

use super::mode::Mode;
use crate::events::Event;

/// Hook invoked exactly once per completion event.
type CompletionHook = Box<dyn FnMut() + Send>;

/// Core session state machine.
///
/// Holds the countdown for the current interval, the interval mode, the
/// active flag and the completed-work-session count. All mutation goes
/// through the command methods; completion processing runs synchronously
/// inside [`tick`](Self::tick) under `&mut self`, which is what makes a
/// double-counted completion structurally impossible: the single 1 -> 0
/// edge is the only trigger, and it leaves the engine inactive.
pub struct SessionEngine {
    remaining_secs: u64,
    mode: Mode,
    is_active: bool,
    completed_work_sessions: u64,
    /// Single slot: registering a new hook replaces the previous one.
    on_complete: Option<CompletionHook>,
}

impl std::fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEngine")
            .field("remaining_secs", &self.remaining_secs)
            .field("mode", &self.mode)
            .field("is_active", &self.is_active)
            .field("completed_work_sessions", &self.completed_work_sessions)
            .finish_non_exhaustive()
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEngine {
    /// Create an engine with default state: a full, inactive work interval
    /// and no completed sessions.
    pub fn new() -> Self {
        Self::restore(Mode::Work.duration_secs(), Mode::Work, false, 0)
    }

    /// Rebuild an engine from previously stored state.
    pub fn restore(
        remaining_secs: u64,
        mode: Mode,
        is_active: bool,
        completed_work_sessions: u64,
    ) -> Self {
        Self {
            remaining_secs,
            mode,
            is_active,
            completed_work_sessions,
            on_complete: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn completed_work_sessions(&self) -> u64 {
        self.completed_work_sessions
    }

    /// Full duration of the current interval.
    pub fn total_secs(&self) -> u64 {
        self.mode.duration_secs()
    }

    /// Share of the current interval still remaining, 0.0 ..= 100.0.
    ///
    /// Recomputed on every read; never stored.
    pub fn progress_percent(&self) -> f64 {
        let total = self.mode.duration_secs();
        (self.remaining_secs as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            is_active: self.is_active,
            completed_work_sessions: self.completed_work_sessions,
            progress_pct: self.progress_percent(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the countdown. No-op if already active.
    ///
    /// Starting with nothing left to count down only flips the flag; no
    /// tick decrements against a zero value and no completion fires until
    /// a reset or setter supplies a positive value.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_active {
            return None;
        }
        self.is_active = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop the countdown, keeping the remaining time.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.is_active {
            return None;
        }
        self.is_active = false;
        Some(Event::TimerStopped {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Restore the full duration of the *current* mode and stop. Mode and
    /// completed count are untouched.
    pub fn reset(&mut self) -> Option<Event> {
        self.remaining_secs = self.mode.duration_secs();
        self.is_active = false;
        Some(Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Return to defaults: work mode, full duration, stopped, zero
    /// completed sessions. Destroys accumulated progress.
    pub fn reset_all(&mut self) -> Option<Event> {
        self.mode = Mode::Work;
        self.remaining_secs = Mode::Work.duration_secs();
        self.is_active = false;
        self.completed_work_sessions = 0;
        Some(Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Debug override of the countdown. Negative values clamp to zero.
    /// Mode and active flag are untouched.
    pub fn set_time(&mut self, secs: i64) {
        self.remaining_secs = secs.max(0) as u64;
    }

    /// Debug override of the completed-session count. Negative values
    /// clamp to zero.
    pub fn set_completed_sessions(&mut self, count: i64) {
        self.completed_work_sessions = count.max(0) as u64;
    }

    /// Register the completion hook. A single slot, not an observer list:
    /// only the most recently registered hook fires.
    pub fn set_completion_hook<F>(&mut self, hook: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_complete = Some(Box::new(hook));
    }

    /// Advance the countdown by one elapsed second.
    ///
    /// No-op unless active with time remaining, so ticking against a zero
    /// value neither loops nor completes. Returns
    /// `Some(Event::TimerCompleted)` on the 1 -> 0 transition.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_active || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            return Some(self.complete());
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Completion protocol, in order: stop, notify, count, transition.
    ///
    /// Runs at most once per zero-crossing: the engine is inactive when
    /// this returns, so further ticks in the same batch fall through the
    /// guard in `tick()` instead of re-entering.
    fn complete(&mut self) -> Event {
        let finished = self.mode;
        self.is_active = false;
        if let Some(hook) = self.on_complete.as_mut() {
            hook();
        }
        if finished == Mode::Work {
            self.completed_work_sessions += 1;
        }
        let next = finished.next(self.completed_work_sessions);
        self.mode = next;
        self.remaining_secs = next.duration_secs();
        Event::TimerCompleted {
            finished,
            next,
            completed_work_sessions: self.completed_work_sessions,
            at: Utc::now(),
        }
    }
}
