use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every state change in the engine produces an Event.
/// The CLI prints them; the watch loop reacts to completions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// An interval counted down to zero while active.
    TimerCompleted {
        finished: Mode,
        next: Mode,
        completed_work_sessions: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        remaining_secs: u64,
        total_secs: u64,
        is_active: bool,
        completed_work_sessions: u64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
