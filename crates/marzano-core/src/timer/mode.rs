use serde::{Deserialize, Serialize};

/// Every Nth completed work session is followed by a long break.
pub const SESSIONS_PER_LONG_BREAK: u64 = 4;

const WORK_SECS: u64 = 25 * 60;
const SHORT_BREAK_SECS: u64 = 5 * 60;
const LONG_BREAK_SECS: u64 = 15 * 60;

/// Interval type. Durations are fixed; there is deliberately no
/// configuration surface for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// Full interval length in seconds for this mode.
    pub fn duration_secs(self) -> u64 {
        match self {
            Mode::Work => WORK_SECS,
            Mode::ShortBreak => SHORT_BREAK_SECS,
            Mode::LongBreak => LONG_BREAK_SECS,
        }
    }

    pub fn is_break(self) -> bool {
        matches!(self, Mode::ShortBreak | Mode::LongBreak)
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "Work",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Mode that follows a completed interval of this mode.
    ///
    /// `completed_work_sessions` is the post-increment count: a work
    /// session that brings the total to a multiple of
    /// [`SESSIONS_PER_LONG_BREAK`] earns the long break.
    pub fn next(self, completed_work_sessions: u64) -> Mode {
        match self {
            Mode::Work => {
                if completed_work_sessions % SESSIONS_PER_LONG_BREAK == 0 {
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                }
            }
            Mode::ShortBreak | Mode::LongBreak => Mode::Work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(Mode::Work.duration_secs(), 1500);
        assert_eq!(Mode::ShortBreak.duration_secs(), 300);
        assert_eq!(Mode::LongBreak.duration_secs(), 900);
    }

    #[test]
    fn work_alternates_with_short_breaks() {
        assert_eq!(Mode::Work.next(1), Mode::ShortBreak);
        assert_eq!(Mode::Work.next(2), Mode::ShortBreak);
        assert_eq!(Mode::Work.next(3), Mode::ShortBreak);
    }

    #[test]
    fn every_fourth_completion_earns_long_break() {
        assert_eq!(Mode::Work.next(4), Mode::LongBreak);
        assert_eq!(Mode::Work.next(8), Mode::LongBreak);
        assert_eq!(Mode::Work.next(12), Mode::LongBreak);
    }

    #[test]
    fn breaks_return_to_work() {
        assert_eq!(Mode::ShortBreak.next(1), Mode::Work);
        assert_eq!(Mode::LongBreak.next(4), Mode::Work);
    }

    #[test]
    fn wire_names_are_kebab_case() {
        assert_eq!(serde_json::to_string(&Mode::Work).unwrap(), "\"work\"");
        assert_eq!(
            serde_json::to_string(&Mode::ShortBreak).unwrap(),
            "\"short-break\""
        );
        assert_eq!(
            serde_json::to_string(&Mode::LongBreak).unwrap(),
            "\"long-break\""
        );
    }
}
