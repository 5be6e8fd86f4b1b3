//! Terminal title driver.
//!
//! Mirrors the engine's observable state into a title string and flashes
//! an alert when a countdown completes. This is a pure state machine: the
//! presentation layer feeds [`observe`](TitleFlasher::observe) after every
//! engine change and [`tick`](TitleFlasher::tick) on a
//! [`FLASH_INTERVAL_MS`] cadence while a flash sequence is running.
//! Dropping the driver is the teardown path; no timer lives here.

use crate::util::format_clock;

const APP_NAME: &str = "Marzano";
const FLASH_PRIMARY: &str = "Time's up!";
const FLASH_ALTERNATE: &str = "⏰ Check Marzano!";

/// Title alternations per completion: twice per second for five seconds.
const FLASH_FLIPS: u8 = 10;

/// Cadence at which the driver should call `tick()`.
pub const FLASH_INTERVAL_MS: u64 = 500;

/// A completion is recognized when the countdown was this close to zero
/// and then jumped up while the engine went inactive.
const COMPLETION_WINDOW_SECS: u64 = 3;

#[derive(Debug)]
pub struct TitleFlasher {
    prev_remaining: Option<u64>,
    prev_active: bool,
    flips_left: u8,
    title: String,
}

impl Default for TitleFlasher {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleFlasher {
    pub fn new() -> Self {
        Self {
            prev_remaining: None,
            prev_active: false,
            flips_left: 0,
            title: APP_NAME.to_string(),
        }
    }

    /// Feed the engine state after every change. Returns true when the
    /// completion signature was detected and a flash sequence (re)armed.
    ///
    /// The signature is: was active, now inactive, previous countdown at
    /// most [`COMPLETION_WINDOW_SECS`], new countdown larger - the shape a
    /// completion leaves behind once the next interval's duration is
    /// loaded. A stop without the countdown jumping, or a countdown change
    /// while still running, is not a completion.
    pub fn observe(&mut self, remaining_secs: u64, is_active: bool) -> bool {
        let completed = self.prev_active
            && !is_active
            && self
                .prev_remaining
                .is_some_and(|prev| prev <= COMPLETION_WINDOW_SECS && remaining_secs > prev);
        self.prev_remaining = Some(remaining_secs);
        self.prev_active = is_active;

        if completed {
            // A fresh completion mid-sequence restarts the flashing.
            self.flips_left = FLASH_FLIPS;
            self.title = FLASH_PRIMARY.to_string();
        } else if self.flips_left == 0 {
            self.title = format!("{} | {}", format_clock(remaining_secs), APP_NAME);
        }
        completed
    }

    /// Advance the flash sequence one step; reverts to the neutral title
    /// once the alternations are exhausted. No-op while idle.
    pub fn tick(&mut self) {
        if self.flips_left == 0 {
            return;
        }
        self.flips_left -= 1;
        if self.flips_left == 0 {
            self.title = APP_NAME.to_string();
        } else if self.title == FLASH_PRIMARY {
            self.title = FLASH_ALTERNATE.to_string();
        } else {
            self.title = FLASH_PRIMARY.to_string();
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flips_left > 0
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_formatted_countdown_while_running() {
        let mut flasher = TitleFlasher::new();
        flasher.observe(300, true);
        assert_eq!(flasher.title(), "5:00 | Marzano");
        assert!(!flasher.is_flashing());
    }

    #[test]
    fn completion_starts_flashing() {
        let mut flasher = TitleFlasher::new();
        flasher.observe(60, true);
        flasher.observe(2, true);
        // Completion: countdown jumps to the next interval, engine stops.
        assert!(flasher.observe(300, false));
        assert_eq!(flasher.title(), "Time's up!");
        assert!(flasher.is_flashing());

        flasher.tick();
        assert_eq!(flasher.title(), "⏰ Check Marzano!");
        flasher.tick();
        assert_eq!(flasher.title(), "Time's up!");
    }

    #[test]
    fn flashing_reverts_to_neutral_after_ten_flips() {
        let mut flasher = TitleFlasher::new();
        flasher.observe(1, true);
        flasher.observe(300, false);

        for _ in 0..FLASH_FLIPS {
            assert!(flasher.is_flashing());
            flasher.tick();
        }
        assert!(!flasher.is_flashing());
        assert_eq!(flasher.title(), "Marzano");

        // Further ticks change nothing.
        flasher.tick();
        assert_eq!(flasher.title(), "Marzano");
    }

    #[test]
    fn no_flash_when_countdown_changes_while_running() {
        let mut flasher = TitleFlasher::new();
        flasher.observe(60, true);
        assert!(!flasher.observe(30, true));
        assert_eq!(flasher.title(), "0:30 | Marzano");
        assert!(!flasher.is_flashing());
    }

    #[test]
    fn no_flash_when_stopped_without_time_jump() {
        let mut flasher = TitleFlasher::new();
        flasher.observe(60, true);
        assert!(!flasher.observe(60, false));
        assert_eq!(flasher.title(), "1:00 | Marzano");
        assert!(!flasher.is_flashing());
    }

    #[test]
    fn no_flash_from_a_plain_reset() {
        let mut flasher = TitleFlasher::new();
        // Stopped at 45 seconds, then reset to the full interval: the
        // engine was not active, so no completion is signaled.
        flasher.observe(45, false);
        assert!(!flasher.observe(1500, false));
        assert!(!flasher.is_flashing());
    }

    #[test]
    fn fresh_completion_restarts_the_sequence() {
        let mut flasher = TitleFlasher::new();
        flasher.observe(1, true);
        flasher.observe(300, false);
        for _ in 0..4 {
            flasher.tick();
        }
        assert!(flasher.is_flashing());

        // A second completion arrives mid-sequence.
        flasher.observe(2, true);
        assert!(flasher.observe(1500, false));
        assert_eq!(flasher.title(), "Time's up!");

        // The sequence runs its full length again.
        for _ in 0..FLASH_FLIPS {
            assert!(flasher.is_flashing());
            flasher.tick();
        }
        assert!(!flasher.is_flashing());
    }
}
