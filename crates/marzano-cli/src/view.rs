//! Terminal rendering helpers for the watch view and stats output.

use marzano_core::util::format_clock;
use marzano_core::Mode;

const BAR_WIDTH: usize = 20;

/// One-line watch view: mode, countdown, progress bar and tomato packs.
pub fn status_line(
    mode: Mode,
    remaining_secs: u64,
    progress_pct: f64,
    is_active: bool,
    completed: u64,
) -> String {
    let mut line = format!(
        "{:<11} {:>8}  {} {:>3.0}%",
        mode.label(),
        format_clock(remaining_secs),
        progress_bar(progress_pct),
        progress_pct,
    );
    if !is_active {
        line.push_str("  (stopped)");
    }
    let tomatoes = tomato_line(completed);
    if !tomatoes.is_empty() {
        line.push_str("  ");
        line.push_str(&tomatoes);
    }
    line
}

/// Remaining-share progress bar, full at the start of an interval.
pub fn progress_bar(percent: f64) -> String {
    let filled = (percent / 100.0 * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Completed sessions as tomatoes, bracketed in packs of four.
pub fn tomato_line(completed: u64) -> String {
    let packs = completed / 4;
    let rest = (completed % 4) as usize;
    let mut groups = Vec::new();
    for _ in 0..packs {
        groups.push(format!("[{}]", "🍅".repeat(4)));
    }
    if rest > 0 {
        groups.push("🍅".repeat(rest));
    }
    groups.join(" ")
}

/// Stats footer, e.g. "6 pomodoros completed (1 pack + 2)".
pub fn summary_line(completed: u64) -> String {
    let noun = if completed == 1 { "pomodoro" } else { "pomodoros" };
    let mut line = format!("{completed} {noun} completed");
    let packs = completed / 4;
    let rest = completed % 4;
    if packs > 0 {
        let pack_noun = if packs == 1 { "pack" } else { "packs" };
        if rest > 0 {
            line.push_str(&format!(" ({packs} {pack_noun} + {rest})"));
        } else {
            line.push_str(&format!(" ({packs} {pack_noun})"));
        }
    }
    line
}
