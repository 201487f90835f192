//! Overall session countdown.
//!
//! Runs on the same one-second cadence as the sequencer but keeps its own
//! state. The only coupling is the `Expired` event, which the controller turns
//! into a sequencer stop.

use tracing::debug;

use super::events::Event;
use crate::error::BreathError;

/// A countdown that bounds a breathing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTimer {
    active: bool,
    total_secs: u32,
    remaining_secs: u32,
}

impl SessionTimer {
    /// Create an inactive timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: false,
            total_secs: 0,
            remaining_secs: 0,
        }
    }

    /// Start counting down from `total_secs`.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidDuration` if `total_secs` is zero.
    pub fn arm(&mut self, total_secs: u32) -> Result<(), BreathError> {
        if total_secs == 0 {
            return Err(BreathError::InvalidDuration(
                "session length must be at least one second".to_string(),
            ));
        }

        self.total_secs = total_secs;
        self.remaining_secs = total_secs;
        self.active = true;
        debug!(total_secs, "session timer armed");
        Ok(())
    }

    /// Advance by one second.
    ///
    /// Returns `Some(Event::Expired)` on the tick that reaches zero; the timer
    /// is inactive and reset afterwards.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.active {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        self.active = false;
        self.remaining_secs = 0;
        debug!(total_secs = self.total_secs, "session timer expired");
        Some(Event::Expired)
    }

    /// Cancel the countdown.
    pub fn disarm(&mut self) {
        self.active = false;
        self.remaining_secs = 0;
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds left.
    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Length the timer was last armed with.
    #[must_use]
    pub const fn total_secs(&self) -> u32 {
        self.total_secs
    }

    /// Progress as a fraction (0.0 - 1.0) of the armed length.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if !self.active || self.total_secs == 0 {
            return 0.0;
        }
        1.0 - f64::from(self.remaining_secs) / f64::from(self.total_secs)
    }

    /// Format remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Format whole seconds as a `MM:SS` clock; minutes grow past 99 as needed.
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format whole seconds for a summary line, e.g. "1 hour, 5 seconds".
#[must_use]
pub fn format_spoken(secs: u32) -> String {
    if secs < 60 {
        return plural(secs, "second");
    }

    [(secs / 3600, "hour"), (secs / 60 % 60, "minute"), (secs % 60, "second")]
        .into_iter()
        .filter(|&(n, _)| n > 0)
        .map(|(n, unit)| plural(n, unit))
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Parse a session length like "5m", "1h30m" or "90s" into seconds.
///
/// A number without a unit counts as minutes. Returns `None` for zero, for
/// malformed text, and for anything longer than `u32::MAX` seconds.
#[must_use]
pub fn parse_length(text: &str) -> Option<u32> {
    let text = text.trim().to_lowercase();
    let mut total: u32 = 0;
    let mut digits = String::new();

    for c in text.chars().filter(|c| !c.is_whitespace()) {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = add_scaled(total, &digits, unit)?;
        digits.clear();
    }

    if !digits.is_empty() {
        total = add_scaled(total, &digits, 60)?;
    }

    (total > 0).then_some(total)
}

fn add_scaled(total: u32, digits: &str, unit: u32) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u32>().ok()?.checked_mul(unit)?.checked_add(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_inactive() {
        let mut timer = SessionTimer::new();
        assert!(!timer.is_active());
        assert!(timer.tick().is_none());
    }

    #[test]
    fn test_arm_rejects_zero() {
        let mut timer = SessionTimer::new();
        assert!(matches!(timer.arm(0), Err(BreathError::InvalidDuration(_))));
        assert!(!timer.is_active());
    }

    #[test]
    fn test_expires_after_total_ticks() {
        let mut timer = SessionTimer::new();
        timer.arm(5).unwrap();

        for _ in 0..4 {
            assert!(timer.tick().is_none());
            assert!(timer.is_active());
        }

        assert_eq!(timer.tick(), Some(Event::Expired));
        assert!(!timer.is_active());
        assert_eq!(timer.remaining_secs(), 0);
        assert!(timer.tick().is_none());
    }

    #[test]
    fn test_disarm_is_idempotent() {
        let mut timer = SessionTimer::new();
        timer.arm(60).unwrap();
        timer.tick();

        timer.disarm();
        timer.disarm();
        assert!(!timer.is_active());
        assert_eq!(timer.remaining_secs(), 0);
        assert!(timer.tick().is_none());
    }

    #[test]
    fn test_rearm_resets_countdown() {
        let mut timer = SessionTimer::new();
        timer.arm(3).unwrap();
        timer.tick();
        timer.arm(10).unwrap();

        assert_eq!(timer.remaining_secs(), 10);
        assert_eq!(timer.total_secs(), 10);
    }

    #[test]
    fn test_progress_and_format() {
        let mut timer = SessionTimer::new();
        timer.arm(100).unwrap();
        for _ in 0..50 {
            timer.tick();
        }

        assert!((timer.progress() - 0.5).abs() < 0.01);
        assert_eq!(timer.format_remaining(), "00:50");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(90), "01:30");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(100 * 60 + 5), "100:05");
    }

    #[test]
    fn test_format_spoken() {
        assert_eq!(format_spoken(300), "5 minutes");
        assert_eq!(format_spoken(60), "1 minute");
        assert_eq!(format_spoken(45), "45 seconds");
        assert_eq!(format_spoken(1), "1 second");
        assert_eq!(format_spoken(90), "1 minute, 30 seconds");
        assert_eq!(format_spoken(5400), "1 hour, 30 minutes");
        assert_eq!(format_spoken(3605), "1 hour, 5 seconds");
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("5"), Some(300));
        assert_eq!(parse_length("5m"), Some(300));
        assert_eq!(parse_length("90s"), Some(90));
        assert_eq!(parse_length("1m30s"), Some(90));
        assert_eq!(parse_length("1H"), Some(3600));
        assert_eq!(parse_length("1h 30m"), Some(5400));
        assert_eq!(parse_length("1h30"), Some(5400));
    }

    #[test]
    fn test_parse_length_invalid() {
        assert!(parse_length("").is_none());
        assert!(parse_length("abc").is_none());
        assert!(parse_length("0").is_none());
        assert!(parse_length("0m0s").is_none());
        assert!(parse_length("m").is_none());
        assert!(parse_length("5x").is_none());
        assert!(parse_length("-5").is_none());
    }

    #[test]
    fn test_parse_length_overflow() {
        assert!(parse_length("999999999999999").is_none());
        assert!(parse_length("9999999999999999h").is_none());
        assert!(parse_length("1193047h").is_none());
        assert!(parse_length("4294967295s1s").is_none());
        assert_eq!(parse_length("4294967295s"), Some(u32::MAX));
    }
}
