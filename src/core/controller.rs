//! The breathing controller.
//!
//! Owns the sequencer, the session timer, and the cue player. The host calls
//! [`BreathingController::tick`] once per elapsed second and forwards the
//! returned events to its displays.

use tracing::{info, warn};

use super::cue::ToneStyle;
use super::events::Event;
use super::pattern::Pattern;
use super::sequencer::{Sequencer, SequencerSnapshot};
use super::session_timer::SessionTimer;
use super::traits::CuePlayer;
use crate::error::BreathError;

/// Drives one breathing session.
pub struct BreathingController {
    sequencer: Sequencer,
    timer: SessionTimer,
    player: Box<dyn CuePlayer>,
    style: ToneStyle,
    cues_enabled: bool,
    session_secs: Option<u32>,
}

impl BreathingController {
    /// Create an idle controller.
    #[must_use]
    pub fn new(pattern: Pattern, player: Box<dyn CuePlayer>) -> Self {
        Self {
            sequencer: Sequencer::new(pattern),
            timer: SessionTimer::new(),
            player,
            style: ToneStyle::default(),
            cues_enabled: true,
            session_secs: None,
        }
    }

    /// Set the tone style used for cues.
    #[must_use]
    pub const fn with_style(mut self, style: ToneStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable cues.
    #[must_use]
    pub const fn with_cues(mut self, enabled: bool) -> Self {
        self.cues_enabled = enabled;
        self
    }

    /// Start sequencing `pattern`, optionally bounded by a session length.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidPattern` for an all-zero pattern and
    /// `BreathError::InvalidDuration` for a zero-length session. Nothing is
    /// started in either case.
    pub fn begin(
        &mut self,
        pattern: Pattern,
        session_secs: Option<u32>,
    ) -> Result<Vec<Event>, BreathError> {
        pattern.validate()?;
        if session_secs == Some(0) {
            return Err(BreathError::InvalidDuration(
                "session length must be at least one second".to_string(),
            ));
        }

        let events = self.sequencer.start_with(pattern)?;
        match session_secs {
            Some(secs) => self.timer.arm(secs)?,
            None => self.timer.disarm(),
        }
        self.session_secs = session_secs;

        info!(%pattern, session_secs, "breathing session started");
        Ok(self.dispatch(events))
    }

    /// Restart the stored pattern with the same session length as last time.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidPattern` if the stored pattern is all zero.
    pub fn restart(&mut self) -> Result<Vec<Event>, BreathError> {
        self.begin(self.sequencer.pattern(), self.session_secs)
    }

    /// Advance both clocks by one second.
    ///
    /// Sequencer events come first. If the session timer runs out on this
    /// tick, `Expired` follows, then the sequencer's `Stopped`.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = self.sequencer.tick();

        if let Some(expired) = self.timer.tick() {
            info!("session complete");
            events.push(expired);
            events.extend(self.sequencer.stop());
        }

        self.dispatch(events)
    }

    /// Stop the session.
    pub fn stop(&mut self) -> Vec<Event> {
        self.timer.disarm();
        self.sequencer.stop()
    }

    /// Stop because the host can no longer tick on schedule.
    pub fn suspend(&mut self) -> Vec<Event> {
        if self.sequencer.is_running() {
            info!("host suspended, stopping session");
        }
        self.stop()
    }

    /// Switch patterns; a running session restarts on the new pattern while
    /// the session timer keeps counting.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidPattern` if running and the new pattern
    /// is all zero.
    pub fn replace_pattern(&mut self, pattern: Pattern) -> Result<Vec<Event>, BreathError> {
        let events = self.sequencer.replace_pattern(pattern)?;
        Ok(self.dispatch(events))
    }

    /// Change the tone style.
    pub fn set_style(&mut self, style: ToneStyle) {
        self.style = style;
    }

    /// Turn cues on or off.
    pub fn set_cues_enabled(&mut self, enabled: bool) {
        self.cues_enabled = enabled;
    }

    /// Current tone style.
    #[must_use]
    pub const fn style(&self) -> ToneStyle {
        self.style
    }

    /// Whether cues are on.
    #[must_use]
    pub const fn cues_enabled(&self) -> bool {
        self.cues_enabled
    }

    /// Whether a session is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.sequencer.is_running()
    }

    /// Sequencer state.
    #[must_use]
    pub const fn snapshot(&self) -> SequencerSnapshot {
        self.sequencer.snapshot()
    }

    /// Session timer state.
    #[must_use]
    pub const fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    /// Play cues for any `CuePlayed` events and hand the events back.
    fn dispatch(&mut self, events: Vec<Event>) -> Vec<Event> {
        if self.cues_enabled {
            let cue = self.style.cue();
            for event in &events {
                if let Event::CuePlayed { phase } = event {
                    if let Err(e) = self.player.play(&cue) {
                        warn!(phase = %phase.kind, "cue playback failed: {e}");
                    }
                }
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockCuePlayer;

    fn silent() -> Box<dyn CuePlayer> {
        let mut player = MockCuePlayer::new();
        player.expect_play().returning(|_| Ok(()));
        Box::new(player)
    }

    #[test]
    fn test_begin_plays_first_cue_immediately() {
        let mut player = MockCuePlayer::new();
        player
            .expect_play()
            .withf(|cue| (cue.frequency_hz - 440.0).abs() < f32::EPSILON)
            .times(1)
            .returning(|_| Ok(()));

        let mut controller = BreathingController::new(Pattern::new(4, 4, 4, 4), Box::new(player))
            .with_style(ToneStyle::High);
        let events = controller.begin(Pattern::new(4, 4, 4, 4), None).unwrap();

        assert!(matches!(events[0], Event::PhaseEntered { .. }));
        assert!(matches!(events[1], Event::CuePlayed { .. }));
    }

    #[test]
    fn test_cue_failure_does_not_interrupt_sequencing() {
        let mut player = MockCuePlayer::new();
        player
            .expect_play()
            .returning(|_| Err(BreathError::Config("no audio device".to_string())));

        let mut controller = BreathingController::new(Pattern::new(1, 0, 1, 0), Box::new(player));
        controller.begin(Pattern::new(1, 0, 1, 0), None).unwrap();

        for _ in 0..5 {
            let events = controller.tick();
            assert!(events.iter().any(|e| matches!(e, Event::CuePlayed { .. })));
        }
        assert!(controller.is_running());
    }

    #[test]
    fn test_muted_controller_never_plays() {
        let mut player = MockCuePlayer::new();
        player.expect_play().times(0);

        let mut controller =
            BreathingController::new(Pattern::new(1, 1, 1, 1), Box::new(player)).with_cues(false);
        controller.begin(Pattern::new(1, 1, 1, 1), None).unwrap();
        for _ in 0..4 {
            controller.tick();
        }
    }

    #[test]
    fn test_session_expiry_stops_sequencer() {
        let mut controller = BreathingController::new(Pattern::new(4, 4, 4, 4), silent());
        controller.begin(Pattern::new(4, 4, 4, 4), Some(5)).unwrap();

        for _ in 0..4 {
            let events = controller.tick();
            assert!(!events.contains(&Event::Expired));
        }

        let events = controller.tick();
        let expired = events.iter().position(|e| *e == Event::Expired).unwrap();
        let stopped = events.iter().position(|e| *e == Event::Stopped).unwrap();
        assert!(expired < stopped);
        assert!(!controller.is_running());
        assert!(!controller.timer().is_active());

        assert!(controller.tick().is_empty());
    }

    #[test]
    fn test_expiry_mid_phase_still_stops() {
        let mut controller = BreathingController::new(Pattern::new(10, 0, 10, 0), silent());
        controller.begin(Pattern::new(10, 0, 10, 0), Some(3)).unwrap();

        controller.tick();
        controller.tick();
        let events = controller.tick();

        assert!(events.contains(&Event::Expired));
        assert!(!controller.is_running());
    }

    #[test]
    fn test_begin_rejects_invalid_input() {
        let mut controller = BreathingController::new(Pattern::new(4, 4, 4, 4), silent());

        assert!(matches!(
            controller.begin(Pattern::new(0, 0, 0, 0), Some(60)),
            Err(BreathError::InvalidPattern(_))
        ));
        assert!(matches!(
            controller.begin(Pattern::new(4, 4, 4, 4), Some(0)),
            Err(BreathError::InvalidDuration(_))
        ));
        assert!(!controller.is_running());
        assert!(!controller.timer().is_active());
    }

    #[test]
    fn test_stop_disarms_timer() {
        let mut controller = BreathingController::new(Pattern::new(4, 4, 4, 4), silent());
        controller.begin(Pattern::new(4, 4, 4, 4), Some(60)).unwrap();

        assert_eq!(controller.stop(), vec![Event::Stopped]);
        assert!(!controller.timer().is_active());
        assert!(controller.stop().is_empty());
    }

    #[test]
    fn test_suspend_when_idle_is_silent() {
        let mut controller = BreathingController::new(Pattern::new(4, 4, 4, 4), silent());
        assert!(controller.suspend().is_empty());
    }

    #[test]
    fn test_replace_pattern_keeps_session_timer() {
        let mut controller = BreathingController::new(Pattern::new(4, 4, 4, 4), silent());
        controller.begin(Pattern::new(4, 4, 4, 4), Some(30)).unwrap();
        for _ in 0..10 {
            controller.tick();
        }

        controller.replace_pattern(Pattern::new(4, 7, 8, 0)).unwrap();

        assert_eq!(controller.timer().remaining_secs(), 20);
        assert_eq!(controller.snapshot().phase_index, 0);
        assert_eq!(controller.snapshot().pattern, Pattern::new(4, 7, 8, 0));
    }

    #[test]
    fn test_restart_reuses_session_length() {
        let mut controller = BreathingController::new(Pattern::new(4, 4, 4, 4), silent());
        controller.begin(Pattern::new(4, 4, 4, 4), Some(30)).unwrap();
        controller.stop();

        controller.restart().unwrap();
        assert!(controller.is_running());
        assert_eq!(controller.timer().remaining_secs(), 30);
    }
}
