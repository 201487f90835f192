//! Application state for the TUI.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::cli::SessionPlan;
use crate::config::preferences::{CUE_ENABLED, CUE_STYLE, THEME};
use crate::config::Theme;
use crate::core::{
    BreathingController, CuePlayer, DisplaySink, Event, Phase, PhaseKind, SettingsStore,
    TickDecision, Ticker, ToneStyle,
};
use crate::features::patterns::PRESETS;

/// What the screen shows, updated only from events.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Phase being shown; `None` while idle.
    pub phase: Option<Phase>,
    /// Countdown for the current phase.
    pub remaining_secs: u32,
    /// Inhale phases entered since the last start.
    pub breaths: u32,
    /// The session timer ran out.
    pub expired: bool,
    /// A cue fired on the most recent tick.
    pub cue_flash: bool,
}

impl DisplaySink for ViewState {
    fn on_event(&mut self, event: &Event) {
        match event {
            Event::PhaseEntered { phase } => {
                self.phase = Some(*phase);
                self.expired = false;
                if phase.kind == PhaseKind::Inhale {
                    self.breaths += 1;
                }
            }
            Event::CuePlayed { .. } => self.cue_flash = true,
            Event::Tick { remaining_secs } => self.remaining_secs = *remaining_secs,
            Event::Stopped => self.phase = None,
            Event::Expired => self.expired = true,
        }
    }
}

/// Application state.
pub struct App<'a> {
    controller: BreathingController,
    ticker: Ticker,
    settings: &'a dyn SettingsStore,
    /// Name of the current pattern.
    pub pattern_name: String,
    /// Session length used on every start.
    pub session_secs: Option<u32>,
    /// Color theme.
    pub theme: Theme,
    /// Event-driven display state.
    pub view: ViewState,
    /// Status message to display.
    pub status: Option<String>,
}

impl<'a> App<'a> {
    /// Create an idle app for `plan`.
    #[must_use]
    pub fn new(
        plan: SessionPlan,
        player: Box<dyn CuePlayer>,
        settings: &'a dyn SettingsStore,
        max_lag: Duration,
    ) -> Self {
        let controller = BreathingController::new(plan.pattern.pattern, player)
            .with_style(plan.style)
            .with_cues(plan.cues_enabled);

        Self {
            controller,
            ticker: Ticker::new(max_lag),
            settings,
            pattern_name: plan.pattern.name,
            session_secs: plan.session_secs,
            theme: plan.theme,
            view: ViewState::default(),
            status: Some("Press ? for help".to_string()),
        }
    }

    /// The controller, for rendering.
    #[must_use]
    pub const fn controller(&self) -> &BreathingController {
        &self.controller
    }

    /// Seconds shown while idle: the first phase that will run.
    #[must_use]
    pub fn idle_secs(&self) -> u32 {
        let pattern = self.controller.snapshot().pattern;
        pattern
            .first_active()
            .map_or(0, |index| pattern.duration_at(index))
    }

    /// Start a session, or stop the running one.
    pub fn toggle_run(&mut self, now: Instant) {
        if self.controller.is_running() {
            let events = self.controller.stop();
            self.apply(&events);
            self.status = Some("Stopped".to_string());
            return;
        }

        self.view = ViewState::default();
        match self.controller.begin(self.controller.snapshot().pattern, self.session_secs) {
            Ok(events) => {
                self.ticker.start(now);
                self.apply(&events);
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Switch to preset `index` (0-based); a running session restarts on it.
    pub fn select_preset(&mut self, index: usize, now: Instant) {
        let Some(preset) = PRESETS.get(index) else {
            return;
        };

        let was_running = self.controller.is_running();
        match self.controller.replace_pattern(preset.pattern) {
            Ok(events) => {
                self.pattern_name = preset.name.to_string();
                if was_running {
                    self.ticker.start(now);
                }
                self.apply(&events);
                self.status = Some(format!("Pattern: {} ({})", preset.name, preset.pattern));
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Turn cues on or off and remember the choice.
    pub fn toggle_cues(&mut self) {
        let enabled = !self.controller.cues_enabled();
        self.controller.set_cues_enabled(enabled);
        self.persist(CUE_ENABLED, &enabled.to_string());
        self.status = Some(if enabled { "Cues on" } else { "Cues off" }.to_string());
    }

    /// Move to the next tone style and remember it.
    pub fn cycle_style(&mut self) {
        let style = next_style(self.controller.style());
        self.controller.set_style(style);
        self.persist(CUE_STYLE, style.as_str());
        self.status = Some(format!("Tone: {style}"));
    }

    /// Switch between dark and light and remember it.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.persist(THEME, self.theme.as_str());
    }

    /// Stop because the terminal lost focus.
    pub fn suspend(&mut self) {
        if self.controller.is_running() {
            let events = self.controller.suspend();
            self.apply(&events);
            self.status = Some("Paused while away; press space to start again".to_string());
        }
    }

    /// Stop before quitting.
    pub fn shutdown(&mut self) {
        let events = self.controller.stop();
        self.apply(&events);
    }

    /// Run any due tick and return how long to wait for input.
    pub fn on_clock(&mut self, now: Instant) -> Duration {
        loop {
            match self.ticker.poll(now) {
                TickDecision::Wait(delay) => return delay,
                TickDecision::Due => {
                    self.ticker.advance();
                    self.view.cue_flash = false;
                    let events = self.controller.tick();
                    self.apply(&events);
                    if self.view.expired {
                        self.status = Some("Session complete".to_string());
                    }
                }
                TickDecision::Stalled => {
                    warn!("tick schedule stalled, stopping session");
                    self.suspend();
                }
            }
        }
    }

    fn apply(&mut self, events: &[Event]) {
        self.view.on_events(events);
        if !self.controller.is_running() {
            self.ticker.stop();
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.settings.set(key, value) {
            warn!(key, "failed to save setting: {e}");
            self.status = Some(format!("Could not save {key}: {e}"));
        }
    }
}

/// The style after `style`, wrapping around.
const fn next_style(style: ToneStyle) -> ToneStyle {
    match style {
        ToneStyle::Low => ToneStyle::Medium,
        ToneStyle::Medium => ToneStyle::High,
        ToneStyle::High => ToneStyle::Low,
    }
}
