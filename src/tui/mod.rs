//! Terminal User Interface (TUI) for breathbox.
//!
//! Full-screen breathing timer built with ratatui and crossterm. Losing
//! terminal focus stops the session, as does a tick schedule that falls
//! too far behind.

mod app;
mod event;
mod ui;

pub use app::{App, ViewState};

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::cli::{Context, SessionPlan};
use crate::core::SettingsStore;
use crate::error::BreathError;
use crate::features::cue::player_for;

/// Help text shown in the status bar.
const HELP: &str = "space:start/stop | 1-3:preset | m:cues | s:tone | t:theme | q:quit";

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(
    ctx: &Context,
    plan: SessionPlan,
    settings: &dyn SettingsStore,
) -> Result<(), BreathError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| BreathError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)
        .map_err(|e| BreathError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| BreathError::Terminal(format!("Failed to create terminal: {e}")))?;

    let max_lag = Duration::from_secs(ctx.config.ticker.max_lag_secs);
    let mut app = App::new(plan, player_for(false), settings, max_lag);
    app.toggle_run(Instant::now());
    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> Result<(), BreathError> {
    loop {
        let timeout = app.on_clock(Instant::now());

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| BreathError::Terminal(format!("Failed to draw: {e}")))?;

        let Some(action) = event::next_action(timeout)? else {
            continue;
        };

        let now = Instant::now();
        match action {
            event::Action::Quit => break,
            event::Action::ToggleRun => app.toggle_run(now),
            event::Action::Preset(index) => app.select_preset(index, now),
            event::Action::ToggleCues => app.toggle_cues(),
            event::Action::CycleStyle => app.cycle_style(),
            event::Action::ToggleTheme => app.toggle_theme(),
            event::Action::Help => app.status = Some(HELP.to_string()),
            event::Action::Suspend => app.suspend(),
            event::Action::Redraw => {}
        }
    }

    Ok(())
}
