//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::BreathError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or stop the session.
    ToggleRun,
    /// Switch to a preset (0-based).
    Preset(usize),
    /// Turn cues on or off.
    ToggleCues,
    /// Next tone style.
    CycleStyle,
    /// Switch color theme.
    ToggleTheme,
    /// Show key help.
    Help,
    /// The terminal lost focus.
    Suspend,
    /// Redraw (e.g. after a resize).
    Redraw,
}

/// Wait up to `timeout` for a terminal event.
///
/// Returns an action to take, or None if nothing relevant happened.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_action(timeout: Duration) -> Result<Option<Action>, BreathError> {
    if !event::poll(timeout)
        .map_err(|e| BreathError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    let event =
        event::read().map_err(|e| BreathError::Terminal(format!("Event read failed: {e}")))?;

    Ok(match event {
        Event::Key(key) => action_for_key(key),
        Event::FocusLost => Some(Action::Suspend),
        Event::Resize(..) => Some(Action::Redraw),
        _ => None,
    })
}

/// Map a key press to an action.
#[must_use]
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::ToggleRun),
        KeyCode::Char(c @ '1'..='3') => Some(Action::Preset(c as usize - '1' as usize)),
        KeyCode::Char('m') => Some(Action::ToggleCues),
        KeyCode::Char('s') => Some(Action::CycleStyle),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}
