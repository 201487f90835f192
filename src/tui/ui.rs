//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::config::Theme;
use crate::core::{format_clock, PhaseKind};
use crate::tui::app::App;

/// Colors for one theme.
struct Palette {
    accent: Color,
    text: Color,
    muted: Color,
    inhale: Color,
    hold: Color,
    exhale: Color,
}

impl Palette {
    const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                accent: Color::Cyan,
                text: Color::White,
                muted: Color::DarkGray,
                inhale: Color::LightCyan,
                hold: Color::LightYellow,
                exhale: Color::LightGreen,
            },
            Theme::Light => Self {
                accent: Color::Blue,
                text: Color::Black,
                muted: Color::Gray,
                inhale: Color::Blue,
                hold: Color::Magenta,
                exhale: Color::Green,
            },
        }
    }

    const fn phase(&self, kind: PhaseKind) -> Color {
        match kind {
            PhaseKind::Inhale => self.inhale,
            PhaseKind::HoldAfterInhale | PhaseKind::HoldAfterExhale => self.hold,
            PhaseKind::Exhale => self.exhale,
        }
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    let palette = Palette::for_theme(app.theme);

    // Create layout: header, phase, phase strip, session, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Current phase
            Constraint::Length(3), // Phase strip
            Constraint::Length(3), // Session timer
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, &palette, chunks[0]);
    render_phase(frame, app, &palette, chunks[1]);
    render_strip(frame, app, &palette, chunks[2]);
    render_session(frame, app, &palette, chunks[3]);
    render_status_bar(frame, app, &palette, chunks[4]);
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App<'_>, palette: &Palette, area: Rect) {
    let pattern = app.controller().snapshot().pattern;
    let title = format!(
        " {} ({pattern}, {:.1} breaths/min) ",
        app.pattern_name,
        pattern.breaths_per_minute()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );

    frame.render_widget(header, area);
}

/// Render the current phase with its countdown and progress.
fn render_phase(frame: &mut Frame<'_>, app: &App<'_>, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // Label
            Constraint::Length(1), // Countdown
            Constraint::Length(1),
            Constraint::Length(1), // Gauge
            Constraint::Min(0),
        ])
        .split(inner);

    let snapshot = app.controller().snapshot();
    let (label, count, color, ratio) = match app.view.phase {
        Some(phase) => (
            phase.kind.label(),
            app.view.remaining_secs,
            palette.phase(phase.kind),
            snapshot.phase_progress().clamp(0.0, 1.0),
        ),
        None => ("Press Start to Begin", app.idle_secs(), palette.text, 0.0),
    };

    let label = Paragraph::new(Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(label, rows[1]);

    let cue_mark = if app.view.cue_flash && app.controller().cues_enabled() {
        " *"
    } else {
        ""
    };
    let countdown = Paragraph::new(Line::from(Span::styled(
        format!("{count}{cue_mark}"),
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(countdown, rows[2]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label("");
    frame.render_widget(gauge, centered(rows[4], 60));
}

/// Render the four phases, highlighting the current one.
fn render_strip(frame: &mut Frame<'_>, app: &App<'_>, palette: &Palette, area: Rect) {
    let pattern = app.controller().snapshot().pattern;
    let current = app.view.phase.map(|p| p.kind);

    let mut spans = Vec::new();
    for kind in PhaseKind::ALL {
        let secs = pattern.duration_at(kind.index());
        let text = format!(" {} {secs}s ", kind.label());

        let style = if secs == 0 {
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if current == Some(kind) {
            Style::default()
                .fg(palette.phase(kind))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(palette.phase(kind))
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }

    let strip = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted)),
        );
    frame.render_widget(strip, area);
}

/// Render the session timer.
fn render_session(frame: &mut Frame<'_>, app: &App<'_>, palette: &Palette, area: Rect) {
    let timer = app.controller().timer();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted))
        .title(format!(" Breaths: {} ", app.view.breaths));

    if timer.is_active() {
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(palette.accent))
            .ratio(timer.progress().clamp(0.0, 1.0))
            .label(format!("{} left", timer.format_remaining()));
        frame.render_widget(gauge, area);
        return;
    }

    let text = match app.session_secs {
        Some(secs) => format!("Session: {}", format_clock(secs)),
        None => "Session: until stopped".to_string(),
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(palette.muted))
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, palette: &Palette, area: Rect) {
    let controller = app.controller();
    let cues = if controller.cues_enabled() {
        format!("cues: {}", controller.style())
    } else {
        "cues: off".to_string()
    };
    let status = app.status.as_deref().unwrap_or("");

    let line = Line::from(vec![
        Span::styled(
            format!(" {cues} "),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {status}"), Style::default().fg(palette.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// A horizontally centered slice of `area`, `percent` wide.
fn centered(area: Rect, percent: u16) -> Rect {
    let side = (100 - percent.min(100)) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(percent),
            Constraint::Percentage(side),
        ])
        .split(area)[1]
}
