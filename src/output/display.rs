//! Line-oriented session display for `start --plain`.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::core::{DisplaySink, Event, NamedPattern, PhaseKind};

use super::pretty::phase_label_colored;

/// Prints session events as lines.
///
/// Pretty mode writes one line per phase with the countdown appended as it
/// runs (`Breathe In  4 3 2 1`). JSON mode writes one object per event.
pub struct LineDisplay<W: Write> {
    out: W,
    format: OutputFormat,
    line_open: bool,
    broken: bool,
}

impl<W: Write> LineDisplay<W> {
    /// A display writing to `out`.
    pub const fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            line_open: false,
            broken: false,
        }
    }

    /// Whether a write has failed (e.g. the reader of a pipe went away).
    pub const fn is_broken(&self) -> bool {
        self.broken
    }

    /// Consume the display and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_pretty(&mut self, event: &Event) -> std::io::Result<()> {
        match event {
            Event::PhaseEntered { phase } => {
                if self.line_open {
                    writeln!(self.out)?;
                }
                write!(self.out, "{:<12}", phase_label_colored(phase.kind))?;
                self.line_open = true;
            }
            Event::Tick { remaining_secs } => {
                write!(self.out, " {remaining_secs}")?;
            }
            Event::CuePlayed { .. } => {}
            Event::Expired => {
                self.close_line()?;
                writeln!(self.out, "{}", "Time is up".green())?;
            }
            Event::Stopped => self.close_line()?,
        }
        self.out.flush()
    }

    fn write_json(&mut self, event: &Event) -> std::io::Result<()> {
        let line = serde_json::to_string(event)?;
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    fn close_line(&mut self) -> std::io::Result<()> {
        if self.line_open {
            writeln!(self.out)?;
            self.line_open = false;
        }
        Ok(())
    }
}

impl<W: Write> DisplaySink for LineDisplay<W> {
    fn on_event(&mut self, event: &Event) {
        if self.broken {
            return;
        }

        let result = match self.format {
            OutputFormat::Pretty => self.write_pretty(event),
            OutputFormat::Json => self.write_json(event),
        };

        if let Err(e) = result {
            tracing::debug!("display output closed: {e}");
            self.broken = true;
        }
    }
}

/// Counts what happened during a session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionTally {
    /// Ticks seen while running.
    pub elapsed_secs: u32,
    /// Inhale phases entered.
    pub breaths: u32,
    /// Whether the session timer ran out.
    pub expired: bool,
}

impl SessionTally {
    /// Count one elapsed second.
    pub fn second_elapsed(&mut self) {
        self.elapsed_secs += 1;
    }

    /// Finish the tally.
    #[must_use]
    pub fn summarize(&self, pattern: NamedPattern) -> SessionSummary {
        SessionSummary {
            pattern,
            elapsed_secs: self.elapsed_secs,
            breaths: self.breaths,
            completed: self.expired,
        }
    }
}

impl DisplaySink for SessionTally {
    fn on_event(&mut self, event: &Event) {
        match event {
            Event::PhaseEntered { phase } if phase.kind == PhaseKind::Inhale => {
                self.breaths += 1;
            }
            Event::Expired => self.expired = true,
            _ => {}
        }
    }
}

/// What a finished session amounted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// The pattern that ran.
    pub pattern: NamedPattern,
    /// Seconds the session ran.
    pub elapsed_secs: u32,
    /// Inhale phases entered.
    pub breaths: u32,
    /// Whether the session ran to the end of its timer.
    pub completed: bool,
}
