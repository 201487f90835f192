//! Breathing phases and patterns.
//!
//! A pattern is always exactly four phases in a fixed order:
//! inhale, hold after inhale, exhale, hold after exhale. A phase with a
//! duration of zero is skipped by the sequencer.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::BreathError;

/// Number of phases in every pattern.
pub const PHASE_COUNT: usize = 4;

/// Which segment of the breathing cycle a phase is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Breathe in
    Inhale,
    /// Hold with full lungs
    HoldAfterInhale,
    /// Breathe out
    Exhale,
    /// Hold with empty lungs
    HoldAfterExhale,
}

impl PhaseKind {
    /// All kinds, in cycle order.
    pub const ALL: [Self; PHASE_COUNT] = [
        Self::Inhale,
        Self::HoldAfterInhale,
        Self::Exhale,
        Self::HoldAfterExhale,
    ];

    /// Label shown to the user.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Inhale => "Breathe In",
            Self::HoldAfterInhale | Self::HoldAfterExhale => "Hold",
            Self::Exhale => "Breathe Out",
        }
    }

    /// Whether this is one of the two hold phases.
    #[must_use]
    pub const fn is_hold(&self) -> bool {
        matches!(self, Self::HoldAfterInhale | Self::HoldAfterExhale)
    }

    /// Position of this kind within a pattern.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Inhale => 0,
            Self::HoldAfterInhale => 1,
            Self::Exhale => 2,
            Self::HoldAfterExhale => 3,
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One timed segment of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Which segment this is.
    pub kind: PhaseKind,
    /// Length in seconds; zero means the phase is skipped.
    pub duration_secs: u32,
}

impl Phase {
    /// Whether the sequencer will ever enter this phase.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.duration_secs > 0
    }
}

/// A four-phase breathing pattern.
///
/// Patterns are plain values. An all-zero pattern can be constructed (a custom
/// pattern is often all zeros while being edited) but it cannot be started or
/// saved; see [`Pattern::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    /// Inhale seconds.
    pub inhale: u32,
    /// Hold-after-inhale seconds.
    pub hold_in: u32,
    /// Exhale seconds.
    pub exhale: u32,
    /// Hold-after-exhale seconds.
    pub hold_out: u32,
}

/// Accepted notation: one to four numbers separated by `-`, `,`, `/`, `:` or spaces.
static NOTATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,3}(?:\s*[-,/:\s]\s*\d{1,3}){0,3}$")
        .unwrap_or_else(|e| panic!("Invalid notation regex: {e}"))
});

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").unwrap_or_else(|e| panic!("Invalid number regex: {e}")));

impl Pattern {
    /// Create a pattern from the four phase durations.
    #[must_use]
    pub const fn new(inhale: u32, hold_in: u32, exhale: u32, hold_out: u32) -> Self {
        Self {
            inhale,
            hold_in,
            exhale,
            hold_out,
        }
    }

    /// Duration of the phase at `index` (wraps modulo 4).
    #[must_use]
    pub const fn duration_at(&self, index: usize) -> u32 {
        match index % PHASE_COUNT {
            0 => self.inhale,
            1 => self.hold_in,
            2 => self.exhale,
            _ => self.hold_out,
        }
    }

    /// The phase at `index` (wraps modulo 4).
    #[must_use]
    pub const fn phase(&self, index: usize) -> Phase {
        Phase {
            kind: PhaseKind::ALL[index % PHASE_COUNT],
            duration_secs: self.duration_at(index),
        }
    }

    /// All four phases in cycle order.
    #[must_use]
    pub const fn phases(&self) -> [Phase; PHASE_COUNT] {
        [self.phase(0), self.phase(1), self.phase(2), self.phase(3)]
    }

    /// Phases the sequencer will actually visit, in order.
    pub fn active_phases(&self) -> impl Iterator<Item = Phase> {
        self.phases().into_iter().filter(Phase::is_active)
    }

    /// Length of one full cycle in seconds.
    #[must_use]
    pub const fn cycle_secs(&self) -> u32 {
        self.inhale
            .saturating_add(self.hold_in)
            .saturating_add(self.exhale)
            .saturating_add(self.hold_out)
    }

    /// Breaths per minute for this pattern (0.0 for an empty pattern).
    #[must_use]
    pub fn breaths_per_minute(&self) -> f64 {
        match self.cycle_secs() {
            0 => 0.0,
            secs => 60.0 / f64::from(secs),
        }
    }

    /// Whether at least one phase has a non-zero duration.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.inhale > 0 || self.hold_in > 0 || self.exhale > 0 || self.hold_out > 0
    }

    /// Reject patterns that cannot be sequenced.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidPattern` if every phase is zero.
    pub fn validate(&self) -> Result<(), BreathError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(BreathError::InvalidPattern(
                "at least one phase must be longer than zero seconds".to_string(),
            ))
        }
    }

    /// Index of the first phase with a non-zero duration.
    #[must_use]
    pub fn first_active(&self) -> Option<usize> {
        (0..PHASE_COUNT).find(|&i| self.duration_at(i) > 0)
    }

    /// Index of the next non-zero phase after `index`, wrapping around.
    ///
    /// Probes at most four positions; when `index` is the only active phase
    /// the search comes back around to `index` itself.
    #[must_use]
    pub fn next_active_after(&self, index: usize) -> Option<usize> {
        (1..=PHASE_COUNT)
            .map(|step| (index + step) % PHASE_COUNT)
            .find(|&i| self.duration_at(i) > 0)
    }

    /// Parse notation like `4-7-8-0`, `4,4,4,4` or `4 7 8`.
    ///
    /// Missing trailing phases are zero.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::Parse` if the notation is malformed.
    pub fn parse(s: &str) -> Result<Self, BreathError> {
        let s = s.trim();
        if !NOTATION_PATTERN.is_match(s) {
            return Err(BreathError::Parse(format!(
                "'{s}' is not a pattern (expected e.g. 4-7-8-0)"
            )));
        }

        let mut values = [0u32; PHASE_COUNT];
        for (slot, m) in values.iter_mut().zip(NUMBER_PATTERN.find_iter(s)) {
            *slot = m
                .as_str()
                .parse()
                .map_err(|e| BreathError::Parse(format!("'{}': {e}", m.as_str())))?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }

    /// Whether `s` looks like pattern notation rather than a name.
    #[must_use]
    pub fn is_notation(s: &str) -> bool {
        NOTATION_PATTERN.is_match(s.trim())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.inhale, self.hold_in, self.exhale, self.hold_out
        )
    }
}

impl std::str::FromStr for Pattern {
    type Err = BreathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A pattern stored under a user-chosen name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPattern {
    /// Display name; unique case-insensitively.
    pub name: String,
    /// The phase durations.
    #[serde(flatten)]
    pub pattern: Pattern,
}

impl NamedPattern {
    /// Pair a name with a pattern.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    /// Lookup key for `name`: trimmed and lowercased with full Unicode case
    /// mapping, so "Ärger" and "ÄRGER" share a key.
    #[must_use]
    pub fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}
