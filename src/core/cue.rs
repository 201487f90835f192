//! Tone styles for phase-entry cues.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single tone request handed to a cue player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cue {
    /// Pitch in hertz.
    pub frequency_hz: f32,
    /// Loudness from 0.0 to 1.0.
    pub volume: f32,
    /// How long the tone rings, in seconds.
    pub duration_secs: f32,
}

/// Named tone presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    /// A2, a little louder and longer.
    Low,
    /// A3.
    #[default]
    Medium,
    /// A4, softer and shorter.
    High,
}

impl ToneStyle {
    /// All styles, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// The tone this style plays.
    #[must_use]
    pub const fn cue(&self) -> Cue {
        match self {
            Self::Low => Cue {
                frequency_hz: 110.0,
                volume: 0.15,
                duration_secs: 1.5,
            },
            Self::Medium => Cue {
                frequency_hz: 220.0,
                volume: 0.12,
                duration_secs: 1.2,
            },
            Self::High => Cue {
                frequency_hz: 440.0,
                volume: 0.08,
                duration_secs: 1.0,
            },
        }
    }

    /// Parse a style name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "l" => Some(Self::Low),
            "medium" | "med" | "m" => Some(Self::Medium),
            "high" | "h" => Some(Self::High),
            _ => None,
        }
    }

    /// Lowercase name, as stored in settings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ToneStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_configs() {
        let medium = ToneStyle::Medium.cue();
        assert!((medium.frequency_hz - 220.0).abs() < f32::EPSILON);
        assert!((medium.volume - 0.12).abs() < f32::EPSILON);

        let low = ToneStyle::Low.cue();
        let high = ToneStyle::High.cue();
        assert!(low.frequency_hz < medium.frequency_hz);
        assert!(high.frequency_hz > medium.frequency_hz);
        assert!(high.duration_secs < low.duration_secs);
    }

    #[test]
    fn test_parse() {
        assert_eq!(ToneStyle::parse("LOW"), Some(ToneStyle::Low));
        assert_eq!(ToneStyle::parse("medium"), Some(ToneStyle::Medium));
        assert_eq!(ToneStyle::parse(" h "), Some(ToneStyle::High));
        assert_eq!(ToneStyle::parse("loud"), None);
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(ToneStyle::default(), ToneStyle::Medium);
    }
}
