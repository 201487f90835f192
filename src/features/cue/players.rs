use std::io::{self, Write};

use crate::core::{Cue, CuePlayer};
use crate::error::BreathError;

/// ASCII bell.
const BEL: &[u8] = b"\x07";

/// Rings the terminal bell on every cue.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stderr> {
    /// A bell on standard error, which stays on the terminal when stdout is piped.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TerminalBell<W> {
    /// A bell that writes to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the bell and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play(&mut self, cue: &Cue) -> Result<(), BreathError> {
        tracing::debug!(
            frequency_hz = cue.frequency_hz,
            volume = cue.volume,
            duration_secs = cue.duration_secs,
            "ringing bell"
        );
        self.out.write_all(BEL)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl CuePlayer for SilentPlayer {
    fn play(&mut self, _cue: &Cue) -> Result<(), BreathError> {
        Ok(())
    }
}

/// The player for a session: silent when muted, otherwise the bell.
#[must_use]
pub fn player_for(muted: bool) -> Box<dyn CuePlayer> {
    if muted {
        Box::new(SilentPlayer)
    } else {
        Box::new(TerminalBell::stderr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ToneStyle;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_bell_writes_bel() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(&ToneStyle::Low.cue()).unwrap();
        bell.play(&ToneStyle::High.cue()).unwrap();

        assert_eq!(bell.into_inner(), b"\x07\x07");
    }

    #[test]
    fn test_bell_reports_write_failure() {
        let mut bell = TerminalBell::new(BrokenPipe);
        assert!(matches!(
            bell.play(&ToneStyle::Medium.cue()),
            Err(BreathError::Io(_))
        ));
    }

    #[test]
    fn test_silent_player() {
        let mut player = SilentPlayer;
        assert!(player.play(&ToneStyle::Medium.cue()).is_ok());
    }
}
