//! Breathing session command.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::cli::args::{OutputFormat, StartArgs};
use crate::cli::{plan_session, Context, SessionPlan};
use crate::core::{BreathingController, DisplaySink, TickDecision, Ticker};
use crate::error::BreathError;
use crate::features::cue::player_for;
use crate::output::{format_summary, LineDisplay, SessionSummary, SessionTally};

/// Execute start command
///
/// # Errors
///
/// Returns an error if the session cannot be planned or the terminal fails.
pub fn start(ctx: &Context, args: &StartArgs) -> Result<String, BreathError> {
    let prefs = ctx.preferences()?;
    let plan = plan_session(args, &ctx.config, &prefs, &ctx.patterns()?)?;

    if args.plain {
        let summary = run_plain(ctx, &plan, io::stdout())?;
        match ctx.format {
            OutputFormat::Json => Ok(serde_json::to_string(&summary)?),
            OutputFormat::Pretty => format_summary(&summary, OutputFormat::Pretty),
        }
    } else {
        crate::tui::run(ctx, plan, &ctx.settings()?)?;
        Ok(String::new())
    }
}

/// Run a session printing events as lines until it expires or the output
/// goes away.
///
/// # Errors
///
/// Returns an error if the session cannot start.
pub fn run_plain<W: Write>(
    ctx: &Context,
    plan: &SessionPlan,
    out: W,
) -> Result<SessionSummary, BreathError> {
    let mut controller =
        BreathingController::new(plan.pattern.pattern, player_for(!plan.cues_enabled))
            .with_style(plan.style)
            .with_cues(plan.cues_enabled);
    let mut display = LineDisplay::new(out, ctx.format);
    let mut tally = SessionTally::default();

    let events = controller.begin(plan.pattern.pattern, plan.session_secs)?;
    display.on_events(&events);
    tally.on_events(&events);

    let mut ticker = Ticker::new(Duration::from_secs(ctx.config.ticker.max_lag_secs));
    ticker.start(Instant::now());

    while controller.is_running() {
        if display.is_broken() {
            controller.stop();
            break;
        }

        let events = match ticker.poll(Instant::now()) {
            TickDecision::Wait(delay) => {
                thread::sleep(delay);
                continue;
            }
            TickDecision::Due => {
                ticker.advance();
                tally.second_elapsed();
                controller.tick()
            }
            TickDecision::Stalled => {
                warn!("tick schedule stalled, stopping session");
                ticker.stop();
                controller.suspend()
            }
        };

        display.on_events(&events);
        tally.on_events(&events);
    }

    Ok(tally.summarize(plan.pattern.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Paths, Theme};
    use crate::core::{NamedPattern, Pattern, ToneStyle};

    #[test]
    fn test_plain_session_runs_to_expiry() {
        colored::control::set_override(false);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let ctx = Context::with_config(
            Paths::with_root(temp_dir.path().to_path_buf()),
            Config::default(),
            Some(OutputFormat::Pretty),
        );
        let plan = SessionPlan {
            pattern: NamedPattern::new("quick", Pattern::new(1, 0, 1, 0)),
            session_secs: Some(2),
            style: ToneStyle::Medium,
            cues_enabled: false,
            theme: Theme::Dark,
        };

        let mut out = Vec::new();
        let summary = run_plain(&ctx, &plan, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(summary.completed);
        assert_eq!(summary.elapsed_secs, 2);
        assert_eq!(summary.breaths, 2);
        assert!(text.starts_with("Breathe In   1\nBreathe Out  1\nBreathe In   1"));
        assert!(text.ends_with("Time is up\n"));
    }
}
