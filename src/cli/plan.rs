//! Turning `start` arguments into a concrete session.

use crate::cli::args::StartArgs;
use crate::config::{Config, Preferences, Theme};
use crate::core::{parse_length, NamedPattern, Pattern, PatternStore, ToneStyle};
use crate::error::BreathError;
use crate::features::patterns;

/// Everything needed to run one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    /// The pattern and the name it was chosen by.
    pub pattern: NamedPattern,
    /// Session length; `None` runs until stopped.
    pub session_secs: Option<u32>,
    /// Tone style for cues.
    pub style: ToneStyle,
    /// Whether cues play.
    pub cues_enabled: bool,
    /// Color theme.
    pub theme: Theme,
}

/// Resolve the pattern, session length and cue settings for `start`.
///
/// Command-line flags win over stored preferences, which win over the config
/// file.
///
/// # Errors
///
/// Returns an error if the pattern cannot be found or parsed, the resulting
/// pattern is all zero, or the session length is malformed.
pub fn plan_session(
    args: &StartArgs,
    config: &Config,
    prefs: &Preferences,
    store: &dyn PatternStore,
) -> Result<SessionPlan, BreathError> {
    let requested = args
        .pattern
        .as_deref()
        .unwrap_or(&config.general.default_pattern);
    let (mut named, _) = patterns::resolve(requested, store)?;

    if args.has_phase_overrides() {
        let base = named.pattern;
        named.pattern = Pattern::new(
            args.inhale.unwrap_or(base.inhale),
            args.hold_in.unwrap_or(base.hold_in),
            args.exhale.unwrap_or(base.exhale),
            args.hold_out.unwrap_or(base.hold_out),
        );
        named.name = format!("custom ({})", named.pattern);
    }
    named.pattern.validate()?;

    let session_secs = match args.session.as_deref() {
        Some(text) => Some(parse_session(text)?),
        None => (config.session.default_minutes > 0)
            .then(|| config.session.default_minutes.saturating_mul(60)),
    };

    Ok(SessionPlan {
        pattern: named,
        session_secs,
        style: args.style.map_or(prefs.cue_style, Into::into),
        cues_enabled: prefs.cue_enabled && !args.mute,
        theme: prefs.theme,
    })
}

/// Parse a session length into whole seconds.
///
/// # Errors
///
/// Returns `BreathError::InvalidDuration` if the text is not a positive
/// duration that fits in `u32` seconds.
pub fn parse_session(text: &str) -> Result<u32, BreathError> {
    parse_length(text).ok_or_else(|| {
        BreathError::InvalidDuration(format!(
            "'{text}' is not a session length (try 90s, 5m or 1h30m)"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::StyleArg;
    use crate::features::patterns::PatternStorage;
    use crate::storage::Database;

    fn store() -> PatternStorage {
        PatternStorage::with_database(Database::open_in_memory().unwrap())
    }

    fn defaults() -> (Config, Preferences) {
        let config = Config::default();
        let prefs = Preferences::from_config(&config);
        (config, prefs)
    }

    #[test]
    fn test_default_plan() {
        let (config, prefs) = defaults();
        let plan = plan_session(&StartArgs::default(), &config, &prefs, &store()).unwrap();

        assert_eq!(plan.pattern.name, "box");
        assert_eq!(plan.pattern.pattern, Pattern::new(4, 4, 4, 4));
        assert_eq!(plan.session_secs, None);
        assert_eq!(plan.style, ToneStyle::Medium);
        assert!(plan.cues_enabled);
    }

    #[test]
    fn test_flags_override_preferences() {
        let (mut config, mut prefs) = defaults();
        config.session.default_minutes = 10;
        prefs.cue_style = ToneStyle::Low;

        let args = StartArgs {
            pattern: Some("relaxing".to_string()),
            session: Some("90s".to_string()),
            style: Some(StyleArg::High),
            mute: true,
            ..StartArgs::default()
        };
        let plan = plan_session(&args, &config, &prefs, &store()).unwrap();

        assert_eq!(plan.pattern.pattern, Pattern::new(4, 7, 8, 0));
        assert_eq!(plan.session_secs, Some(90));
        assert_eq!(plan.style, ToneStyle::High);
        assert!(!plan.cues_enabled);
    }

    #[test]
    fn test_config_session_length() {
        let (mut config, prefs) = defaults();
        config.session.default_minutes = 5;

        let plan = plan_session(&StartArgs::default(), &config, &prefs, &store()).unwrap();
        assert_eq!(plan.session_secs, Some(300));
    }

    #[test]
    fn test_phase_overrides() {
        let (config, prefs) = defaults();
        let args = StartArgs {
            pattern: Some("relaxing".to_string()),
            hold_in: Some(0),
            exhale: Some(6),
            ..StartArgs::default()
        };
        let plan = plan_session(&args, &config, &prefs, &store()).unwrap();

        assert_eq!(plan.pattern.pattern, Pattern::new(4, 0, 6, 0));
        assert_eq!(plan.pattern.name, "custom (4-0-6-0)");
    }

    #[test]
    fn test_all_zero_rejected() {
        let (config, prefs) = defaults();
        let args = StartArgs {
            pattern: Some("0-0-0-0".to_string()),
            ..StartArgs::default()
        };
        assert!(matches!(
            plan_session(&args, &config, &prefs, &store()),
            Err(BreathError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_parse_session() {
        assert_eq!(parse_session("2s").unwrap(), 2);
        assert_eq!(parse_session("1h30m").unwrap(), 5400);
        assert_eq!(parse_session("3").unwrap(), 180);
        assert!(matches!(parse_session("0"), Err(BreathError::InvalidDuration(_))));
        assert!(parse_session("soon").is_err());
        assert!(matches!(
            parse_session("999999999999999"),
            Err(BreathError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_session("9999999999999999h"),
            Err(BreathError::InvalidDuration(_))
        ));
    }
}
