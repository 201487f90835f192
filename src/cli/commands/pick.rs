//! Pick command: choose a pattern with the fuzzy finder, then start it.

use crate::cli::args::{PickArgs, StartArgs};
use crate::cli::Context;
use crate::core::{NamedPattern, PatternStore};
use crate::error::BreathError;
use crate::features::interactive::{pick_pattern, PickOptions, PickOrigin};
use crate::features::patterns::PRESETS;

use super::start;

/// Execute pick command
///
/// # Errors
///
/// Returns an error if the pattern store cannot be read or the session fails.
pub fn pick(ctx: &Context, args: &PickArgs) -> Result<String, BreathError> {
    let candidates = candidates(&ctx.patterns()?)?;

    let options = PickOptions {
        query: args.query.clone(),
        prompt: None,
        preview: args.preview,
    };

    let Some(name) = pick_pattern(candidates, &options) else {
        tracing::info!("pick cancelled");
        return Ok(String::new());
    };

    let start_args = StartArgs {
        pattern: Some(name),
        session: args.session.clone(),
        plain: args.plain,
        ..StartArgs::default()
    };
    start(ctx, &start_args)
}

/// Presets first, then saved patterns by name.
fn candidates(store: &dyn PatternStore) -> Result<Vec<(NamedPattern, PickOrigin)>, BreathError> {
    let presets = PRESETS
        .iter()
        .map(|p| (NamedPattern::new(p.name, p.pattern), PickOrigin::Preset));
    let saved = store
        .list_all()?
        .into_iter()
        .map(|named| (named, PickOrigin::Saved));

    Ok(presets.chain(saved).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pattern;
    use crate::features::patterns::PatternStorage;
    use crate::storage::Database;

    #[test]
    fn test_candidates_order() {
        let store = PatternStorage::with_database(Database::open_in_memory().unwrap());
        store.save_named("Calm", &Pattern::new(4, 0, 6, 0)).unwrap();

        let list = candidates(&store).unwrap();
        let names: Vec<&str> = list.iter().map(|(n, _)| n.name.as_str()).collect();

        assert_eq!(names, vec!["box", "relaxing", "energizing", "Calm"]);
        assert_eq!(list[3].1, PickOrigin::Saved);
    }
}
