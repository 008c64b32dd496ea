use std::future::Future;

use futures_util::future;
use rand::seq::SliceRandom;
use rand::Rng;

use super::catalog::{self, PERSPECTIVE, SEASON, TIME_OF_DAY};
use super::selection::SceneSelection;

/// How many alternate renders one variation batch produces.
pub const DEFAULT_VARIATION_COUNT: usize = 3;

const HINT_PERSPECTIVE: &str = "A different artistic style and perspective.";
const HINT_TIME_OF_DAY: &str = "A different time of day and perspective.";
const HINT_SEASON: &str = "A different season and perspective.";

/// Partial override of a selection for one alternate render.
///
/// Perspective is always substituted; at most one secondary dimension is
/// substituted with it so the variations stay visually distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationBlueprint {
    pub perspective: String,
    pub time_of_day: Option<String>,
    pub season: Option<String>,
    pub prompt_hint: &'static str,
}

impl VariationBlueprint {
    /// Merge this blueprint onto the current selection. Overridden fields
    /// win, everything else is inherited, and the hint is appended to the
    /// custom prompt.
    pub fn apply(&self, current: &SceneSelection) -> SceneSelection {
        let mut sel = current.clone().with_perspective(self.perspective.clone());
        if let Some(time_of_day) = &self.time_of_day {
            sel = sel.with_time_of_day(time_of_day.clone());
        }
        if let Some(season) = &self.season {
            sel = sel.with_season(season.clone());
        }
        let prompt = format!("{} {}", current.custom_prompt, self.prompt_hint);
        sel.with_custom_prompt(prompt.trim().to_string())
    }
}

/// Plan up to `count` blueprints around the current selection.
///
/// Perspective candidates exclude the currently selected value and the
/// neutral "keep the original perspective" sentinel; time-of-day and season
/// candidates exclude only the current value. Each candidate list is
/// shuffled uniformly, then perspectives are taken in order (wrapping when
/// the list is shorter than `count`). Blueprints may collide with each
/// other; an empty perspective candidate list yields no blueprints at all.
pub fn plan_blueprints(
    current: &SceneSelection,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<VariationBlueprint> {
    let mut perspectives: Vec<&str> = PERSPECTIVE
        .iter()
        .map(|o| o.fragment)
        .filter(|f| *f != current.perspective && *f != catalog::neutral_perspective())
        .collect();
    let mut times: Vec<&str> = TIME_OF_DAY
        .iter()
        .map(|o| o.fragment)
        .filter(|f| *f != current.time_of_day)
        .collect();
    let mut seasons: Vec<&str> = SEASON
        .iter()
        .map(|o| o.fragment)
        .filter(|f| *f != current.season)
        .collect();

    if perspectives.is_empty() {
        return Vec::new();
    }

    perspectives.shuffle(rng);
    times.shuffle(rng);
    seasons.shuffle(rng);

    (0..count)
        .map(|slot| {
            let perspective = perspectives[slot % perspectives.len()].to_string();
            let cycle = slot / 3;
            match slot % 3 {
                1 if !times.is_empty() => VariationBlueprint {
                    perspective,
                    time_of_day: Some(times[cycle % times.len()].to_string()),
                    season: None,
                    prompt_hint: HINT_TIME_OF_DAY,
                },
                2 if !seasons.is_empty() => VariationBlueprint {
                    perspective,
                    time_of_day: None,
                    season: Some(seasons[cycle % seasons.len()].to_string()),
                    prompt_hint: HINT_SEASON,
                },
                _ => VariationBlueprint {
                    perspective,
                    time_of_day: None,
                    season: None,
                    prompt_hint: HINT_PERSPECTIVE,
                },
            }
        })
        .collect()
}

/// Plan `count` complete alternate selections around the current one.
pub fn plan_variations(
    current: &SceneSelection,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<SceneSelection> {
    plan_blueprints(current, count, rng)
        .iter()
        .map(|bp| bp.apply(current))
        .collect()
}

/// Await a batch of independent renders with all-or-nothing semantics: the
/// first failure fails the whole batch and partial successes are discarded.
pub async fn join_batch<T, E, F>(batch: Vec<F>) -> Result<Vec<T>, E>
where
    F: Future<Output = Result<T, E>>,
{
    future::try_join_all(batch).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_blueprints_never_pick_current_or_neutral_perspective() {
        let current = SceneSelection::default().with_perspective("from the left side");
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            for bp in plan_blueprints(&current, DEFAULT_VARIATION_COUNT, &mut rng) {
                assert_ne!(bp.perspective, current.perspective);
                assert_ne!(bp.perspective, catalog::neutral_perspective());
            }
        }
    }

    #[test]
    fn test_blueprints_never_pick_current_secondary_values() {
        let current = SceneSelection::default();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            for bp in plan_blueprints(&current, DEFAULT_VARIATION_COUNT, &mut rng) {
                if let Some(time_of_day) = &bp.time_of_day {
                    assert_ne!(time_of_day, &current.time_of_day);
                }
                if let Some(season) = &bp.season {
                    assert_ne!(season, &current.season);
                }
            }
        }
    }

    #[test]
    fn test_blueprint_count_and_hints() {
        let mut rng = StdRng::seed_from_u64(7);
        let bps = plan_blueprints(&SceneSelection::default(), 3, &mut rng);
        assert_eq!(bps.len(), 3);
        assert_eq!(bps[0].prompt_hint, HINT_PERSPECTIVE);
        assert_eq!(bps[1].prompt_hint, HINT_TIME_OF_DAY);
        assert_eq!(bps[2].prompt_hint, HINT_SEASON);
        assert!(bps[0].time_of_day.is_none() && bps[0].season.is_none());
        assert!(bps[1].time_of_day.is_some() && bps[1].season.is_none());
        assert!(bps[2].time_of_day.is_none() && bps[2].season.is_some());
    }

    #[test]
    fn test_perspectives_wrap_when_candidates_run_out() {
        // Non-catalog current value leaves 5 candidates; ask for more than
        // that and the picks must wrap via modulo rather than panic.
        let current = SceneSelection::default().with_perspective("from a submarine window");
        let mut rng = StdRng::seed_from_u64(1);
        let bps = plan_blueprints(&current, 8, &mut rng);
        assert_eq!(bps.len(), 8);
    }

    #[test]
    fn test_apply_overrides_and_inherits() {
        let current = SceneSelection::default().with_custom_prompt("add a red car");
        let bp = VariationBlueprint {
            perspective: "from the right side".to_string(),
            time_of_day: Some("night".to_string()),
            season: None,
            prompt_hint: HINT_TIME_OF_DAY,
        };
        let sel = bp.apply(&current);
        assert_eq!(sel.perspective, "from the right side");
        assert_eq!(sel.time_of_day, "night");
        assert_eq!(sel.season, current.season);
        assert_eq!(sel.tourists, current.tourists);
        assert_eq!(
            sel.custom_prompt,
            "add a red car A different time of day and perspective."
        );
    }

    #[test]
    fn test_apply_trims_hint_onto_empty_prompt() {
        let bp = VariationBlueprint {
            perspective: "from the left side".to_string(),
            time_of_day: None,
            season: None,
            prompt_hint: HINT_PERSPECTIVE,
        };
        let sel = bp.apply(&SceneSelection::default());
        assert_eq!(sel.custom_prompt, HINT_PERSPECTIVE);
    }

    #[test]
    fn test_planned_selections_differ_from_current() {
        let current = SceneSelection::default();
        let mut rng = StdRng::seed_from_u64(11);
        for sel in plan_variations(&current, DEFAULT_VARIATION_COUNT, &mut rng) {
            assert_ne!(sel, current);
            assert_ne!(sel.perspective, current.perspective);
        }
    }

    fn stub_render(outcome: Result<i32, String>) -> futures_util::future::BoxFuture<'static, Result<i32, String>> {
        Box::pin(async move { outcome })
    }

    #[tokio::test]
    async fn test_join_batch_collects_all_successes() {
        let batch = vec![stub_render(Ok(1)), stub_render(Ok(2)), stub_render(Ok(3))];
        assert_eq!(join_batch(batch).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_join_batch_is_all_or_nothing() {
        let batch = vec![
            stub_render(Ok(1)),
            stub_render(Err("render 2 failed".to_string())),
            stub_render(Ok(3)),
        ];
        let err = join_batch(batch).await.unwrap_err();
        assert_eq!(err, "render 2 failed");
    }
}
