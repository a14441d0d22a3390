use chrono::{DateTime, Utc};
use mealshuffler_shared::mealplan::Day;
use mealshuffler_shared::recipe::Recipe;

use crate::{RandomSource, Result, pick_weighted};

/// Days within this distance (inclusive) of the target block a repeat.
pub const MAX_DIST_DAYS: i64 = 5;

/// Whole days between two instants, ignoring direction.
pub fn distance_in_days(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (a - b).num_hours().abs() / 24
}

/// 0 when `candidate` is already the dinner of a context day close to
/// `target`, 1 otherwise. Days without a dinner never exclude anything.
pub fn recency_multiplier(candidate: &Recipe, target: &Day, context: &[Day]) -> f64 {
    let recently_used = context.iter().any(|day| {
        day.dinner.as_ref().is_some_and(|dinner| {
            dinner.same_dish(candidate) && distance_in_days(day.date, target.date) <= MAX_DIST_DAYS
        })
    });

    if recently_used { 0.0 } else { 1.0 }
}

struct ScoredRecipe<'a> {
    recipe: &'a Recipe,
    weight: f64,
}

/// Picks a dinner for `target`, lowering the odds of recipes served within
/// [`MAX_DIST_DAYS`] of it in `context`.
///
/// The exclusion is soft: when every recipe is excluded the last one in
/// `recipes` is returned.
pub fn pick_recipe_for_day<'a, R>(
    target: &Day,
    context: &[Day],
    recipes: &'a [Recipe],
    rng: &mut R,
) -> Result<&'a Recipe>
where
    R: RandomSource + ?Sized,
{
    let scored = recipes
        .iter()
        .map(|recipe| ScoredRecipe {
            recipe,
            weight: recency_multiplier(recipe, target, context) * recipe.probability_weight,
        })
        .collect::<Vec<_>>();

    if !scored.is_empty() && scored.iter().all(|s| s.weight <= 0.0) {
        tracing::warn!(
            date = %target.date.format("%Y-%m-%d"),
            recipes = scored.len(),
            "every recipe is excluded, falling back to the last one"
        );
    }

    let picked = pick_weighted(&scored, |s| s.weight, rng)?;

    tracing::debug!(
        date = %target.date.format("%Y-%m-%d"),
        recipe = %picked.recipe.name,
        "picked dinner"
    );

    Ok(picked.recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn day_at(offset: i64, dinner: Option<&Recipe>) -> Day {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        Day {
            dinner: dinner.cloned(),
            ..Day::new(start + Duration::days(offset))
        }
    }

    #[test]
    fn test_distance_in_days() {
        let a = Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap();

        assert_eq!(distance_in_days(a, a), 0);
        assert_eq!(distance_in_days(a, a + Duration::hours(23)), 0);
        assert_eq!(distance_in_days(a, a + Duration::hours(47)), 1);
        assert_eq!(distance_in_days(a + Duration::days(5), a), 5);
        assert_eq!(distance_in_days(a, a + Duration::days(5)), 5);
    }

    #[test]
    fn test_recency_multiplier() {
        let tacos = Recipe::new("Tacos", 1.0);
        let pasta = Recipe::new("Pasta", 1.0);
        let target = day_at(0, None);

        let context = [day_at(-5, Some(&tacos)), day_at(6, Some(&pasta)), day_at(1, None)];
        assert_eq!(recency_multiplier(&tacos, &target, &context), 0.0);
        assert_eq!(recency_multiplier(&pasta, &target, &context), 1.0);

        let far = [day_at(-6, Some(&tacos))];
        assert_eq!(recency_multiplier(&tacos, &target, &far), 1.0);
    }

    #[test]
    fn test_recency_compares_names() {
        let tacos = Recipe::new("Tacos", 1.0);
        let other_tacos = Recipe::new("Tacos", 3.0);
        let target = day_at(0, None);

        assert_ne!(tacos.id, other_tacos.id);
        assert_eq!(
            recency_multiplier(&other_tacos, &target, &[day_at(2, Some(&tacos))]),
            0.0
        );
    }

    #[test]
    fn test_pick_avoids_recent_recipe() {
        let mut rng = StdRng::seed_from_u64(3);
        let recipes = [Recipe::new("Tacos", 100.0), Recipe::new("Pasta", 0.01)];
        let context = [day_at(-1, Some(&recipes[0]))];
        let target = day_at(0, None);

        for _ in 0..200 {
            let picked = pick_recipe_for_day(&target, &context, &recipes, &mut rng).unwrap();
            assert_eq!(picked.name, "Pasta");
        }
    }

    #[test]
    fn test_pick_all_excluded_falls_back_to_last() {
        let mut rng = StdRng::seed_from_u64(3);
        let recipes = [Recipe::new("Tacos", 1.0), Recipe::new("Pasta", 1.0)];
        let context = [day_at(-1, Some(&recipes[0])), day_at(2, Some(&recipes[1]))];
        let target = day_at(0, None);

        let picked = pick_recipe_for_day(&target, &context, &recipes, &mut rng).unwrap();
        assert_eq!(picked.name, "Pasta");
    }

    #[test]
    fn test_pick_without_recipes_fails() {
        let mut rng = StdRng::seed_from_u64(3);
        let target = day_at(0, None);

        assert_eq!(
            pick_recipe_for_day(&target, &[], &[], &mut rng),
            Err(Error::EmptyInput("candidate list"))
        );
    }
}
