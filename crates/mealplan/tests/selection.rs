use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};
use mealshuffler_mealplan::{pick_recipe_for_day, suggest_n_random_recipes};
use mealshuffler_shared::mealplan::Day;
use mealshuffler_shared::recipe::Recipe;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

mod helpers;

fn consecutive_days(count: i64) -> Vec<Day> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
    (0..count)
        .map(|i| Day::new(start + Duration::days(i)))
        .collect()
}

fn adjacent_different_ratio(days: &[Day]) -> f64 {
    let different = days
        .windows(2)
        .filter(|pair| pair[0].dinner.as_ref().map(|r| &r.name) != pair[1].dinner.as_ref().map(|r| &r.name))
        .count();

    different as f64 / (days.len() - 1) as f64
}

#[test]
fn test_no_duplicate_recipes_in_nearby_days() {
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let recipes = helpers::recipes(1_000, seed);
        let mut days = consecutive_days(1_000);

        for i in 0..days.len() {
            let recipe = pick_recipe_for_day(&days[i], &days, &recipes, &mut rng)
                .unwrap()
                .clone();
            days[i].dinner = Some(recipe);
        }

        let ratio = adjacent_different_ratio(&days);
        assert!(ratio >= 0.95, "seed {seed}: only {ratio} of adjacent days differ");
    }
}

#[test]
fn test_nearby_days_differ_with_small_catalog() {
    let mut rng = StdRng::seed_from_u64(77);
    let recipes = helpers::recipes(8, 77);
    let mut days = consecutive_days(1_000);

    for i in 0..days.len() {
        let context = days
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, d)| d.clone())
            .collect::<Vec<_>>();
        let recipe = pick_recipe_for_day(&days[i], &context, &recipes, &mut rng)
            .unwrap()
            .clone();
        days[i].dinner = Some(recipe);
    }

    assert!(adjacent_different_ratio(&days) >= 0.95);
}

/// Highest expected number of times `recipe` is suggested over `calls`
/// calls of `n` suggestions each.
///
/// Each slot leaves at most five other recipes out, so a recipe's chance
/// per slot never exceeds its weight over the weight left after removing
/// the five heaviest others.
fn expected_ceiling(recipe: &Recipe, recipes: &[Recipe], n: usize, calls: usize) -> f64 {
    let total = recipes.iter().map(|r| r.probability_weight).sum::<f64>();
    let mut others = recipes
        .iter()
        .filter(|r| r.name != recipe.name)
        .map(|r| r.probability_weight)
        .collect::<Vec<_>>();
    others.sort_by(|a, b| b.total_cmp(a));
    let excluded = others.iter().take(5).sum::<f64>();

    (calls * n) as f64 * recipe.probability_weight / (total - excluded)
}

fn assert_suggestions_follow_weights(recipes: &[Recipe], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let suggestion_count = 21;
    let calls = 1_000;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..calls {
        for suggestion in suggest_n_random_recipes(recipes, suggestion_count, &mut rng).unwrap() {
            *counts.entry(suggestion.name).or_default() += 1;
        }
    }

    for recipe in recipes {
        let count = counts.get(&recipe.name).copied().unwrap_or_default() as f64;
        let ceiling = expected_ceiling(recipe, recipes, suggestion_count, calls);

        assert!(
            count <= ceiling + 4.0 * ceiling.sqrt(),
            "seed {seed}: {} was suggested {count} times, expected at most {ceiling:.1}",
            recipe.name
        );
    }
}

#[test]
fn test_suggestions_follow_weights() {
    for seed in [3, 30, 300] {
        assert_suggestions_follow_weights(&helpers::recipes(7, seed), seed);
    }
}

#[test]
fn test_suggestions_follow_weights_in_large_catalog() {
    for seed in [3, 30, 300] {
        let mut rng = StdRng::seed_from_u64(seed);
        let recipes = (0..40)
            .map(|i| Recipe::new(format!("Recipe {i}"), 0.5 + rng.random::<f64>()))
            .collect::<Vec<_>>();

        assert_suggestions_follow_weights(&recipes, seed);
    }
}

#[test]
fn test_suggestion_windows_never_repeat() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let recipes = helpers::recipes(6 + seed as usize, seed);
        let suggestions = suggest_n_random_recipes(&recipes, 200, &mut rng).unwrap();

        for window in suggestions.windows(5) {
            for (i, recipe) in window.iter().enumerate() {
                assert!(
                    window[i + 1..].iter().all(|other| other.name != recipe.name),
                    "seed {seed}: {} repeated within five slots",
                    recipe.name
                );
            }
        }
    }
}
