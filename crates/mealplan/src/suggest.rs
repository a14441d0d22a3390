use std::collections::VecDeque;

use mealshuffler_shared::recipe::Recipe;

use crate::{Error, RandomSource, Result, pick_weighted};

/// How many of the latest suggestions are kept out of the next pick.
pub const ROLLING_WINDOW: usize = 5;

/// Suggests `n` recipes in order, never repeating a name within the last
/// [`ROLLING_WINDOW`] suggestions.
///
/// Fails with [`Error::EmptyInput`] as soon as the window leaves nothing to
/// pick from, which happens with five distinct names or fewer once `n`
/// exceeds that count.
pub fn suggest_n_random_recipes<R>(recipes: &[Recipe], n: usize, rng: &mut R) -> Result<Vec<Recipe>>
where
    R: RandomSource + ?Sized,
{
    let mut window: VecDeque<&Recipe> = VecDeque::with_capacity(ROLLING_WINDOW + 1);
    let mut suggestions = Vec::with_capacity(n);

    for slot in 0..n {
        let available = recipes
            .iter()
            .filter(|recipe| !window.iter().any(|recent| recent.same_dish(recipe)))
            .collect::<Vec<_>>();

        if available.is_empty() {
            tracing::debug!(slot, recipes = recipes.len(), "no recipe left outside the window");
            return Err(Error::EmptyInput("set of available recipes"));
        }

        let picked = *pick_weighted(&available, |recipe| recipe.probability_weight, rng)?;

        suggestions.push(picked.clone());
        window.push_back(picked);

        if window.len() > ROLLING_WINDOW {
            window.pop_front();
        }
    }

    Ok(suggestions)
}
