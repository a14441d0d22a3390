#![allow(dead_code)]

use mealshuffler_mealplan::{Command, InMemoryStore};
use mealshuffler_shared::recipe::Recipe;
use rand::{Rng, SeedableRng, rngs::StdRng};

pub type TestCommand = Command<InMemoryStore, InMemoryStore>;

pub fn recipes(count: usize, seed: u64) -> Vec<Recipe> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| Recipe::new(format!("Recipe {i}"), rng.random::<f64>()))
        .collect()
}

pub fn setup_command(count: usize) -> (TestCommand, InMemoryStore) {
    let store = InMemoryStore::with_catalog(recipes(count, 17));
    let command = Command::new(store.clone(), store.clone()).with_seed(42);

    (command, store)
}
