use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mealshuffler_shared::mealplan::Week;
use mealshuffler_shared::recipe::{NewRecipe, Recipe};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Recipes a user may plan with: the global catalog plus their own.
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    async fn recipes(&self, user_id: &str) -> mealshuffler_shared::Result<Vec<Recipe>>;
}

/// Persistence of planned weeks.
///
/// The staged week (number [`Week::SENTINEL_NUMBER`]) is only reachable
/// through `save_generated`, `last_generated` and `week`.
#[async_trait]
pub trait WeekStore: Send + Sync {
    async fn week(&self, user_id: &str, id: Uuid) -> mealshuffler_shared::Result<Option<Week>>;

    /// Confirmed weeks of an ISO year, ordered by number.
    async fn weeks(&self, user_id: &str, year: i32) -> mealshuffler_shared::Result<Vec<Week>>;

    /// Inserts the week or replaces the one with the same id.
    async fn save_week(&self, user_id: &str, week: Week) -> mealshuffler_shared::Result<Week>;

    /// Replaces the staged week of the user.
    async fn save_generated(
        &self,
        user_id: &str,
        week: Week,
    ) -> mealshuffler_shared::Result<Week>;

    async fn last_generated(&self, user_id: &str) -> mealshuffler_shared::Result<Option<Week>>;

    async fn delete_week(&self, user_id: &str, id: Uuid) -> mealshuffler_shared::Result<()>;

    /// Highest confirmed week number of the user.
    async fn max_week_number(&self, user_id: &str) -> mealshuffler_shared::Result<Option<i32>>;
}

/// Process-local catalog and week store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    global_recipes: Arc<RwLock<Vec<Recipe>>>,
    user_recipes: Arc<RwLock<HashMap<String, Vec<Recipe>>>>,
    weeks: Arc<RwLock<HashMap<String, Vec<Week>>>>,
}

impl InMemoryStore {
    pub fn with_catalog(recipes: Vec<Recipe>) -> Self {
        Self {
            global_recipes: Arc::new(RwLock::new(recipes)),
            ..Default::default()
        }
    }

    /// Validates and stores a recipe, in the global catalog when `user_id` is `None`.
    pub async fn create_recipe(
        &self,
        input: NewRecipe,
        user_id: Option<&str>,
    ) -> mealshuffler_shared::Result<Recipe> {
        let recipe = input.into_recipe()?;

        match user_id {
            Some(user_id) => self
                .user_recipes
                .write()
                .await
                .entry(user_id.to_owned())
                .or_default()
                .push(recipe.clone()),
            None => self.global_recipes.write().await.push(recipe.clone()),
        }

        Ok(recipe)
    }
}

#[async_trait]
impl RecipeCatalog for InMemoryStore {
    async fn recipes(&self, user_id: &str) -> mealshuffler_shared::Result<Vec<Recipe>> {
        let mut recipes = self.global_recipes.read().await.clone();

        if let Some(own) = self.user_recipes.read().await.get(user_id) {
            recipes.extend(own.iter().cloned());
        }

        Ok(recipes)
    }
}

#[async_trait]
impl WeekStore for InMemoryStore {
    async fn week(&self, user_id: &str, id: Uuid) -> mealshuffler_shared::Result<Option<Week>> {
        Ok(self
            .weeks
            .read()
            .await
            .get(user_id)
            .and_then(|weeks| weeks.iter().find(|w| w.id == id).cloned()))
    }

    async fn weeks(&self, user_id: &str, year: i32) -> mealshuffler_shared::Result<Vec<Week>> {
        let mut weeks = self
            .weeks
            .read()
            .await
            .get(user_id)
            .map(|weeks| {
                weeks
                    .iter()
                    .filter(|w| w.year == year && !w.is_sentinel())
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        weeks.sort_by_key(|w| w.number);

        Ok(weeks)
    }

    async fn save_week(&self, user_id: &str, week: Week) -> mealshuffler_shared::Result<Week> {
        let mut all = self.weeks.write().await;
        let weeks = all.entry(user_id.to_owned()).or_default();

        match weeks.iter().position(|w| w.id == week.id) {
            Some(index) => weeks[index] = week.clone(),
            None => weeks.push(week.clone()),
        }

        Ok(week)
    }

    async fn save_generated(
        &self,
        user_id: &str,
        mut week: Week,
    ) -> mealshuffler_shared::Result<Week> {
        week.number = Week::SENTINEL_NUMBER;

        let mut all = self.weeks.write().await;
        let weeks = all.entry(user_id.to_owned()).or_default();
        weeks.retain(|w| !w.is_sentinel() || w.id == week.id);

        match weeks.iter().position(|w| w.id == week.id) {
            Some(index) => weeks[index] = week.clone(),
            None => weeks.push(week.clone()),
        }

        Ok(week)
    }

    async fn last_generated(&self, user_id: &str) -> mealshuffler_shared::Result<Option<Week>> {
        Ok(self
            .weeks
            .read()
            .await
            .get(user_id)
            .and_then(|weeks| weeks.iter().find(|w| w.is_sentinel()).cloned()))
    }

    async fn delete_week(&self, user_id: &str, id: Uuid) -> mealshuffler_shared::Result<()> {
        let mut all = self.weeks.write().await;
        let Some(weeks) = all.get_mut(user_id) else {
            return Err(mealshuffler_shared::Error::NotFound(format!("week {id}")));
        };

        let before = weeks.len();
        weeks.retain(|w| w.id != id);

        if weeks.len() == before {
            return Err(mealshuffler_shared::Error::NotFound(format!("week {id}")));
        }

        Ok(())
    }

    async fn max_week_number(&self, user_id: &str) -> mealshuffler_shared::Result<Option<i32>> {
        Ok(self.weeks.read().await.get(user_id).and_then(|weeks| {
            weeks
                .iter()
                .filter(|w| !w.is_sentinel())
                .map(|w| w.number)
                .max()
        }))
    }
}
