use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc};
use mealshuffler_shared::mealplan::{Day, Week};
use mealshuffler_shared::recipe::Recipe;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    ROLLING_WINDOW, RandomSource, RecipeCatalog, WeekStore, generate_days, generate_weeks,
    pick_recipe_for_day, suggest_n_random_recipes,
};

#[derive(Clone)]
pub struct Command<S: WeekStore, C: RecipeCatalog> {
    pub store: S,
    pub catalog: C,
    /// Seeded generator shared by every call, fresh entropy per call when `None`.
    seeded: Option<Arc<Mutex<StdRng>>>,
}

impl<S: WeekStore, C: RecipeCatalog> Command<S, C> {
    pub fn new(store: S, catalog: C) -> Self {
        Self {
            store,
            catalog,
            seeded: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seeded = Some(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))));
        self
    }

    /// Generator for one operation. A seeded command derives it from the
    /// shared generator, so successive calls draw different sequences while
    /// the whole run stays reproducible.
    async fn rng(&self) -> StdRng {
        match &self.seeded {
            Some(seeded) => StdRng::from_rng(&mut *seeded.lock().await),
            None => StdRng::from_os_rng(),
        }
    }

    async fn recipes(&self, user_id: &str) -> mealshuffler_shared::Result<Vec<Recipe>> {
        let recipes = self.catalog.recipes(user_id).await?;

        if recipes.is_empty() {
            mealshuffler_shared::user!("No recipes found to generate from");
        }

        Ok(recipes)
    }

    /// Suggests dinners for the ISO week of `now` without looking at past
    /// weeks and stages the result as the user's generated week.
    #[tracing::instrument(skip(self))]
    pub async fn generate_week(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> mealshuffler_shared::Result<Week> {
        let recipes = self.recipes(user_id).await?;
        let iso = now.iso_week();
        let mut days = generate_days(iso.year(), iso.week())?;

        let distinct = recipes
            .iter()
            .map(|r| r.name.as_str())
            .collect::<HashSet<_>>()
            .len();

        if distinct <= ROLLING_WINDOW && distinct < days.len() {
            mealshuffler_shared::user!(
                "At least {} different recipes are needed to generate a week, found {}",
                ROLLING_WINDOW + 1,
                distinct
            );
        }

        let mut rng = self.rng().await;
        let suggestions = suggest_n_random_recipes(&recipes, days.len(), &mut rng)?;

        for (day, recipe) in days.iter_mut().zip(suggestions) {
            day.dinner = Some(recipe);
        }

        let week = self
            .store
            .save_generated(user_id, Week::new(iso.year(), Week::SENTINEL_NUMBER, days))
            .await?;

        tracing::info!(week_id = %week.id, year = week.year, "staged generated week");

        Ok(week)
    }

    /// Plans one ISO week day by day, avoiding dinners of the previous week
    /// and of the days already planned.
    #[tracing::instrument(skip(self))]
    pub async fn plan_week(
        &self,
        user_id: &str,
        year: i32,
        week: u32,
    ) -> mealshuffler_shared::Result<Week> {
        let recipes = self.recipes(user_id).await?;
        let mut days = generate_days(year, week)?;

        let previous = self.previous_week(user_id, &days).await?;
        let mut rng = self.rng().await;
        fill_days(&mut days, &previous, &recipes, &mut rng)?;

        let planned = Week {
            id: self.week_id(user_id, year, week as i32).await?,
            ..Week::new(year, week as i32, days)
        };

        self.store.save_week(user_id, planned).await
    }

    /// Plans every remaining week of the ISO year of `start_time`, each week
    /// using the one before it as context.
    #[tracing::instrument(skip(self))]
    pub async fn generate_year(
        &self,
        user_id: &str,
        start_time: DateTime<Utc>,
    ) -> mealshuffler_shared::Result<Vec<Week>> {
        let recipes = self.recipes(user_id).await?;
        let weeks = generate_weeks(start_time)?;

        let Some(first) = weeks.first() else {
            return Ok(vec![]);
        };

        let mut previous = self.previous_week(user_id, &first.days).await?;
        let mut rng = self.rng().await;
        let mut saved = Vec::with_capacity(weeks.len());

        for mut week in weeks {
            week.id = self.week_id(user_id, week.year, week.number).await?;
            fill_days(&mut week.days, &previous, &recipes, &mut rng)?;
            previous = week.days.clone();
            saved.push(self.store.save_week(user_id, week).await?);
        }

        tracing::info!(weeks = saved.len(), "planned rest of the year");

        Ok(saved)
    }

    /// Picks another dinner for one day of a stored week.
    ///
    /// The current dinner counts as recently used, so a different recipe is
    /// preferred whenever one is available.
    #[tracing::instrument(skip(self))]
    pub async fn suggest_alternative(
        &self,
        user_id: &str,
        week_id: Uuid,
        day_index: usize,
    ) -> mealshuffler_shared::Result<Week> {
        let mut week = self.load_week(user_id, week_id).await?;

        if day_index >= week.days.len() {
            mealshuffler_shared::user!("Day {} is outside of the week", day_index);
        }

        let recipes = self.recipes(user_id).await?;
        let mut context = self.previous_week(user_id, &week.days).await?;
        context.extend(week.days.iter().cloned());

        let mut rng = self.rng().await;
        let recipe = pick_recipe_for_day(&week.days[day_index], &context, &recipes, &mut rng)?;
        week.days[day_index].dinner = Some(recipe.clone());

        self.save(user_id, week).await
    }

    /// Replaces every dinner of a stored week.
    #[tracing::instrument(skip(self))]
    pub async fn shuffle_week(
        &self,
        user_id: &str,
        week_id: Uuid,
    ) -> mealshuffler_shared::Result<Week> {
        let mut week = self.load_week(user_id, week_id).await?;
        let recipes = self.recipes(user_id).await?;
        let previous = self.previous_week(user_id, &week.days).await?;

        for day in week.days.iter_mut() {
            day.dinner = None;
        }

        let mut rng = self.rng().await;
        fill_days(&mut week.days, &previous, &recipes, &mut rng)?;

        self.save(user_id, week).await
    }

    /// Turns the staged generated week into week `number`.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_generated(
        &self,
        user_id: &str,
        number: i32,
    ) -> mealshuffler_shared::Result<Week> {
        if !(1..=53).contains(&number) {
            mealshuffler_shared::user!("number need to be set between 1 and 53");
        }

        let Some(mut week) = self.store.last_generated(user_id).await? else {
            return Err(mealshuffler_shared::Error::NotFound(
                "generated week".to_owned(),
            ));
        };

        let replaced = self
            .store
            .weeks(user_id, week.year)
            .await?
            .into_iter()
            .filter(|w| w.number == number);

        for existing in replaced {
            tracing::info!(week_id = %existing.id, number, "replacing confirmed week");
            self.store.delete_week(user_id, existing.id).await?;
        }

        week.number = number;

        self.store.save_week(user_id, week).await
    }

    pub async fn next_week_number(&self, user_id: &str) -> mealshuffler_shared::Result<i32> {
        Ok(self.store.max_week_number(user_id).await?.unwrap_or(0) + 1)
    }

    /// Id of the stored week `number` of `year`, a fresh one when there is none.
    async fn week_id(
        &self,
        user_id: &str,
        year: i32,
        number: i32,
    ) -> mealshuffler_shared::Result<Uuid> {
        Ok(self
            .store
            .weeks(user_id, year)
            .await?
            .into_iter()
            .find(|w| w.number == number)
            .map(|w| w.id)
            .unwrap_or_else(Uuid::new_v4))
    }

    async fn load_week(&self, user_id: &str, week_id: Uuid) -> mealshuffler_shared::Result<Week> {
        self.store
            .week(user_id, week_id)
            .await?
            .ok_or_else(|| mealshuffler_shared::Error::NotFound(format!("week {week_id}")))
    }

    async fn save(&self, user_id: &str, week: Week) -> mealshuffler_shared::Result<Week> {
        if week.is_sentinel() {
            self.store.save_generated(user_id, week).await
        } else {
            self.store.save_week(user_id, week).await
        }
    }

    /// Days of the confirmed week right before the one starting with `days[0]`.
    async fn previous_week(
        &self,
        user_id: &str,
        days: &[Day],
    ) -> mealshuffler_shared::Result<Vec<Day>> {
        let Some(first) = days.first() else {
            return Ok(vec![]);
        };

        let iso = (first.date - Duration::days(7)).iso_week();

        Ok(self
            .store
            .weeks(user_id, iso.year())
            .await?
            .into_iter()
            .find(|w| w.number == iso.week() as i32)
            .map(|w| w.days)
            .unwrap_or_default())
    }
}

/// Fills `days` in order, each pick seeing `previous` and the days before it.
fn fill_days<R>(
    days: &mut [Day],
    previous: &[Day],
    recipes: &[Recipe],
    rng: &mut R,
) -> crate::Result<()>
where
    R: RandomSource + ?Sized,
{
    let mut context = previous.to_vec();

    for day in days.iter_mut() {
        let recipe = pick_recipe_for_day(day, &context, recipes, rng)?;
        day.dinner = Some(recipe.clone());
        context.push(day.clone());
    }

    Ok(())
}
