use std::path::Path;

use mealshuffler_mealplan::InMemoryStore;
use mealshuffler_shared::recipe::NewRecipe;

use crate::error::AppError;

/// Reads a JSON array of recipes and validates each of them.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Vec<NewRecipe>, AppError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| AppError::CatalogIo {
        path: path.display().to_string(),
        source,
    })?;

    Ok(serde_json::from_str(&content)?)
}

/// Builds an in-memory store whose global catalog holds the recipes of `path`.
#[tracing::instrument]
pub async fn load_store(path: &str) -> Result<InMemoryStore, AppError> {
    let store = InMemoryStore::default();

    for recipe in read_catalog(path)? {
        store.create_recipe(recipe, None).await?;
    }

    tracing::info!("recipe catalog loaded");

    Ok(store)
}
