use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub planner: PlannerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON file holding the recipes to plan with
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    pub user_id: String,
    /// Fixed seed for reproducible plans
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALSHUFFLER__CATALOG__PATH, etc.)
    /// 2. Config file specified by path, CONFIG_PATH or config/default.toml
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("catalog.path", "data/recipes.json")?
            .set_default("planner.user_id", "default")?
            .set_default("observability.log_level", default_log_level())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALSHUFFLER")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.catalog.path.trim().is_empty() {
            return Err("Catalog path must not be empty".to_string());
        }
        if self.planner.user_id.trim().is_empty() {
            return Err("Planner user_id must not be empty".to_string());
        }
        Ok(())
    }
}
