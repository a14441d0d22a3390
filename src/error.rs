use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot read recipe catalog {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid date {0}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error(transparent)]
    Planning(#[from] mealshuffler_shared::Error),

    #[error(transparent)]
    Calendar(#[from] mealshuffler_mealplan::Error),
}
