#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A picker was handed nothing to pick from.
    #[error("cannot pick from an empty {0}")]
    EmptyInput(&'static str),

    #[error("week {week} does not exist in iso year {year}")]
    InvalidIsoWeek { year: i32, week: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for mealshuffler_shared::Error {
    fn from(value: Error) -> Self {
        Self::Server(value.to_string())
    }
}
