use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recipe::Recipe;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Day {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub dinner: Option<Recipe>,
}

impl Day {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            dinner: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Week {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub number: i32,
    pub year: i32,
    pub days: Vec<Day>,
}

impl Week {
    /// Number of the staged week that was generated but not yet confirmed.
    pub const SENTINEL_NUMBER: i32 = -1;

    pub fn new(year: i32, number: i32, days: Vec<Day>) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            year,
            days,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.number == Self::SENTINEL_NUMBER
    }

    pub fn dinners(&self) -> impl Iterator<Item = &Recipe> {
        self.days.iter().filter_map(|day| day.dinner.as_ref())
    }
}
