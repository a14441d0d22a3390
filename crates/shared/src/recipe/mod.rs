use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Item {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// Price in the smallest currency unit.
    pub price: i64,
    pub amount: f64,
    pub unit: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Recipe {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// Relative selection weight. Zero is only ever picked when every candidate is zero.
    pub probability_weight: f64,
    pub portions: u32,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub left_over_compliance: bool,
}

impl Recipe {
    pub fn new(name: impl Into<String>, probability_weight: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            probability_weight,
            portions: 1,
            items: vec![],
            url: String::new(),
            left_over_compliance: false,
        }
    }

    /// Returns a copy scaled to `portions`, every item's price and amount
    /// multiplied by `portions / self.portions`.
    ///
    /// A recipe stored without portions has nothing to scale from, so its
    /// items are copied as they are.
    pub fn with_portions(&self, portions: u32) -> Self {
        let items = if self.portions == 0 {
            self.items.clone()
        } else {
            let fraction = f64::from(portions) / f64::from(self.portions);
            self.items
                .iter()
                .map(|item| Item {
                    id: Uuid::new_v4(),
                    name: item.name.to_owned(),
                    price: (item.price as f64 * fraction) as i64,
                    amount: item.amount * fraction,
                    unit: item.unit.to_owned(),
                })
                .collect()
        };

        Self {
            items,
            portions,
            ..self.clone()
        }
    }

    pub fn cost(&self) -> f64 {
        self.items.iter().map(|item| item.price as f64).sum()
    }

    /// Recipes are told apart by name when avoiding repeats.
    pub fn same_dish(&self, other: &Recipe) -> bool {
        self.name == other.name
    }
}

#[derive(Validate, Deserialize, Default, Clone, Debug)]
pub struct NewRecipe {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[validate(range(exclusive_min = 0.0, message = "probability_weight is required"))]
    pub probability_weight: f64,
    #[validate(range(min = 1, message = "portions is required"))]
    pub portions: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub left_over_compliance: bool,
}

impl NewRecipe {
    pub fn into_recipe(self) -> crate::Result<Recipe> {
        self.validate()?;

        Ok(Recipe {
            id: Uuid::new_v4(),
            name: self.name,
            probability_weight: self.probability_weight,
            portions: self.portions,
            items: self.items,
            url: self.url,
            left_over_compliance: self.left_over_compliance,
        })
    }
}
