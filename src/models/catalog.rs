use serde::Deserialize;
use strum::{EnumString, ToString};

/// The catalog tables exposed by the remote data service. The string form
/// is the remote table name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumString, ToString)]
#[strum(serialize_all = "lowercase")]
pub enum CatalogTable {
    Breads,
    Meats,
    Toppings,
    Sandwiches,
    Drinks,
    Salads,
    Desserts,
    SubOptions,
    DrinkOptions,
}

/// A single record in any non-deal catalog table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
}

impl MenuItem {
    pub fn image_or_default(&self) -> String {
        self.image.clone().unwrap_or_default()
    }
}

/// A composite record bundling a flat price with a configurable number of
/// required sub/drink sub-selections.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Deal {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "subChoices", default)]
    pub sub_choices: u32,
    #[serde(rename = "drinkChoices", default)]
    pub drink_choices: u32,
}

impl Deal {
    pub fn total_choices(&self) -> u32 {
        self.sub_choices + self.drink_choices
    }
}
