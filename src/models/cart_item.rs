use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row in the cart: a named product, its unit price, the quantity and
/// the computed line total. Identity is the `name` - adding an item whose
/// name already exists merges quantities instead of appending a second row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Remote row id, populated once the row has been persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub quantity: u32,
    pub total_price: f64,
}

/// What a catalog view hands to the cart aggregator. Quantity defaults
/// to 1 when not given.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCartItem {
    pub name: String,
    pub price: f64,
    pub image: String,
    pub quantity: Option<u32>,
}

impl NewCartItem {
    pub fn new(name: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            image: image.into(),
            quantity: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity.max(1));
        self
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1).max(1)
    }

    /// A fresh line for an item not yet in the cart.
    pub fn into_line(self) -> CartItem {
        let quantity = self.quantity();
        CartItem {
            id: None,
            name: self.name,
            price: self.price,
            image: self.image,
            quantity,
            total_price: self.price * f64::from(quantity),
        }
    }
}

impl CartItem {
    /// Folds a repeated addition into this line: quantities accumulate and
    /// the line total is recomputed from the incoming unit price.
    pub fn merge(&mut self, incoming: &NewCartItem) {
        self.quantity += incoming.quantity();
        self.price = incoming.price;
        self.total_price = self.price * f64::from(self.quantity);
    }
}
