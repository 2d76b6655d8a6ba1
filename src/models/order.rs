use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{models::CartItem, Result};

/// A placed order. Immutable after creation - the remote only supports
/// bulk deletion of a user's history.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub total_price: f64,
    /// JSON snapshot of the cart rows at the moment of checkout.
    pub items: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Deserializes the item snapshot back into cart rows.
    pub fn snapshot(&self) -> Result<Vec<CartItem>> {
        let items = serde_json::from_str(&self.items)?;
        Ok(items)
    }
}
