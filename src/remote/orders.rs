use async_trait::async_trait;

use crate::{
    models::{Order, Session},
    Result,
};

/// Persistence for the `orders` table. Orders are written once at checkout
/// and never updated; history is only bulk-deletable.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn place(&self, session: &Session, total_price: f64, items_json: String) -> Result<()>;

    /// The user's orders, most recent first.
    async fn history(&self, session: &Session) -> Result<Vec<Order>>;

    async fn clear(&self, session: &Session) -> Result<()>;
}
