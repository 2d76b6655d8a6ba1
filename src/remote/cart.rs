use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    models::{CartItem, Session},
    Result,
};

/// Persistence for the `cart_items` table. Every operation is scoped to
/// the session's user.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn rows(&self, session: &Session) -> Result<Vec<CartItem>>;

    async fn find_by_name(&self, session: &Session, name: &str) -> Result<Option<CartItem>>;

    async fn insert(&self, session: &Session, item: &CartItem) -> Result<()>;

    /// Rewrites the quantity and line total of an existing row.
    async fn update_quantities(
        &self,
        session: &Session,
        id: Uuid,
        quantity: u32,
        total_price: f64,
    ) -> Result<()>;

    /// Deletes every row belonging to the session's user.
    async fn clear(&self, session: &Session) -> Result<()>;
}
