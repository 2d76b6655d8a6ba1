use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    models::{CartItem, NewCartItem, Session},
    remote::CartRepository,
    HoagieError, Result,
};

/// Keyed line-item collection: name -> line, with insertion order kept so
/// the external contract stays an ordered list. Merge-or-append is a map
/// lookup rather than a scan.
#[derive(Debug, Default)]
struct LineItems {
    order: Vec<String>,
    by_name: HashMap<String, CartItem>,
}

impl LineItems {
    fn replace(&mut self, rows: Vec<CartItem>) {
        self.order.clear();
        self.by_name.clear();
        for row in rows {
            if !self.by_name.contains_key(&row.name) {
                self.order.push(row.name.clone());
            }
            self.by_name.insert(row.name.clone(), row);
        }
    }

    fn clear(&mut self) {
        self.order.clear();
        self.by_name.clear();
    }

    fn items(&self) -> Vec<CartItem> {
        self.order
            .iter()
            .filter_map(|name| self.by_name.get(name))
            .cloned()
            .collect()
    }

    fn total(&self) -> f64 {
        self.by_name.values().map(|line| line.total_price).sum()
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// The cart: an in-memory keyed collection mirrored row-for-row to the
/// remote `cart_items` table for the authenticated user. Additions merge
/// by name; every mutation is written through before the local copy is
/// refreshed from the remote.
pub struct CartAggregator<R> {
    remote: Arc<R>,
    lines: Mutex<LineItems>,
}

impl<R: CartRepository> CartAggregator<R> {
    pub fn new(remote: Arc<R>) -> Self {
        Self {
            remote,
            lines: Mutex::new(LineItems::default()),
        }
    }

    fn lines(&self) -> MutexGuard<'_, LineItems> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Adds an item, merging by name: an existing row gains the incoming
    /// quantity (default 1) and has its line total recomputed; otherwise a
    /// new row is appended. Fails closed with [`HoagieError::LoginRequired`]
    /// before any remote call when no session is supplied.
    #[tracing::instrument(skip(self, session, item), fields(item = %item.name))]
    pub async fn add(&self, session: Option<&Session>, item: NewCartItem) -> Result<()> {
        let session = session.ok_or(HoagieError::LoginRequired)?;

        match self.remote.find_by_name(session, &item.name).await? {
            Some(mut existing) => {
                let id = existing.id.ok_or(HoagieError::UnexpectedError)?;
                existing.merge(&item);
                self.remote
                    .update_quantities(session, id, existing.quantity, existing.total_price)
                    .await?;
            }
            None => {
                self.remote.insert(session, &item.into_line()).await?;
            }
        }

        // Refresh from the remote so the local copy reflects what was
        // actually persisted
        let rows = self.remote.rows(session).await?;
        self.lines().replace(rows);
        Ok(())
    }

    /// Replaces the local collection with the user's persisted rows, or
    /// empties it when nobody is signed in.
    #[tracing::instrument(skip(self, session))]
    pub async fn load(&self, session: Option<&Session>) -> Result<()> {
        match session {
            Some(session) => {
                let rows = self.remote.rows(session).await?;
                self.lines().replace(rows);
            }
            None => self.lines().clear(),
        }
        Ok(())
    }

    /// Empties the cart, deleting the user's remote rows when a session
    /// exists.
    #[tracing::instrument(skip(self, session))]
    pub async fn clear(&self, session: Option<&Session>) -> Result<()> {
        if let Some(session) = session {
            self.remote.clear(session).await?;
        }
        self.lines().clear();
        Ok(())
    }

    /// Drops the local mirror only. Used on sign-out, when the remote rows
    /// must survive for the next sign-in.
    pub fn reset(&self) {
        self.lines().clear();
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.lines().items()
    }

    pub fn total(&self) -> f64 {
        self.lines().total()
    }

    pub fn len(&self) -> usize {
        self.lines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().len() == 0
    }
}
