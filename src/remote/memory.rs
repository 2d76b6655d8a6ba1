use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::{
    models::{CartItem, CatalogTable, Deal, MenuItem, Order, Session},
    remote::{AuthRepository, CartRepository, CatalogRepository, OrderRepository},
    HoagieError, Result,
};

#[derive(Debug, Clone)]
struct Account {
    user_id: Uuid,
    password: String,
    name: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Account>,
    active: Option<Session>,
    menus: HashMap<CatalogTable, Vec<MenuItem>>,
    deals: Vec<Deal>,
    carts: HashMap<Uuid, Vec<CartItem>>,
    orders: HashMap<Uuid, Vec<Order>>,
    fail_next_order: bool,
}

/// In-memory stand-in for the hosted service, implementing the same
/// repository traits over plain maps. Seedable, so tests and offline
/// development can run against a known catalog and account set.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    state: Mutex<State>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn seed_account(&self, email: &str, password: &str, name: Option<&str>) -> Uuid {
        let user_id = Uuid::new_v4();
        self.lock().accounts.insert(
            email.to_string(),
            Account {
                user_id,
                password: password.to_string(),
                name: name.map(String::from),
            },
        );
        user_id
    }

    pub fn seed_menu(&self, table: CatalogTable, items: Vec<MenuItem>) {
        self.lock().menus.insert(table, items);
    }

    pub fn seed_deal(&self, deal: Deal) {
        self.lock().deals.push(deal);
    }

    /// Makes the next order insertion fail the way a dropped connection
    /// would, so checkout failure paths can be exercised.
    pub fn fail_next_order_placement(&self) {
        self.lock().fail_next_order = true;
    }

    fn verify(state: &State, session: &Session) -> Result<()> {
        match &state.active {
            Some(active) if active.access_token == session.access_token => Ok(()),
            _ => Err(HoagieError::IncorrectCredentials),
        }
    }
}

#[async_trait]
impl AuthRepository for InMemoryRemote {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let mut state = self.lock();
        let account = state
            .accounts
            .get(email)
            .filter(|account| account.password == password)
            .cloned()
            .ok_or(HoagieError::IncorrectCredentials)?;

        let session = Session {
            user_id: account.user_id,
            email: email.to_string(),
            name: account.name,
            access_token: Uuid::new_v4().to_string(),
        };
        state.active = Some(session.clone());
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let mut state = self.lock();
        if state.accounts.contains_key(email) {
            return Err(HoagieError::validation(
                "An account with this email already exists",
            ));
        }
        state.accounts.insert(
            email.to_string(),
            Account {
                user_id: Uuid::new_v4(),
                password: password.to_string(),
                name: None,
            },
        );
        Ok(())
    }

    async fn sign_out(&self, _session: &Session) -> Result<()> {
        self.lock().active = None;
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.lock().active.clone())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRemote {
    async fn menu(&self, table: CatalogTable) -> Result<Vec<MenuItem>> {
        Ok(self.lock().menus.get(&table).cloned().unwrap_or_default())
    }

    async fn deals(&self) -> Result<Vec<Deal>> {
        Ok(self.lock().deals.clone())
    }
}

#[async_trait]
impl CartRepository for InMemoryRemote {
    async fn rows(&self, session: &Session) -> Result<Vec<CartItem>> {
        let state = self.lock();
        Self::verify(&state, session)?;
        Ok(state
            .carts
            .get(&session.user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_by_name(&self, session: &Session, name: &str) -> Result<Option<CartItem>> {
        let state = self.lock();
        Self::verify(&state, session)?;
        Ok(state
            .carts
            .get(&session.user_id)
            .and_then(|rows| rows.iter().find(|row| row.name == name))
            .cloned())
    }

    async fn insert(&self, session: &Session, item: &CartItem) -> Result<()> {
        let mut state = self.lock();
        Self::verify(&state, session)?;
        let mut row = item.clone();
        row.id = Some(Uuid::new_v4());
        state.carts.entry(session.user_id).or_default().push(row);
        Ok(())
    }

    async fn update_quantities(
        &self,
        session: &Session,
        id: Uuid,
        quantity: u32,
        total_price: f64,
    ) -> Result<()> {
        let mut state = self.lock();
        Self::verify(&state, session)?;
        let row = state
            .carts
            .get_mut(&session.user_id)
            .and_then(|rows| rows.iter_mut().find(|row| row.id == Some(id)))
            .ok_or(HoagieError::NotFound)?;
        row.quantity = quantity;
        row.total_price = total_price;
        Ok(())
    }

    async fn clear(&self, session: &Session) -> Result<()> {
        let mut state = self.lock();
        Self::verify(&state, session)?;
        state.carts.remove(&session.user_id);
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryRemote {
    async fn place(&self, session: &Session, total_price: f64, items_json: String) -> Result<()> {
        let mut state = self.lock();
        Self::verify(&state, session)?;
        if state.fail_next_order {
            state.fail_next_order = false;
            return Err(HoagieError::RemoteService(
                "connection reset by peer".to_string(),
            ));
        }
        state
            .orders
            .entry(session.user_id)
            .or_default()
            .push(Order {
                id: Uuid::new_v4(),
                total_price,
                items: items_json,
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn history(&self, session: &Session) -> Result<Vec<Order>> {
        let state = self.lock();
        Self::verify(&state, session)?;
        let mut orders = state
            .orders
            .get(&session.user_id)
            .cloned()
            .unwrap_or_default();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn clear(&self, session: &Session) -> Result<()> {
        let mut state = self.lock();
        Self::verify(&state, session)?;
        state.orders.remove(&session.user_id);
        Ok(())
    }
}
