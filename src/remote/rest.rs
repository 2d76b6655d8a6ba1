use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use crate::{
    configuration::RemoteSettings,
    models::{CartItem, CatalogTable, Deal, MenuItem, Order, Session},
    remote::{AuthRepository, CartRepository, CatalogRepository, OrderRepository},
    HoagieError, Result,
};

const CART_TABLE: &str = "cart_items";
const ORDERS_TABLE: &str = "orders";

/// Client for the hosted data/auth service. Table access goes through the
/// REST surface (`/rest/v1/{table}` with `column=eq.value` filters), account
/// operations through the auth surface (`/auth/v1/*`).
///
/// The last established session is kept in memory so it can be restored on
/// the app-restart session check, the way the hosted SDK persists its own.
pub struct RemoteDataService {
    client: Client,
    rest_url: String,
    auth_url: String,
    publishable_key: String,
    stored: Mutex<Option<Session>>,
}

#[derive(Debug, Deserialize, Default)]
struct UserMetadata {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

impl RemoteDataService {
    pub fn new(settings: &RemoteSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            rest_url: settings.rest_url(),
            auth_url: settings.auth_url(),
            publishable_key: settings.publishable_key.clone(),
            stored: Mutex::new(None),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn bearer<'a>(&'a self, session: Option<&'a Session>) -> &'a str {
        session
            .map(|s| s.access_token.as_str())
            .unwrap_or(&self.publishable_key)
    }

    fn store_session(&self, session: Option<Session>) {
        // Lock poisoning would mean a panicked holder; recover the slot
        *self
            .stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session;
    }

    fn stored_session(&self) -> Option<Session> {
        self.stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        session: Option<&Session>,
    ) -> Result<Vec<T>> {
        let mut query = vec![("select", "*".to_string())];
        query.extend(filters.iter().map(|(k, v)| (*k, v.clone())));

        let rows = self
            .client
            .get(&self.table_url(table))
            .header("apikey", &self.publishable_key)
            .bearer_auth(self.bearer(session))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(rows)
    }

    async fn insert_row(
        &self,
        table: &str,
        body: serde_json::Value,
        session: &Session,
    ) -> Result<()> {
        self.client
            .post(&self.table_url(table))
            .header("apikey", &self.publishable_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&session.access_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn session_from(token: TokenResponse) -> Session {
        Session {
            user_id: token.user.id,
            email: token.user.email.unwrap_or_default(),
            name: token.user.user_metadata.name,
            access_token: token.access_token,
        }
    }
}

#[async_trait]
impl AuthRepository for RemoteDataService {
    #[tracing::instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .client
            .post(&format!("{}/token", self.auth_url))
            .header("apikey", &self.publishable_key)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        // The auth service reports a bad email/password pair as a client
        // error on the token grant
        let status = response.status();
        if status == StatusCode::BAD_REQUEST
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
        {
            return Err(HoagieError::IncorrectCredentials);
        }

        let token: TokenResponse = response.error_for_status()?.json().await?;
        let session = Self::session_from(token);
        self.store_session(Some(session.clone()));
        Ok(session)
    }

    #[tracing::instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        self.client
            .post(&format!("{}/signup", self.auth_url))
            .header("apikey", &self.publishable_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    #[tracing::instrument(skip(self, session))]
    async fn sign_out(&self, session: &Session) -> Result<()> {
        self.store_session(None);
        self.client
            .post(&format!("{}/logout", self.auth_url))
            .header("apikey", &self.publishable_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn current_session(&self) -> Result<Option<Session>> {
        let stored = match self.stored_session() {
            Some(stored) => stored,
            None => return Ok(None),
        };

        // Revalidate the stored token against the auth service; a rejected
        // token means the session expired server-side
        let response = self
            .client
            .get(&format!("{}/user", self.auth_url))
            .header("apikey", &self.publishable_key)
            .bearer_auth(&stored.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            self.store_session(None);
            return Ok(None);
        }

        let user: AuthUser = response.json().await?;
        let session = Session {
            user_id: user.id,
            email: user.email.unwrap_or_default(),
            name: user.user_metadata.name,
            access_token: stored.access_token,
        };
        self.store_session(Some(session.clone()));
        Ok(Some(session))
    }
}

#[async_trait]
impl CatalogRepository for RemoteDataService {
    #[tracing::instrument(skip(self))]
    async fn menu(&self, table: CatalogTable) -> Result<Vec<MenuItem>> {
        self.select(&table.to_string(), &[], None).await
    }

    #[tracing::instrument(skip(self))]
    async fn deals(&self) -> Result<Vec<Deal>> {
        self.select("deals", &[], None).await
    }
}

#[async_trait]
impl CartRepository for RemoteDataService {
    #[tracing::instrument(skip(self, session))]
    async fn rows(&self, session: &Session) -> Result<Vec<CartItem>> {
        self.select(
            CART_TABLE,
            &[("user_id", format!("eq.{}", session.user_id))],
            Some(session),
        )
        .await
    }

    #[tracing::instrument(skip(self, session))]
    async fn find_by_name(&self, session: &Session, name: &str) -> Result<Option<CartItem>> {
        let mut rows: Vec<CartItem> = self
            .select(
                CART_TABLE,
                &[
                    ("user_id", format!("eq.{}", session.user_id)),
                    ("name", format!("eq.{}", name)),
                ],
                Some(session),
            )
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    #[tracing::instrument(skip(self, session, item))]
    async fn insert(&self, session: &Session, item: &CartItem) -> Result<()> {
        let body = json!({
            "user_id": session.user_id,
            "name": item.name,
            "price": item.price,
            "image": item.image,
            "quantity": item.quantity,
            "total_price": item.total_price,
        });
        self.insert_row(CART_TABLE, body, session).await
    }

    #[tracing::instrument(skip(self, session))]
    async fn update_quantities(
        &self,
        session: &Session,
        id: Uuid,
        quantity: u32,
        total_price: f64,
    ) -> Result<()> {
        self.client
            .patch(&self.table_url(CART_TABLE))
            .header("apikey", &self.publishable_key)
            .bearer_auth(&session.access_token)
            .query(&[("id", format!("eq.{}", id))])
            .json(&json!({ "quantity": quantity, "total_price": total_price }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    #[tracing::instrument(skip(self, session))]
    async fn clear(&self, session: &Session) -> Result<()> {
        self.client
            .delete(&self.table_url(CART_TABLE))
            .header("apikey", &self.publishable_key)
            .bearer_auth(&session.access_token)
            .query(&[("user_id", format!("eq.{}", session.user_id))])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for RemoteDataService {
    #[tracing::instrument(skip(self, session, items_json))]
    async fn place(&self, session: &Session, total_price: f64, items_json: String) -> Result<()> {
        let body = json!({
            "user_id": session.user_id,
            "total_price": total_price,
            "items": items_json,
        });
        self.insert_row(ORDERS_TABLE, body, session).await
    }

    #[tracing::instrument(skip(self, session))]
    async fn history(&self, session: &Session) -> Result<Vec<Order>> {
        self.select(
            ORDERS_TABLE,
            &[
                ("user_id", format!("eq.{}", session.user_id)),
                ("order", "created_at.desc".to_string()),
            ],
            Some(session),
        )
        .await
    }

    #[tracing::instrument(skip(self, session))]
    async fn clear(&self, session: &Session) -> Result<()> {
        self.client
            .delete(&self.table_url(ORDERS_TABLE))
            .header("apikey", &self.publishable_key)
            .bearer_auth(&session.access_token)
            .query(&[("user_id", format!("eq.{}", session.user_id))])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
