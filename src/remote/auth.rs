use async_trait::async_trait;

use crate::{models::Session, Result};

/// Account operations exposed by the hosted auth service.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Exchanges credentials for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Registers a new account. Does not establish a session - the user
    /// signs in afterwards.
    async fn sign_up(&self, email: &str, password: &str) -> Result<()>;

    async fn sign_out(&self, session: &Session) -> Result<()>;

    /// The session previously established against this service, if it is
    /// still valid. Used for the app-restart session check.
    async fn current_session(&self) -> Result<Option<Session>>;
}
