use lazy_static::lazy_static;
use regex::Regex;
use std::sync::{Arc, RwLock};
use tracing::warn;

use crate::{models::Session, remote::AuthRepository, HoagieError, Result};

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is valid");
}

const MIN_PASSWORD_LENGTH: usize = 6;

/// Holds the current authenticated identity. Created once at app start;
/// the session inside is replaced on sign-in and dropped on sign-out.
/// Everything that needs to know "who is logged in" reads through here.
pub struct SessionStore<R> {
    remote: Arc<R>,
    current: RwLock<Option<Session>>,
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if !EMAIL_PATTERN.is_match(email) {
        return Err(HoagieError::validation(
            "Please enter a valid email address.",
        ));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(HoagieError::validation(
            "Password must be at least 6 characters long.",
        ));
    }
    Ok(())
}

impl<R: AuthRepository> SessionStore<R> {
    pub fn new(remote: Arc<R>) -> Self {
        Self {
            remote,
            current: RwLock::new(None),
        }
    }

    /// Validates credentials locally, then exchanges them with the remote
    /// auth service. Validation failures never reach the network.
    #[tracing::instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        validate_credentials(email, password)?;
        let session = self.remote.sign_in(email, password).await?;
        self.set(Some(session.clone()));
        Ok(session)
    }

    /// Registers a new account. No session is established - the user signs
    /// in afterwards.
    #[tracing::instrument(skip(self, password, confirm))]
    pub async fn sign_up(&self, email: &str, password: &str, confirm: &str) -> Result<()> {
        validate_credentials(email, password)?;
        if password != confirm {
            return Err(HoagieError::validation("Passwords do not match."));
        }
        self.remote.sign_up(email, password).await
    }

    /// Drops the local session. The remote sign-out is best effort; a
    /// failure there still leaves this device signed out.
    #[tracing::instrument(skip(self))]
    pub async fn sign_out(&self) {
        let session = self.take();
        if let Some(session) = session {
            if let Err(err) = self.remote.sign_out(&session).await {
                warn!(?err, "remote sign-out failed");
            }
        }
    }

    /// App-restart session check: asks the remote whether a previously
    /// established session is still valid and mirrors the answer locally.
    #[tracing::instrument(skip(self))]
    pub async fn restore(&self) -> Result<Option<Session>> {
        let session = self.remote.current_session().await?;
        self.set(session.clone());
        Ok(session)
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    fn set(&self, session: Option<Session>) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session;
    }

    fn take(&self) -> Option<Session> {
        self.current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::InMemoryRemote;

    fn store() -> SessionStore<InMemoryRemote> {
        SessionStore::new(Arc::new(InMemoryRemote::new()))
    }

    #[tokio::test]
    async fn malformed_email_is_rejected_locally() {
        let store = store();
        let err = store.sign_in("not-an-email", "secret123").await.unwrap_err();
        assert_eq!(
            err,
            HoagieError::validation("Please enter a valid email address.")
        );
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn short_password_is_rejected_locally() {
        let store = store();
        let err = store.sign_in("sam@example.com", "abc").await.unwrap_err();
        assert_eq!(
            err,
            HoagieError::validation("Password must be at least 6 characters long.")
        );
    }

    #[tokio::test]
    async fn sign_up_requires_matching_confirmation() {
        let store = store();
        let err = store
            .sign_up("sam@example.com", "secret123", "secret124")
            .await
            .unwrap_err();
        assert_eq!(err, HoagieError::validation("Passwords do not match."));
    }

    #[tokio::test]
    async fn sign_up_does_not_establish_a_session() {
        let store = store();
        store
            .sign_up("sam@example.com", "secret123", "secret123")
            .await
            .unwrap();
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn wrong_password_surfaces_incorrect_credentials() {
        let remote = Arc::new(InMemoryRemote::new());
        remote.seed_account("sam@example.com", "secret123", None);
        let store = SessionStore::new(remote);
        let err = store
            .sign_in("sam@example.com", "wrong-password")
            .await
            .unwrap_err();
        assert_eq!(err, HoagieError::IncorrectCredentials);
    }

    #[tokio::test]
    async fn sign_in_then_out_round_trips_the_session() {
        let remote = Arc::new(InMemoryRemote::new());
        remote.seed_account("sam@example.com", "secret123", Some("Sam"));
        let store = SessionStore::new(remote);

        let session = store.sign_in("sam@example.com", "secret123").await.unwrap();
        assert_eq!(session.display_name(), "Sam");
        assert!(store.is_authenticated());

        store.sign_out().await;
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn restore_recovers_a_live_remote_session() {
        let remote = Arc::new(InMemoryRemote::new());
        remote.seed_account("sam@example.com", "secret123", None);

        let first = SessionStore::new(Arc::clone(&remote));
        first.sign_in("sam@example.com", "secret123").await.unwrap();

        // A second store over the same remote, as after an app restart
        let second = SessionStore::new(remote);
        let restored = second.restore().await.unwrap();
        assert!(restored.is_some());
        assert!(second.is_authenticated());
    }
}
