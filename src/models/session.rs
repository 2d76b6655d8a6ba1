use serde::Deserialize;
use uuid::Uuid;

/// The authenticated-user context derived from the remote auth service.
/// Its presence in the session store is what gates cart mutations; there
/// is no separate "authenticated" flag.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub access_token: String,
}

impl Session {
    /// What the UI greets the user with: the display name when the account
    /// has one, the email otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}
