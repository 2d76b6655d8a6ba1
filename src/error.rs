use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, HoagieError>;

#[derive(Debug, Error, PartialEq)]
pub enum HoagieError {
    #[error("Could not find resource")]
    NotFound,

    /// A cart or checkout mutation was attempted without an active session.
    /// Raised before any remote call is made.
    #[error("Please log in to continue")]
    LoginRequired,

    #[error("Incorrect credentials provided")]
    IncorrectCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("Please select a payment method")]
    PaymentMethodRequired,

    #[error("Please enter a valid discount code")]
    InvalidDiscountCode,

    #[error("The remote service returned an error")]
    RemoteService(String),

    #[error("Provided data was malformed")]
    MalformedData,

    #[error("Unexpected error occurred")]
    UnexpectedError,
}

impl HoagieError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the failure carries its own user-facing message. Remote
    /// failures are surfaced as a generic notice instead.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Self::RemoteService(_) | Self::MalformedData | Self::UnexpectedError
        )
    }
}

impl From<reqwest::Error> for HoagieError {
    fn from(e: reqwest::Error) -> HoagieError {
        if let Some(status) = e.status() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return HoagieError::NotFound;
            }
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return HoagieError::IncorrectCredentials;
            }
        }
        error!(err = ?e, "remote service call failed");
        HoagieError::RemoteService(e.to_string())
    }
}

impl From<serde_json::Error> for HoagieError {
    fn from(e: serde_json::Error) -> HoagieError {
        use serde_json::error::Category::*;
        error!(err = ?e, "JSON Serde error occurred");

        match e.classify() {
            Syntax | Data => HoagieError::MalformedData,
            _ => HoagieError::UnexpectedError,
        }
    }
}
