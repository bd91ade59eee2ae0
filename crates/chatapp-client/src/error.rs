use reqwest::StatusCode;
use thiserror::Error;

/// Shown for any failure the user cannot act on.
const GENERIC_FAILURE: &str = "operation failed";

#[derive(Debug, Error)]
pub enum TransportError {
    /// No response was received (connectivity, DNS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Network(_) => "Network unavailable".to_string(),
            TransportError::Http { .. } | TransportError::Decode(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),

    /// Unknown username, wrong password, or a lookup the server refused.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration refused; carries the server's message.
    #[error("registration rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The user was authenticated but the session could not be saved.
    #[error(transparent)]
    Session(#[from] anyhow::Error),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Validation(msg) => msg.to_string(),
            AuthError::InvalidCredentials => {
                "Account does not exist or wrong credentials".to_string()
            }
            AuthError::Rejected(msg) => msg.clone(),
            AuthError::Transport(e) => e.user_message(),
            AuthError::Session(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl FetchError {
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport(e) => e.user_message(),
        }
    }
}

/// Roster sync failed either fetching or persisting.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl SyncError {
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Fetch(e) => e.user_message(),
            SyncError::Store(_) => GENERIC_FAILURE.to_string(),
        }
    }
}
