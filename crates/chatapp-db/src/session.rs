use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::Database;
use crate::models::keys;

/// Where the app should start, decided from the persisted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Landing {
    Authenticated(String),
    SignIn,
}

/// Remembers the last user who authenticated successfully.
/// Holds at most one username; saving a new one replaces it.
#[derive(Clone)]
pub struct SessionStore {
    db: Arc<Database>,
}

impl SessionStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn save_current_user(&self, username: &str) -> Result<()> {
        self.db.set_value(keys::CURRENT_USERNAME, username)?;
        info!("Session committed for {}", username);
        Ok(())
    }

    pub fn current_username(&self) -> Result<Option<String>> {
        self.db.get_value(keys::CURRENT_USERNAME)
    }

    /// Forget the current user. The server-side account is untouched.
    pub fn clear(&self) -> Result<()> {
        if self.db.remove_value(keys::CURRENT_USERNAME)? {
            info!("Session cleared");
        }
        Ok(())
    }

    pub fn landing(&self) -> Result<Landing> {
        Ok(match self.current_username()? {
            Some(username) => Landing::Authenticated(username),
            None => Landing::SignIn,
        })
    }
}
