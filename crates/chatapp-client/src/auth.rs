use chatapp_db::SessionStore;
use chatapp_types::api::RegisterRequest;
use chatapp_types::models::User;
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::error::{AuthError, TransportError};
use crate::transport::Transport;

/// Reject the form if any named field is empty. Run by the caller before
/// `register` or `login`.
pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), AuthError> {
    if let Some((name, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
        warn!("Rejected form: {} is empty", name);
        return Err(AuthError::Validation("All fields are required"));
    }
    Ok(())
}

/// Registration and login against the backend. A successful call commits
/// the user to the session store; a failed one leaves it untouched.
pub struct AuthFlow {
    transport: Transport,
    session: SessionStore,
}

impl AuthFlow {
    pub fn new(transport: Transport, session: SessionStore) -> Self {
        Self { transport, session }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let req = RegisterRequest {
            username,
            email,
            password,
        };

        let user: User = match self
            .transport
            .post::<_, User>(&["user"], &req, StatusCode::CREATED)
            .await
        {
            Ok(user) => user,
            Err(TransportError::Http { status, body }) => {
                warn!("Registration of {} refused with {}", username, status);
                let message = if body.trim().is_empty() {
                    "Failed to register".to_string()
                } else {
                    body
                };
                return Err(AuthError::Rejected(message));
            }
            Err(e) => return Err(e.into()),
        };

        self.session.save_current_user(&user.username)?;
        info!("Registered {}", user.username);
        Ok(user)
    }

    /// Look the user up by name and compare the stored password.
    ///
    /// The lookup endpoint returns a collection; only its first element is
    /// considered. An empty result, a password mismatch or a refused lookup
    /// all yield `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let users: Vec<User> = match self
            .transport
            .get::<Vec<User>>(&["user", "name", username])
            .await
        {
            Ok(users) => users,
            Err(TransportError::Http { status, .. }) => {
                warn!("Lookup of {} refused with {}", username, status);
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        let user = match users.into_iter().next() {
            Some(user) if user.password == password => user,
            _ => {
                warn!("Invalid credentials for {}", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        self.session.save_current_user(&user.username)?;
        info!("Logged in as {}", user.username);
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.clear()?;
        Ok(())
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
