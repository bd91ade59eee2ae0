pub mod auth;
pub mod chats;
pub mod error;
pub mod messages;
pub mod transport;

pub use auth::{AuthFlow, require_fields};
pub use chats::{ChatDirectory, add_chat, filter_users};
pub use error::{AuthError, FetchError, SyncError, TransportError};
pub use messages::MessageFetcher;
pub use transport::Transport;
