use chatapp_db::RosterCache;
use chatapp_types::models::{Chat, ChatSummary, User, name_matches};
use tracing::{debug, info};

use crate::error::{FetchError, SyncError};
use crate::transport::Transport;

/// Chat and user listings, and the roster operations built on them.
pub struct ChatDirectory {
    transport: Transport,
}

impl ChatDirectory {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn fetch_user_chats(&self, username: &str) -> Result<Vec<Chat>, FetchError> {
        let chats: Vec<Chat> = self.transport.get(&["user", "chats", username]).await?;
        debug!("Fetched {} chats for {}", chats.len(), username);
        Ok(chats)
    }

    pub async fn fetch_all_users(&self) -> Result<Vec<User>, FetchError> {
        let users: Vec<User> = self.transport.get(&["user"]).await?;
        debug!("Fetched {} users", users.len());
        Ok(users)
    }

    /// Replace the roster with one summary per chat `username` takes part in.
    ///
    /// The result is applied unconditionally once the fetch returns. On a
    /// failed fetch the roster is left as it was.
    pub async fn sync_roster(
        &self,
        username: &str,
        roster: &mut RosterCache,
    ) -> Result<(), SyncError> {
        let chats = self.fetch_user_chats(username).await?;

        let summaries: Vec<ChatSummary> = chats
            .iter()
            .filter_map(|chat| ChatSummary::from_chat(chat, username))
            .collect();

        info!("Roster synced: {} chats", summaries.len());
        roster.replace_all(summaries)?;
        Ok(())
    }
}

/// Start a chat with `user`: append it to the roster and persist.
pub fn add_chat(roster: &mut RosterCache, user: &User) -> anyhow::Result<()> {
    roster.append(ChatSummary::for_new_chat(user))?;
    info!("Added chat with {}", user.username);
    Ok(())
}

/// Search box of the user picker: same matching rule as the roster filter.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    users
        .iter()
        .filter(|u| name_matches(&u.username, query))
        .collect()
}
