use chatapp_types::models::Message;
use tracing::debug;

use crate::error::FetchError;
use crate::transport::Transport;

pub struct MessageFetcher {
    transport: Transport,
}

impl MessageFetcher {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Full history of one chat, in the order the server returned it.
    /// No pagination; every call refetches everything.
    pub async fn fetch_messages(&self, chat_id: i64) -> Result<Vec<Message>, FetchError> {
        let id = chat_id.to_string();
        let messages: Vec<Message> = self.transport.get(&["messages", id.as_str()]).await?;

        debug!("Fetched {} messages for chat {}", messages.len(), chat_id);
        Ok(messages)
    }
}
