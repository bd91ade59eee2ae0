use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Avatar assigned to a chat added from the user picker.
pub const DEFAULT_AVATAR: &str = "defaultAvatar";

/// Case-insensitive substring match used by every search box.
/// An empty query matches everything.
pub fn name_matches(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Transport-level aggregate returned by `/user/chats/{username}`. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub participants: Vec<User>,
    pub messages: Vec<Message>,
}

/// Messages keep the order the server sent them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(deserialize_with = "utc_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// ISO-8601 timestamp; one without an offset is taken as UTC.
fn utc_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;

    raw.parse::<DateTime<Utc>>()
        .or_else(|_| raw.parse::<NaiveDateTime>().map(|ndt| ndt.and_utc()))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
}

/// One row of the chat list, as cached locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub avatar_ref: String,
    pub peer_name: String,
    pub last_message_text: String,
}

impl ChatSummary {
    /// Entry appended when the user starts a chat with someone from the picker.
    pub fn for_new_chat(user: &User) -> Self {
        Self {
            avatar_ref: DEFAULT_AVATAR.to_string(),
            peer_name: user.username.clone(),
            last_message_text: String::new(),
        }
    }

    /// Summarize a fetched chat from the point of view of `me`.
    ///
    /// The peer is the first participant that is not `me`, or the first
    /// participant at all for a chat with oneself. Returns `None` for a chat
    /// without participants.
    pub fn from_chat(chat: &Chat, me: &str) -> Option<Self> {
        let peer = chat
            .participants
            .iter()
            .find(|u| u.username != me)
            .or_else(|| chat.participants.first())?;

        Some(Self {
            avatar_ref: DEFAULT_AVATAR.to_string(),
            peer_name: peer.username.clone(),
            last_message_text: chat
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default(),
        })
    }
}
