use std::sync::Arc;

use anyhow::Result;
use chatapp_types::models::{ChatSummary, name_matches};
use tracing::{debug, warn};

use crate::Database;
use crate::models::keys;

/// Ordered chat list shown on the chats screen, mirrored to disk.
///
/// Every mutation rewrites the whole snapshot; entries keep insertion order
/// and duplicate peer names are allowed.
pub struct RosterCache {
    db: Arc<Database>,
    entries: Vec<ChatSummary>,
}

impl RosterCache {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            entries: Vec::new(),
        }
    }

    /// Read the persisted snapshot into memory. A missing or unreadable
    /// snapshot yields an empty roster.
    pub fn load(&mut self) -> Result<&[ChatSummary]> {
        self.entries = match self.db.get_value(keys::CHAT_ROSTER)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("Discarding unreadable roster snapshot: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        debug!("Loaded {} roster entries", self.entries.len());
        Ok(&self.entries)
    }

    pub fn entries(&self) -> &[ChatSummary] {
        &self.entries
    }

    pub fn replace_all(&mut self, roster: Vec<ChatSummary>) -> Result<()> {
        self.entries = roster;
        self.persist()
    }

    pub fn append(&mut self, summary: ChatSummary) -> Result<()> {
        self.entries.push(summary);
        self.persist()
    }

    /// Entries whose peer name contains `query`, ignoring case, in roster order.
    pub fn filter(&self, query: &str) -> Vec<&ChatSummary> {
        self.entries
            .iter()
            .filter(|s| name_matches(&s.peer_name, query))
            .collect()
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.db.set_value(keys::CHAT_ROSTER, &json)?;
        debug!("Persisted {} roster entries", self.entries.len());
        Ok(())
    }
}
