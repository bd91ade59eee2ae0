/// Fixed keys of the local key-value store.
pub mod keys {
    /// Username of the last user who authenticated successfully.
    pub const CURRENT_USERNAME: &str = "username";
    /// JSON snapshot of the chat roster.
    pub const CHAT_ROSTER: &str = "chatUsersArray";
}
