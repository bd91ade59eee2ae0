use anyhow::{Result, anyhow};
use tracing::debug;

use chatapp_client::{
    AuthFlow, ChatDirectory, MessageFetcher, Transport, add_chat, filter_users, require_fields,
};
use chatapp_db::{Landing, RosterCache, SessionStore};

/// The screens of the app, one method each. Failures reach the user as a
/// single line; the detailed error only goes to the debug log.
pub struct App {
    auth: AuthFlow,
    directory: ChatDirectory,
    fetcher: MessageFetcher,
    roster: RosterCache,
}

impl App {
    pub fn new(transport: Transport, session: SessionStore, roster: RosterCache) -> Self {
        Self {
            auth: AuthFlow::new(transport.clone(), session),
            directory: ChatDirectory::new(transport.clone()),
            fetcher: MessageFetcher::new(transport),
            roster,
        }
    }

    pub fn status(&self) -> Result<()> {
        match self.auth.session().landing()? {
            Landing::Authenticated(username) => println!("Signed in as {}", username),
            Landing::SignIn => println!("Not signed in"),
        }
        Ok(())
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        require_fields(&[
            ("username", username),
            ("email", email),
            ("password", password),
        ])
        .map_err(|e| surface(&e, e.user_message()))?;

        let user = self
            .auth
            .register(username, email, password)
            .await
            .map_err(|e| surface(&e, e.user_message()))?;

        println!("Welcome, {}", user.username);
        Ok(())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        require_fields(&[("username", username), ("password", password)])
            .map_err(|e| surface(&e, e.user_message()))?;

        let user = self
            .auth
            .login(username, password)
            .await
            .map_err(|e| surface(&e, e.user_message()))?;

        println!("Signed in as {}", user.username);
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.auth
            .logout()
            .map_err(|e| surface(&e, e.user_message()))?;
        println!("Signed out");
        Ok(())
    }

    pub async fn chats(&mut self, sync: bool, search: &str) -> Result<()> {
        self.roster.load()?;

        if sync {
            let username = self.signed_in()?;
            self.directory
                .sync_roster(&username, &mut self.roster)
                .await
                .map_err(|e| surface(&e, e.user_message()))?;
        }

        let hits = self.roster.filter(search);
        if hits.is_empty() {
            println!("No chats");
        }
        for summary in hits {
            if summary.last_message_text.is_empty() {
                println!("{}", summary.peer_name);
            } else {
                println!("{}: {}", summary.peer_name, summary.last_message_text);
            }
        }
        Ok(())
    }

    pub async fn users(&self, search: &str) -> Result<()> {
        let users = self
            .directory
            .fetch_all_users()
            .await
            .map_err(|e| surface(&e, e.user_message()))?;

        for user in filter_users(&users, search) {
            println!("{} <{}>", user.username, user.email);
        }
        Ok(())
    }

    pub async fn add(&mut self, username: &str) -> Result<()> {
        self.roster.load()?;

        let users = self
            .directory
            .fetch_all_users()
            .await
            .map_err(|e| surface(&e, e.user_message()))?;

        let user = users
            .iter()
            .find(|u| u.username == username)
            .ok_or_else(|| anyhow!("No user named {}", username))?;

        add_chat(&mut self.roster, user)?;
        println!("Started a chat with {}", user.username);
        Ok(())
    }

    pub async fn messages(&self, chat_id: i64) -> Result<()> {
        let messages = self
            .fetcher
            .fetch_messages(chat_id)
            .await
            .map_err(|e| surface(&e, e.user_message()))?;

        if messages.is_empty() {
            println!("No messages yet");
        }
        for m in messages {
            println!(
                "[{}] user {}: {}",
                m.created_at.format("%Y-%m-%d %H:%M"),
                m.user_id,
                m.content
            );
        }
        Ok(())
    }

    fn signed_in(&self) -> Result<String> {
        self.auth
            .session()
            .current_username()?
            .ok_or_else(|| anyhow!("Not signed in"))
    }
}

fn surface(detail: &dyn std::fmt::Display, message: String) -> anyhow::Error {
    debug!("{}", detail);
    anyhow!(message)
}
