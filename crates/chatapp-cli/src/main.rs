mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use chatapp_client::Transport;
use chatapp_db::{Database, RosterCache, SessionStore};

use crate::commands::App;

#[derive(Parser)]
#[command(name = "chatapp")]
#[command(about = "Chat client: account, chat list and message history")]
struct Cli {
    /// REST backend
    #[arg(long, env = "CHATAPP_BASE_URL", default_value = "http://localhost:3000")]
    base_url: String,

    /// Local state (session and chat list)
    #[arg(long, env = "CHATAPP_DB_PATH", default_value = "chatapp.db")]
    db_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show who is signed in
    Status,
    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Sign in with an existing account
    Login { username: String, password: String },
    /// Forget the signed-in user
    Logout,
    /// List cached chats
    Chats {
        /// Refresh from the server first
        #[arg(long)]
        sync: bool,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List every user on the server
    Users {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Start a chat with a user
    Add { username: String },
    /// Show the messages of a chat
    Messages { chat_id: i64 },
}

// Single thread of control: store mutations only ever happen here.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatapp=info,chatapp_client=info,chatapp_db=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let db = Arc::new(Database::open(&cli.db_path)?);
    let transport = Transport::new(&cli.base_url)?;
    debug!("Using backend {}", transport.base_url());

    let mut app = App::new(
        transport,
        SessionStore::new(db.clone()),
        RosterCache::new(db),
    );

    match cli.command {
        Command::Status => app.status(),
        Command::Register {
            username,
            email,
            password,
        } => app.register(&username, &email, &password).await,
        Command::Login { username, password } => app.login(&username, &password).await,
        Command::Logout => app.logout(),
        Command::Chats { sync, search } => app.chats(sync, &search).await,
        Command::Users { search } => app.users(&search).await,
        Command::Add { username } => app.add(&username).await,
        Command::Messages { chat_id } => app.messages(chat_id).await,
    }
}
