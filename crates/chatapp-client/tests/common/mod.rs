#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chatapp_client::Transport;
use chatapp_db::{Database, RosterCache, SessionStore};

/// Serve `app` on an ephemeral local port and point a transport at it.
pub async fn serve(app: Router) -> Transport {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Transport::new(&format!("http://{}", addr)).unwrap()
}

/// Transport to a port nobody listens on.
pub async fn unreachable() -> Transport {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    Transport::new(&format!("http://{}", addr)).unwrap()
}

pub fn stores() -> (Arc<Database>, SessionStore, RosterCache) {
    let db = Arc::new(Database::open_in_memory().unwrap());
    (db.clone(), SessionStore::new(db.clone()), RosterCache::new(db))
}
