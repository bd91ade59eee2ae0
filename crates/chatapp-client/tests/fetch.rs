mod common;

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use chatapp_client::{
    ChatDirectory, FetchError, MessageFetcher, SyncError, TransportError, add_chat, filter_users,
};
use chatapp_types::models::ChatSummary;
use serde_json::{Value, json};

fn message(id: i64, chat_id: i64, user_id: i64, content: &str, at: &str) -> Value {
    json!({
        "id": id,
        "chat_id": chat_id,
        "user_id": user_id,
        "content": content,
        "created_at": at,
    })
}

fn user(id: i64, name: &str) -> Value {
    json!({"id": id, "username": name, "email": format!("{}@example.com", name), "password": "pw"})
}

fn messages_backend() -> Router {
    Router::new().route(
        "/messages/{chat_id}",
        get(|Path(chat_id): Path<i64>| async move {
            match chat_id {
                1 => Json(json!([
                    message(3, 1, 2, "later", "2024-05-01T12:05:00Z"),
                    message(1, 1, 1, "earlier", "2024-05-01T12:00:00Z"),
                    message(2, 1, 2, "middle", "2024-05-01T12:02:00Z"),
                ])),
                _ => Json(json!([])),
            }
        }),
    )
}

#[tokio::test]
async fn chat_without_messages_is_empty_not_error() {
    let fetcher = MessageFetcher::new(common::serve(messages_backend()).await);
    let messages = fetcher.fetch_messages(42).await.unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn messages_keep_server_order() {
    let fetcher = MessageFetcher::new(common::serve(messages_backend()).await);
    let messages = fetcher.fetch_messages(1).await.unwrap();

    let ids: Vec<i64> = messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(messages[1].content, "earlier");
    assert_eq!(messages[1].chat_id, 1);
    assert_eq!(messages[1].user_id, 1);
}

#[tokio::test]
async fn message_fetch_failure_is_typed() {
    let app = Router::new()
        .route(
            "/messages/1",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "db down") }),
        )
        .route(
            "/messages/2",
            get(|| async { Json(json!([{"id": 1, "content": "no chat id"}])) }),
        );
    let fetcher = MessageFetcher::new(common::serve(app).await);

    match fetcher.fetch_messages(1).await.unwrap_err() {
        FetchError::Transport(TransportError::Http { status, body }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "db down");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let err = fetcher.fetch_messages(2).await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Transport(TransportError::Decode(_))
    ));
    assert_eq!(err.user_message(), "operation failed");
}

#[tokio::test]
async fn unreachable_backend_fails_fetch() {
    let fetcher = MessageFetcher::new(common::unreachable().await);
    assert!(matches!(
        fetcher.fetch_messages(1).await,
        Err(FetchError::Transport(TransportError::Network(_)))
    ));
}

#[tokio::test]
async fn sync_roster_summarizes_chats() {
    let app = Router::new().route(
        "/user/chats/{username}",
        get(|Path(username): Path<String>| async move {
            assert_eq!(username, "ann");
            Json(json!([
                {
                    "id": 1,
                    "participants": [user(1, "ann"), user(2, "bob")],
                    "messages": [
                        message(1, 1, 2, "hi ann", "2024-05-01T12:00:00Z"),
                        message(2, 1, 1, "hi bob", "2024-05-01T12:01:00Z"),
                    ],
                },
                {"id": 2, "participants": [], "messages": []},
                {
                    "id": 3,
                    "participants": [user(3, "carol"), user(1, "ann")],
                    "messages": [],
                },
            ]))
        }),
    );
    let directory = ChatDirectory::new(common::serve(app).await);
    let (db, _, mut roster) = common::stores();

    directory.sync_roster("ann", &mut roster).await.unwrap();

    let peers: Vec<(&str, &str)> = roster
        .entries()
        .iter()
        .map(|s| (s.peer_name.as_str(), s.last_message_text.as_str()))
        .collect();
    assert_eq!(peers, vec![("bob", "hi bob"), ("carol", "")]);

    let mut reloaded = chatapp_db::RosterCache::new(db);
    assert_eq!(reloaded.load().unwrap(), roster.entries());
}

#[tokio::test]
async fn failed_sync_leaves_roster_alone() {
    let app = Router::new().route(
        "/user/chats/{username}",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let directory = ChatDirectory::new(common::serve(app).await);
    let (_, _, mut roster) = common::stores();
    let kept = ChatSummary {
        avatar_ref: "ava1".into(),
        peer_name: "Athalia Putri".into(),
        last_message_text: "Good morning".into(),
    };
    roster.replace_all(vec![kept.clone()]).unwrap();

    let err = directory.sync_roster("ann", &mut roster).await.unwrap_err();
    assert!(matches!(err, SyncError::Fetch(_)));
    assert_eq!(roster.entries(), &[kept][..]);
}

#[tokio::test]
async fn picking_a_user_appends_a_chat() {
    let app = Router::new().route(
        "/user",
        get(|| async { Json(json!([user(1, "ann"), user(2, "Bob"), user(3, "bobby")])) }),
    );
    let directory = ChatDirectory::new(common::serve(app).await);
    let (_, _, mut roster) = common::stores();

    let users = directory.fetch_all_users().await.unwrap();
    assert_eq!(users.len(), 3);

    let picked = filter_users(&users, "bob");
    assert_eq!(picked.len(), 2);

    add_chat(&mut roster, picked[0]).unwrap();
    add_chat(&mut roster, picked[0]).unwrap();

    let entries = roster.load().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].peer_name, "Bob");
    assert_eq!(entries[1].peer_name, "Bob");
    assert_eq!(entries[0].last_message_text, "");
}
