//! WebSocket message dispatch, exercised without a socket.

mod common;

use serde_json::{json, Value};
use tempfile::TempDir;

use wordtrail::protocol::{ClientWsMessage, ServerWsMessage};
use wordtrail::routes::ws::handle_client_ws;

use common::test_state;

async fn roundtrip(dir: &TempDir, msg: Value) -> Value {
    let state = test_state(dir);
    let incoming: ClientWsMessage = serde_json::from_value(msg).expect("valid client message");
    let reply: ServerWsMessage = handle_client_ws(incoming, &state).await;
    serde_json::to_value(&reply).expect("serializable reply")
}

#[tokio::test]
async fn ping_pong() {
    let dir = TempDir::new().unwrap();
    assert_eq!(roundtrip(&dir, json!({"type": "ping"})).await, json!({"type": "pong"}));
}

#[tokio::test]
async fn daily_words_message_is_tagged() {
    let dir = TempDir::new().unwrap();
    let out = roundtrip(&dir, json!({"type": "daily_words", "today": "2024-02-29"})).await;
    assert_eq!(out["type"], "daily_words");
    assert_eq!(out["date"], "2024-02-29");
    assert_eq!(out["points_awarded"], 50);
}

#[tokio::test]
async fn chat_message_replies() {
    let dir = TempDir::new().unwrap();
    let out = roundtrip(&dir, json!({"type": "chat", "topicId": "hobbies", "message": "I play GUITAR"})).await;
    assert_eq!(out["type"], "chat_reply");
    assert!(out["reply"].as_str().unwrap().starts_with("Music"));
    assert_eq!(out["points_awarded"], 3);
}

#[tokio::test]
async fn unknown_topic_becomes_error_message() {
    let dir = TempDir::new().unwrap();
    let out = roundtrip(&dir, json!({"type": "chat", "topicId": "nope", "message": "hi"})).await;
    assert_eq!(out["type"], "error");
    assert_eq!(out["message"], "Unknown topic: nope");
}

#[tokio::test]
async fn topics_and_rewards_messages() {
    let dir = TempDir::new().unwrap();
    let topics = roundtrip(&dir, json!({"type": "topics"})).await;
    assert_eq!(topics["type"], "topics");
    assert_eq!(topics["topics"].as_array().unwrap().len(), 3);

    let rewards = roundtrip(&dir, json!({"type": "rewards"})).await;
    assert_eq!(rewards["type"], "rewards");
    assert_eq!(rewards["rewards"].as_array().unwrap().len(), 3);
}
