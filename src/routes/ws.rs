//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};
use uuid::Uuid;

use crate::error::TrainerError;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "wordtrail", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state, Uuid::new_v4()))
}

#[instrument(level = "info", skip(socket, state), fields(%conn_id))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>, conn_id: Uuid) {
  info!(target: "wordtrail", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "wordtrail", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "wordtrail", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "wordtrail", "WebSocket disconnected");
}

fn ws_error(e: TrainerError) -> ServerWsMessage {
  if !e.is_usage() {
    error!(target: "wordtrail", error = %e, "WS request failed");
  }
  ServerWsMessage::Error { message: e.to_string() }
}

#[instrument(level = "info", skip(state))]
pub async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::DailyWords { today } => match do_daily_words(state, today.as_deref()).await {
      Ok(out) => {
        info!(target: "daily", date = %out.date, words = out.words.len(), points = out.points_awarded, "WS daily words served");
        ServerWsMessage::DailyWords(out)
      }
      Err(e) => ws_error(e),
    },

    ClientWsMessage::Chat { topic_id, message } => match do_chat(state, &topic_id, &message).await {
      Ok(out) => {
        info!(target: "chat", topic = %topic_id, points = out.points_awarded, ended = out.ended, "WS chat answered");
        ServerWsMessage::ChatReply(out)
      }
      Err(e) => ws_error(e),
    },

    ClientWsMessage::Progress => do_progress(state).await.map_or_else(ws_error, ServerWsMessage::Progress),

    ClientWsMessage::Topics => ServerWsMessage::Topics(list_topics(state)),

    ClientWsMessage::Rewards => list_rewards(state).await.map_or_else(ws_error, ServerWsMessage::Rewards),
  }
}
