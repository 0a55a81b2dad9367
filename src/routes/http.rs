//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, http::StatusCode, Json, response::{IntoResponse, Response}};
use tracing::{error, info, instrument, warn};

use crate::error::TrainerError;
use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

/// `TrainerError` rendered as `{"error": ...}` with a status matching its cause.
pub struct ApiError(pub TrainerError);

impl From<TrainerError> for ApiError {
  fn from(e: TrainerError) -> Self { Self(e) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self.0 {
      TrainerError::UnknownTopic(_) => StatusCode::NOT_FOUND,
      TrainerError::InvalidDate(_) => StatusCode::BAD_REQUEST,
      TrainerError::Storage { .. } | TrainerError::CorruptProgress { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if self.0.is_usage() {
      warn!(target: "wordtrail", error = %self.0, "Rejected request");
    } else {
      error!(target: "wordtrail", error = %self.0, "Request failed");
    }
    (status, Json(ErrorOut { error: self.0.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state), fields(today = ?q.today))]
pub async fn http_get_daily_words(
  State(state): State<Arc<AppState>>,
  Query(q): Query<DailyWordsQuery>,
) -> Result<Json<DailyWordsOut>, ApiError> {
  let out = do_daily_words(&state, q.today.as_deref()).await?;
  info!(target: "daily", date = %out.date, words = out.words.len(), points = out.points_awarded, is_new = out.is_new, "HTTP daily words served");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(list_topics(&state))
}

#[instrument(level = "info", skip(state, body), fields(%body.topic_id, message_len = body.message.len()))]
pub async fn http_post_chat(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ChatIn>,
) -> Result<Json<ChatOut>, ApiError> {
  let out = do_chat(&state, &body.topic_id, &body.message).await?;
  info!(target: "chat", topic = %body.topic_id, points = out.points_awarded, ended = out.ended, "HTTP chat answered");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_progress(State(state): State<Arc<AppState>>) -> Result<Json<ProgressOut>, ApiError> {
  Ok(Json(do_progress(&state).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_rewards(State(state): State<Arc<AppState>>) -> Result<Json<RewardsOut>, ApiError> {
  Ok(Json(list_rewards(&state).await?))
}
