//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Serving the daily word batch (with an optional explicit date)
//!   - Answering chat messages
//!   - Reporting progress, topics and the reward catalog
//!
//! Anything that reads or writes progress runs under the state's progress lock.

use chrono::{Local, NaiveDate};
use tracing::{debug, instrument};

use crate::error::TrainerError;
use crate::protocol::*;
use crate::state::AppState;

/// Parse an explicit `today` override, or fall back to the local calendar date.
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate, TrainerError> {
  match today.map(str::trim).filter(|s| !s.is_empty()) {
    Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| TrainerError::InvalidDate(s.to_string())),
    None => Ok(Local::now().date_naive()),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn do_daily_words(state: &AppState, today: Option<&str>) -> Result<DailyWordsOut, TrainerError> {
  let date = resolve_today(today)?;
  let _guard = state.lock_progress().await;

  let batch = state.daily.get_today_words(date)?;
  let progress = state.store.load()?;
  Ok(DailyWordsOut {
    date: date.format("%Y-%m-%d").to_string(),
    words: batch.words,
    points_awarded: batch.points,
    new_rewards: rewards_out(&batch.unlocked),
    is_new: batch.is_new,
    totals: TotalsOut::from(&progress),
  })
}

#[instrument(level = "info", skip(state, message), fields(%topic_id, message_len = message.len()))]
pub async fn do_chat(state: &AppState, topic_id: &str, message: &str) -> Result<ChatOut, TrainerError> {
  let _guard = state.lock_progress().await;
  let out = state.chat.respond(topic_id, message)?;
  Ok(ChatOut {
    reply: out.reply,
    points_awarded: out.points,
    new_rewards: rewards_out(&out.unlocked),
    ended: out.ended,
  })
}

pub fn list_topics(state: &AppState) -> TopicsOut {
  TopicsOut {
    topics: state.chat.topics().iter().map(TopicOut::from).collect(),
    exit_keywords: state.chat.exit_keywords().to_vec(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn do_progress(state: &AppState) -> Result<ProgressOut, TrainerError> {
  let progress = {
    let _guard = state.lock_progress().await;
    state.store.load()?
  };

  let mut rewards = Vec::with_capacity(progress.rewards.len());
  for id in &progress.rewards {
    match state.rewards.get_reward(id) {
      Some(r) => rewards.push(RewardOut::from(r)),
      None => debug!(target: "rewards", %id, "Unlocked reward no longer in catalog; skipping"),
    }
  }

  Ok(ProgressOut {
    user_name: progress.user_name,
    points: progress.points,
    streak: progress.streak,
    learned_words: progress.learned_words.len(),
    last_word_date: progress.last_word_date.map(|d| d.format("%Y-%m-%d").to_string()),
    rewards,
  })
}

#[instrument(level = "info", skip(state))]
pub async fn list_rewards(state: &AppState) -> Result<RewardsOut, TrainerError> {
  let progress = {
    let _guard = state.lock_progress().await;
    state.store.load()?
  };
  let rewards = state
    .rewards
    .all_rewards()
    .into_iter()
    .map(|r| RewardStatusOut {
      unlocked: progress.rewards.contains(&r.id),
      id: r.id,
      name: r.name,
      description: r.description,
      metric: r.metric,
      threshold: r.threshold,
    })
    .collect();
  Ok(RewardsOut { rewards })
}
