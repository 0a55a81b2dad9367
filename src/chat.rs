//! Keyword-driven practice conversations.
//!
//! A reply is chosen by plain substring search of the normalised message: first
//! the exit keywords, then each topic rule in order, then the topic fallback.
//! Only matched or fallback replies earn points; empty and exit messages leave
//! progress untouched.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::{RewardDefinition, TopicDefinition};
use crate::error::TrainerError;
use crate::rewards::RewardEngine;
use crate::store::ProgressStore;
use crate::util::{find_keyword, normalize_message, trunc_for_log};

pub const NEED_MORE_DETAIL: &str = "Could you add a bit more detail?";

/// Outcome of one chat message.
#[derive(Clone, Debug)]
pub struct ChatReply {
  pub reply: String,
  pub points: u64,
  pub unlocked: Vec<RewardDefinition>,
  /// The message contained an exit keyword and the conversation is over.
  pub ended: bool,
}

impl ChatReply {
  fn neutral(reply: String, ended: bool) -> Self {
    Self { reply, points: 0, unlocked: Vec::new(), ended }
  }
}

pub struct ChatSession {
  store: ProgressStore,
  rewards: Arc<RewardEngine>,
  topics: Vec<TopicDefinition>,
  by_slug: HashMap<String, usize>,
  exit_keywords: Vec<String>,
  points_per_message: u64,
}

impl ChatSession {
  pub fn new(
    store: ProgressStore,
    rewards: Arc<RewardEngine>,
    mut topics: Vec<TopicDefinition>,
    exit_keywords: Vec<String>,
    points_per_message: u64,
  ) -> Self {
    for rule in topics.iter_mut().flat_map(|t| t.responses.iter_mut()) {
      rule.keywords = rule
        .keywords
        .iter()
        .map(|k| normalize_message(k))
        .filter(|k| !k.is_empty())
        .collect();
    }
    let by_slug = topics.iter().enumerate().map(|(i, t)| (t.slug.clone(), i)).collect();
    let mut exit_keywords: Vec<String> = exit_keywords
      .iter()
      .map(|k| normalize_message(k))
      .filter(|k| !k.is_empty())
      .collect();
    exit_keywords.sort();
    exit_keywords.dedup();
    Self { store, rewards, topics, by_slug, exit_keywords, points_per_message }
  }

  /// Topics in catalog order.
  pub fn topics(&self) -> &[TopicDefinition] {
    &self.topics
  }

  pub fn topic(&self, slug: &str) -> Option<&TopicDefinition> {
    self.by_slug.get(slug).map(|&i| &self.topics[i])
  }

  /// Exit keywords, case-folded and sorted.
  pub fn exit_keywords(&self) -> &[String] {
    &self.exit_keywords
  }

  pub fn points_per_message(&self) -> u64 {
    self.points_per_message
  }

  #[instrument(level = "info", skip(self, message), fields(%topic_id, message_len = message.len()))]
  pub fn respond(&self, topic_id: &str, message: &str) -> Result<ChatReply, TrainerError> {
    let topic = self
      .topic(topic_id)
      .ok_or_else(|| TrainerError::UnknownTopic(topic_id.to_string()))?;

    let normalized = normalize_message(message);
    if normalized.is_empty() {
      debug!(target: "chat", "Empty message; asking for detail");
      return Ok(ChatReply::neutral(NEED_MORE_DETAIL.into(), false));
    }

    if let Some(kw) = find_keyword(&normalized, &self.exit_keywords) {
      info!(target: "chat", exit_keyword = kw, "Conversation closed by learner");
      return Ok(ChatReply::neutral(topic.closing.clone(), true));
    }

    let matched = topic
      .responses
      .iter()
      .enumerate()
      .find_map(|(i, rule)| find_keyword(&normalized, &rule.keywords).map(|kw| (i, kw, rule)));
    let reply = match matched {
      Some((rule_idx, kw, rule)) => {
        debug!(target: "chat", rule_idx, keyword = kw, "Rule matched");
        rule.answer.clone()
      }
      None => {
        debug!(target: "chat", preview = %trunc_for_log(&normalized, 40), "No rule matched; using fallback");
        topic.fallback.clone()
      }
    };

    let mut progress = self.store.load()?;
    progress.points += self.points_per_message;
    let unlocked = self.rewards.evaluate(&mut progress);
    self.store.save(&progress)?;

    info!(target: "chat", points = self.points_per_message, total = progress.points, unlocked = unlocked.len(), "Chat message scored");
    Ok(ChatReply { reply, points: self.points_per_message, unlocked, ended: false })
  }
}
