//! Domain models: learner progress, the three static catalogs (words, topics, rewards)
//! and the metric a reward threshold is measured against.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Progress dimension a reward threshold is evaluated against.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
  Points,
  Streak,
  /// Number of distinct learned words.
  Words,
}

impl Metric {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Points => "points",
      Self::Streak => "streak",
      Self::Words => "words",
    }
  }
}

/// Static reward catalog entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardDefinition {
  pub id: String,
  pub name: String,
  pub description: String,
  pub metric: Metric,
  pub threshold: u64,
}

/// One vocabulary item. Catalog order drives the daily rotation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordEntry {
  pub word: String,
  pub translation: String,
  pub example: String,
}

/// A (keyword-set, answer) rule. Keywords are case-folded when the catalog loads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseRule {
  #[serde(default)] pub keywords: Vec<String>,
  pub answer: String,
}

fn default_fallback() -> String { "Tell me more.".into() }
fn default_closing() -> String { "Talk to you later!".into() }

/// Conversation topic as found in the topics catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicDefinition {
  pub slug: String,
  pub title: String,
  pub intro: String,
  #[serde(default)] pub hints: Vec<String>,
  #[serde(default)] pub responses: Vec<ResponseRule>,
  #[serde(default = "default_fallback")] pub fallback: String,
  #[serde(default = "default_closing")] pub closing: String,
}

fn default_user_name() -> String { "Learner".into() }

/// The single persisted learner record.
///
/// Every field falls back to its default when absent from the stored file, so
/// older or partial records load cleanly. `learned_words` and `rewards` are sets
/// in memory and plain JSON arrays on disk; duplicates collapse on load.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProgressRecord {
  pub user_name: String,
  pub points: u64,
  pub streak: u32,
  #[serde(with = "date_or_empty")]
  pub last_word_date: Option<NaiveDate>,
  pub learned_words: BTreeSet<String>,
  pub daily_word_index: usize,
  pub current_daily_words: Vec<String>,
  pub rewards: BTreeSet<String>,
}

impl Default for ProgressRecord {
  fn default() -> Self {
    Self {
      user_name: default_user_name(),
      points: 0,
      streak: 0,
      last_word_date: None,
      learned_words: BTreeSet::new(),
      daily_word_index: 0,
      current_daily_words: Vec::new(),
      rewards: BTreeSet::new(),
    }
  }
}

impl ProgressRecord {
  /// Current value of a metric for threshold comparison.
  pub fn metric_value(&self, metric: Metric) -> u64 {
    match metric {
      Metric::Points => self.points,
      Metric::Streak => u64::from(self.streak),
      Metric::Words => self.learned_words.len() as u64,
    }
  }
}

/// `last_word_date` is stored as `"YYYY-MM-DD"`, or `""` before the first session.
mod date_or_empty {
  use chrono::NaiveDate;
  use serde::{de::Error, Deserialize, Deserializer, Serializer};

  const FORMAT: &str = "%Y-%m-%d";

  pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
    match date {
      Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
      None => s.serialize_str(""),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, FORMAT)
      .map(Some)
      .map_err(|e| D::Error::custom(format!("invalid last_word_date '{}': {}", trimmed, e)))
  }
}
