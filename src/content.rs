//! Static content catalogs (vocabulary words and conversation topics) loaded from JSON.
//!
//! Both loaders are startup-only: any problem is a `ConfigError` and the service
//! refuses to start.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::domain::{TopicDefinition, WordEntry};
use crate::error::ConfigError;

#[derive(Deserialize)]
struct TopicsFile {
  topics: Vec<TopicDefinition>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
  if !path.exists() {
    return Err(ConfigError::MissingContent { path: path.to_path_buf() });
  }
  let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadContent {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str::<T>(&raw).map_err(|e| ConfigError::MalformedContent {
    path: path.to_path_buf(),
    reason: e.to_string(),
  })
}

/// Load the ordered word catalog. An empty list is allowed (daily words then yield nothing).
pub fn load_words(path: &Path) -> Result<Vec<WordEntry>, ConfigError> {
  let words: Vec<WordEntry> = read_json(path)?;
  if words.is_empty() {
    warn!(target: "wordtrail", path = %path.display(), "Word catalog is empty");
  } else {
    info!(target: "wordtrail", path = %path.display(), count = words.len(), "Loaded word catalog");
  }
  Ok(words)
}

/// Load the topic catalog, case-folding keywords and collapsing duplicate slugs
/// (later definition wins, first position kept).
pub fn load_topics(path: &Path) -> Result<Vec<TopicDefinition>, ConfigError> {
  let file: TopicsFile = read_json(path)?;
  if file.topics.is_empty() {
    return Err(ConfigError::MalformedContent {
      path: path.to_path_buf(),
      reason: "expected a non-empty 'topics' list".into(),
    });
  }
  let topics = normalize_topics(file.topics);
  info!(target: "wordtrail", path = %path.display(), count = topics.len(), "Loaded topic catalog");
  Ok(topics)
}

fn normalize_topics(raw: Vec<TopicDefinition>) -> Vec<TopicDefinition> {
  let mut out: Vec<TopicDefinition> = Vec::with_capacity(raw.len());
  let mut position: HashMap<String, usize> = HashMap::new();

  for mut topic in raw {
    for rule in &mut topic.responses {
      // An empty keyword would match every message.
      rule.keywords = rule
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    }
    match position.get(&topic.slug) {
      Some(&idx) => {
        warn!(target: "wordtrail", slug = %topic.slug, "Duplicate topic slug; later definition wins");
        out[idx] = topic;
      }
      None => {
        position.insert(topic.slug.clone(), out.len());
        out.push(topic);
      }
    }
  }
  out
}
