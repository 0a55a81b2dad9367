//! Built-in defaults that keep the trainer useful without a config file.

use crate::domain::{Metric, RewardDefinition};

/// Default reward catalog, in evaluation order.
pub fn default_rewards() -> Vec<RewardDefinition> {
  vec![
    RewardDefinition {
      id: "points_50".into(),
      name: "First Sprint".into(),
      description: "You scored 50 points and earned a bag of virtual candy!".into(),
      metric: Metric::Points,
      threshold: 50,
    },
    RewardDefinition {
      id: "streak_3".into(),
      name: "Persistent Student".into(),
      description: "Three days in a row of new words. Here are some motivation stickers!".into(),
      metric: Metric::Streak,
      threshold: 3,
    },
    RewardDefinition {
      id: "words_40".into(),
      name: "Vocabulary Master".into(),
      description: "40 words learned. Time for a new notebook cover!".into(),
      metric: Metric::Words,
      threshold: 40,
    },
  ]
}

/// Words that end a chat conversation when they appear anywhere in a message.
pub fn default_exit_keywords() -> Vec<String> {
  ["exit", "quit", "bye", "пока", "выход"].iter().map(|s| s.to_string()).collect()
}
