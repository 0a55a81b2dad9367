//! Reward unlocking.
//!
//! The engine is a pure rule evaluator over a `ProgressRecord`: it does not know
//! which feature earned the progress, and it never removes an unlocked reward.

use tracing::info;

use crate::domain::{ProgressRecord, RewardDefinition};

#[derive(Clone, Debug)]
pub struct RewardEngine {
  catalog: Vec<RewardDefinition>,
}

impl RewardEngine {
  pub fn new(catalog: Vec<RewardDefinition>) -> Self {
    Self { catalog }
  }

  /// Copy of the configured catalog.
  pub fn all_rewards(&self) -> Vec<RewardDefinition> {
    self.catalog.clone()
  }

  pub fn get_reward(&self, id: &str) -> Option<&RewardDefinition> {
    self.catalog.iter().find(|r| r.id == id)
  }

  /// Unlock every reward whose threshold the record meets (`>=`) and that is not
  /// unlocked yet. The ids are added to `progress.rewards`; only the newly
  /// unlocked definitions are returned, in catalog order.
  pub fn evaluate(&self, progress: &mut ProgressRecord) -> Vec<RewardDefinition> {
    let mut unlocked = Vec::new();

    for reward in &self.catalog {
      if progress.rewards.contains(&reward.id) {
        continue;
      }
      if progress.metric_value(reward.metric) >= reward.threshold {
        unlocked.push(reward.clone());
      }
    }

    for reward in &unlocked {
      progress.rewards.insert(reward.id.clone());
      info!(target: "rewards", id = %reward.id, metric = reward.metric.as_str(), threshold = reward.threshold, "Reward unlocked");
    }
    unlocked
  }
}
