//! Loading service configuration (content paths, training knobs, reward catalog) from TOML.
//!
//! See `AppConfig` for the expected schema. Every key is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::domain::RewardDefinition;
use crate::error::ConfigError;
use crate::seeds::{default_exit_keywords, default_rewards};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub content: ContentCfg,
  #[serde(default)]
  pub progress: ProgressCfg,
  #[serde(default)]
  pub training: TrainingCfg,
  /// Replaces the built-in reward catalog when non-empty.
  #[serde(default)]
  pub rewards: Vec<RewardDefinition>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ContentCfg {
  pub words_path: PathBuf,
  pub topics_path: PathBuf,
}

impl Default for ContentCfg {
  fn default() -> Self {
    Self {
      words_path: "data/words.json".into(),
      topics_path: "data/conversations.json".into(),
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ProgressCfg {
  pub path: PathBuf,
}

impl Default for ProgressCfg {
  fn default() -> Self {
    Self { path: "data/user_progress.json".into() }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TrainingCfg {
  pub words_per_day: usize,
  pub points_per_message: u64,
  pub exit_keywords: Vec<String>,
}

impl Default for TrainingCfg {
  fn default() -> Self {
    Self {
      words_per_day: 5,
      points_per_message: 3,
      exit_keywords: default_exit_keywords(),
    }
  }
}

impl AppConfig {
  /// Reward catalog in effect: the configured one, or the built-in defaults.
  pub fn reward_catalog(&self) -> Vec<RewardDefinition> {
    if self.rewards.is_empty() { default_rewards() } else { self.rewards.clone() }
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.training.words_per_day == 0 {
      return Err(ConfigError::InvalidSetting {
        key: "training.words_per_day",
        reason: "must be at least 1".into(),
      });
    }
    if let Some(r) = self.rewards.iter().find(|r| r.id.trim().is_empty()) {
      return Err(ConfigError::InvalidSetting {
        key: "rewards.id",
        reason: format!("reward '{}' has an empty id", r.name),
      });
    }
    Ok(())
  }
}

/// Parse and validate a TOML config file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
  let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadConfig {
    path: path.to_path_buf(),
    source,
  })?;
  let cfg = toml::from_str::<AppConfig>(&raw).map_err(|source| ConfigError::ParseConfig {
    path: path.to_path_buf(),
    source,
  })?;
  cfg.validate()?;
  Ok(cfg)
}

/// Load `AppConfig` from TRAINER_CONFIG_PATH, or defaults when the variable is unset.
/// A set-but-broken path is an error: the service must not start half-configured.
pub fn load_config_from_env() -> Result<AppConfig, ConfigError> {
  match std::env::var("TRAINER_CONFIG_PATH") {
    Ok(path) => {
      let cfg = load_config(Path::new(&path))?;
      info!(target: "wordtrail", %path, "Loaded trainer config (TOML)");
      Ok(cfg)
    }
    Err(_) => {
      info!(target: "wordtrail", "TRAINER_CONFIG_PATH not set; using defaults");
      Ok(AppConfig::default())
    }
  }
}
