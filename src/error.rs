//! Error types.
//!
//! `ConfigError` is fatal and only produced while the service starts.
//! `TrainerError` is returned by sessions at runtime.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Failed to read config file {path}: {source}")]
  ReadConfig {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse config file {path}: {source}")]
  ParseConfig {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("Content file not found: {path}")]
  MissingContent { path: PathBuf },

  #[error("Failed to read content file {path}: {source}")]
  ReadContent {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Malformed content file {path}: {reason}")]
  MalformedContent { path: PathBuf, reason: String },

  #[error("Invalid setting {key}: {reason}")]
  InvalidSetting { key: &'static str, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
  #[error("Unknown topic: {0}")]
  UnknownTopic(String),

  #[error("Invalid date '{0}', expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("Progress storage error at {path}: {source}")]
  Storage {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Corrupt progress record at {path}: {source}")]
  CorruptProgress {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

impl TrainerError {
  /// True for errors caused by the caller's request rather than by server state.
  pub fn is_usage(&self) -> bool {
    matches!(self, Self::UnknownTopic(_) | Self::InvalidDate(_))
  }
}
