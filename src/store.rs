//! Progress persistence: one learner record stored as pretty-printed JSON.
//!
//! `load` merges the stored record over `ProgressRecord::default()` field by field
//! (see `#[serde(default)]` on the record). `save` overwrites the whole file by
//! writing a sibling temp file and renaming it into place.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::domain::ProgressRecord;
use crate::error::TrainerError;

#[derive(Clone, Debug)]
pub struct ProgressStore {
  path: PathBuf,
}

impl ProgressStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Return the persisted record, or a fresh default one when nothing is stored yet.
  /// A file that is not a well-formed record is an error; it is never reset silently.
  #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
  pub fn load(&self) -> Result<ProgressRecord, TrainerError> {
    if !self.path.exists() {
      debug!(target: "progress", "No stored progress; starting from defaults");
      return Ok(ProgressRecord::default());
    }
    let raw = std::fs::read_to_string(&self.path).map_err(|source| self.storage_err(source))?;
    let record = serde_json::from_str::<ProgressRecord>(&raw).map_err(|source| TrainerError::CorruptProgress {
      path: self.path.clone(),
      source,
    })?;
    debug!(target: "progress", points = record.points, streak = record.streak, learned = record.learned_words.len(), "Loaded progress");
    Ok(record)
  }

  /// Persist the full record, creating parent directories as needed.
  #[instrument(level = "debug", skip(self, record), fields(path = %self.path.display()))]
  pub fn save(&self, record: &ProgressRecord) -> Result<(), TrainerError> {
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent).map_err(|source| self.storage_err(source))?;
    }
    let body = serde_json::to_string_pretty(record)
      .map_err(|e| self.storage_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    let mut tmp = self.path.clone().into_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, body).map_err(|source| self.storage_err(source))?;
    if let Err(source) = std::fs::rename(&tmp, &self.path) {
      let _ = std::fs::remove_file(&tmp);
      return Err(self.storage_err(source));
    }

    debug!(target: "progress", points = record.points, streak = record.streak, rewards = record.rewards.len(), "Saved progress");
    Ok(())
  }

  fn storage_err(&self, source: std::io::Error) -> TrainerError {
    TrainerError::Storage { path: self.path.clone(), source }
  }
}
