//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use wordtrail::config::AppConfig;
use wordtrail::state::AppState;

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Config pointing at the shipped content, with progress inside `dir`.
pub fn test_config(dir: &TempDir) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.content.words_path = data_path("words.json");
    cfg.content.topics_path = data_path("conversations.json");
    cfg.progress.path = dir.path().join("progress.json");
    cfg
}

pub fn test_state(dir: &TempDir) -> Arc<AppState> {
    Arc::new(AppState::from_config(&test_config(dir)).expect("shipped content must load"))
}
