//! Application state: content catalogs, the progress store, and the two sessions.
//!
//! This module owns:
//!   - the reward engine (shared by both sessions)
//!   - the daily-words and chat sessions
//!   - the progress lock
//!
//! Sessions are synchronous and follow a load → mutate → save cycle on the single
//! progress file. Every request that touches progress holds `progress_lock` for
//! the whole cycle, so concurrent HTTP/WS requests are applied one at a time.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, instrument};

use crate::chat::ChatSession;
use crate::config::AppConfig;
use crate::content::{load_topics, load_words};
use crate::daily::DailyWordSession;
use crate::error::ConfigError;
use crate::rewards::RewardEngine;
use crate::store::ProgressStore;

pub struct AppState {
    pub store: ProgressStore,
    pub rewards: Arc<RewardEngine>,
    pub daily: DailyWordSession,
    pub chat: ChatSession,
    progress_lock: Mutex<()>,
}

impl AppState {
    /// Build state from config: load both content catalogs and wire the sessions.
    /// Any content problem aborts startup.
    #[instrument(level = "info", skip_all)]
    pub fn from_config(cfg: &AppConfig) -> Result<Self, ConfigError> {
        let words = load_words(&cfg.content.words_path)?;
        let topics = load_topics(&cfg.content.topics_path)?;

        let rewards = Arc::new(RewardEngine::new(cfg.reward_catalog()));
        let store = ProgressStore::new(&cfg.progress.path);

        info!(
            target: "wordtrail",
            words = words.len(),
            topics = topics.len(),
            rewards = rewards.all_rewards().len(),
            words_per_day = cfg.training.words_per_day,
            points_per_message = cfg.training.points_per_message,
            progress_path = %store.path().display(),
            "Startup content inventory"
        );

        let daily = DailyWordSession::new(
            store.clone(),
            rewards.clone(),
            words,
            cfg.training.words_per_day,
        );
        let chat = ChatSession::new(
            store.clone(),
            rewards.clone(),
            topics,
            cfg.training.exit_keywords.clone(),
            cfg.training.points_per_message,
        );

        Ok(Self {
            store,
            rewards,
            daily,
            chat,
            progress_lock: Mutex::new(()),
        })
    }

    /// Exclusive access to the progress file for one load → mutate → save cycle.
    pub async fn lock_progress(&self) -> MutexGuard<'_, ()> {
        self.progress_lock.lock().await
    }
}
