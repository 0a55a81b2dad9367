//! Daily vocabulary batches.
//!
//! The first request on a calendar day issues a new batch from a rotating cursor
//! over the word catalog, awards points, moves the streak and evaluates rewards.
//! Later requests on the same day re-serve the cached batch and change nothing.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::domain::{RewardDefinition, WordEntry};
use crate::error::TrainerError;
use crate::rewards::RewardEngine;
use crate::store::ProgressStore;

pub const POINTS_PER_WORD: u64 = 10;

/// Outcome of a daily-words request.
#[derive(Clone, Debug, Default)]
pub struct DailyWords {
  pub words: Vec<WordEntry>,
  pub points: u64,
  pub unlocked: Vec<RewardDefinition>,
  /// False when the cached batch of the same day was re-served.
  pub is_new: bool,
}

pub struct DailyWordSession {
  store: ProgressStore,
  rewards: Arc<RewardEngine>,
  words: Vec<WordEntry>,
  // lowercased word -> catalog index
  lookup: HashMap<String, usize>,
  words_per_day: usize,
}

impl DailyWordSession {
  pub fn new(store: ProgressStore, rewards: Arc<RewardEngine>, words: Vec<WordEntry>, words_per_day: usize) -> Self {
    let lookup = words
      .iter()
      .enumerate()
      .map(|(i, w)| (w.word.to_lowercase(), i))
      .collect();
    Self { store, rewards, words, lookup, words_per_day }
  }

  pub fn words_per_day(&self) -> usize {
    self.words_per_day
  }

  pub fn catalog_len(&self) -> usize {
    self.words.len()
  }

  #[instrument(level = "info", skip(self), fields(%today))]
  pub fn get_today_words(&self, today: NaiveDate) -> Result<DailyWords, TrainerError> {
    if self.words.is_empty() {
      debug!(target: "daily", "Word catalog empty; nothing to serve");
      return Ok(DailyWords::default());
    }

    let mut progress = self.store.load()?;
    let is_new = progress.last_word_date != Some(today) || progress.current_daily_words.is_empty();

    if !is_new {
      let words: Vec<WordEntry> = progress
        .current_daily_words
        .iter()
        .filter_map(|w| self.lookup.get(&w.to_lowercase()).map(|&i| self.words[i].clone()))
        .collect();
      debug!(target: "daily", cached = progress.current_daily_words.len(), served = words.len(), "Re-serving today's batch");
      return Ok(DailyWords { words, points: 0, unlocked: Vec::new(), is_new: false });
    }

    // Reduce before any addition: the stored cursor may come from a larger catalog.
    let start = progress.daily_word_index % self.words.len();
    let selection = self.select_words(start);
    let points = POINTS_PER_WORD * selection.len() as u64;

    progress.streak = next_streak(progress.last_word_date, progress.streak, today);
    progress.last_word_date = Some(today);
    progress.daily_word_index = (start + selection.len()) % self.words.len();
    progress.current_daily_words = selection.iter().map(|w| w.word.clone()).collect();
    progress.learned_words.extend(selection.iter().map(|w| w.word.clone()));
    progress.points += points;

    let unlocked = self.rewards.evaluate(&mut progress);
    self.store.save(&progress)?;

    info!(
      target: "daily",
      batch = selection.len(),
      points,
      streak = progress.streak,
      next_index = progress.daily_word_index,
      unlocked = unlocked.len(),
      "Issued new daily batch"
    );
    Ok(DailyWords { words: selection, points, unlocked, is_new: true })
  }

  /// Up to `words_per_day` entries starting at `start` (already below the catalog
  /// size), wrapping around the catalog end.
  fn select_words(&self, start: usize) -> Vec<WordEntry> {
    let len = self.words.len();
    if len == 0 {
      return Vec::new();
    }
    (0..self.words_per_day.min(len))
      .map(|offset| self.words[(start + offset) % len].clone())
      .collect()
  }
}

/// Streak after a new-day session on `today`: +1 when the previous session was
/// exactly yesterday, otherwise restart at 1.
pub fn next_streak(last: Option<NaiveDate>, current: u32, today: NaiveDate) -> u32 {
  match last {
    Some(prev) if (today - prev).num_days() == 1 => current.saturating_add(1),
    _ => 1,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ProgressRecord;
  use crate::seeds::default_rewards;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
  }

  fn catalog(n: usize) -> Vec<WordEntry> {
    (0..n)
      .map(|i| WordEntry {
        word: format!("word{}", i),
        translation: format!("слово{}", i),
        example: format!("Example with word{}.", i),
      })
      .collect()
  }

  fn session(dir: &tempfile::TempDir, words: Vec<WordEntry>, per_day: usize) -> DailyWordSession {
    let store = ProgressStore::new(dir.path().join("progress.json"));
    DailyWordSession::new(store, Arc::new(RewardEngine::new(default_rewards())), words, per_day)
  }

  fn ids(words: &[WordEntry]) -> Vec<String> {
    words.iter().map(|w| w.word.clone()).collect()
  }

  #[test]
  fn first_session_awards_points_and_unlocks_points_50() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(7), 5);

    let out = trainer.get_today_words(day(1)).unwrap();
    assert_eq!(out.words.len(), 5);
    assert_eq!(out.points, 50);
    assert!(out.is_new);
    assert!(out.unlocked.iter().any(|r| r.id == "points_50"));

    let progress = trainer.store.load().unwrap();
    assert_eq!(progress.last_word_date, Some(day(1)));
    assert_eq!(progress.points, 50);
    assert_eq!(progress.streak, 1);
    assert_eq!(progress.daily_word_index, 5);
    assert!(progress.rewards.contains("points_50"));
  }

  #[test]
  fn same_day_repeats_batch_without_points() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(7), 5);

    let first = trainer.get_today_words(day(1)).unwrap();
    let before = std::fs::read_to_string(trainer.store.path()).unwrap();

    let again = trainer.get_today_words(day(1)).unwrap();
    assert_eq!(ids(&again.words), ids(&first.words));
    assert_eq!(again.points, 0);
    assert!(again.unlocked.is_empty());
    assert!(!again.is_new);
    assert_eq!(std::fs::read_to_string(trainer.store.path()).unwrap(), before);
  }

  #[test]
  fn streak_increments_then_resets_after_gap() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(20), 5);

    let mut streaks = Vec::new();
    for d in [1, 2, 4] {
      trainer.get_today_words(day(d)).unwrap();
      streaks.push(trainer.store.load().unwrap().streak);
    }
    assert_eq!(streaks, vec![1, 2, 1]);
  }

  #[test]
  fn batch_wraps_around_catalog_end() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(7), 5);

    trainer.get_today_words(day(1)).unwrap();
    let second = trainer.get_today_words(day(2)).unwrap();
    assert_eq!(ids(&second.words), vec!["word5", "word6", "word0", "word1", "word2"]);
    assert_eq!(trainer.store.load().unwrap().daily_word_index, 3);
  }

  #[test]
  fn index_cycles_back_after_full_rotation() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(6), 2);

    let mut seen = Vec::new();
    for d in 1..=3 {
      seen.push(trainer.store.load().unwrap().daily_word_index);
      trainer.get_today_words(day(d)).unwrap();
    }
    assert_eq!(seen, vec![0, 2, 4]);
    assert_eq!(trainer.store.load().unwrap().daily_word_index, 0);
  }

  #[test]
  fn learned_words_never_shrink() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(12), 5);

    let mut last = 0;
    for d in 1..=6 {
      trainer.get_today_words(day(d)).unwrap();
      let learned = trainer.store.load().unwrap().learned_words.len();
      assert!(learned >= last);
      last = learned;
    }
    assert_eq!(last, 12);
  }

  #[test]
  fn small_catalog_caps_batch_size() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(3), 5);
    let out = trainer.get_today_words(day(1)).unwrap();
    assert_eq!(out.words.len(), 3);
    assert_eq!(out.points, 30);
    assert_eq!(trainer.store.load().unwrap().daily_word_index, 0);
  }

  #[test]
  fn empty_catalog_serves_nothing_and_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, Vec::new(), 5);
    let out = trainer.get_today_words(day(1)).unwrap();
    assert!(out.words.is_empty());
    assert_eq!(out.points, 0);
    assert!(out.unlocked.is_empty());
    assert!(!trainer.store.path().exists());
  }

  #[test]
  fn empty_cached_batch_forces_new_session_on_same_day() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(7), 5);

    let mut rec = ProgressRecord::default();
    rec.last_word_date = Some(day(1));
    rec.streak = 4;
    trainer.store.save(&rec).unwrap();

    let out = trainer.get_today_words(day(1)).unwrap();
    assert!(out.is_new);
    assert_eq!(out.points, 50);
    assert_eq!(trainer.store.load().unwrap().streak, 1);
  }

  #[test]
  fn same_day_drops_words_removed_from_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let first = session(&dir, catalog(7), 5);
    first.get_today_words(day(1)).unwrap();

    // Same store, catalog shrunk to its first three entries.
    let shrunk = session(&dir, catalog(3), 5);
    let out = shrunk.get_today_words(day(1)).unwrap();
    assert_eq!(ids(&out.words), vec!["word0", "word1", "word2"]);
    assert_eq!(out.points, 0);
  }

  #[test]
  fn stale_index_is_reduced_modulo_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(4), 2);
    let mut rec = ProgressRecord::default();
    rec.daily_word_index = 9;
    trainer.store.save(&rec).unwrap();

    let out = trainer.get_today_words(day(1)).unwrap();
    assert_eq!(ids(&out.words), vec!["word1", "word2"]);
    assert_eq!(trainer.store.load().unwrap().daily_word_index, 3);
  }

  #[test]
  fn huge_stored_index_does_not_overflow() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(4), 2);
    let mut rec = ProgressRecord::default();
    rec.daily_word_index = usize::MAX;
    trainer.store.save(&rec).unwrap();

    let start = usize::MAX % 4;
    let out = trainer.get_today_words(day(1)).unwrap();
    assert_eq!(ids(&out.words), vec![format!("word{}", start), format!("word{}", (start + 1) % 4)]);
    assert_eq!(trainer.store.load().unwrap().daily_word_index, (start + 2) % 4);
  }

  #[test]
  fn same_day_lookup_ignores_case() {
    let dir = tempfile::tempdir().unwrap();
    let trainer = session(&dir, catalog(3), 2);
    let mut rec = ProgressRecord::default();
    rec.last_word_date = Some(day(1));
    rec.current_daily_words = vec!["WORD2".into()];
    trainer.store.save(&rec).unwrap();

    let out = trainer.get_today_words(day(1)).unwrap();
    assert_eq!(ids(&out.words), vec!["word2"]);
  }

  #[test]
  fn streak_rules() {
    assert_eq!(next_streak(None, 0, day(5)), 1);
    assert_eq!(next_streak(Some(day(4)), 3, day(5)), 4);
    assert_eq!(next_streak(Some(day(2)), 3, day(5)), 1);
    assert_eq!(next_streak(Some(day(5)), 3, day(5)), 1);
    assert_eq!(next_streak(Some(day(9)), 3, day(5)), 1);
  }
}
