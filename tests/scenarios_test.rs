//! Learner scenarios across both features sharing one progress file.

mod common;

use chrono::NaiveDate;
use tempfile::TempDir;

use wordtrail::state::AppState;

use common::test_config;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn chat_and_daily_words_accumulate_into_one_record() {
    let dir = TempDir::new().unwrap();
    let state = AppState::from_config(&test_config(&dir)).unwrap();

    for _ in 0..5 {
        state.chat.respond("food", "I like to cook pasta").unwrap();
    }
    assert_eq!(state.store.load().unwrap().points, 15);

    let out = state.daily.get_today_words(day(2023, 1, 1)).unwrap();
    assert_eq!(out.points, 50);
    assert!(out.unlocked.iter().any(|r| r.id == "points_50"));

    let progress = state.store.load().unwrap();
    assert_eq!(progress.points, 65);
    assert_eq!(progress.streak, 1);
}

#[test]
fn daily_streak_crosses_month_boundary() {
    let dir = TempDir::new().unwrap();
    let state = AppState::from_config(&test_config(&dir)).unwrap();

    state.daily.get_today_words(day(2023, 1, 31)).unwrap();
    state.daily.get_today_words(day(2023, 2, 1)).unwrap();
    let out = state.daily.get_today_words(day(2023, 2, 2)).unwrap();

    assert_eq!(state.store.load().unwrap().streak, 3);
    assert!(out.unlocked.iter().any(|r| r.id == "streak_3"));
}

#[test]
fn whole_catalog_unlocks_words_reward() {
    let dir = TempDir::new().unwrap();
    let state = AppState::from_config(&test_config(&dir)).unwrap();
    let total = state.daily.catalog_len();
    let per_day = state.daily.words_per_day();
    let days = (total + per_day - 1) / per_day;

    let start = day(2023, 6, 1);
    let mut unlocked = Vec::new();
    for i in 0..days {
        let out = state.daily.get_today_words(start + chrono::Duration::days(i as i64)).unwrap();
        unlocked.extend(out.unlocked.into_iter().map(|r| r.id));
    }

    let progress = state.store.load().unwrap();
    assert_eq!(progress.learned_words.len(), total);
    assert!(unlocked.contains(&"words_40".to_string()));
    assert_eq!(unlocked.iter().filter(|id| *id == "points_50").count(), 1);
}

#[test]
fn missing_topics_file_aborts_startup() {
    let dir = TempDir::new().unwrap();
    let mut cfg = test_config(&dir);
    cfg.content.topics_path = dir.path().join("absent.json");
    let err = AppState::from_config(&cfg).err().expect("startup must fail");
    assert!(err.to_string().contains("absent.json"));
}
