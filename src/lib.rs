//! Wordtrail · English Trainer Backend
//!
//! Daily vocabulary batches, keyword-matched practice chats, and a progress
//! record (points, day streak, learned words) that unlocks rewards at thresholds.

pub mod chat;
pub mod config;
pub mod content;
pub mod daily;
pub mod domain;
pub mod error;
pub mod logic;
pub mod protocol;
pub mod rewards;
pub mod routes;
pub mod seeds;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;
