//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Metric, ProgressRecord, RewardDefinition, TopicDefinition, WordEntry};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    DailyWords {
        #[serde(default)]
        today: Option<String>,
    },
    Chat {
        #[serde(rename = "topicId")]
        topic_id: String,
        message: String,
    },
    Progress,
    Topics,
    Rewards,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    DailyWords(DailyWordsOut),
    ChatReply(ChatOut),
    Progress(ProgressOut),
    Topics(TopicsOut),
    Rewards(RewardsOut),
    Error {
        message: String,
    },
}

/// Reward as shown to the learner.
#[derive(Debug, Serialize)]
pub struct RewardOut {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<&RewardDefinition> for RewardOut {
    fn from(r: &RewardDefinition) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            description: r.description.clone(),
        }
    }
}

pub fn rewards_out(rs: &[RewardDefinition]) -> Vec<RewardOut> {
    rs.iter().map(RewardOut::from).collect()
}

/// Current totals, reported after every daily-words request.
#[derive(Debug, Serialize)]
pub struct TotalsOut {
    pub points: u64,
    pub streak: u32,
    pub learned_words: usize,
}

impl From<&ProgressRecord> for TotalsOut {
    fn from(p: &ProgressRecord) -> Self {
        Self {
            points: p.points,
            streak: p.streak,
            learned_words: p.learned_words.len(),
        }
    }
}

//
// HTTP request/response DTOs (also carried inside WS messages)
//

#[derive(Debug, Deserialize)]
pub struct DailyWordsQuery {
    pub today: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DailyWordsOut {
    pub date: String,
    pub words: Vec<WordEntry>,
    pub points_awarded: u64,
    pub new_rewards: Vec<RewardOut>,
    pub is_new: bool,
    pub totals: TotalsOut,
}

#[derive(Debug, Serialize)]
pub struct TopicOut {
    pub id: String,
    pub title: String,
    pub intro: String,
    pub hints: Vec<String>,
}

impl From<&TopicDefinition> for TopicOut {
    fn from(t: &TopicDefinition) -> Self {
        Self {
            id: t.slug.clone(),
            title: t.title.clone(),
            intro: t.intro.clone(),
            hints: t.hints.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopicsOut {
    pub topics: Vec<TopicOut>,
    pub exit_keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatIn {
    #[serde(rename = "topicId")]
    pub topic_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatOut {
    pub reply: String,
    pub points_awarded: u64,
    pub new_rewards: Vec<RewardOut>,
    pub ended: bool,
}

#[derive(Debug, Serialize)]
pub struct ProgressOut {
    pub user_name: String,
    pub points: u64,
    pub streak: u32,
    pub learned_words: usize,
    pub last_word_date: Option<String>,
    pub rewards: Vec<RewardOut>,
}

#[derive(Debug, Serialize)]
pub struct RewardStatusOut {
    pub id: String,
    pub name: String,
    pub description: String,
    pub metric: Metric,
    pub threshold: u64,
    pub unlocked: bool,
}

#[derive(Debug, Serialize)]
pub struct RewardsOut {
    pub rewards: Vec<RewardStatusOut>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}
