use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CategoryScores;

/// One row of the people leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonScore {
    pub jid: String,
    pub name: String,
    pub total_score: i64,
    pub messages: i64,
    #[serde(flatten)]
    pub categories: CategoryScores,
    pub avg_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BotScore {
    pub name: Option<Value>,
    pub handle: Option<Value>,
    pub phone: Option<Value>,
    pub trust_score: Value,
    pub trust_level: String,
    pub owner: String,
    pub description: String,
    pub status: String,
    pub approved_at: Option<Value>,
    pub messages_sent: i64,
    pub messages_received: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionView {
    pub id: Option<Value>,
    pub timestamp: Option<String>,
    pub suggested_by: String,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub description: Option<Value>,
    pub total: Value,
    pub status: String,
    pub notes: String,
    pub implemented_at: Option<Value>,
    pub scores: Value,
}

/// Podium for one day; the place records are passed through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub date: String,
    pub first: Value,
    pub second: Value,
    pub third: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub phone: String,
    pub name: String,
    pub message_count: usize,
    pub last_message: Option<String>,
    pub preview: String,
}

/// The dashboard document, written once per run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncDocument {
    pub timestamp: String,
    pub people_scores: Vec<PersonScore>,
    pub bot_scores: Vec<BotScore>,
    pub suggestions: Vec<SuggestionView>,
    pub daily_summaries: Vec<DailySummary>,
    pub conversations: Vec<ConversationSummary>,
}
