//! One-to-one projections of the snapshot sources into dashboard rows.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::models::{
    BotRegistry, BotScore, ConversationSummary, DailySummary, NamedRef, SuggestionView,
    SuggestionsDocument, WinnersDocument,
};
use crate::sources::ConversationLog;

/// Characters of the last message shown in a conversation preview.
pub const PREVIEW_CHARS: usize = 100;

fn name_or_unknown(named: Option<&NamedRef>) -> String {
    named
        .and_then(|n| n.name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn numeric(value: &Value) -> f64 {
    value.as_f64().unwrap_or(0.0)
}

/// Descending by key; a missing key sorts as the empty string.
fn newest_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    b.unwrap_or("").cmp(a.unwrap_or(""))
}

/// Bot leaderboard, highest trust score first.
pub fn build_bot_scores(registry: BotRegistry) -> Vec<BotScore> {
    let mut bots: Vec<BotScore> = registry
        .bots
        .into_iter()
        .map(|bot| {
            let stats = bot.stats.unwrap_or_default();
            BotScore {
                name: bot.name,
                handle: bot.handle,
                phone: bot.phone,
                trust_score: bot.trust_score.map(Value::Number).unwrap_or(Value::from(0)),
                trust_level: bot.trust_level.unwrap_or_else(|| "new".to_string()),
                owner: name_or_unknown(bot.owner.as_ref()),
                description: bot.description.unwrap_or_default(),
                status: bot.status.unwrap_or_else(|| "pending".to_string()),
                approved_at: bot.approved_at,
                messages_sent: stats.messages_sent,
                messages_received: stats.messages_received,
            }
        })
        .collect();

    bots.sort_by(|a, b| {
        numeric(&b.trust_score)
            .partial_cmp(&numeric(&a.trust_score))
            .unwrap_or(Ordering::Equal)
    });
    bots
}

/// Suggestions, newest first.
pub fn build_suggestions(document: SuggestionsDocument) -> Vec<SuggestionView> {
    let mut suggestions: Vec<SuggestionView> = document
        .suggestions
        .into_iter()
        .map(|s| SuggestionView {
            id: s.id,
            timestamp: s.timestamp,
            suggested_by: name_or_unknown(s.suggested_by.as_ref()),
            kind: s.kind,
            description: s.description,
            total: s.total.unwrap_or(Value::from(0)),
            status: s.status.unwrap_or_else(|| "pending".to_string()),
            notes: s.notes.unwrap_or_default(),
            implemented_at: s.implemented_at,
            scores: s.scores.unwrap_or_else(empty_object),
        })
        .collect();

    suggestions.sort_by(|a, b| newest_first(a.timestamp.as_deref(), b.timestamp.as_deref()));
    suggestions
}

/// Daily podiums, most recent date first.
pub fn build_daily_summaries(document: WinnersDocument) -> Vec<DailySummary> {
    let mut summaries: Vec<DailySummary> = document
        .winners
        .into_iter()
        .map(|(date, day)| {
            let place = |key: &str| day.get(key).cloned().unwrap_or_else(empty_object);
            DailySummary {
                first: place("first"),
                second: place("second"),
                third: place("third"),
                date,
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.date.cmp(&a.date));
    summaries
}

fn preview(message: Option<&str>) -> String {
    message
        .map(|m| m.chars().take(PREVIEW_CHARS).collect())
        .unwrap_or_default()
}

/// One summary per participant conversation, most recently active first.
pub fn build_conversations(logs: Vec<ConversationLog>) -> Vec<ConversationSummary> {
    let mut conversations: Vec<ConversationSummary> = logs
        .into_iter()
        .filter_map(|log| {
            let latest = log.messages.last()?;
            Some(ConversationSummary {
                name: latest
                    .sender_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                message_count: log.messages.len(),
                last_message: latest.timestamp.clone(),
                preview: preview(latest.message.as_deref()),
                phone: log.participant,
            })
        })
        .collect();

    conversations
        .sort_by(|a, b| newest_first(a.last_message.as_deref(), b.last_message.as_deref()));
    conversations
}
