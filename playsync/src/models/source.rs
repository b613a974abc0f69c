//! Records as the upstream bot writes them. Every field is optional so a
//! partially filled record still loads.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};

use super::CategoryScores;

/// Accepts a string or a number (phone numbers and timestamps show up as both).
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Accepts integers, floats (fraction dropped) and null; anything else counts as 0.
pub(super) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or_default(),
        _ => 0,
    })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?
        .and_then(|s| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s.as_str()), "%Y-%m-%d").ok()))
}

/// `{ "date"?: ..., "scores": { <identifier>: SnapshotEntry } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoresSnapshot {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    /// Kept raw so one malformed entry does not discard the others.
    #[serde(default)]
    pub scores: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnapshotEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub total: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub count: i64,
    /// Recomputed from total and count; kept only as read.
    pub average: Option<Value>,
    pub scores: CategoryScores,
}

/// One line of a daily log. The bot is the author; the participant it
/// replied to is the scored subject.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoredReply {
    #[serde(deserialize_with = "lenient_string")]
    pub ts: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub from: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub msg: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub reply_to: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub reply_to_phone: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub orig_msg: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub channel: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub chat_id: Option<String>,
}

/// The participant a reply scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplySubject<'a> {
    /// Raw, un-normalized identifier.
    pub identifier: &'a str,
    pub name: &'a str,
}

impl ScoredReply {
    /// Resolve the scored subject: the party replied to, not the author.
    pub fn subject(&self) -> ReplySubject<'_> {
        ReplySubject {
            identifier: self.reply_to_phone.as_deref().unwrap_or(""),
            name: self.reply_to.as_deref().unwrap_or("Unknown"),
        }
    }

    pub fn body(&self) -> &str {
        self.msg.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotRegistry {
    #[serde(default)]
    pub bots: Vec<BotEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BotEntry {
    pub name: Option<Value>,
    pub handle: Option<Value>,
    pub phone: Option<Value>,
    pub trust_score: Option<Number>,
    #[serde(deserialize_with = "lenient_string")]
    pub trust_level: Option<String>,
    pub owner: Option<NamedRef>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    pub approved_at: Option<Value>,
    pub stats: Option<BotStats>,
}

/// `{ "name": ... }` reference to a person (bot owner, suggestion author).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedRef {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BotStats {
    #[serde(deserialize_with = "lenient_i64")]
    pub messages_sent: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub messages_received: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionsDocument {
    #[serde(default)]
    pub suggestions: Vec<SuggestionEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestionEntry {
    pub id: Option<Value>,
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    pub suggested_by: Option<NamedRef>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub description: Option<Value>,
    pub total: Option<Value>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub notes: Option<String>,
    pub implemented_at: Option<Value>,
    pub scores: Option<Value>,
}

/// `{ "winners": { <date>: { first, second, third } } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WinnersDocument {
    #[serde(default)]
    pub winners: Map<String, Value>,
}

/// One line of a per-participant `conversation.jsonl`; other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConversationLine {
    #[serde(deserialize_with = "lenient_string")]
    pub sender_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_is_replied_to_party() {
        let reply: ScoredReply = serde_json::from_str(
            r#"{"from":"alexbot","phone":"bot","replyTo":"Dana","replyToPhone":"+972501234567","msg":"hi"}"#,
        )
        .unwrap();

        let subject = reply.subject();
        assert_eq!(subject.identifier, "+972501234567");
        assert_eq!(subject.name, "Dana");
    }

    #[test]
    fn test_subject_defaults_when_reply_to_missing() {
        let reply: ScoredReply = serde_json::from_str(r#"{"msg":"hello"}"#).unwrap();
        let subject = reply.subject();
        assert_eq!(subject.identifier, "");
        assert_eq!(subject.name, "Unknown");
    }

    #[test]
    fn test_numeric_phone_is_accepted() {
        let reply: ScoredReply =
            serde_json::from_str(r#"{"replyToPhone":972501234567,"ts":null}"#).unwrap();
        assert_eq!(reply.reply_to_phone.as_deref(), Some("972501234567"));
        assert!(reply.ts.is_none());
    }

    #[test]
    fn test_snapshot_date_accepts_datetime_prefix() {
        let snapshot: ScoresSnapshot =
            serde_json::from_str(r#"{"date":"2026-03-01T22:00:00Z","scores":{}}"#).unwrap();
        assert_eq!(snapshot.date, NaiveDate::from_ymd_opt(2026, 3, 1));

        let snapshot: ScoresSnapshot = serde_json::from_str(r#"{"date":"soon"}"#).unwrap();
        assert!(snapshot.date.is_none());
    }

    #[test]
    fn test_snapshot_entry_accepts_float_and_null_counts() {
        let entry: SnapshotEntry = serde_json::from_str(
            r#"{"name":"Dana","total":12.0,"count":null,"scores":{"humor":2.0,"broke":null}}"#,
        )
        .unwrap();
        assert_eq!(entry.total, 12);
        assert_eq!(entry.count, 0);
        assert_eq!(entry.scores.humor, 2);
        assert_eq!(entry.scores.broke, 0);
    }

    #[test]
    fn test_registry_with_null_stat_keeps_every_bot() {
        let registry: BotRegistry = serde_json::from_str(
            r#"{"bots":[
                {"name":"Helper","stats":{"messagesSent":3,"messagesReceived":4}},
                {"name":"Quiet","stats":{"messagesSent":null,"messagesReceived":"n/a"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(registry.bots.len(), 2);
        let quiet = registry.bots[1].stats.as_ref().unwrap();
        assert_eq!(quiet.messages_sent, 0);
        assert_eq!(quiet.messages_received, 0);
    }

    #[test]
    fn test_snapshot_keys_keep_file_order() {
        let snapshot: ScoresSnapshot =
            serde_json::from_str(r#"{"scores":{"z":{},"a":{},"m":{}}}"#).unwrap();
        let keys: Vec<&str> = snapshot.scores.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
