use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::intelligence::{is_unknown_key, normalize_phone, ScoreExtractor};
use crate::models::{CategoryScores, PersonScore, ScoredReply, ScoresSnapshot, SnapshotEntry};
use crate::sources::DailyLog;

/// Running totals for one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonAggregate {
    pub jid: String,
    pub name: String,
    pub total_score: i64,
    pub messages: i64,
    pub categories: CategoryScores,
}

impl PersonAggregate {
    pub fn new(jid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            jid: jid.into(),
            name: name.into(),
            total_score: 0,
            messages: 0,
            categories: CategoryScores::default(),
        }
    }

    fn from_snapshot(jid: String, entry: &SnapshotEntry) -> Self {
        Self {
            jid,
            name: entry.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            total_score: entry.total,
            messages: entry.count,
            categories: entry.scores,
        }
    }

    /// Mean points per message, one decimal place; 0 without messages.
    ///
    /// Rounds the exact binary value half to even, so 1/4 gives 0.2 and 23/20
    /// (stored just below 1.15) gives 1.1.
    pub fn average(&self) -> f64 {
        if self.messages <= 0 {
            return 0.0;
        }
        let raw = self.total_score as f64 / self.messages as f64;
        format!("{raw:.1}").parse().unwrap_or(raw)
    }

    fn absorb(&mut self, other: &PersonAggregate) {
        self.total_score = self.total_score.saturating_add(other.total_score);
        self.messages = self.messages.saturating_add(other.messages);
        self.categories += other.categories;
    }

    fn into_score(self) -> PersonScore {
        let avg_score = self.average();
        PersonScore {
            jid: self.jid,
            name: self.name,
            total_score: self.total_score,
            messages: self.messages,
            categories: self.categories,
            avg_score,
        }
    }
}

/// Insertion-ordered accumulator keyed by normalized identifier.
///
/// Order of first sight is kept so equal totals rank in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<PersonAggregate>,
    index: HashMap<String, usize>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, jid: &str) -> Option<&PersonAggregate> {
        self.index.get(jid).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonAggregate> {
        self.entries.iter()
    }

    fn entry(&mut self, jid: &str) -> Option<&mut PersonAggregate> {
        self.index.get(jid).map(|&i| &mut self.entries[i])
    }

    fn insert(&mut self, aggregate: PersonAggregate) -> &mut PersonAggregate {
        let position = self.entries.len();
        self.index.insert(aggregate.jid.clone(), position);
        self.entries.push(aggregate);
        &mut self.entries[position]
    }

    fn entry_or_insert(&mut self, jid: String, name: &str) -> &mut PersonAggregate {
        match self.index.get(&jid).copied() {
            Some(i) => &mut self.entries[i],
            None => self.insert(PersonAggregate::new(jid, name)),
        }
    }

    /// Fold one historical reply into the subject's totals.
    ///
    /// Returns false when the reply was skipped because its subject is the bot
    /// or its identifier normalizes to nothing.
    pub fn record_reply(&mut self, reply: &ScoredReply, scoring: &ScoringConfig) -> bool {
        let subject = reply.subject();
        if scoring.is_bot_identifier(subject.identifier) {
            return false;
        }

        let jid = normalize_phone(subject.identifier, &scoring.country_code);
        if jid.is_empty() {
            return false;
        }

        let person = self.entry_or_insert(jid, subject.name);
        person.messages += 1;

        if let Some(score) = ScoreExtractor::extract(reply.body()) {
            person.total_score = person.total_score.saturating_add(score.total);
            person.categories += score.categories;
        }
        true
    }

    /// Fold every entry of one day's log; returns how many replies counted.
    pub fn record_log(&mut self, log: &DailyLog, scoring: &ScoringConfig) -> usize {
        log.entries
            .iter()
            .filter(|reply| self.record_reply(reply, scoring))
            .count()
    }

    /// Reconcile one snapshot entry keyed by its raw identifier.
    ///
    /// A known participant gains the snapshot's total and count; an unknown
    /// one is seeded from the snapshot, category totals included.
    pub fn apply_snapshot_entry(
        &mut self,
        raw_id: &str,
        entry: &SnapshotEntry,
        scoring: &ScoringConfig,
    ) {
        let jid = normalize_phone(raw_id, &scoring.country_code);
        if is_unknown_key(&jid) {
            warn!(raw_id, "Snapshot entry has no usable identifier");
        }

        match self.entry(&jid) {
            Some(person) => {
                person.total_score = person.total_score.saturating_add(entry.total);
                person.messages = person.messages.saturating_add(entry.count);
            }
            None => {
                self.insert(PersonAggregate::from_snapshot(jid, entry));
            }
        }
    }

    /// Reconcile a whole snapshot; malformed entries are skipped.
    pub fn apply_snapshot(&mut self, snapshot: &ScoresSnapshot, scoring: &ScoringConfig) -> usize {
        let mut applied = 0;
        for (raw_id, value) in &snapshot.scores {
            match serde_json::from_value::<SnapshotEntry>(value.clone()) {
                Ok(entry) => {
                    self.apply_snapshot_entry(raw_id, &entry, scoring);
                    applied += 1;
                }
                Err(error) => {
                    warn!(raw_id = %raw_id, error = %error, "Skipping malformed snapshot entry");
                }
            }
        }
        applied
    }

    /// Fold another accumulator into this one. Shared participants are summed
    /// and keep this board's name; new ones are appended in `other`'s order.
    pub fn merge(&mut self, other: Leaderboard) {
        for aggregate in other.entries {
            match self.entry(&aggregate.jid) {
                Some(person) => person.absorb(&aggregate),
                None => {
                    self.insert(aggregate);
                }
            }
        }
    }

    /// Finalize averages and rank by total score, highest first. Ties keep
    /// insertion order.
    pub fn into_ranking(self) -> Vec<PersonScore> {
        let mut ranking: Vec<PersonScore> = self
            .entries
            .into_iter()
            .map(PersonAggregate::into_score)
            .collect();
        ranking.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        ranking
    }
}

/// Date key of the daily log to leave out because the snapshot already covers it.
pub fn excluded_log_day(
    snapshot: &ScoresSnapshot,
    scoring: &ScoringConfig,
    today: NaiveDate,
) -> Option<String> {
    if !scoring.exclude_snapshot_day || snapshot.scores.is_empty() {
        return None;
    }
    let day = snapshot.date.or(scoring.snapshot_date).unwrap_or(today);
    Some(day.format("%Y-%m-%d").to_string())
}

/// Build the all-time people leaderboard from the daily logs and the snapshot.
pub fn build_people_scores(
    logs: &[DailyLog],
    snapshot: &ScoresSnapshot,
    scoring: &ScoringConfig,
    today: NaiveDate,
) -> Vec<PersonScore> {
    let excluded = excluded_log_day(snapshot, scoring, today);
    let mut board = Leaderboard::new();

    for log in logs {
        if excluded.as_deref() == Some(log.date_key.as_str()) {
            debug!(day = %log.date_key, "Skipping daily log covered by snapshot");
            continue;
        }
        let mut day = Leaderboard::new();
        let counted = day.record_log(log, scoring);
        debug!(day = %log.date_key, counted, "Folded daily log");
        board.merge(day);
    }

    board.apply_snapshot(snapshot, scoring);
    board.into_ranking()
}
