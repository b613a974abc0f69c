pub mod reader;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::PathsConfig;
use crate::models::{
    BotRegistry, ConversationLine, ScoredReply, ScoresSnapshot, SuggestionsDocument,
    WinnersDocument,
};

pub use reader::{degrade, list_files, list_subdirs, read_json, read_jsonl, LoadOutcome};

/// File holding one participant's conversation inside their directory.
pub const CONVERSATION_FILE: &str = "conversation.jsonl";

/// One day's log; `date_key` is the file stem (`2026-03-01`).
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLog {
    pub date_key: String,
    pub path: PathBuf,
    pub entries: Vec<ScoredReply>,
}

/// One participant's conversation; `participant` is the directory name.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationLog {
    pub participant: String,
    pub messages: Vec<ConversationLine>,
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Loads every input of a run. Each source degrades to empty on its own.
#[derive(Debug, Clone)]
pub struct DataSources {
    paths: PathsConfig,
}

impl DataSources {
    pub fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    pub fn snapshot(&self) -> ScoresSnapshot {
        degrade(&self.paths.scores, read_json(&self.paths.scores))
    }

    pub fn registry(&self) -> BotRegistry {
        degrade(&self.paths.registry, read_json(&self.paths.registry))
    }

    pub fn suggestions(&self) -> SuggestionsDocument {
        degrade(&self.paths.suggestions, read_json(&self.paths.suggestions))
    }

    pub fn winners(&self) -> WinnersDocument {
        degrade(&self.paths.winners, read_json(&self.paths.winners))
    }

    /// Daily logs in chronological (lexical file-name) order. A corrupt file
    /// yields an empty log for that day only.
    pub fn daily_logs(&self) -> Vec<DailyLog> {
        let dir = &self.paths.daily_dir;
        let files: Vec<PathBuf> = degrade(dir, list_files(dir, "jsonl"));

        files
            .into_iter()
            .map(|path| {
                let entries = degrade(&path, read_jsonl(&path));
                debug!(path = %path.display(), entries = entries.len(), "Loaded daily log");
                DailyLog {
                    date_key: file_stem(&path),
                    entries,
                    path,
                }
            })
            .collect()
    }

    /// Conversations in directory-name order; directories without a readable
    /// conversation file are left out.
    pub fn conversations(&self) -> Vec<ConversationLog> {
        let dir = &self.paths.per_sender_dir;
        let participants: Vec<PathBuf> = degrade(dir, list_subdirs(dir));

        participants
            .into_iter()
            .filter_map(|participant_dir| {
                let path = participant_dir.join(CONVERSATION_FILE);
                let messages: Vec<ConversationLine> = degrade(&path, read_jsonl(&path));
                if messages.is_empty() {
                    return None;
                }
                let participant = participant_dir
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Some(ConversationLog {
                    participant,
                    messages,
                })
            })
            .collect()
    }
}
