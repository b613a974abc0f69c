use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use tracing::{debug, info};

use crate::config::{Config, ScoringConfig};
use crate::error::{Result, SyncError};
use crate::models::SyncDocument;
use crate::services::leaderboard::build_people_scores;
use crate::services::views::{
    build_bot_scores, build_conversations, build_daily_summaries, build_suggestions,
};
use crate::sources::DataSources;

/// Combines every aggregated view into the dashboard document.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    sources: DataSources,
    scoring: ScoringConfig,
}

impl DocumentAssembler {
    pub fn new(config: &Config) -> Self {
        Self {
            sources: DataSources::new(config.paths.clone()),
            scoring: config.scoring.clone(),
        }
    }

    /// Read all sources and build the document.
    ///
    /// `today` picks the daily log the snapshot covers when the double-count
    /// guard is on and neither the snapshot nor the config names a date.
    pub fn assemble(&self, generated_at: DateTime<Utc>, today: NaiveDate) -> SyncDocument {
        let logs = self.sources.daily_logs();
        let snapshot = self.sources.snapshot();
        debug!(
            daily_logs = logs.len(),
            snapshot_entries = snapshot.scores.len(),
            "Sources loaded"
        );

        SyncDocument {
            timestamp: format_timestamp(generated_at),
            people_scores: build_people_scores(&logs, &snapshot, &self.scoring, today),
            bot_scores: build_bot_scores(self.sources.registry()),
            suggestions: build_suggestions(self.sources.suggestions()),
            daily_summaries: build_daily_summaries(self.sources.winners()),
            conversations: build_conversations(self.sources.conversations()),
        }
    }
}

/// RFC 3339 in UTC with a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Pretty-printed JSON, two-space indent, non-ASCII kept verbatim.
pub fn render_document(document: &SyncDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the document to `path`, creating parent directories.
///
/// The bytes go to a sibling temporary file that is then renamed over `path`,
/// so a failed run leaves any previous output untouched.
pub fn write_document(document: &SyncDocument, path: &Path) -> Result<()> {
    let rendered = render_document(document)?;
    let output_error = |source| SyncError::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(output_error)?;
    }

    let temp = temp_path(path);
    if let Err(source) = fs::write(&temp, rendered.as_bytes()) {
        let _ = fs::remove_file(&temp);
        return Err(output_error(source));
    }
    if let Err(source) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(output_error(source));
    }

    Ok(())
}

pub fn log_summary(document: &SyncDocument) {
    info!(
        people = document.people_scores.len(),
        bots = document.bot_scores.len(),
        suggestions = document.suggestions.len(),
        daily_summaries = document.daily_summaries.len(),
        conversations = document.conversations.len(),
        "Playing group data assembled"
    );
}

/// One full run: assemble from the configured sources and write the output.
pub fn sync(config: &Config) -> Result<SyncDocument> {
    info!(workspace = %config.paths.workspace.display(), "Syncing playing group data");

    let document = DocumentAssembler::new(config).assemble(Utc::now(), Local::now().date_naive());
    log_summary(&document);

    write_document(&document, &config.paths.output)?;
    info!(path = %config.paths.output.display(), "Saved dashboard document");

    Ok(document)
}
