use chrono::NaiveDate;
use std::env;
use std::path::{Path, PathBuf};

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

/// Parse `PLAYSYNC_BOT_IDS`: comma-separated identifiers that denote the bot itself.
fn parse_bot_identifiers() -> Vec<String> {
    match env::var("PLAYSYNC_BOT_IDS") {
        Ok(val) if !val.trim().is_empty() => val
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect(),
        _ => vec![DEFAULT_BOT_IDENTIFIER.to_string()],
    }
}

pub const DEFAULT_COUNTRY_CODE: &str = "972";
pub const DEFAULT_BOT_IDENTIFIER: &str = "bot";

const SCORES_FILE: &str = "memory/channels/playing-with-alexbot-scores.json";
const SUGGESTIONS_FILE: &str = "memory/channels/playing-with-alexbot-suggestions.json";
const REGISTRY_FILE: &str = "memory/bot-registry.json";
const WINNERS_FILE: &str = "memory/channels/playing-with-alexbot-winners.json";
const DAILY_DIR: &str = "memory/channels/playing-with-alexbot-daily";
const PER_SENDER_DIR: &str = "memory/channels/playing-with-alexbot-per-sender";
const OUTPUT_FILE: &str = "alexbot-dashboard/data/playing-group.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub paths: PathsConfig,
    pub scoring: ScoringConfig,
}

/// Locations of every input source and of the output document.
#[derive(Debug, Clone, PartialEq)]
pub struct PathsConfig {
    pub workspace: PathBuf,
    pub scores: PathBuf,
    pub suggestions: PathBuf,
    pub registry: PathBuf,
    pub winners: PathBuf,
    pub daily_dir: PathBuf,
    pub per_sender_dir: PathBuf,
    pub output: PathBuf,
}

impl PathsConfig {
    /// Standard layout rooted at `workspace`.
    pub fn rooted_at(workspace: impl AsRef<Path>) -> Self {
        let workspace = workspace.as_ref().to_path_buf();
        Self {
            scores: workspace.join(SCORES_FILE),
            suggestions: workspace.join(SUGGESTIONS_FILE),
            registry: workspace.join(REGISTRY_FILE),
            winners: workspace.join(WINNERS_FILE),
            daily_dir: workspace.join(DAILY_DIR),
            per_sender_dir: workspace.join(PER_SENDER_DIR),
            output: workspace.join(OUTPUT_FILE),
            workspace,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Calling code that gets a `+` prepended when it leads a bare number.
    pub country_code: String,
    /// Raw reply-to identifiers that denote the bot itself.
    pub bot_identifiers: Vec<String>,
    /// Skip the snapshot day's log in the historical pass when a snapshot exists.
    pub exclude_snapshot_day: bool,
    /// Day the snapshot covers, when the snapshot document does not say.
    pub snapshot_date: Option<NaiveDate>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            bot_identifiers: vec![DEFAULT_BOT_IDENTIFIER.to_string()],
            exclude_snapshot_day: false,
            snapshot_date: None,
        }
    }
}

impl ScoringConfig {
    pub fn is_bot_identifier(&self, raw: &str) -> bool {
        let raw = raw.trim();
        self.bot_identifiers
            .iter()
            .any(|id| id.eq_ignore_ascii_case(raw))
    }
}

impl Default for Config {
    fn default() -> Self {
        let workspace: PathBuf = env::var("PLAYSYNC_WORKSPACE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let mut paths = PathsConfig::rooted_at(&workspace);
        if let Ok(output) = env::var("PLAYSYNC_OUTPUT") {
            paths.output = PathBuf::from(output);
        }

        Self {
            paths,
            scoring: ScoringConfig {
                country_code: env::var("PLAYSYNC_COUNTRY_CODE")
                    .unwrap_or_else(|_| DEFAULT_COUNTRY_CODE.to_string()),
                bot_identifiers: parse_bot_identifiers(),
                exclude_snapshot_day: parse_env_or("PLAYSYNC_EXCLUDE_SNAPSHOT_DAY", false),
                snapshot_date: parse_env_opt("PLAYSYNC_SNAPSHOT_DATE"),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Config for an explicit workspace with default scoring rules.
    pub fn for_workspace(workspace: impl AsRef<Path>) -> Self {
        Self {
            paths: PathsConfig::rooted_at(workspace),
            scoring: ScoringConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for var in [
            "PLAYSYNC_WORKSPACE",
            "PLAYSYNC_OUTPUT",
            "PLAYSYNC_COUNTRY_CODE",
            "PLAYSYNC_BOT_IDS",
            "PLAYSYNC_EXCLUDE_SNAPSHOT_DAY",
            "PLAYSYNC_SNAPSHOT_DATE",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_config_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        let config = Config::default();
        assert_eq!(config.paths.workspace, PathBuf::from("."));
        assert_eq!(
            config.paths.output,
            PathBuf::from(".").join("alexbot-dashboard/data/playing-group.json")
        );
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("PLAYSYNC_WORKSPACE", "/srv/bot");
        std::env::set_var("PLAYSYNC_OUTPUT", "/tmp/out.json");
        std::env::set_var("PLAYSYNC_COUNTRY_CODE", "44");
        std::env::set_var("PLAYSYNC_BOT_IDS", "bot, alexbot ,");
        std::env::set_var("PLAYSYNC_EXCLUDE_SNAPSHOT_DAY", "true");
        std::env::set_var("PLAYSYNC_SNAPSHOT_DATE", "2026-02-03");

        let config = Config::from_env();
        assert_eq!(
            config.paths.scores,
            PathBuf::from("/srv/bot/memory/channels/playing-with-alexbot-scores.json")
        );
        assert_eq!(config.paths.output, PathBuf::from("/tmp/out.json"));
        assert_eq!(config.scoring.country_code, "44");
        assert_eq!(config.scoring.bot_identifiers, vec!["bot", "alexbot"]);
        assert!(config.scoring.exclude_snapshot_day);
        assert_eq!(
            config.scoring.snapshot_date,
            NaiveDate::from_ymd_opt(2026, 2, 3)
        );

        clear_env();
    }

    #[test]
    fn test_invalid_env_values_fall_back() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("PLAYSYNC_EXCLUDE_SNAPSHOT_DAY", "sometimes");
        std::env::set_var("PLAYSYNC_SNAPSHOT_DATE", "yesterday");

        let config = Config::from_env();
        assert!(!config.scoring.exclude_snapshot_day);
        assert!(config.scoring.snapshot_date.is_none());

        clear_env();
    }

    #[test]
    fn test_bot_identifier_match_ignores_case() {
        let scoring = ScoringConfig::default();
        assert!(scoring.is_bot_identifier("bot"));
        assert!(scoring.is_bot_identifier(" BOT "));
        assert!(!scoring.is_bot_identifier("+972501234567"));
    }
}
