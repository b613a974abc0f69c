use std::fs;
use std::path::Path;

use playsync::config::{Config, PathsConfig};
use serde_json::Value;
use tempfile::TempDir;

/// A throwaway workspace laid out the way the upstream bot writes it.
pub struct TestWorkspace {
    dir: TempDir,
    pub paths: PathsConfig,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp workspace");
        let paths = PathsConfig::rooted_at(dir.path());
        Self { dir, paths }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> Config {
        Config::for_workspace(self.root())
    }

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(path, contents)
            .unwrap_or_else(|e| panic!("Failed to write fixture '{}': {e}", path.display()));
    }

    pub fn write_snapshot(&self, value: Value) {
        Self::write(&self.paths.scores, &value.to_string());
    }

    pub fn write_registry(&self, value: Value) {
        Self::write(&self.paths.registry, &value.to_string());
    }

    pub fn write_suggestions(&self, value: Value) {
        Self::write(&self.paths.suggestions, &value.to_string());
    }

    pub fn write_winners(&self, value: Value) {
        Self::write(&self.paths.winners, &value.to_string());
    }

    pub fn write_daily(&self, date: &str, entries: &[Value]) {
        let body: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
        Self::write(
            &self.paths.daily_dir.join(format!("{date}.jsonl")),
            &body.join("\n"),
        );
    }

    pub fn write_daily_raw(&self, date: &str, contents: &str) {
        Self::write(&self.paths.daily_dir.join(format!("{date}.jsonl")), contents);
    }

    pub fn write_conversation(&self, participant: &str, lines: &[Value]) {
        let body: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        Self::write(
            &self
                .paths
                .per_sender_dir
                .join(participant)
                .join("conversation.jsonl"),
            &body.join("\n"),
        );
    }

    pub fn read_output(&self) -> String {
        fs::read_to_string(&self.paths.output).expect("Output document was not written")
    }
}

/// A daily-log line: the bot replying to `phone` with `msg`.
pub fn bot_reply(phone: &str, name: &str, msg: &str) -> Value {
    serde_json::json!({
        "ts": "2026-03-01T12:00:00Z",
        "from": "AlexBot",
        "phone": "bot",
        "msg": msg,
        "replyTo": name,
        "replyToPhone": phone,
        "origMsg": "what do you think?",
        "channel": "whatsapp",
        "chatId": "120363000000000000@g.us"
    })
}
