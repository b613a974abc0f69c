use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path} (line {line:?}): {source}")]
    Parse {
        path: PathBuf,
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SyncError {
    /// True for failures the pipeline is allowed to degrade to empty input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SyncError::Read { .. } | SyncError::Parse { .. } | SyncError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
