use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Result, SyncError};

/// What a best-effort read found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Loaded(T),
    /// The file or directory does not exist.
    Missing,
}

impl<T> LoadOutcome<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, LoadOutcome::Missing)
    }

    pub fn loaded(self) -> Option<T> {
        match self {
            LoadOutcome::Loaded(value) => Some(value),
            LoadOutcome::Missing => None,
        }
    }
}

fn read_text(path: &Path) -> Result<LoadOutcome<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(LoadOutcome::Loaded(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(LoadOutcome::Missing),
        Err(source) => Err(SyncError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read one JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<LoadOutcome<T>> {
    let text = match read_text(path)? {
        LoadOutcome::Loaded(text) => text,
        LoadOutcome::Missing => return Ok(LoadOutcome::Missing),
    };

    serde_json::from_str(&text)
        .map(LoadOutcome::Loaded)
        .map_err(|source| SyncError::Parse {
            path: path.to_path_buf(),
            line: None,
            source,
        })
}

/// Read a JSON-Lines file. Blank lines are skipped; any malformed line fails
/// the whole file so the caller can drop it as a unit.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<LoadOutcome<Vec<T>>> {
    let text = match read_text(path)? {
        LoadOutcome::Loaded(text) => text,
        LoadOutcome::Missing => return Ok(LoadOutcome::Missing),
    };

    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|source| SyncError::Parse {
            path: path.to_path_buf(),
            line: Some(index + 1),
            source,
        })?;
        records.push(record);
    }

    Ok(LoadOutcome::Loaded(records))
}

fn read_dir_sorted(dir: &Path) -> Result<LoadOutcome<Vec<PathBuf>>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
        Err(source) => {
            return Err(SyncError::Read {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SyncError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(LoadOutcome::Loaded(paths))
}

/// Files in `dir` with the given extension, in lexical file-name order.
pub fn list_files(dir: &Path, extension: &str) -> Result<LoadOutcome<Vec<PathBuf>>> {
    Ok(match read_dir_sorted(dir)? {
        LoadOutcome::Loaded(paths) => LoadOutcome::Loaded(
            paths
                .into_iter()
                .filter(|p| p.is_file())
                .filter(|p| p.extension().is_some_and(|ext| ext == extension))
                .collect(),
        ),
        LoadOutcome::Missing => LoadOutcome::Missing,
    })
}

/// Immediate sub-directories of `dir`, in lexical name order.
pub fn list_subdirs(dir: &Path) -> Result<LoadOutcome<Vec<PathBuf>>> {
    Ok(match read_dir_sorted(dir)? {
        LoadOutcome::Loaded(paths) => {
            LoadOutcome::Loaded(paths.into_iter().filter(|p| p.is_dir()).collect())
        }
        LoadOutcome::Missing => LoadOutcome::Missing,
    })
}

/// Turn a read outcome into data, degrading missing or broken sources to empty.
pub fn degrade<T: Default>(path: &Path, outcome: Result<LoadOutcome<T>>) -> T {
    match outcome {
        Ok(LoadOutcome::Loaded(value)) => value,
        Ok(LoadOutcome::Missing) => {
            debug!(path = %path.display(), "Source missing, using empty data");
            T::default()
        }
        Err(error) => {
            warn!(path = %path.display(), error = %error, "Source unreadable, using empty data");
            T::default()
        }
    }
}
