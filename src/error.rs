use std::{io, path::PathBuf};

use thiserror::Error;

/// Everything that can stop a level set from loading.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("could not read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("level data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level data contains no levels")]
    NoLevels,
    #[error("level {level} has an empty grid")]
    EmptyGrid { level: usize },
    #[error("level {level} row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        level: usize,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("setting {name} is invalid: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

pub type LevelResult<T> = Result<T, LevelError>;
