use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading MOT15 sequences or writing the YOLO dataset.
#[derive(Error, Debug)]
pub enum Error {
    #[error("io error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("section [{0}] not found in sequence info")]
    MissingSection(String),

    #[error("key '{0}' not found in sequence info")]
    MissingKey(String),

    #[error("value '{value}' for '{key}' is not a valid {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("line {line}: expected {expected} comma separated fields, got {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: could not read ground truth: {source}")]
    ReadLine {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("frame {frame} missing from ground truth stream")]
    MissingFrame { frame: usize },

    #[error("line {line}: field '{field}' has non-numeric value '{value}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("bad glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
