// File: src/error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single non-blank line could not become a record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Fatal errors for a cleaning or indexing run.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("cannot open input file '{}': {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create output file '{}': {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line_number}: {source}")]
    Read {
        line_number: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {source}")]
    Write {
        #[source]
        source: io::Error,
    },

    #[error("malformed record on line {line_number}: {source} (line: {line})")]
    MalformedLine {
        line_number: usize,
        line: String,
        #[source]
        source: RecordError,
    },

    #[error("cannot read config file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl CleanError {
    /// True for failures of the underlying files rather than of their contents.
    pub fn is_file_access(&self) -> bool {
        matches!(
            self,
            CleanError::OpenInput { .. }
                | CleanError::CreateOutput { .. }
                | CleanError::Read { .. }
                | CleanError::Write { .. }
        )
    }

    pub(crate) fn write(source: io::Error) -> Self {
        CleanError::Write { source }
    }
}
