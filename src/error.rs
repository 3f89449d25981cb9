//! Error types for aggregation and input loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the timeline aggregator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimelineError {
    /// No dated events to span a timeline over.
    #[error("cannot build a timeline from an empty event set")]
    EmptyInput,
}

/// Errors raised while reading input files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON for the expected records.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, wrong top-level shape.
    #[error("{}: expected a JSON {expected}, found {found}", path.display())]
    UnexpectedShape {
        path: PathBuf,
        expected: &'static str,
        found: &'static str,
    },
}

impl LoadError {
    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        LoadError::Json {
            path: path.into(),
            source,
        }
    }
}
