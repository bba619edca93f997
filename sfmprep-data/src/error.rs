//! Error types for parsing dataset text formats.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or parsing dataset metadata.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed intrinsics record: {0}")]
    MalformedCamFile(String),

    #[error("Calibration key not found: {0}")]
    MissingCalibKey(String),

    #[error("Calibration entry '{key}' has {found} values, expected {expected}")]
    CalibEntryLength {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid number '{value}' in {context}")]
    InvalidNumber { value: String, context: String },

    #[error("OXTS packet has {0} fields, expected at least 11")]
    ShortOxtsPacket(usize),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}
