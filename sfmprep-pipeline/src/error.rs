//! Error types for pipeline operations.

use sfmprep_data::DataError;
use sfmprep_ingest::SourceError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the materialization of a single scene.
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("Scene source error: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to write intrinsics: {0}")]
    Intrinsics(#[from] DataError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors that abort the whole dump phase.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Failed to create output root {path}: {source}")]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to enumerate scenes: {0}")]
    Enumerate(#[from] SourceError),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors while writing the split manifests.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SplitError::Io {
            path: path.into(),
            source,
        }
    }
}

impl MaterializeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MaterializeError::Io {
            path: path.into(),
            source,
        }
    }
}
