//! Error types for the preparation run.

use sfmprep_ingest::SourceError;
use sfmprep_pipeline::{DumpError, SplitError};
use thiserror::Error;

/// Errors that stop the tool with a non-zero exit status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot open dataset: {0}")]
    Source(#[from] SourceError),

    #[error("Dump failed: {0}")]
    Dump(#[from] DumpError),

    #[error("Cannot write train/val lists: {0}")]
    Split(#[from] SplitError),
}
