use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the photo_insights crate.
///
/// Only batch-level problems end up here. Per-file problems are recorded as
/// [`FailureRecord`](crate::structs::FailureRecord)s inside the corpus instead.
#[derive(Error, Debug)]
pub enum PhotoAnalyzerError {
    #[error("Root directory does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Root path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Exiftool failed to start")]
    Exiftool(#[from] exiftool::ExifToolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export failed: {0}")]
    Export(#[from] crate::export::error::ExportError),
}
