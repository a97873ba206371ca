use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown export format: {0:?} (expected csv, json or html)")]
    UnknownFormat(String),
}
