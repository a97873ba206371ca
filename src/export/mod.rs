//! Serializers for a corpus and its insights.
pub mod document;
pub mod error;
pub mod report;
pub mod tabular;

pub use document::write_json;
pub use error::ExportError;
pub use report::{escape_html, write_html};
pub use tabular::{read_csv, write_csv};

use crate::insights::InsightsSummary;
use crate::structs::PhotoCorpus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// One row per photo. Failures and insights are not included.
    Csv,
    /// Photos, failures and insights in one document.
    Json,
    /// Standalone report page.
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Html => "html",
        }
    }

    pub fn export<W: Write>(
        self,
        corpus: &PhotoCorpus,
        insights: &InsightsSummary,
        writer: W,
    ) -> Result<(), ExportError> {
        match self {
            Self::Csv => write_csv(&corpus.photos, writer),
            Self::Json => write_json(corpus, insights, writer),
            Self::Html => write_html(corpus, insights, writer),
        }
    }

    /// Creates (or truncates) `path` and exports into it.
    pub fn export_to_path(
        self,
        corpus: &PhotoCorpus,
        insights: &InsightsSummary,
        path: &Path,
    ) -> Result<(), ExportError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.export(corpus, insights, &mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), format = %self, "export written");
        Ok(())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Writes the corpus in `format`.
pub fn export<W: Write>(
    format: ExportFormat,
    corpus: &PhotoCorpus,
    insights: &InsightsSummary,
    writer: W,
) -> Result<(), ExportError> {
    format.export(corpus, insights, writer)
}
