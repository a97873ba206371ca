//! # Photo Insights
//!
//! Extract embedded metadata from folders of photos and summarize it.
//!
//! This crate walks a directory tree, reads the Exif tags of every image it finds,
//! normalizes them into one typed [`PhotoRecord`] per photo and derives statistics
//! over the resulting [`PhotoCorpus`].
//!
//! ## Key Features
//!
//! - **Tolerant extraction**: files that can't be read or decoded become
//!   [`FailureRecord`]s; missing or malformed tags only leave a field empty.
//! - **Camera settings**: ISO, aperture, shutter speed, focal length, flash and
//!   metering modes, with APEX fallbacks.
//! - **GPS**: degree/minute/second triples resolved to signed decimal degrees.
//! - **Insights**: equipment frequency, settings distributions, temporal
//!   histograms, geographic extent and clusters, field completeness.
//! - **Export**: CSV, JSON and a standalone HTML report.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use photo_insights::{ExportFormat, PhotoAnalyzer, generate_insights};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = PhotoAnalyzer::builder().build()?;
//!     let corpus = analyzer.process_photo_directory(Path::new("photos"), true)?;
//!     let insights = generate_insights(&corpus);
//!
//!     println!("Most used camera: {:?}", insights.camera_models.most_common());
//!     ExportFormat::Json.export_to_path(&corpus, &insights, Path::new("photos.json"))?;
//!     Ok(())
//! }
//! ```

mod error;
pub mod export;
pub mod features;
pub mod insights;
pub mod photo_analyzer;
pub mod structs;
pub mod tags;
pub mod time;
pub mod walker;

#[cfg(test)]
mod test_support;

pub use error::PhotoAnalyzerError;
pub use export::{ExportError, ExportFormat, export, read_csv};
pub use features::gps::{Coordinates, resolve_coordinates};
pub use features::metadata::{NormalizedTags, normalize_tags};
pub use insights::{Granularity, InsightsSummary, generate_insights, temporal_histogram};
pub use photo_analyzer::{PhotoAnalyzer, TagBackend};
pub use structs::{FailureReason, FailureRecord, PhotoCorpus, PhotoRecord};
pub use tags::{RawTags, RawValue, TagSource, TagSourceError};
pub use walker::{CandidateFile, PhotoWalker, WalkEvent};
