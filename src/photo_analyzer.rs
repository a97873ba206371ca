use crate::PhotoAnalyzerError;
use crate::features::gps::{resolve_altitude, resolve_coordinates};
use crate::features::metadata::normalize_tags;
use crate::structs::{FailureReason, FailureRecord, PhotoCorpus, PhotoRecord};
use crate::tags::{ExifReaderSource, ExifToolSource, RawTags, TagSource};
use crate::walker::{CandidateFile, DEFAULT_EXTENSIONS, PhotoWalker, WalkEvent};
use bon::bon;
use image::{ImageError, ImageFormat, ImageReader};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Which [`TagSource`] implementation the analyzer reads embedded tags with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagBackend {
    /// In-process reader built on `kamadak-exif`.
    #[default]
    ExifReader,
    /// A long-running `exiftool` process, found on the `PATH` unless an executable
    /// is given.
    ExifTool { executable: Option<PathBuf> },
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
}

enum Outcome {
    Photo(PhotoRecord),
    Failure(FailureRecord),
    DirectoryFailure(FailureRecord),
}

/// The main entry point for the photo extraction pipeline.
///
/// Holds the tag backend and the walk configuration. Create it once and reuse it
/// for any number of directories.
///
/// ```rust,no_run
/// # use std::path::Path;
/// # use photo_insights::{PhotoAnalyzer, PhotoAnalyzerError};
/// # fn main() -> Result<(), PhotoAnalyzerError> {
/// let analyzer = PhotoAnalyzer::builder()
///     .include_hidden(true)
///     .parallel(true)
///     .build()?;
/// let corpus = analyzer.process_photo_directory(Path::new("photos"), true)?;
/// println!("{} photos, {} failures", corpus.photos.len(), corpus.failures.len());
/// # Ok(())
/// # }
/// ```
pub struct PhotoAnalyzer {
    source: Box<dyn TagSource>,
    extensions: Vec<String>,
    include_hidden: bool,
    parallel: bool,
}

#[bon]
impl PhotoAnalyzer {
    /// Constructs a `PhotoAnalyzer` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `backend: TagBackend` - (Default: `TagBackend::ExifReader`) How embedded tags are read.
    /// * `source: Option<Box<dyn TagSource>>` - A custom tag source. Takes precedence over `backend`.
    /// * `extensions: Vec<String>` - (Default: `jpg, jpeg, tif, tiff, png, webp`) File extensions considered photos, case-insensitive.
    /// * `include_hidden: bool` - (Default: `false`) Also walk files and directories whose name starts with a dot.
    /// * `parallel: bool` - (Default: `false`) Analyze files on the rayon thread pool. Photo order still follows the walk.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoAnalyzerError::Exiftool`] if the exiftool backend is selected
    /// and the executable cannot be found or fails to start.
    #[builder]
    pub fn new(
        #[builder(default)] backend: TagBackend,
        source: Option<Box<dyn TagSource>>,
        #[builder(default = default_extensions())] extensions: Vec<String>,
        #[builder(default)] include_hidden: bool,
        #[builder(default)] parallel: bool,
    ) -> Result<Self, PhotoAnalyzerError> {
        let source: Box<dyn TagSource> = match (source, backend) {
            (Some(source), _) => source,
            (None, TagBackend::ExifReader) => Box::new(ExifReaderSource),
            (None, TagBackend::ExifTool { executable: None }) => Box::new(ExifToolSource::new()?),
            (None, TagBackend::ExifTool {
                executable: Some(path),
            }) => Box::new(ExifToolSource::with_executable(&path)?),
        };
        debug!(backend = source.name(), "photo analyzer ready");
        Ok(Self {
            source,
            extensions,
            include_hidden,
            parallel,
        })
    }

    /// Validates `root` and returns the lazy walker over it without processing
    /// anything, so callers can preview or stop early.
    ///
    /// # Errors
    ///
    /// * [`PhotoAnalyzerError::RootNotFound`]: `root` does not exist.
    /// * [`PhotoAnalyzerError::NotADirectory`]: `root` exists but is not a directory.
    /// * [`PhotoAnalyzerError::Io`]: `root` could not be inspected at all.
    pub fn walk(&self, root: &Path, recursive: bool) -> Result<PhotoWalker, PhotoAnalyzerError> {
        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PhotoAnalyzerError::RootNotFound(root.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_dir() {
            return Err(PhotoAnalyzerError::NotADirectory(root.to_path_buf()));
        }
        Ok(PhotoWalker::new(root, recursive)
            .with_extensions(&self.extensions)
            .include_hidden(self.include_hidden))
    }

    /// Walks `root` and turns every candidate file into either a [`PhotoRecord`] or
    /// a [`FailureRecord`].
    ///
    /// Per-file problems never abort the batch. Photos keep the order in which the
    /// walker produced them, also in parallel mode.
    ///
    /// # Errors
    ///
    /// Only the root checks of [`PhotoAnalyzer::walk`] are fatal.
    pub fn process_photo_directory(
        &self,
        root: &Path,
        recursive: bool,
    ) -> Result<PhotoCorpus, PhotoAnalyzerError> {
        let walker = self.walk(root, recursive)?;
        info!(
            root = %root.display(),
            recursive,
            parallel = self.parallel,
            backend = self.source.name(),
            "analyzing photo directory"
        );

        let outcomes: Vec<Outcome> = if self.parallel {
            let events: Vec<WalkEvent> = walker.iter().collect();
            events
                .into_par_iter()
                .map(|event| self.handle_event(event))
                .collect()
        } else {
            walker.iter().map(|event| self.handle_event(event)).collect()
        };

        let mut corpus = PhotoCorpus::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Photo(photo) => corpus.photos.push(photo),
                Outcome::Failure(failure) => corpus.failures.push(failure),
                Outcome::DirectoryFailure(failure) => corpus.directory_failures.push(failure),
            }
        }

        info!(
            photos = corpus.photos.len(),
            failures = corpus.failures.len(),
            directory_failures = corpus.directory_failures.len(),
            "photo directory analyzed"
        );
        Ok(corpus)
    }

    fn handle_event(&self, event: WalkEvent) -> Outcome {
        match event {
            WalkEvent::File(file) => match self.analyze_file(&file) {
                Ok(photo) => Outcome::Photo(photo),
                Err(failure) => Outcome::Failure(failure),
            },
            WalkEvent::FileFailure(failure) => {
                warn!(path = %failure.path.display(), detail = %failure.detail, "file skipped");
                Outcome::Failure(failure)
            }
            WalkEvent::DirectoryFailure(failure) => {
                warn!(path = %failure.path.display(), detail = %failure.detail, "directory skipped");
                Outcome::DirectoryFailure(failure)
            }
        }
    }

    /// Analyzes a single candidate file.
    ///
    /// The file must decode as an image; its embedded tags are optional. A tag
    /// source error on a decodable image is logged and the photo is kept without
    /// metadata.
    pub fn analyze_file(&self, file: &CandidateFile) -> Result<PhotoRecord, FailureRecord> {
        let path = file.path.as_path();
        let probe = if file.size_bytes == 0 {
            Err(FailureRecord::new(
                path,
                FailureReason::UnsupportedFormat,
                "zero-byte file",
            ))
        } else {
            probe_image(path)
        };
        let (format, (width, height)) = probe.inspect_err(|failure| {
            warn!(
                path = %path.display(),
                reason = %failure.reason,
                detail = %failure.detail,
                "file skipped"
            );
        })?;

        let mut record = PhotoRecord::bare(file.path.clone(), file.size_bytes, file.modified_at);
        record.width = (width > 0).then_some(width);
        record.height = (height > 0).then_some(height);

        let tags = self.source.read_tags(path).unwrap_or_else(|e| {
            warn!(
                path = %path.display(),
                backend = self.source.name(),
                error = %e,
                "could not read tags, keeping photo without metadata"
            );
            RawTags::new()
        });

        normalize_tags(&tags).apply_to(&mut record);
        if let Some(coordinates) = resolve_coordinates(&tags) {
            record.latitude = Some(coordinates.latitude);
            record.longitude = Some(coordinates.longitude);
        }
        record.altitude = resolve_altitude(&tags);

        debug!(
            path = %path.display(),
            format = ?format,
            tags = tags.len(),
            "photo analyzed"
        );
        Ok(record)
    }
}

/// Sniffs the format from the file content and decodes the header for the pixel
/// dimensions.
fn probe_image(path: &Path) -> Result<(ImageFormat, (u32, u32)), FailureRecord> {
    let unreadable = |e: std::io::Error| FailureRecord::new(path, FailureReason::FileUnreadable, e);
    let file = File::open(path).map_err(unreadable)?;
    let reader = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(unreadable)?;
    let Some(format) = reader.format() else {
        return Err(FailureRecord::new(
            path,
            FailureReason::UnsupportedFormat,
            "content is not a recognized image format",
        ));
    };
    let dimensions = reader.into_dimensions().map_err(|e| match e {
        ImageError::IoError(io) => FailureRecord::new(path, FailureReason::FileUnreadable, io),
        other => FailureRecord::new(path, FailureReason::UnsupportedFormat, other),
    })?;
    Ok((format, dimensions))
}
